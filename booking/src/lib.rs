//! # CineEase
//!
//! Single-venue movie ticket booking: a seeded catalog, per-tier seat
//! inventory with atomic check-and-decrement, a seat selection session, a
//! staged payment workflow, and an append-only CSV booking ledger.
//!
//! The workflow runs as a reducer on the `cineease-runtime` store;
//! [`service::BookingService`] is the facade presentation layers talk to.
//!
//! ```no_run
//! use cineease::catalog::Catalog;
//! use cineease::ledger::FileLedger;
//! use cineease::payment::PaymentCard;
//! use cineease::service::BookingService;
//! use cineease::types::UserProfile;
//! use cineease_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), cineease::error::BookingError> {
//! let service = BookingService::new(
//!     UserProfile::new("Alice", "9876543210")?,
//!     Arc::new(SystemClock),
//!     Arc::new(Catalog::seeded()),
//!     Arc::new(FileLedger::new("bookings.csv")),
//! );
//!
//! service.select_movie("Shadow Realm").await?;
//! service.select_showtime("10:00 AM").await?;
//! service.toggle_seat("S1").await?;
//! service.begin_checkout().await?;
//! let record = service
//!     .submit_payment(PaymentCard::new("1234567890123456", "12/25", "123"))
//!     .await?;
//! println!("booked: {}", record.ledger_line());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod payment;
pub mod service;
pub mod session;
pub mod types;
pub mod workflow;

pub use catalog::Catalog;
pub use config::Config;
pub use error::BookingError;
pub use ledger::{BookingLedger, FileLedger, MemoryLedger};
pub use payment::PaymentCard;
pub use service::BookingService;
pub use session::Selection;
pub use types::{BookingRecord, Movie, SeatCounts, SeatLabel, SeatTier, UserProfile};
pub use workflow::{BookingAction, BookingEnvironment, BookingReducer, Stage, WorkflowState};
