//! Error taxonomy for booking operations.
//!
//! Every operation the presentation layer can invoke returns one of these as
//! a typed result; nothing fails silently.

use crate::types::SeatTier;
use thiserror::Error;

/// Errors returned by catalog, session, and workflow operations.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum BookingError {
    /// Movie name unknown to the catalog.
    #[error("movie not found: {0}")]
    MovieNotFound(String),

    /// Showtime not offered by the selected movie.
    #[error("showtime '{showtime}' is not offered by '{movie}'")]
    InvalidShowtime {
        /// The selected movie
        movie: String,
        /// The rejected showtime
        showtime: String,
    },

    /// Seat label does not encode a known tier prefix and index.
    #[error("invalid seat label: {0}")]
    InvalidSeatLabel(String),

    /// Checkout or payment attempted with no seats chosen.
    #[error("no seats selected")]
    EmptySelection,

    /// Card, expiry, or CVV failed the format pattern.
    #[error("invalid payment details")]
    InvalidPaymentFormat,

    /// Requested count exceeds current tier availability.
    #[error("insufficient {tier} seats: requested {requested}, available {available}")]
    InsufficientSeats {
        /// Tier the booking targeted
        tier: SeatTier,
        /// Seats requested
        requested: u32,
        /// Seats actually available
        available: u32,
    },

    /// Ledger append failed; the booking was not confirmed.
    #[error("failed to record booking: {0}")]
    PersistenceFailure(String),

    /// Username empty or phone not exactly 10 digits.
    #[error("username must be non-empty and phone exactly 10 digits")]
    InvalidProfile,

    /// Command arrived in a workflow stage where it is not permitted.
    #[error("command not permitted while {stage}")]
    WrongStage {
        /// Stage the workflow was in
        stage: String,
    },
}
