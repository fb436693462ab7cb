//! High-level booking API for presentation layers.
//!
//! Wraps a [`Store`] running the booking reducer and turns each command into
//! a `Result`: `send` settles the full effect chain, then the session's
//! `last_error` decides the outcome.

use crate::catalog::Catalog;
use crate::error::BookingError;
use crate::ledger::BookingLedger;
use crate::payment::PaymentCard;
use crate::types::{BookingRecord, MovieDetails, MovieSummary, SeatLabel, UserProfile};
use crate::workflow::{BookingAction, BookingEnvironment, BookingReducer, Stage, WorkflowState};
use cineease_core::environment::Clock;
use cineease_runtime::Store;
use std::sync::Arc;

/// One user's booking session, from browsing to a confirmed ticket.
pub struct BookingService {
    catalog: Arc<Catalog>,
    store: Store<BookingReducer>,
}

impl BookingService {
    /// Creates a session for `user` against the given catalog and ledger.
    #[must_use]
    pub fn new(
        user: UserProfile,
        clock: Arc<dyn Clock>,
        catalog: Arc<Catalog>,
        ledger: Arc<dyn BookingLedger>,
    ) -> Self {
        let environment = BookingEnvironment::new(clock, Arc::clone(&catalog), ledger);
        let store = Store::new(WorkflowState::new(user), BookingReducer::new(), environment);
        Self { catalog, store }
    }

    /// Sends a command and reports how the session settled.
    async fn dispatch(&self, action: BookingAction) -> Result<(), BookingError> {
        self.store.send(action).await;
        self.store
            .state(|state| match &state.last_error {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            })
            .await
    }

    /// Lists the catalog in seed order.
    #[must_use]
    pub fn list_movies(&self) -> Vec<MovieSummary> {
        self.catalog.summaries()
    }

    /// Details for one movie, including live per-tier availability.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::MovieNotFound`] for unknown names.
    pub fn movie_details(&self, name: &str) -> Result<MovieDetails, BookingError> {
        self.catalog.details(name)
    }

    /// Chooses a movie, resetting any prior showtime and seats.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::MovieNotFound`] for unknown names.
    pub async fn select_movie(&self, name: &str) -> Result<(), BookingError> {
        self.dispatch(BookingAction::SelectMovie {
            name: name.to_string(),
        })
        .await
    }

    /// Chooses a showtime of the current movie, clearing selected seats.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidShowtime`] if the movie does not offer
    /// it, or [`BookingError::WrongStage`] if no movie is selected.
    pub async fn select_showtime(&self, showtime: &str) -> Result<(), BookingError> {
        self.dispatch(BookingAction::SelectShowtime {
            showtime: showtime.to_string(),
        })
        .await
    }

    /// Toggles one seat and returns the resulting seat count.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidSeatLabel`] for malformed labels and
    /// [`BookingError::WrongStage`] outside seat selection.
    pub async fn toggle_seat(&self, label: &str) -> Result<u32, BookingError> {
        let label = SeatLabel::parse(label)?;
        self.dispatch(BookingAction::ToggleSeat { label }).await?;
        Ok(self.store.state(WorkflowState::seat_count).await)
    }

    /// Moves the session into payment.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EmptySelection`] with no seats chosen, or
    /// [`BookingError::WrongStage`] if payment is already underway.
    pub async fn begin_checkout(&self) -> Result<(), BookingError> {
        self.dispatch(BookingAction::BeginCheckout).await
    }

    /// Submits payment details and, on success, returns the persisted
    /// booking record.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidPaymentFormat`] for malformed cards,
    /// [`BookingError::InsufficientSeats`] when availability ran out, and
    /// [`BookingError::PersistenceFailure`] if the ledger append failed. All
    /// of these leave the session in a retryable rejected stage.
    pub async fn submit_payment(&self, card: PaymentCard) -> Result<BookingRecord, BookingError> {
        self.dispatch(BookingAction::SubmitPayment { card }).await?;
        self.store
            .state(|state| match (&state.stage, &state.last_confirmed) {
                (Stage::Confirmed, Some(record)) => Ok(record.clone()),
                (stage, _) => Err(BookingError::WrongStage {
                    stage: stage.to_string(),
                }),
            })
            .await
    }

    /// Abandons a pending or rejected payment, keeping the selection.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::WrongStage`] if no payment is underway.
    pub async fn cancel_payment(&self) -> Result<(), BookingError> {
        self.dispatch(BookingAction::CancelPayment).await
    }

    /// Current workflow stage.
    pub async fn stage(&self) -> Stage {
        self.store.state(|state| state.stage).await
    }
}
