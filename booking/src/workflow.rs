//! Booking workflow state machine.
//!
//! Stages run `Browsing → SeatSelecting → ReadyToPay → Paying → Confirmed`,
//! with `Rejected` as a retryable payment-failure stage rather than a dead
//! end. `ReadyToPay` is automatic: it holds while at least one seat is
//! selected and reverts the moment the selection empties.
//!
//! The presentation layer drives the machine through commands; the only
//! effect is the payment settlement, which books seats atomically and then
//! appends to the ledger before the confirmation event is fed back.

use crate::catalog::Catalog;
use crate::error::BookingError;
use crate::ledger::BookingLedger;
use crate::payment::PaymentCard;
use crate::session::Selection;
use crate::types::{BookingRecord, SeatLabel, TICKET_PRICE, UserProfile};
use cineease_core::effect::Effect;
use cineease_core::environment::Clock;
use cineease_core::reducer::Reducer;
use cineease_core::{SmallVec, smallvec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Stages and state
// ============================================================================

/// Workflow stage for one booking attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// No movie chosen yet
    Browsing,
    /// Movie (and possibly showtime) chosen, no seats selected
    SeatSelecting,
    /// At least one seat selected; checkout may begin
    ReadyToPay,
    /// Checkout requested; awaiting payment details
    Paying,
    /// Booking persisted. Doubles as the at-rest stage for the next booking:
    /// a fresh selection for the same movie is ready, and selecting a movie
    /// or showtime proceeds from here
    Confirmed,
    /// Payment attempt failed; retry or cancel
    Rejected,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Browsing => "browsing",
            Self::SeatSelecting => "selecting seats",
            Self::ReadyToPay => "ready to pay",
            Self::Paying => "paying",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        };
        write!(f, "{name}")
    }
}

/// Workflow state for one user session.
#[derive(Clone, Debug)]
pub struct WorkflowState {
    /// Identity attached to every confirmed booking
    pub user: UserProfile,
    /// Current stage
    pub stage: Stage,
    /// Current selection, once a movie has been chosen
    pub selection: Option<Selection>,
    /// Error from the most recent command, if it failed
    pub last_error: Option<BookingError>,
    /// The most recent confirmed booking
    pub last_confirmed: Option<BookingRecord>,
}

impl WorkflowState {
    /// Creates a fresh session for `user`.
    #[must_use]
    pub const fn new(user: UserProfile) -> Self {
        Self {
            user,
            stage: Stage::Browsing,
            selection: None,
            last_error: None,
            last_confirmed: None,
        }
    }

    /// Seats currently selected.
    #[must_use]
    pub fn seat_count(&self) -> u32 {
        self.selection.as_ref().map_or(0, Selection::seat_count)
    }

    /// `ReadyToPay` holds exactly while the selection is non-empty.
    fn settle_selection_stage(&mut self) {
        self.stage = if self.seat_count() > 0 {
            Stage::ReadyToPay
        } else {
            Stage::SeatSelecting
        };
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Actions for the booking workflow: commands from the presentation layer
/// plus events fed back by the payment effect.
#[derive(Clone, Debug)]
pub enum BookingAction {
    // Commands
    /// Choose a movie; resets showtime and seats
    SelectMovie {
        /// Movie name, the catalog key
        name: String,
    },
    /// Choose a showtime of the current movie; clears seats
    SelectShowtime {
        /// Showtime display string
        showtime: String,
    },
    /// Toggle one seat on or off
    ToggleSeat {
        /// The seat to toggle
        label: SeatLabel,
    },
    /// Request checkout for the current selection
    BeginCheckout,
    /// Submit payment details for the pending checkout
    SubmitPayment {
        /// Card details to validate
        card: PaymentCard,
    },
    /// Abandon the pending checkout, keeping the selection
    CancelPayment,

    // Events
    /// Seats were booked and the record persisted
    BookingConfirmed {
        /// The persisted record
        record: BookingRecord,
    },
    /// A payment attempt failed; the stage becomes retryable `Rejected`
    PaymentFailed {
        /// Why the attempt failed
        error: BookingError,
    },
}

// ============================================================================
// Environment
// ============================================================================

/// Environment dependencies for the booking workflow.
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for confirmation timestamps
    pub clock: Arc<dyn Clock>,
    /// Movie registry owning the per-movie inventories
    pub catalog: Arc<Catalog>,
    /// Sink for confirmed booking records
    pub ledger: Arc<dyn BookingLedger>,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        catalog: Arc<Catalog>,
        ledger: Arc<dyn BookingLedger>,
    ) -> Self {
        Self {
            clock,
            catalog,
            ledger,
        }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the booking workflow.
#[derive(Clone, Debug)]
pub struct BookingReducer;

type Effects = SmallVec<[Effect<BookingAction>; 4]>;

impl BookingReducer {
    /// Creates a new `BookingReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn fail(state: &mut WorkflowState, error: BookingError) -> Effects {
        state.last_error = Some(error);
        SmallVec::new()
    }

    fn select_movie(state: &mut WorkflowState, env: &BookingEnvironment, name: &str) -> Effects {
        match env.catalog.lookup(name) {
            Ok(movie) => {
                state.selection = Some(Selection::new(movie));
                state.settle_selection_stage();
                tracing::debug!(movie = %name, "movie selected");
                SmallVec::new()
            }
            Err(error) => Self::fail(state, error),
        }
    }

    fn select_showtime(state: &mut WorkflowState, showtime: &str) -> Effects {
        let stage = state.stage;
        let Some(selection) = state.selection.as_mut() else {
            return Self::fail(
                state,
                BookingError::WrongStage {
                    stage: stage.to_string(),
                },
            );
        };
        match selection.select_showtime(showtime) {
            Ok(()) => {
                state.settle_selection_stage();
                tracing::debug!(%showtime, "showtime selected");
                SmallVec::new()
            }
            Err(error) => Self::fail(state, error),
        }
    }

    fn toggle_seat(state: &mut WorkflowState, label: SeatLabel) -> Effects {
        if !matches!(state.stage, Stage::SeatSelecting | Stage::ReadyToPay) {
            return Self::fail(
                state,
                BookingError::WrongStage {
                    stage: state.stage.to_string(),
                },
            );
        }

        // Seats can only be toggled once a showtime is picked.
        let has_showtime = state
            .selection
            .as_ref()
            .is_some_and(|selection| selection.showtime().is_some());
        if !has_showtime {
            return Self::fail(
                state,
                BookingError::WrongStage {
                    stage: state.stage.to_string(),
                },
            );
        }

        if let Some(selection) = state.selection.as_mut() {
            selection.toggle_seat(label);
        }
        state.settle_selection_stage();
        SmallVec::new()
    }

    fn begin_checkout(state: &mut WorkflowState) -> Effects {
        match state.stage {
            Stage::ReadyToPay => {
                state.stage = Stage::Paying;
                SmallVec::new()
            }
            Stage::Browsing | Stage::SeatSelecting | Stage::Confirmed => {
                Self::fail(state, BookingError::EmptySelection)
            }
            Stage::Paying | Stage::Rejected => Self::fail(
                state,
                BookingError::WrongStage {
                    stage: state.stage.to_string(),
                },
            ),
        }
    }

    fn submit_payment(
        state: &mut WorkflowState,
        env: &BookingEnvironment,
        card: &PaymentCard,
    ) -> Effects {
        if !matches!(state.stage, Stage::Paying | Stage::Rejected) {
            return Self::fail(
                state,
                BookingError::WrongStage {
                    stage: state.stage.to_string(),
                },
            );
        }

        let Some(selection) = state.selection.as_ref() else {
            return Self::fail(state, BookingError::EmptySelection);
        };
        let Some(showtime) = selection.showtime() else {
            return Self::fail(state, BookingError::EmptySelection);
        };
        let Some(tier) = selection.derived_tier() else {
            return Self::fail(state, BookingError::EmptySelection);
        };
        let count = selection.seat_count();

        if let Err(error) = card.validate() {
            state.stage = Stage::Rejected;
            return Self::fail(state, error);
        }

        let movie = Arc::clone(selection.movie());
        let record = BookingRecord {
            username: state.user.username().to_string(),
            phone: state.user.phone().to_string(),
            movie_name: movie.name.clone(),
            showtime: showtime.to_string(),
            tier,
            seat_count: count,
            total: TICKET_PRICE.times(count),
            confirmed_at: env.clock.now(),
        };
        let ledger = Arc::clone(&env.ledger);

        smallvec![Effect::future(async move {
            // The whole selection is booked as one tier, derived from the
            // first seat label.
            if let Err(error) = movie.inventory.book_seats(tier, count) {
                return Some(BookingAction::PaymentFailed { error });
            }

            // A failed append leaves the decrement in place; the booking is
            // reported as failed to the caller.
            match ledger.append(&record).await {
                Ok(()) => Some(BookingAction::BookingConfirmed { record }),
                Err(error) => Some(BookingAction::PaymentFailed {
                    error: BookingError::PersistenceFailure(error.to_string()),
                }),
            }
        })]
    }

    fn cancel_payment(state: &mut WorkflowState) -> Effects {
        if !matches!(state.stage, Stage::Paying | Stage::Rejected) {
            return Self::fail(
                state,
                BookingError::WrongStage {
                    stage: state.stage.to_string(),
                },
            );
        }
        // No mutation; the selection survives the abandoned checkout.
        state.settle_selection_stage();
        SmallVec::new()
    }

    fn booking_confirmed(state: &mut WorkflowState, record: BookingRecord) -> Effects {
        tracing::info!(
            movie = %record.movie_name,
            showtime = %record.showtime,
            tier = %record.tier,
            seats = record.seat_count,
            total = record.total.units(),
            "booking confirmed"
        );
        state.stage = Stage::Confirmed;
        state.last_error = None;
        state.last_confirmed = Some(record);
        // Fresh selection for the same movie: showtime and seats reset.
        if let Some(selection) = state.selection.take() {
            state.selection = Some(Selection::new(Arc::clone(selection.movie())));
        }
        SmallVec::new()
    }

    fn payment_failed(state: &mut WorkflowState, error: BookingError) -> Effects {
        tracing::warn!(%error, "payment attempt failed");
        state.stage = Stage::Rejected;
        Self::fail(state, error)
    }
}

impl Default for BookingReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for BookingReducer {
    type State = WorkflowState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // Each command starts with a clean error slate; events set their own.
        match action {
            BookingAction::SelectMovie { name } => {
                state.last_error = None;
                Self::select_movie(state, env, &name)
            }
            BookingAction::SelectShowtime { showtime } => {
                state.last_error = None;
                Self::select_showtime(state, &showtime)
            }
            BookingAction::ToggleSeat { label } => {
                state.last_error = None;
                Self::toggle_seat(state, label)
            }
            BookingAction::BeginCheckout => {
                state.last_error = None;
                Self::begin_checkout(state)
            }
            BookingAction::SubmitPayment { card } => {
                state.last_error = None;
                Self::submit_payment(state, env, &card)
            }
            BookingAction::CancelPayment => {
                state.last_error = None;
                Self::cancel_payment(state)
            }
            BookingAction::BookingConfirmed { record } => Self::booking_confirmed(state, record),
            BookingAction::PaymentFailed { error } => Self::payment_failed(state, error),
        }
    }
}
