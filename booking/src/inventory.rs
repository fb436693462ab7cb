//! Per-movie seat inventory with atomic tier booking.
//!
//! The check-and-decrement in [`Inventory::book_seats`] is one critical
//! section per movie, so two concurrent callers can never both pass the
//! availability check before either decrements. Movies do not share state;
//! each carries its own lock.

use crate::error::BookingError;
use crate::types::{SeatCounts, SeatTier};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mutable per-tier seat counts for one movie.
#[derive(Debug)]
pub struct Inventory {
    counts: Mutex<SeatCounts>,
}

impl Inventory {
    /// Creates an inventory with the given starting capacity.
    #[must_use]
    pub const fn new(counts: SeatCounts) -> Self {
        Self {
            counts: Mutex::new(counts),
        }
    }

    /// Current availability for one tier: capacity minus all prior
    /// successful bookings.
    #[must_use]
    pub fn available(&self, tier: SeatTier) -> u32 {
        self.lock().get(tier)
    }

    /// Snapshot of all tiers at once.
    #[must_use]
    pub fn snapshot(&self) -> SeatCounts {
        *self.lock()
    }

    /// Atomically books `count` seats in `tier`.
    ///
    /// On success the tier's count drops by `count`; on failure the
    /// inventory is left unchanged.
    ///
    /// # Errors
    ///
    /// [`BookingError::EmptySelection`] for a zero count,
    /// [`BookingError::InsufficientSeats`] when fewer than `count` seats
    /// remain in the tier.
    pub fn book_seats(&self, tier: SeatTier, count: u32) -> Result<(), BookingError> {
        if count == 0 {
            return Err(BookingError::EmptySelection);
        }

        let mut counts = self.lock();
        let available = counts.get(tier);
        if available < count {
            tracing::debug!(%tier, requested = count, available, "booking refused");
            return Err(BookingError::InsufficientSeats {
                tier,
                requested: count,
                available,
            });
        }

        counts.set(tier, available - count);
        tracing::debug!(%tier, booked = count, remaining = available - count, "seats booked");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, SeatCounts> {
        // A poisoned lock only means a panic elsewhere while holding it;
        // the counts themselves are plain integers and remain usable.
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
