//! Transient selection session: movie, showtime, and toggled seats.

use crate::error::BookingError;
use crate::types::{Movie, SeatLabel, SeatTier};
use std::sync::Arc;

/// In-progress choice of movie, showtime, and seats, prior to payment.
///
/// Seats keep insertion order: the booking tier is derived from the first
/// seat toggled on. Mixed-tier selections are not rejected; the whole set is
/// billed at that derived tier, matching the single-tier assumption of the
/// venue flow.
#[derive(Clone, Debug)]
pub struct Selection {
    movie: Arc<Movie>,
    showtime: Option<String>,
    seats: Vec<SeatLabel>,
}

impl Selection {
    /// Starts a fresh selection for `movie`: no showtime, no seats.
    #[must_use]
    pub const fn new(movie: Arc<Movie>) -> Self {
        Self {
            movie,
            showtime: None,
            seats: Vec::new(),
        }
    }

    /// The selected movie.
    #[must_use]
    pub const fn movie(&self) -> &Arc<Movie> {
        &self.movie
    }

    /// The selected showtime, once one has been picked.
    #[must_use]
    pub fn showtime(&self) -> Option<&str> {
        self.showtime.as_deref()
    }

    /// Seats currently toggled on, in toggle order.
    #[must_use]
    pub fn seats(&self) -> &[SeatLabel] {
        &self.seats
    }

    /// Picks a showtime and clears any prior seat selection.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidShowtime`] if the movie does not offer
    /// `showtime`; the selection is left unchanged.
    pub fn select_showtime(&mut self, showtime: &str) -> Result<(), BookingError> {
        if !self.movie.offers_showtime(showtime) {
            return Err(BookingError::InvalidShowtime {
                movie: self.movie.name.clone(),
                showtime: showtime.to_string(),
            });
        }
        self.showtime = Some(showtime.to_string());
        self.seats.clear();
        Ok(())
    }

    /// Adds the seat if absent, removes it if present. A second toggle of
    /// the same label undoes the first.
    pub fn toggle_seat(&mut self, label: SeatLabel) {
        if let Some(position) = self.seats.iter().position(|seat| *seat == label) {
            self.seats.remove(position);
        } else {
            self.seats.push(label);
        }
    }

    /// Number of seats currently selected.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // a venue holds far fewer than u32::MAX seats
    pub fn seat_count(&self) -> u32 {
        self.seats.len() as u32
    }

    /// Tier implied by the first seat toggled on; `None` when nothing is
    /// selected.
    #[must_use]
    pub fn derived_tier(&self) -> Option<SeatTier> {
        self.seats.first().map(SeatLabel::tier)
    }
}
