//! Static movie registry.
//!
//! Seeded once at process start and read-only afterwards; the only mutation
//! behind it is the per-movie inventory. The catalog is an explicitly owned
//! value injected into whatever needs it, never process-wide state, so tests
//! build isolated instances freely.

use crate::error::BookingError;
use crate::types::{Movie, MovieDetails, MovieSummary, SeatCounts};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of movies, ordered as seeded.
#[derive(Debug)]
pub struct Catalog {
    movies: Vec<Arc<Movie>>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from an ordered list of movies. Names are unique;
    /// a repeated name keeps the first entry.
    #[must_use]
    pub fn new(movies: Vec<Movie>) -> Self {
        let movies: Vec<Arc<Movie>> = movies.into_iter().map(Arc::new).collect();
        let mut by_name = HashMap::with_capacity(movies.len());
        for (index, movie) in movies.iter().enumerate() {
            by_name.entry(movie.name.clone()).or_insert(index);
        }
        Self { movies, by_name }
    }

    /// The stock single-venue catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(vec![
            Movie::new(
                "Shadow Realm",
                "A dark fantasy adventure.",
                "Phoenix Cinema",
                &["10:00 AM", "1:00 PM"],
                SeatCounts::new(14, 13, 11),
            ),
            Movie::new(
                "Mind Games",
                "A gripping sci-fi mystery.",
                "IMAX Arena",
                &["2:00 PM", "5:00 PM"],
                SeatCounts::new(16, 14, 12),
            ),
            Movie::new(
                "The Last Symphony",
                "A heartfelt story of a musician.",
                "Star Theater",
                &["11:30 AM", "3:30 PM"],
                SeatCounts::new(13, 11, 10),
            ),
        ])
    }

    /// Looks up a movie by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::MovieNotFound`] for unknown names.
    pub fn lookup(&self, name: &str) -> Result<Arc<Movie>, BookingError> {
        self.by_name
            .get(name)
            .and_then(|&index| self.movies.get(index))
            .cloned()
            .ok_or_else(|| BookingError::MovieNotFound(name.to_string()))
    }

    /// Ordered summaries for catalog browsing.
    #[must_use]
    pub fn summaries(&self) -> Vec<MovieSummary> {
        self.movies
            .iter()
            .map(|movie| MovieSummary {
                name: movie.name.clone(),
                theater: movie.theater.clone(),
                showtimes: movie.showtimes.clone(),
            })
            .collect()
    }

    /// Details for one movie, including current per-tier availability.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::MovieNotFound`] for unknown names.
    pub fn details(&self, name: &str) -> Result<MovieDetails, BookingError> {
        let movie = self.lookup(name)?;
        Ok(MovieDetails {
            name: movie.name.clone(),
            description: movie.description.clone(),
            theater: movie.theater.clone(),
            showtimes: movie.showtimes.clone(),
            available: movie.inventory.snapshot(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::SeatTier;

    #[test]
    fn lookup_finds_seeded_movies() {
        let catalog = Catalog::seeded();
        let movie = catalog.lookup("Shadow Realm").unwrap();
        assert_eq!(movie.theater, "Phoenix Cinema");
        assert_eq!(movie.showtimes, ["10:00 AM", "1:00 PM"]);
        assert_eq!(movie.inventory.available(SeatTier::Silver), 14);
    }

    #[test]
    fn lookup_rejects_unknown_names() {
        let catalog = Catalog::seeded();
        let error = catalog.lookup("Nonexistent").unwrap_err();
        assert_eq!(
            error,
            BookingError::MovieNotFound("Nonexistent".to_string())
        );
    }

    #[test]
    fn summaries_keep_seed_order() {
        let catalog = Catalog::seeded();
        let names: Vec<String> = catalog.summaries().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Shadow Realm", "Mind Games", "The Last Symphony"]);
    }

    #[test]
    fn details_reflect_bookings() {
        let catalog = Catalog::seeded();
        let movie = catalog.lookup("Mind Games").unwrap();
        movie.inventory.book_seats(SeatTier::Gold, 3).unwrap();

        let details = catalog.details("Mind Games").unwrap();
        assert_eq!(details.available.gold, 11);
        assert_eq!(details.available.silver, 16);
    }
}
