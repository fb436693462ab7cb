//! Domain types for the CineEase booking engine.
//!
//! Value objects (tiers, labels, money), the `Movie` entity, the session
//! identity, the immutable `BookingRecord`, and the read models handed to
//! the presentation layer.

use crate::error::BookingError;
use crate::inventory::Inventory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Tiers and seat labels
// ============================================================================

/// Seating category with independent capacity per movie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatTier {
    /// Silver tier, label prefix `S`
    Silver,
    /// Gold tier, label prefix `G`
    Gold,
    /// VIP tier, label prefix `V`
    Vip,
}

impl SeatTier {
    /// All tiers, in display order.
    pub const ALL: [Self; 3] = [Self::Silver, Self::Gold, Self::Vip];

    /// The character that opens every seat label of this tier.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Silver => 'S',
            Self::Gold => 'G',
            Self::Vip => 'V',
        }
    }

    /// Tier encoded by a label's first character, if any.
    #[must_use]
    pub const fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'S' => Some(Self::Silver),
            'G' => Some(Self::Gold),
            'V' => Some(Self::Vip),
            _ => None,
        }
    }
}

impl fmt::Display for SeatTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Vip => "VIP",
        };
        write!(f, "{name}")
    }
}

/// A seat label such as `S1` or `V12`; the leading character encodes the
/// tier, the rest is a decimal index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatLabel(String);

impl SeatLabel {
    /// Parses and validates a seat label.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidSeatLabel`] if the label does not
    /// start with a tier prefix followed by at least one digit.
    pub fn parse(label: &str) -> Result<Self, BookingError> {
        let mut chars = label.chars();
        let tier = chars.next().and_then(SeatTier::from_prefix);
        let index = chars.as_str();
        let index_ok = !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit());
        if tier.is_some() && index_ok {
            Ok(Self(label.to_string()))
        } else {
            Err(BookingError::InvalidSeatLabel(label.to_string()))
        }
    }

    /// Tier encoded by this label.
    #[must_use]
    pub fn tier(&self) -> SeatTier {
        // Validated at parse time; the fallback is unreachable.
        self.0
            .chars()
            .next()
            .and_then(SeatTier::from_prefix)
            .unwrap_or(SeatTier::Silver)
    }

    /// The raw label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Money amount in whole currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Creates an amount from whole units.
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// The amount in whole units.
    #[must_use]
    pub const fn units(self) -> u64 {
        self.0
    }

    /// This amount multiplied by a seat count.
    #[must_use]
    pub const fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(count as u64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs {}", self.0)
    }
}

/// Flat per-seat ticket price, identical across tiers.
pub const TICKET_PRICE: Money = Money::from_units(150);

// ============================================================================
// Seat counts and movies
// ============================================================================

/// Per-tier seat counts for one movie. Counts are unsigned, so they can
/// never go negative; only a successful booking decrements them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCounts {
    /// Silver seats
    pub silver: u32,
    /// Gold seats
    pub gold: u32,
    /// VIP seats
    pub vip: u32,
}

impl SeatCounts {
    /// Creates seat counts per tier.
    #[must_use]
    pub const fn new(silver: u32, gold: u32, vip: u32) -> Self {
        Self { silver, gold, vip }
    }

    /// Count for one tier.
    #[must_use]
    pub const fn get(self, tier: SeatTier) -> u32 {
        match tier {
            SeatTier::Silver => self.silver,
            SeatTier::Gold => self.gold,
            SeatTier::Vip => self.vip,
        }
    }

    /// Sets the count for one tier.
    pub const fn set(&mut self, tier: SeatTier, count: u32) {
        match tier {
            SeatTier::Silver => self.silver = count,
            SeatTier::Gold => self.gold = count,
            SeatTier::Vip => self.vip = count,
        }
    }
}

/// Immutable movie metadata plus its mutable seat inventory.
///
/// Created once at startup, shared via `Arc`, alive for the process
/// lifetime. Only the inventory changes, and only through
/// [`Inventory::book_seats`](crate::inventory::Inventory::book_seats).
#[derive(Debug)]
pub struct Movie {
    /// Movie title, the unique catalog key
    pub name: String,
    /// Short description
    pub description: String,
    /// Theater the movie screens in
    pub theater: String,
    /// Ordered showtime display strings
    pub showtimes: Vec<String>,
    /// Per-tier seat inventory
    pub inventory: Inventory,
}

impl Movie {
    /// Creates a movie with its initial seat capacity.
    #[must_use]
    pub fn new(
        name: &str,
        description: &str,
        theater: &str,
        showtimes: &[&str],
        seats: SeatCounts,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            theater: theater.to_string(),
            showtimes: showtimes.iter().map(ToString::to_string).collect(),
            inventory: Inventory::new(seats),
        }
    }

    /// Whether `showtime` is one of this movie's scheduled slots.
    #[must_use]
    pub fn offers_showtime(&self, showtime: &str) -> bool {
        self.showtimes.iter().any(|s| s == showtime)
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Identity attached to every booking record produced in a session.
///
/// Validated once at login; treated as opaque immutable strings afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    username: String,
    phone: String,
}

impl UserProfile {
    /// Validates and creates a profile.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidProfile`] unless the username is
    /// non-empty and the phone is exactly 10 digits.
    pub fn new(username: &str, phone: &str) -> Result<Self, BookingError> {
        let username = username.trim();
        let phone = phone.trim();
        let phone_ok = phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit());
        if username.is_empty() || !phone_ok {
            return Err(BookingError::InvalidProfile);
        }
        Ok(Self {
            username: username.to_string(),
            phone: phone.to_string(),
        })
    }

    /// The user's display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The user's 10-digit phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

// ============================================================================
// Booking records and read models
// ============================================================================

/// Immutable record of a confirmed booking.
///
/// Created only on successful payment, appended to the ledger immediately,
/// never mutated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Session username
    pub username: String,
    /// Session phone number
    pub phone: String,
    /// Booked movie
    pub movie_name: String,
    /// Booked showtime
    pub showtime: String,
    /// Tier derived from the first selected seat
    pub tier: SeatTier,
    /// Number of seats booked
    pub seat_count: u32,
    /// Total charged, `seat_count` times the flat ticket price
    pub total: Money,
    /// When the booking was confirmed (not part of the ledger line)
    pub confirmed_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Renders the record as one comma-separated ledger line, without the
    /// trailing newline. No header, no escaping of embedded commas.
    #[must_use]
    pub fn ledger_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.username,
            self.phone,
            self.movie_name,
            self.showtime,
            self.tier,
            self.seat_count,
            self.total.units()
        )
    }
}

/// Read model for catalog browsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Movie title
    pub name: String,
    /// Theater the movie screens in
    pub theater: String,
    /// Ordered showtimes
    pub showtimes: Vec<String>,
}

/// Read model for a single movie, including live availability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Movie title
    pub name: String,
    /// Short description
    pub description: String,
    /// Theater the movie screens in
    pub theater: String,
    /// Ordered showtimes
    pub showtimes: Vec<String>,
    /// Current per-tier availability
    pub available: SeatCounts,
}
