//! Format-only payment validation.
//!
//! The gate checks shapes, not funds: card number, expiry, and CVV must
//! match fixed digit patterns. There is no gateway behind it.

use crate::error::BookingError;
use serde::{Deserialize, Serialize};

/// Card details captured by the payment form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    /// Card number, expected to be exactly 16 digits
    pub number: String,
    /// Expiry in `MM/YY` form
    pub expiry: String,
    /// Verification value, expected to be exactly 3 digits
    pub cvv: String,
}

impl PaymentCard {
    /// Creates card details, trimming surrounding whitespace.
    #[must_use]
    pub fn new(number: &str, expiry: &str, cvv: &str) -> Self {
        Self {
            number: number.trim().to_string(),
            expiry: expiry.trim().to_string(),
            cvv: cvv.trim().to_string(),
        }
    }

    /// Checks the card number, expiry, and CVV formats.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidPaymentFormat`] if any field fails its
    /// pattern.
    pub fn validate(&self) -> Result<(), BookingError> {
        let valid =
            digits(&self.number, 16) && expiry_format(&self.expiry) && digits(&self.cvv, 3);
        if valid {
            Ok(())
        } else {
            Err(BookingError::InvalidPaymentFormat)
        }
    }
}

fn digits(text: &str, length: usize) -> bool {
    text.len() == length && text.bytes().all(|b| b.is_ascii_digit())
}

/// Two digits, a slash, two digits.
fn expiry_format(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 5
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b'/'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}
