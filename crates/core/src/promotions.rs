//! Promotion codes
//!
//! A promo code grants a flat rupee discount until the end of its expiry
//! date. Codes carry no "used" marker: any number of bookings may redeem one
//! until it expires.

use std::fmt::{self, Display, Formatter};

use jiff::{ToSpan, civil::Date};
use rand::Rng;
use thiserror::Error;

use crate::codes::generate_promo_code;

/// Calendar date format used for stored and submitted dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored promo code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    /// Opaque, globally unique code string.
    pub code: String,

    /// Flat discount in whole rupees.
    pub discount: u32,

    /// Last calendar day on which the code is accepted.
    pub expiry_date: Date,

    /// Location the code is restricted to, if any.
    pub location: Option<String>,
}

impl PromoCode {
    /// Whether the code is still accepted on `today`. The expiry day itself
    /// is included.
    pub fn is_valid_on(&self, today: Date) -> bool {
        self.expiry_date >= today
    }
}

/// Why a requested promo code was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No code matched (or none matched at the requested location).
    UnknownCode,

    /// The code exists but its expiry date has passed.
    Expired,
}

impl Rejection {
    /// Short machine-friendly reason.
    pub const fn reason(self) -> &'static str {
        match self {
            Self::UnknownCode => "unknown code",
            Self::Expired => "expired",
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Outcome of validating a requested promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoValidation {
    /// The discount to apply. Zero when no code was requested.
    Valid {
        /// Discount in whole rupees.
        discount: u32,
    },

    /// The code must not be applied.
    Rejected(Rejection),
}

impl PromoValidation {
    /// Verdict for a submission without a promo code.
    pub const NOT_REQUESTED: Self = Self::Valid { discount: 0 };

    /// Decide validity for a looked-up code.
    pub fn evaluate(found: Option<&PromoCode>, today: Date) -> Self {
        match found {
            None => Self::Rejected(Rejection::UnknownCode),
            Some(promo) if promo.is_valid_on(today) => Self::Valid {
                discount: promo.discount,
            },
            Some(_) => Self::Rejected(Rejection::Expired),
        }
    }

    /// The discount to apply, if valid.
    pub fn discount(self) -> Option<u32> {
        match self {
            Self::Valid { discount } => Some(discount),
            Self::Rejected(_) => None,
        }
    }
}

/// Trim a submitted promo code, treating blank input as "no code".
pub fn requested_code(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|code| !code.is_empty())
}

/// A stored expiry date that could not be read.
#[derive(Debug, Error)]
#[error("stored expiry date {value:?} is not a YYYY-MM-DD date")]
pub struct MalformedExpiry {
    /// The raw stored value.
    pub value: String,

    #[source]
    source: jiff::Error,
}

/// Parse a stored `YYYY-MM-DD` expiry date.
pub fn parse_expiry(raw: &str) -> Result<Date, MalformedExpiry> {
    Date::strptime(DATE_FORMAT, raw).map_err(|source| MalformedExpiry {
        value: raw.to_string(),
        source,
    })
}

/// Errors raised while issuing a new promo code.
#[derive(Debug, Error)]
pub enum IssueError {
    /// The validity window runs past the supported calendar range.
    #[error("promo code expiry is out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),
}

/// Parameters for issuing codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRules {
    /// Smallest discount drawn, inclusive.
    pub min_discount: u32,

    /// Largest discount drawn, inclusive.
    pub max_discount: u32,

    /// Days from the issue date until the expiry date.
    pub validity_days: i32,

    /// Insert attempts before a code collision is reported.
    pub max_attempts: u32,
}

impl Default for PromotionRules {
    fn default() -> Self {
        Self {
            min_discount: 10,
            max_discount: 50,
            validity_days: 3,
            max_attempts: 3,
        }
    }
}

impl PromotionRules {
    /// Draw a discount uniformly from the configured inclusive range.
    pub fn draw_discount<R: Rng>(&self, rng: &mut R) -> u32 {
        let low = self.min_discount.min(self.max_discount);
        let high = self.min_discount.max(self.max_discount);

        rng.gen_range(low..=high)
    }

    /// Expiry date for a code issued on `today`.
    pub fn expiry_from(&self, today: Date) -> Result<Date, IssueError> {
        today
            .checked_add(i64::from(self.validity_days).days())
            .map_err(IssueError::ExpiryOutOfRange)
    }

    /// Draw a fresh, unsaved promo code.
    pub fn draw<R: Rng>(
        &self,
        rng: &mut R,
        location: Option<&str>,
        today: Date,
    ) -> Result<PromoCode, IssueError> {
        Ok(PromoCode {
            code: generate_promo_code(rng),
            discount: self.draw_discount(rng),
            expiry_date: self.expiry_from(today)?,
            location: location.map(ToString::to_string),
        })
    }
}
