//! Customer reviews

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name shown when a reviewer leaves it blank.
pub const ANONYMOUS: &str = "Anonymous";

/// Rating used when none is given.
pub const DEFAULT_RATING: u8 = 5;

/// Raw review form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewForm {
    pub name: String,
    pub rating: String,
    pub message: String,
}

/// A validated review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub name: String,
    pub rating: u8,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewFormError {
    #[error("rating {0:?} must be a whole number from 1 to 5")]
    InvalidRating(String),
}

impl ReviewForm {
    pub fn validate(&self) -> Result<ReviewSubmission, ReviewFormError> {
        let name = self.name.trim();
        let rating = self.rating.trim();

        let rating = if rating.is_empty() {
            DEFAULT_RATING
        } else {
            rating
                .parse::<u8>()
                .ok()
                .filter(|value| (1..=5).contains(value))
                .ok_or_else(|| ReviewFormError::InvalidRating(rating.to_string()))?
        };

        Ok(ReviewSubmission {
            name: if name.is_empty() { ANONYMOUS } else { name }.to_string(),
            rating,
            message: self.message.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn blank_fields_take_defaults() -> TestResult {
        let review = ReviewForm::default().validate()?;

        assert_eq!(review.name, ANONYMOUS);
        assert_eq!(review.rating, DEFAULT_RATING);

        Ok(())
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        for raw in ["0", "6", "-1", "four", "4.5"] {
            let result = ReviewForm {
                rating: raw.to_string(),
                ..ReviewForm::default()
            }
            .validate();

            assert_eq!(
                result,
                Err(ReviewFormError::InvalidRating(raw.to_string())),
                "rating {raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn named_review_keeps_name() -> TestResult {
        let review = ReviewForm {
            name: " Ravi ".to_string(),
            rating: "3".to_string(),
            message: "Quick and clean".to_string(),
        }
        .validate()?;

        assert_eq!(review.name, "Ravi");
        assert_eq!(review.rating, 3);
        assert_eq!(review.message, "Quick and clean");

        Ok(())
    }
}
