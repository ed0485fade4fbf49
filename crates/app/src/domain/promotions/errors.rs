//! Promotions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use washbay::promotions::{IssueError, MalformedExpiry};

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promo code already exists")]
    AlreadyExists,

    #[error("promo code not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    MalformedExpiry(#[from] MalformedExpiry),

    #[error("failed to draw promo code")]
    Issue(#[from] IssueError),

    #[error("invalid discount value")]
    InvalidDiscount(#[source] std::num::TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
