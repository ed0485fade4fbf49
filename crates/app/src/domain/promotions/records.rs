//! Promotion Records

use sqlx::FromRow;
use washbay::promotions::{PromoCode, parse_expiry};

use crate::domain::promotions::PromotionsServiceError;

/// A promotions row exactly as stored.
///
/// The expiry stays raw text here so a malformed value surfaces as
/// [`PromotionsServiceError::MalformedExpiry`] instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PromotionRow {
    pub id: i64,
    pub code: String,
    pub discount: i64,
    pub expiry_date: String,
    pub location: Option<String>,
}

/// Promotion Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRecord {
    pub id: i64,
    pub promo: PromoCode,
}

impl TryFrom<PromotionRow> for PromotionRecord {
    type Error = PromotionsServiceError;

    fn try_from(row: PromotionRow) -> Result<Self, Self::Error> {
        let discount =
            u32::try_from(row.discount).map_err(PromotionsServiceError::InvalidDiscount)?;

        Ok(Self {
            id: row.id,
            promo: PromoCode {
                code: row.code,
                discount,
                expiry_date: parse_expiry(&row.expiry_date)?,
                location: row.location,
            },
        })
    }
}
