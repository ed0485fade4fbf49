//! Promotions Repository

use sqlx::{Sqlite, Transaction, query_as};
use washbay::promotions::{DATE_FORMAT, PromoCode};

use crate::domain::promotions::records::PromotionRow;

const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const FIND_PROMOTION_SQL: &str = include_str!("sql/find_promotion.sql");
const FIND_SCOPED_PROMOTION_SQL: &str = include_str!("sql/find_scoped_promotion.sql");
const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlitePromotionsRepository;

impl SqlitePromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        promo: &PromoCode,
    ) -> Result<PromotionRow, sqlx::Error> {
        query_as::<Sqlite, PromotionRow>(CREATE_PROMOTION_SQL)
            .bind(&promo.code)
            .bind(i64::from(promo.discount))
            .bind(promo.expiry_date.strftime(DATE_FORMAT).to_string())
            .bind(promo.location.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Look a code up. With `location` set, a code scoped elsewhere does not
    /// match; unscoped codes match everywhere.
    pub(crate) async fn find_promotion(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
        location: Option<&str>,
    ) -> Result<Option<PromotionRow>, sqlx::Error> {
        match location {
            Some(location) => {
                query_as::<Sqlite, PromotionRow>(FIND_SCOPED_PROMOTION_SQL)
                    .bind(code)
                    .bind(location)
                    .fetch_optional(&mut **tx)
                    .await
            }
            None => {
                query_as::<Sqlite, PromotionRow>(FIND_PROMOTION_SQL)
                    .bind(code)
                    .fetch_optional(&mut **tx)
                    .await
            }
        }
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<PromotionRow>, sqlx::Error> {
        query_as::<Sqlite, PromotionRow>(LIST_PROMOTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}
