//! Reviews Repository

use sqlx::{Sqlite, Transaction, query_as};
use washbay::reviews::ReviewSubmission;

use crate::domain::reviews::records::ReviewRecord;

const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LIST_REVIEWS_SQL: &str = include_str!("sql/list_reviews.sql");
const LIST_REVIEWS_OLDEST_FIRST_SQL: &str = include_str!("sql/list_reviews_oldest_first.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteReviewsRepository;

impl SqliteReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        review: &ReviewSubmission,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Sqlite, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(&review.name)
            .bind(i64::from(review.rating))
            .bind(&review.message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        newest_first: bool,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        let sql = if newest_first {
            LIST_REVIEWS_SQL
        } else {
            LIST_REVIEWS_OLDEST_FIRST_SQL
        };

        query_as::<Sqlite, ReviewRecord>(sql).fetch_all(&mut **tx).await
    }
}
