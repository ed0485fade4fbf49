//! Reviews Service

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use washbay::reviews::ReviewSubmission;

use crate::{
    auth::AdminPrincipal,
    database::Db,
    domain::reviews::{
        ReviewsServiceError, records::ReviewRecord, repository::SqliteReviewsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteReviewsService {
    db: Db,
    repository: SqliteReviewsRepository,
}

impl SqliteReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for SqliteReviewsService {
    #[tracing::instrument(
        name = "reviews.service.submit_review",
        skip(self, review),
        fields(rating = review.rating),
        err
    )]
    async fn submit_review(
        &self,
        review: ReviewSubmission,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.create_review(&mut tx, &review).await?;

        tx.commit().await?;

        info!(review_id = record.id, "stored review");

        Ok(record)
    }

    #[tracing::instrument(name = "reviews.service.list_reviews", skip(self), err)]
    async fn list_reviews(&self) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_reviews(&mut tx, true).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    #[tracing::instrument(
        name = "reviews.service.all_reviews",
        skip(self, admin),
        fields(admin = admin.username()),
        err
    )]
    async fn all_reviews(
        &self,
        admin: &AdminPrincipal,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_reviews(&mut tx, false).await?;

        tx.commit().await?;

        Ok(reviews)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    async fn submit_review(
        &self,
        review: ReviewSubmission,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Published reviews, newest first.
    async fn list_reviews(&self) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    /// Every review in submission order.
    async fn all_reviews(
        &self,
        admin: &AdminPrincipal,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use washbay::reviews::ReviewForm;

    use crate::test::TestContext;

    use super::*;

    fn review(name: &str, rating: u8) -> ReviewSubmission {
        ReviewSubmission {
            name: name.to_string(),
            rating,
            message: format!("{name} says hello"),
        }
    }

    #[tokio::test]
    async fn submitted_review_is_listed_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.reviews.submit_review(review("Asha", 5)).await?;
        ctx.reviews.submit_review(review("Ravi", 4)).await?;

        let names: Vec<String> = ctx
            .reviews
            .list_reviews()
            .await?
            .into_iter()
            .map(|review| review.name)
            .collect();

        assert_eq!(names, ["Ravi", "Asha"]);

        Ok(())
    }

    #[tokio::test]
    async fn all_reviews_keeps_submission_order() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.reviews.submit_review(review("Asha", 5)).await?;
        ctx.reviews.submit_review(review("Ravi", 4)).await?;

        let names: Vec<String> = ctx
            .reviews
            .all_reviews(&AdminPrincipal::local_operator())
            .await?
            .into_iter()
            .map(|review| review.name)
            .collect();

        assert_eq!(names, ["Asha", "Ravi"]);

        Ok(())
    }

    #[tokio::test]
    async fn blank_form_is_stored_with_defaults() -> TestResult {
        let ctx = TestContext::new().await;

        let record = ctx
            .reviews
            .submit_review(ReviewForm::default().validate()?)
            .await?;

        assert_eq!(record.name, "Anonymous");
        assert_eq!(record.rating, 5);

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_rating_is_refused_by_storage() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.reviews.submit_review(review("Asha", 9)).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(stored, 0);

        Ok(())
    }
}
