//! Promotions Service

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tracing::{Span, info, warn};
use washbay::promotions::{PromoCode, PromoValidation, PromotionRules, requested_code};

use crate::{
    auth::AdminPrincipal,
    database::{Db, is_unique_violation},
    domain::promotions::{
        PromotionsServiceError,
        records::{PromotionRecord, PromotionRow},
        repository::SqlitePromotionsRepository,
    },
    entropy::Entropy,
};

#[derive(Debug, Clone)]
pub struct SqlitePromotionsService {
    db: Db,
    repository: SqlitePromotionsRepository,
    rules: PromotionRules,
    location_scoping: bool,
    entropy: Entropy,
}

impl SqlitePromotionsService {
    #[must_use]
    pub fn new(db: Db, rules: PromotionRules, location_scoping: bool) -> Self {
        Self {
            db,
            repository: SqlitePromotionsRepository::new(),
            rules,
            location_scoping,
            entropy: Entropy::default(),
        }
    }

    /// Draw codes from `entropy` instead of a fresh OS-seeded generator.
    #[must_use]
    pub fn with_entropy(mut self, entropy: Entropy) -> Self {
        self.entropy = entropy;
        self
    }
}

#[async_trait]
impl PromotionsService for SqlitePromotionsService {
    #[tracing::instrument(
        name = "promotions.service.issue_code",
        skip(self),
        fields(code = tracing::field::Empty, attempts = tracing::field::Empty),
        err
    )]
    async fn issue_code(
        &self,
        location: Option<String>,
        today: Date,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let span = Span::current();
        let attempts = self.rules.max_attempts.max(1);

        for attempt in 1..=attempts {
            let promo = self
                .entropy
                .draw(|rng| self.rules.draw(rng, location.as_deref(), today))?;

            let mut tx = self.db.begin().await?;

            match self.repository.create_promotion(&mut tx, &promo).await {
                Ok(row) => {
                    tx.commit().await?;

                    span.record("code", tracing::field::display(&row.code));
                    span.record("attempts", attempt);

                    info!(code = %row.code, discount = row.discount, "issued promo code");

                    return PromotionRecord::try_from(row);
                }
                Err(error) if is_unique_violation(&error) => {
                    warn!(attempt, "promo code collision, drawing again");
                }
                Err(error) => return Err(error.into()),
            }
        }

        span.record("attempts", attempts);

        Err(PromotionsServiceError::AlreadyExists)
    }

    #[tracing::instrument(
        name = "promotions.service.create_code",
        skip(self, promo),
        fields(code = %promo.code),
        err
    )]
    async fn create_code(&self, promo: PromoCode) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let row = self.repository.create_promotion(&mut tx, &promo).await?;

        tx.commit().await?;

        PromotionRecord::try_from(row)
    }

    #[tracing::instrument(name = "promotions.service.lookup", skip(self), err)]
    async fn lookup(
        &self,
        code: String,
        location: Option<String>,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let row = self
            .repository
            .find_promotion(&mut tx, &code, location.as_deref())
            .await?
            .ok_or(PromotionsServiceError::NotFound)?;

        tx.commit().await?;

        PromotionRecord::try_from(row)
    }

    #[tracing::instrument(
        name = "promotions.service.validate_code",
        skip(self),
        fields(verdict = tracing::field::Empty),
        err
    )]
    async fn validate_code(
        &self,
        code: Option<String>,
        location: Option<String>,
        today: Date,
    ) -> Result<PromoValidation, PromotionsServiceError> {
        let Some(code) = requested_code(code.as_deref()) else {
            return Ok(PromoValidation::NOT_REQUESTED);
        };

        let scope = location.filter(|_| self.location_scoping);

        let found = match self.lookup(code.to_string(), scope).await {
            Ok(record) => Some(record.promo),
            Err(PromotionsServiceError::NotFound) => None,
            Err(error) => return Err(error),
        };

        let verdict = PromoValidation::evaluate(found.as_ref(), today);

        Span::current().record("verdict", tracing::field::debug(verdict));

        Ok(verdict)
    }

    #[tracing::instrument(
        name = "promotions.service.list_promotions",
        skip(self, admin),
        fields(admin = admin.username()),
        err
    )]
    async fn list_promotions(
        &self,
        admin: &AdminPrincipal,
    ) -> Result<Vec<PromotionRow>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows = self.repository.list_promotions(&mut tx).await?;

        tx.commit().await?;

        Ok(rows)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Draw and store a fresh code, regenerating on a code collision.
    async fn issue_code(
        &self,
        location: Option<String>,
        today: Date,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Store a code exactly as given.
    async fn create_code(&self, promo: PromoCode) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Find a code, optionally restricted to a location.
    async fn lookup(
        &self,
        code: String,
        location: Option<String>,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Decide whether a requested code may be applied today.
    ///
    /// A blank or absent code is valid with no discount. Location is only
    /// considered when scoping is switched on.
    async fn validate_code(
        &self,
        code: Option<String>,
        location: Option<String>,
        today: Date,
    ) -> Result<PromoValidation, PromotionsServiceError>;

    /// Every stored code in issue order, as stored.
    async fn list_promotions(
        &self,
        admin: &AdminPrincipal,
    ) -> Result<Vec<PromotionRow>, PromotionsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use sqlx::query;
    use testresult::TestResult;
    use washbay::promotions::Rejection;

    use crate::test::TestContext;

    use super::*;

    const LOCATION: &str = "Hyderabad Kukatpally Nexus Mall";

    fn promo(code: &str, discount: u32, expiry_date: Date, location: Option<&str>) -> PromoCode {
        PromoCode {
            code: code.to_string(),
            discount,
            expiry_date,
            location: location.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn issue_code_stores_drawn_code() -> TestResult {
        let ctx = TestContext::new().await;
        let today = date(2026, 10, 14);

        let issued = ctx
            .promotions
            .issue_code(Some(LOCATION.to_string()), today)
            .await?;

        assert_eq!(issued.promo.code.len(), 8);
        assert!((10..=50).contains(&issued.promo.discount));
        assert_eq!(issued.promo.expiry_date, date(2026, 10, 17));

        let found = ctx.promotions.lookup(issued.promo.code.clone(), None).await?;

        assert_eq!(found, issued);

        Ok(())
    }

    #[tokio::test]
    async fn create_code_duplicate_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let today = date(2026, 10, 14);

        ctx.promotions
            .create_code(promo("PROMO1", 20, today, None))
            .await?;

        let result = ctx
            .promotions
            .create_code(promo("PROMO1", 30, today, Some(LOCATION)))
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn lookup_unknown_code_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.promotions.lookup("NOPE0000".to_string(), None).await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn validate_code_applies_location_scope() -> TestResult {
        let ctx = TestContext::new().await;
        let today = date(2026, 10, 14);

        ctx.promotions
            .create_code(promo("PROMO1", 20, date(2026, 10, 15), Some("X")))
            .await?;

        let at_x = ctx
            .promotions
            .validate_code(Some("PROMO1".to_string()), Some("X".to_string()), today)
            .await?;

        let at_y = ctx
            .promotions
            .validate_code(Some("PROMO1".to_string()), Some("Y".to_string()), today)
            .await?;

        assert_eq!(at_x, PromoValidation::Valid { discount: 20 });
        assert_eq!(at_y, PromoValidation::Rejected(Rejection::UnknownCode));

        Ok(())
    }

    #[tokio::test]
    async fn unscoped_validation_ignores_location() -> TestResult {
        let ctx = TestContext::with_settings(|settings| settings.promo_location_scoping = false).await;
        let today = date(2026, 10, 14);

        ctx.promotions
            .create_code(promo("PROMO1", 20, today, Some("X")))
            .await?;

        let verdict = ctx
            .promotions
            .validate_code(Some("PROMO1".to_string()), Some("Y".to_string()), today)
            .await?;

        assert_eq!(verdict, PromoValidation::Valid { discount: 20 });

        Ok(())
    }

    #[tokio::test]
    async fn unscoped_code_is_valid_at_any_location() -> TestResult {
        let ctx = TestContext::new().await;
        let today = date(2026, 10, 14);

        ctx.promotions
            .create_code(promo("ANYWHERE", 15, today, None))
            .await?;

        let verdict = ctx
            .promotions
            .validate_code(Some("ANYWHERE".to_string()), Some(LOCATION.to_string()), today)
            .await?;

        assert_eq!(verdict, PromoValidation::Valid { discount: 15 });

        Ok(())
    }

    #[tokio::test]
    async fn validate_code_rejects_expired_code() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promotions
            .create_code(promo("OLD1", 20, date(2026, 10, 13), None))
            .await?;

        let verdict = ctx
            .promotions
            .validate_code(Some("OLD1".to_string()), None, date(2026, 10, 14))
            .await?;

        assert_eq!(verdict, PromoValidation::Rejected(Rejection::Expired));

        Ok(())
    }

    #[tokio::test]
    async fn blank_code_is_valid_without_discount() -> TestResult {
        let ctx = TestContext::new().await;

        let verdict = ctx
            .promotions
            .validate_code(Some("  ".to_string()), None, date(2026, 10, 14))
            .await?;

        assert_eq!(verdict, PromoValidation::NOT_REQUESTED);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_stored_expiry_is_reported() -> TestResult {
        let ctx = TestContext::new().await;

        query("INSERT INTO promotions (code, discount, expiry_date) VALUES ('BAD1', 10, '17/10/2026')")
            .execute(ctx.db.pool())
            .await?;

        let result = ctx
            .promotions
            .validate_code(Some("BAD1".to_string()), None, date(2026, 10, 14))
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::MalformedExpiry(_))),
            "expected MalformedExpiry, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_promotions_returns_issue_order() -> TestResult {
        let ctx = TestContext::new().await;
        let today = date(2026, 10, 14);

        for code in ["FIRST", "SECOND", "THIRD"] {
            ctx.promotions.create_code(promo(code, 10, today, None)).await?;
        }

        let rows = ctx
            .promotions
            .list_promotions(&AdminPrincipal::local_operator())
            .await?;

        let codes: Vec<&str> = rows.iter().map(|row| row.code.as_str()).collect();

        assert_eq!(codes, ["FIRST", "SECOND", "THIRD"]);

        Ok(())
    }

    const SEED: u64 = 2026;

    /// The first `count` codes a service seeded with [`SEED`] will draw.
    fn upcoming_codes(rules: PromotionRules, count: u32, today: Date) -> TestResult<Vec<PromoCode>> {
        let preview = Entropy::seeded(SEED);

        let codes = (0..count)
            .map(|_| preview.draw(|rng| rules.draw(rng, Some(LOCATION), today)))
            .collect::<Result<_, _>>()?;

        Ok(codes)
    }

    async fn stored_codes(ctx: &TestContext) -> TestResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM promotions")
            .fetch_one(ctx.db.pool())
            .await?;

        Ok(count)
    }

    #[tokio::test]
    async fn issue_code_draws_again_after_collision() -> TestResult {
        let ctx = TestContext::new().await;
        let today = date(2026, 10, 14);
        let rules = ctx.settings.promotions;

        let taken = upcoming_codes(rules, 1, today)?
            .pop()
            .ok_or("expected one upcoming code")?;

        ctx.promotions.create_code(taken.clone()).await?;

        let issued = ctx
            .promotions
            .clone()
            .with_entropy(Entropy::seeded(SEED))
            .issue_code(Some(LOCATION.to_string()), today)
            .await?;

        assert_ne!(issued.promo.code, taken.code);
        assert_eq!(stored_codes(&ctx).await?, 2);

        let kept = ctx.promotions.lookup(taken.code.clone(), None).await?;

        assert_eq!(kept.promo, taken, "existing code must not be overwritten");

        Ok(())
    }

    #[tokio::test]
    async fn issue_code_gives_up_after_max_attempts() -> TestResult {
        let ctx = TestContext::new().await;
        let today = date(2026, 10, 14);
        let rules = ctx.settings.promotions;

        for taken in upcoming_codes(rules, rules.max_attempts, today)? {
            ctx.promotions.create_code(taken).await?;
        }

        let result = ctx
            .promotions
            .clone()
            .with_entropy(Entropy::seeded(SEED))
            .issue_code(Some(LOCATION.to_string()), today)
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
        assert_eq!(stored_codes(&ctx).await?, i64::from(rules.max_attempts));

        Ok(())
    }
}
