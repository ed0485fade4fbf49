//! Loyalty Service

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::AdminPrincipal,
    database::Db,
    domain::loyalty::{
        LoyaltyServiceError, records::LoyaltyRecord, repository::SqliteLoyaltyRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteLoyaltyService {
    db: Db,
    repository: SqliteLoyaltyRepository,
}

impl SqliteLoyaltyService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteLoyaltyRepository::new(),
        }
    }
}

#[async_trait]
impl LoyaltyService for SqliteLoyaltyService {
    #[tracing::instrument(name = "loyalty.service.points", skip(self, phone), err)]
    async fn points(&self, phone: String) -> Result<Option<u32>, LoyaltyServiceError> {
        let phone = phone.trim();

        if phone.is_empty() {
            return Err(LoyaltyServiceError::MissingPhone);
        }

        let mut tx = self.db.begin().await?;

        let account = self.repository.find_account(&mut tx, phone).await?;

        tx.commit().await?;

        Ok(account.map(|account| account.points))
    }

    #[tracing::instrument(
        name = "loyalty.service.list_accounts",
        skip(self, admin),
        fields(admin = admin.username()),
        err
    )]
    async fn list_accounts(
        &self,
        admin: &AdminPrincipal,
    ) -> Result<Vec<LoyaltyRecord>, LoyaltyServiceError> {
        let mut tx = self.db.begin().await?;

        let accounts = self.repository.list_accounts(&mut tx).await?;

        tx.commit().await?;

        Ok(accounts)
    }
}

#[automock]
#[async_trait]
pub trait LoyaltyService: Send + Sync {
    /// Points held by `phone`, or `None` when no booking was ever made with it.
    async fn points(&self, phone: String) -> Result<Option<u32>, LoyaltyServiceError>;

    /// Every account in the order it was opened.
    async fn list_accounts(
        &self,
        admin: &AdminPrincipal,
    ) -> Result<Vec<LoyaltyRecord>, LoyaltyServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn unknown_phone_has_no_points() -> TestResult {
        let ctx = TestContext::new().await;

        assert_eq!(ctx.loyalty.points("9000000001".to_string()).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn each_award_adds_exactly_one_point() -> TestResult {
        let ctx = TestContext::new().await;

        for expected in 1..=3 {
            let account = ctx.award_point("9000000001").await?;

            assert_eq!(account.points, expected);
        }

        assert_eq!(ctx.loyalty.points("9000000001".to_string()).await?, Some(3));
        assert_eq!(ctx.loyalty.points("9000000002".to_string()).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn blank_phone_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.loyalty.points("  ".to_string()).await;

        assert!(
            matches!(result, Err(LoyaltyServiceError::MissingPhone)),
            "expected MissingPhone, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_accounts_returns_opening_order() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.award_point("222").await?;
        ctx.award_point("111").await?;
        ctx.award_point("222").await?;

        let accounts = ctx
            .loyalty
            .list_accounts(&AdminPrincipal::local_operator())
            .await?;

        assert_eq!(
            accounts,
            [
                LoyaltyRecord {
                    phone: "222".to_string(),
                    points: 2
                },
                LoyaltyRecord {
                    phone: "111".to_string(),
                    points: 1
                },
            ]
        );

        Ok(())
    }
}
