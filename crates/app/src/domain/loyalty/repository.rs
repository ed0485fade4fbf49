//! Loyalty Repository

use sqlx::{Sqlite, Transaction, query_as};

use crate::domain::loyalty::records::LoyaltyRecord;

const AWARD_POINT_SQL: &str = include_str!("sql/award_point.sql");
const FIND_ACCOUNT_SQL: &str = include_str!("sql/find_account.sql");
const LIST_ACCOUNTS_SQL: &str = include_str!("sql/list_accounts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteLoyaltyRepository;

impl SqliteLoyaltyRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Add one point to the account for `phone`, opening it at one point
    /// when it does not exist yet.
    pub(crate) async fn award_point(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        phone: &str,
    ) -> Result<LoyaltyRecord, sqlx::Error> {
        query_as::<Sqlite, LoyaltyRecord>(AWARD_POINT_SQL)
            .bind(phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_account(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        phone: &str,
    ) -> Result<Option<LoyaltyRecord>, sqlx::Error> {
        query_as::<Sqlite, LoyaltyRecord>(FIND_ACCOUNT_SQL)
            .bind(phone)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_accounts(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<LoyaltyRecord>, sqlx::Error> {
        query_as::<Sqlite, LoyaltyRecord>(LIST_ACCOUNTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}
