use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};

use roster_core::{
    Account, AccountId, AccountStore, AccountStoreError, Credential, Email, NewAccount,
};

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    email: String,
    credential: Option<String>,
    is_blocked: bool,
    last_seen_at: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| AccountStoreError::Unavailable(e.to_string()))?;

        Ok(Account::new(
            AccountId::new(row.id),
            row.name,
            email,
            row.credential.map(Credential::from_phc),
            row.is_blocked,
            row.last_seen_at,
        ))
    }
}

const ACCOUNT_COLUMNS: &str = "id, name, email, credential, is_blocked, last_seen_at";

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unavailable(e.to_string()))?;

        row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unavailable(e.to_string()))?;

        row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Inserting account into PostgreSQL", skip_all)]
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let query = format!(
            "INSERT INTO accounts (name, email, credential) VALUES ($1, $2, $3) \
             RETURNING {ACCOUNT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(&account.name)
            .bind(account.email.as_ref().expose_secret())
            .bind(account.credential.as_ref().map(Credential::as_str))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.constraint().is_some() {
                        return AccountStoreError::EmailTaken;
                    }
                }
                AccountStoreError::Unavailable(e.to_string())
            })?;

        row.try_into()
    }

    #[tracing::instrument(name = "Updating blocked flags in PostgreSQL", skip_all)]
    async fn update_blocked(
        &self,
        ids: &[AccountId],
        blocked: bool,
    ) -> Result<Vec<AccountId>, AccountStoreError> {
        // Single statement: the batch applies atomically.
        let ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let applied = sqlx::query_scalar::<_, i64>(
            "UPDATE accounts SET is_blocked = $1 WHERE id = ANY($2) RETURNING id",
        )
        .bind(blocked)
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Unavailable(e.to_string()))?;

        Ok(applied.into_iter().map(AccountId::new).collect())
    }

    #[tracing::instrument(name = "Deleting accounts from PostgreSQL", skip_all)]
    async fn delete_by_ids(&self, ids: &[AccountId]) -> Result<Vec<AccountId>, AccountStoreError> {
        let ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let removed =
            sqlx::query_scalar::<_, i64>("DELETE FROM accounts WHERE id = ANY($1) RETURNING id")
                .bind(ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AccountStoreError::Unavailable(e.to_string()))?;

        Ok(removed.into_iter().map(AccountId::new).collect())
    }

    #[tracing::instrument(name = "Touching last-seen in PostgreSQL", skip_all)]
    async fn touch_last_seen(&self, id: AccountId) -> Result<(), AccountStoreError> {
        // GREATEST keeps the timestamp monotonic per account.
        let result = sqlx::query(
            "UPDATE accounts \
             SET last_seen_at = GREATEST(COALESCE(last_seen_at, 'epoch'::timestamptz), now()) \
             WHERE id = $1",
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Unavailable(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Listing accounts from PostgreSQL", skip_all)]
    async fn list(&self) -> Result<Vec<Account>, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id");

        let rows = sqlx::query_as::<_, AccountRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unavailable(e.to_string()))?;

        rows.into_iter().map(Account::try_from).collect()
    }
}
