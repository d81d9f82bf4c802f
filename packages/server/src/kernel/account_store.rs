// Account store backed by Postgres
//
// Read-only projection over the users table. Ordering on (created_at, id)
// makes the first-match tie-break on duplicate phone numbers deterministic.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::{AccountRecord, BaseAccountStore};

#[derive(sqlx::FromRow)]
struct AccountRow {
    phone_number: Option<String>,
    email: Option<String>,
    role: String,
}

impl From<AccountRow> for AccountRecord {
    fn from(row: AccountRow) -> Self {
        AccountRecord {
            phone_number: row.phone_number,
            email: row.email,
            role: row.role,
        }
    }
}

/// Postgres implementation of the account store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAccountStore for PgAccountStore {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Vec<AccountRecord>> {
        // Verbatim comparison: no separator or country-code normalization
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT phone_number, email, role FROM users \
             WHERE phone_number = $1 ORDER BY created_at, id",
        )
        .bind(phone_number)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query users by phone number")?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT phone_number, email, role FROM users \
             WHERE email = $1 ORDER BY created_at, id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query users by email")?;

        Ok(row.map(Into::into))
    }
}
