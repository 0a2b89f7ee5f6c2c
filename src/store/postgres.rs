//! PostgreSQL account store.
//!
//! Each trait method is a single statement against the pool, except
//! `transfer_atomic` which runs inside one database transaction.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{AccountStore, AtomicTransfer};
use crate::{db::DbPool, error::AppError, models::account::Account};

const ACCOUNT_COLUMNS: &str = "id, account_number, account_holder, email, balance, currency, status, last_transaction, created_at";

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at, account_number"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn get(&self, account_number: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_number = $1"
        ))
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create(&self, account: Account) -> Result<Account, AppError> {
        let inserted = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (id, account_number, account_holder, email, balance, currency, status, last_transaction, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.id)
        .bind(&account.account_number)
        .bind(&account.account_holder)
        .bind(&account.email)
        .bind(account.balance)
        .bind(&account.currency)
        .bind(account.status.as_str())
        .bind(account.last_transaction)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(account) => Ok(account),
            // UNIQUE(account_number) caught a concurrent create
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::DuplicateAccount(account.account_number))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn increment_balance(
        &self,
        account_number: &str,
        delta: Decimal,
    ) -> Result<u64, AppError> {
        let modified = sqlx::query(
            r#"
            UPDATE accounts
            SET balance = balance + $1,
                last_transaction = NOW()
            WHERE account_number = $2
            "#,
        )
        .bind(delta)
        .bind(account_number)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(modified)
    }

    async fn transfer_atomic(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<AtomicTransfer, AppError> {
        let mut tx = self.pool.begin().await?;

        // Balance check and debit in one conditional statement
        let debited = sqlx::query(
            r#"
            UPDATE accounts
            SET balance = balance - $1,
                last_transaction = NOW()
            WHERE account_number = $2 AND status = 'active' AND balance >= $1
            "#,
        )
        .bind(amount)
        .bind(from)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if debited == 0 {
            tx.rollback().await?;
            return Ok(AtomicTransfer::InsufficientFunds);
        }

        let credited = sqlx::query(
            r#"
            UPDATE accounts
            SET balance = balance + $1,
                last_transaction = NOW()
            WHERE account_number = $2 AND status = 'active'
            "#,
        )
        .bind(amount)
        .bind(to)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if credited == 0 {
            tx.rollback().await?;
            return Ok(AtomicTransfer::CreditRejected);
        }

        tx.commit().await?;

        Ok(AtomicTransfer::Applied)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
