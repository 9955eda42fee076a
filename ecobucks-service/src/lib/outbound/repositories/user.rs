use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgConnection;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Row;

use crate::domain::user::models::Transaction;
use crate::domain::user::models::TransactionType;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const SELECT_USER: &str = r#"
    SELECT id, name, username, password_hash, credits, is_operator, created_at
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow, transactions: Vec<Transaction>) -> Result<User, UserError> {
        Ok(User {
            id: UserId(row.try_get("id").map_err(database_error)?),
            name: row.try_get("name").map_err(database_error)?,
            username: Username::new(row.try_get("username").map_err(database_error)?)?,
            password_hash: row.try_get("password_hash").map_err(database_error)?,
            credits: row.try_get("credits").map_err(database_error)?,
            is_operator: row.try_get("is_operator").map_err(database_error)?,
            transactions,
            created_at: row.try_get("created_at").map_err(database_error)?,
        })
    }

    fn row_to_transaction(row: &PgRow) -> Result<Transaction, UserError> {
        let transaction_type: String = row.try_get("transaction_type").map_err(database_error)?;

        Ok(Transaction {
            transaction_type: transaction_type.parse::<TransactionType>()?,
            user_id: UserId(row.try_get("user_id").map_err(database_error)?),
            claim_id: row.try_get("claim_id").map_err(database_error)?,
            credits: row.try_get("credits").map_err(database_error)?,
            timestamp: row.try_get("timestamp").map_err(database_error)?,
            description: row.try_get("description").map_err(database_error)?,
        })
    }

    async fn load_transactions<'e, E>(
        executor: E,
        user_id: &UserId,
    ) -> Result<Vec<Transaction>, UserError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query(
            r#"
            SELECT user_id, claim_id, transaction_type, credits, timestamp, description
            FROM transactions
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(executor)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// Apply `transaction` to the user's balance and history inside an open
    /// database transaction. Nothing is committed here.
    pub(crate) async fn apply_transaction(
        conn: &mut PgConnection,
        transaction: &Transaction,
    ) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET credits = credits + $2
            WHERE id = $1
            RETURNING id, name, username, password_hash, credits, is_operator, created_at
            "#,
        )
        .bind(transaction.user_id.0)
        .bind(transaction.credit_delta())
        .fetch_optional(&mut *conn)
        .await
        .map_err(database_error)?
        .ok_or_else(|| UserError::NotFound(transaction.user_id.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO transactions (user_id, claim_id, transaction_type, credits, timestamp, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(transaction.user_id.0)
        .bind(transaction.claim_id)
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.credits)
        .bind(transaction.timestamp)
        .bind(&transaction.description)
        .execute(&mut *conn)
        .await
        .map_err(database_error)?;

        let transactions = Self::load_transactions(&mut *conn, &transaction.user_id).await?;
        Self::row_to_user(&row, transactions)
    }

    async fn find_one(&self, row: Option<PgRow>) -> Result<Option<User>, UserError> {
        match row {
            Some(r) => {
                let id = UserId(r.try_get("id").map_err(database_error)?);
                let transactions = Self::load_transactions(&self.pool, &id).await?;
                Ok(Some(Self::row_to_user(&r, transactions)?))
            }
            None => Ok(None),
        }
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, username, password_hash, credits, is_operator, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(&user.name)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.credits)
        .bind(user.is_operator)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_username_key")
                {
                    return UserError::UsernameAlreadyExists(user.username.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        self.find_one(row).await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("{} WHERE username = $1", SELECT_USER))
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        self.find_one(row).await
    }
}
