use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::disposal::errors::DisposalError;
use crate::domain::disposal::models::Disposal;
use crate::domain::disposal::models::DisposalClaim;
use crate::domain::disposal::models::DisposalClaimId;
use crate::domain::disposal::ports::ClaimedDisposal;
use crate::domain::disposal::ports::DisposalRepository;
use crate::domain::user::models::UserId;
use crate::outbound::repositories::user::PostgresUserRepository;

pub struct PostgresDisposalRepository {
    pool: PgPool,
}

impl PostgresDisposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_claim(row: &PgRow) -> Result<DisposalClaim, DisposalError> {
        let user_id: Option<Uuid> = row.try_get("user_id").map_err(database_error)?;
        let Json(disposals): Json<Vec<Disposal>> =
            row.try_get("disposals").map_err(database_error)?;

        Ok(DisposalClaim {
            id: DisposalClaimId(row.try_get("id").map_err(database_error)?),
            user_id: user_id.map(UserId),
            operator_id: UserId(row.try_get("operator_id").map_err(database_error)?),
            token: row.try_get("token").map_err(database_error)?,
            credits: row.try_get("credits").map_err(database_error)?,
            weight: row.try_get("weight").map_err(database_error)?,
            is_claimed: row.try_get("is_claimed").map_err(database_error)?,
            disposals,
            created_at: row.try_get("created_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> DisposalError {
    DisposalError::DatabaseError(e.to_string())
}

#[async_trait]
impl DisposalRepository for PostgresDisposalRepository {
    async fn create(&self, claim: DisposalClaim) -> Result<DisposalClaim, DisposalError> {
        sqlx::query(
            r#"
            INSERT INTO disposal_claims
                (id, user_id, operator_id, token, credits, weight, is_claimed, disposals, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(claim.id.0)
        .bind(claim.user_id.map(|id| id.0))
        .bind(claim.operator_id.0)
        .bind(&claim.token)
        .bind(claim.credits)
        .bind(claim.weight)
        .bind(claim.is_claimed)
        .bind(Json(&claim.disposals))
        .bind(claim.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(claim)
    }

    async fn claim(
        &self,
        token: &str,
        user_id: &UserId,
    ) -> Result<ClaimedDisposal, DisposalError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let row = sqlx::query(
            r#"
            UPDATE disposal_claims
            SET is_claimed = TRUE, user_id = $2
            WHERE token = $1 AND is_claimed = FALSE AND user_id IS NULL
            RETURNING id, user_id, operator_id, token, credits, weight, is_claimed, disposals, created_at
            "#,
        )
        .bind(token)
        .bind(user_id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error)?;

        let Some(row) = row else {
            // Nothing updated: tell an unknown token apart from a redeemed one
            let exists = sqlx::query("SELECT 1 FROM disposal_claims WHERE token = $1")
                .bind(token)
                .fetch_optional(&mut *tx)
                .await
                .map_err(database_error)?
                .is_some();

            return if exists {
                Err(DisposalError::AlreadyClaimed(token.to_string()))
            } else {
                Err(DisposalError::NotFound(token.to_string()))
            };
        };

        let claim = Self::row_to_claim(&row)?;
        let transaction = claim.credit_transaction(*user_id);

        // Dropping `tx` on any error below rolls the claim back
        let user = PostgresUserRepository::apply_transaction(&mut tx, &transaction).await?;

        tx.commit().await.map_err(database_error)?;

        Ok(ClaimedDisposal { claim, user })
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<DisposalClaim>, DisposalError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, operator_id, token, credits, weight, is_claimed, disposals, created_at
            FROM disposal_claims
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_claim).collect()
    }
}
