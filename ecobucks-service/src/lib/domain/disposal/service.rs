use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::disposal::errors::DisposalError;
use crate::domain::disposal::models::DisposalClaim;
use crate::domain::disposal::models::RegisterDisposalCommand;
use crate::domain::disposal::ports::ClaimedDisposal;
use crate::domain::disposal::ports::DisposalRepository;
use crate::domain::disposal::ports::DisposalServicePort;
use crate::domain::user::models::User;

/// Domain service implementation for disposal operations.
pub struct DisposalService<DR>
where
    DR: DisposalRepository,
{
    disposals: Arc<DR>,
}

impl<DR> DisposalService<DR>
where
    DR: DisposalRepository,
{
    /// Create a new disposal service.
    ///
    /// # Arguments
    /// * `disposals` - Disposal claim persistence, also responsible for
    ///   crediting the claiming user
    pub fn new(disposals: Arc<DR>) -> Self {
        Self { disposals }
    }
}

#[async_trait]
impl<DR> DisposalServicePort for DisposalService<DR>
where
    DR: DisposalRepository,
{
    async fn register_disposal(
        &self,
        command: RegisterDisposalCommand,
    ) -> Result<DisposalClaim, DisposalError> {
        let claim = self
            .disposals
            .create(DisposalClaim::new(command.operator_id, command.disposals))
            .await?;

        tracing::info!(
            claim_id = %claim.id,
            operator_id = %claim.operator_id,
            credits = claim.credits,
            weight = claim.weight,
            "Disposal registered"
        );

        Ok(claim)
    }

    async fn claim_disposal(
        &self,
        user: &User,
        token: &str,
    ) -> Result<ClaimedDisposal, DisposalError> {
        let claimed = self.disposals.claim(token, &user.id).await.map_err(|e| {
            tracing::debug!(user_id = %user.id, error = %e, "Disposal claim refused");
            e
        })?;

        tracing::info!(
            claim_id = %claimed.claim.id,
            user_id = %claimed.user.id,
            credits = claimed.claim.credits,
            "Disposal claimed"
        );

        Ok(claimed)
    }

    async fn list_disposals(&self, user: &User) -> Result<Vec<DisposalClaim>, DisposalError> {
        self.disposals.find_by_user(&user.id).await
    }
}
