use async_trait::async_trait;

use crate::domain::disposal::errors::DisposalError;
use crate::domain::disposal::models::DisposalClaim;
use crate::domain::disposal::models::RegisterDisposalCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Result of redeeming a disposal token.
#[derive(Debug, Clone)]
pub struct ClaimedDisposal {
    pub claim: DisposalClaim,
    /// Claiming user with the credited balance and new transaction
    pub user: User,
}

/// Port for disposal domain service operations.
#[async_trait]
pub trait DisposalServicePort: Send + Sync + 'static {
    /// Register a batch of disposals on behalf of an operator.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn register_disposal(
        &self,
        command: RegisterDisposalCommand,
    ) -> Result<DisposalClaim, DisposalError>;

    /// Redeem a disposal token and credit the user.
    ///
    /// # Errors
    /// * `NotFound` - No claim with this token
    /// * `AlreadyClaimed` - The claim was redeemed before
    /// * `DatabaseError` - Database operation failed
    async fn claim_disposal(&self, user: &User, token: &str)
        -> Result<ClaimedDisposal, DisposalError>;

    /// Claims redeemed by `user`.
    async fn list_disposals(&self, user: &User) -> Result<Vec<DisposalClaim>, DisposalError>;
}

/// Persistence operations for disposal claims.
#[async_trait]
pub trait DisposalRepository: Send + Sync + 'static {
    /// Persist new claim to storage.
    async fn create(&self, claim: DisposalClaim) -> Result<DisposalClaim, DisposalError>;

    /// Mark the claim with `token` as claimed by `user_id` and credit the
    /// user with a `Claim` transaction.
    ///
    /// Both writes succeed or neither does. Of two concurrent calls for the
    /// same token at most one succeeds.
    ///
    /// # Errors
    /// * `NotFound` - No claim with this token
    /// * `AlreadyClaimed` - The claim was redeemed before
    /// * `User(NotFound)` - The claiming user does not exist
    async fn claim(&self, token: &str, user_id: &UserId)
        -> Result<ClaimedDisposal, DisposalError>;

    /// Claims redeemed by the user, oldest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<DisposalClaim>, DisposalError>;
}
