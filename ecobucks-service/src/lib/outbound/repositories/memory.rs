use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::disposal::errors::DisposalError;
use crate::domain::disposal::models::DisposalClaim;
use crate::domain::disposal::ports::ClaimedDisposal;
use crate::domain::disposal::ports::DisposalRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store used when no database is configured and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }
}

/// Process-local disposal claim store keyed by token.
///
/// Shares the user map of an [`InMemoryUserRepository`] so a claim and its
/// credit land under the same pair of write locks.
#[derive(Debug, Clone)]
pub struct InMemoryDisposalRepository {
    claims: Arc<RwLock<HashMap<String, DisposalClaim>>>,
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryDisposalRepository {
    pub fn new(users: &InMemoryUserRepository) -> Self {
        Self {
            claims: Arc::default(),
            users: Arc::clone(&users.users),
        }
    }
}

#[async_trait]
impl DisposalRepository for InMemoryDisposalRepository {
    async fn create(&self, claim: DisposalClaim) -> Result<DisposalClaim, DisposalError> {
        self.claims
            .write()
            .await
            .insert(claim.token.clone(), claim.clone());
        Ok(claim)
    }

    async fn claim(
        &self,
        token: &str,
        user_id: &UserId,
    ) -> Result<ClaimedDisposal, DisposalError> {
        // Lock order: claims, then users
        let mut claims = self.claims.write().await;
        let mut users = self.users.write().await;

        let claim = claims
            .get_mut(token)
            .ok_or_else(|| DisposalError::NotFound(token.to_string()))?;

        if claim.is_claimed || claim.user_id.is_some() {
            return Err(DisposalError::AlreadyClaimed(token.to_string()));
        }

        let user = users
            .get_mut(user_id)
            .ok_or_else(|| UserError::NotFound(user_id.to_string()))?;

        claim.is_claimed = true;
        claim.user_id = Some(*user_id);

        let transaction = claim.credit_transaction(*user_id);
        user.credits += transaction.credit_delta();
        user.transactions.push(transaction);

        Ok(ClaimedDisposal {
            claim: claim.clone(),
            user: user.clone(),
        })
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<DisposalClaim>, DisposalError> {
        let mut owned: Vec<DisposalClaim> = self
            .claims
            .read()
            .await
            .values()
            .filter(|c| c.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect();
        owned.sort_by_key(|c| c.created_at);
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::disposal::models::Disposal;
    use crate::domain::disposal::models::DisposalType;

    fn user(username: &str) -> User {
        User::new(
            "Test".to_string(),
            Username::new(username.to_string()).unwrap(),
            String::new(),
        )
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("alice")).await.unwrap();

        let result = repository.create(user("alice")).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    fn sponge_claim() -> DisposalClaim {
        DisposalClaim::new(
            UserId::new(),
            vec![Disposal {
                credits: 1.0,
                weight: 10.0,
                disposal_type: DisposalType::Sponge,
            }],
        )
    }

    #[tokio::test]
    async fn test_claim_once() {
        let users = InMemoryUserRepository::new();
        let repository = InMemoryDisposalRepository::new(&users);
        let claimer = users.create(user("alice")).await.unwrap();
        let other = users.create(user("bob")).await.unwrap();
        let claim = repository.create(sponge_claim()).await.unwrap();

        let claimed = repository.claim(&claim.token, &claimer.id).await.unwrap();
        assert!(claimed.claim.is_claimed);
        assert_eq!(claimed.claim.user_id, Some(claimer.id));
        assert_eq!(claimed.user.credits, 1.0);
        assert_eq!(claimed.user.transactions.len(), 1);
        assert_eq!(claimed.user.transactions[0].claim_id, Some(claim.id.0));

        let stored = users.find_by_id(&claimer.id).await.unwrap().unwrap();
        assert_eq!(stored.credits, 1.0);

        let again = repository.claim(&claim.token, &other.id).await;
        assert!(matches!(again, Err(DisposalError::AlreadyClaimed(_))));
        let other = users.find_by_id(&other.id).await.unwrap().unwrap();
        assert_eq!(other.credits, 0.0);
        assert!(other.transactions.is_empty());

        let missing = repository.claim("unknown", &claimer.id).await;
        assert!(matches!(missing, Err(DisposalError::NotFound(_))));

        assert_eq!(repository.find_by_user(&claimer.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_credit_leaves_claim_open() {
        let users = InMemoryUserRepository::new();
        let repository = InMemoryDisposalRepository::new(&users);
        let claim = repository.create(sponge_claim()).await.unwrap();

        let ghost = UserId::new();
        let result = repository.claim(&claim.token, &ghost).await;
        assert!(matches!(
            result,
            Err(DisposalError::User(UserError::NotFound(_)))
        ));
        assert!(repository.find_by_user(&ghost).await.unwrap().is_empty());

        let alice = users.create(user("alice")).await.unwrap();
        let claimed = repository.claim(&claim.token, &alice.id).await.unwrap();
        assert_eq!(claimed.claim.user_id, Some(alice.id));
        assert_eq!(claimed.user.credits, 1.0);
    }
}
