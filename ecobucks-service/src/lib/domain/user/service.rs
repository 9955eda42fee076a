use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::PasswordError;
use auth::TokenPair;

use crate::domain::user::models::CreateAccountCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Argon2id work runs on the blocking pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Shared credential hasher and token service
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    /// Verify the password of a stored account and issue its tokens.
    async fn authenticate(&self, user: &User, password: String) -> Result<TokenPair, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let hash = user.password_hash.clone();
        let subject = user.id.to_string();
        let username = user.username.as_str().to_string();

        tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &hash, &subject, &username)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            // A password the hasher refuses can never match a stored hash
            AuthenticationError::InvalidCredentials
            | AuthenticationError::Password(PasswordError::InvalidInput(_)) => {
                UserError::InvalidCredentials
            }
            AuthenticationError::Password(e) => UserError::Password(e),
            AuthenticationError::Jwt(e) => UserError::Token(e),
        })
    }

    /// Spend the same Argon2id work as a real verification, then refuse.
    async fn reject_unknown_account(&self, password: String) -> UserError {
        let authenticator = Arc::clone(&self.authenticator);

        match tokio::task::spawn_blocking(move || authenticator.reject_unknown_account(&password))
            .await
        {
            Ok(_) => UserError::InvalidCredentials,
            Err(e) => UserError::Unknown(format!("Password verification task failed: {}", e)),
        }
    }

    fn issue_tokens(&self, user: &User) -> Result<TokenPair, UserError> {
        Ok(self
            .authenticator
            .issue_tokens(&user.id.to_string(), user.username.as_str())?)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Session, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let user = self
            .repository
            .create(User::new(command.name, command.username, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Account created");

        let tokens = self.issue_tokens(&user)?;
        Ok(Session { user, tokens })
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, UserError> {
        let user = match self.repository.find_by_username(&command.username).await? {
            Some(user) => user,
            None => {
                tracing::debug!(username = %command.username, "Login for unknown account");
                return Err(self.reject_unknown_account(command.password).await);
            }
        };

        let tokens = self
            .authenticate(&user, command.password)
            .await
            .map_err(|e| {
                if matches!(e, UserError::InvalidCredentials) {
                    tracing::debug!(username = %user.username, "Password mismatch");
                }
                e
            })?;

        Ok(Session { user, tokens })
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, UserError> {
        let verified = self.authenticator.verify_refresh_token(refresh_token)?;
        let user_id = UserId::from_string(&verified.subject)?;
        let user = self.get_user(&user_id).await?;

        let tokens = self.issue_tokens(&user)?;
        Ok(Session { user, tokens })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }
}
