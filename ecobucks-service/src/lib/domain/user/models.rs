use std::fmt;
use std::str::FromStr;

use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::UserError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered user together with their credit balance and
/// the ledger of transactions that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: Username,
    pub password_hash: String,
    pub credits: f64,
    pub is_operator: bool,
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New non-operator account with an empty balance.
    pub fn new(name: String, username: Username, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            name,
            username,
            password_hash,
            credits: 0.0,
            is_operator: false,
            transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Direction of a credit movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Claim,
    Spend,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Claim => "claim",
            TransactionType::Spend => "spend",
        }
    }
}

impl FromStr for TransactionType {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claim" => Ok(TransactionType::Claim),
            "spend" => Ok(TransactionType::Spend),
            other => Err(UserError::Unknown(format!(
                "Unknown transaction type: {}",
                other
            ))),
        }
    }
}

/// Ledger entry for a change to a user's credit balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_type: TransactionType,
    pub user_id: UserId,
    pub claim_id: Option<Uuid>,
    pub credits: f64,
    pub timestamp: i64,
    pub description: String,
}

impl Transaction {
    /// Signed change this transaction applies to the balance.
    pub fn credit_delta(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Claim => self.credits,
            TransactionType::Spend => -self.credits,
        }
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct CreateAccountCommand {
    pub name: String,
    pub username: Username,
    pub password: String,
}

impl CreateAccountCommand {
    const MAX_NAME_LENGTH: usize = 64;

    /// Construct a new create account command.
    ///
    /// # Errors
    /// * `InvalidName` - Display name is blank or longer than 64 characters
    pub fn new(name: String, username: Username, password: String) -> Result<Self, UserError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(UserError::InvalidName("name must not be empty".to_string()));
        }
        if name.chars().count() > Self::MAX_NAME_LENGTH {
            return Err(UserError::InvalidName(format!(
                "name exceeds {} characters",
                Self::MAX_NAME_LENGTH
            )));
        }

        Ok(Self {
            name,
            username,
            password,
        })
    }
}

/// Command to log in with username and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: String,
}

/// Authenticated user together with freshly issued tokens.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("al_ice-99".to_string()).is_ok());
        assert_eq!(
            Username::new("al".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert!(matches!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong { .. })
        ));
        assert_eq!(
            Username::new("al ice".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_user_id_parsing() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_create_account_command_trims_name() {
        let username = Username::new("alice".to_string()).unwrap();
        let command =
            CreateAccountCommand::new("  Alice  ".to_string(), username, "pw".to_string()).unwrap();
        assert_eq!(command.name, "Alice");
    }

    #[test]
    fn test_create_account_command_rejects_blank_name() {
        let username = Username::new("alice".to_string()).unwrap();
        let result = CreateAccountCommand::new("   ".to_string(), username, "pw".to_string());
        assert!(matches!(result, Err(UserError::InvalidName(_))));
    }

    #[test]
    fn test_credit_delta() {
        let mut transaction = Transaction {
            transaction_type: TransactionType::Claim,
            user_id: UserId::new(),
            claim_id: None,
            credits: 12.5,
            timestamp: 0,
            description: String::new(),
        };
        assert_eq!(transaction.credit_delta(), 12.5);

        transaction.transaction_type = TransactionType::Spend;
        assert_eq!(transaction.credit_delta(), -12.5);
    }
}
