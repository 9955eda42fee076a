/// Serializable response types for the HTTP layer.
///
/// Domain models never reach the wire directly; these projections decide what
/// is exposed. In particular the password hash is never serialized.
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::disposal::models::Disposal;
use crate::domain::disposal::models::DisposalClaim;
use crate::domain::disposal::models::DisposalType;
use crate::domain::station::models::LocationClaim;
use crate::domain::user::models::Session;
use crate::domain::user::models::Transaction;
use crate::domain::user::models::User;

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileData {
    pub id: String,
    pub name: String,
    pub username: String,
    pub credits: f64,
    pub is_operator: bool,
    pub transactions: Vec<TransactionData>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for ProfileData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            username: user.username.as_str().to_string(),
            credits: user.credits,
            is_operator: user.is_operator,
            transactions: user.transactions.iter().map(TransactionData::from).collect(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionData {
    pub transaction_type: String,
    pub user_id: String,
    pub claim_id: Option<String>,
    pub credits: f64,
    pub timestamp: i64,
    pub description: String,
}

impl From<&Transaction> for TransactionData {
    fn from(transaction: &Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type.as_str().to_string(),
            user_id: transaction.user_id.to_string(),
            claim_id: transaction.claim_id.map(|id| id.to_string()),
            credits: transaction.credits,
            timestamp: transaction.timestamp,
            description: transaction.description.clone(),
        }
    }
}

/// Tokens plus profile returned by login, registration and refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionData {
    pub token: String,
    pub refresh_token: String,
    pub user: ProfileData,
}

impl From<&Session> for SessionData {
    fn from(session: &Session) -> Self {
        Self {
            token: session.tokens.access_token.clone(),
            refresh_token: session.tokens.refresh_token.clone(),
            user: (&session.user).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisposalData {
    pub credits: f32,
    pub weight: f32,
    pub disposal_type: DisposalType,
}

impl From<&Disposal> for DisposalData {
    fn from(disposal: &Disposal) -> Self {
        Self {
            credits: disposal.credits,
            weight: disposal.weight,
            disposal_type: disposal.disposal_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisposalClaimData {
    pub id: String,
    pub user_id: Option<String>,
    pub operator_id: String,
    pub token: String,
    pub credits: f32,
    pub weight: f32,
    pub is_claimed: bool,
    pub disposals: Vec<DisposalData>,
    pub created_at: DateTime<Utc>,
}

impl From<&DisposalClaim> for DisposalClaimData {
    fn from(claim: &DisposalClaim) -> Self {
        Self {
            id: claim.id.to_string(),
            user_id: claim.user_id.map(|id| id.to_string()),
            operator_id: claim.operator_id.to_string(),
            token: claim.token.clone(),
            credits: claim.credits,
            weight: claim.weight,
            is_claimed: claim.is_claimed,
            disposals: claim.disposals.iter().map(DisposalData::from).collect(),
            created_at: claim.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationData {
    pub latitude: f32,
    pub longitude: f32,
    pub timestamp: i64,
    pub station_id: String,
}

impl From<&LocationClaim> for LocationData {
    fn from(location: &LocationClaim) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            timestamp: location.timestamp,
            station_id: location.station_id.clone(),
        }
    }
}
