use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::disposal::errors::DisposalClaimIdError;
use crate::domain::disposal::errors::DisposalError;
use crate::domain::user::models::Transaction;
use crate::domain::user::models::TransactionType;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Kind of waste handed in at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalType {
    Recyclable,
    Battery,
    Sponge,
    Electronic,
}

impl DisposalType {
    pub fn display_name(&self) -> &'static str {
        match self {
            DisposalType::Recyclable => "Recyclable",
            DisposalType::Battery => "Battery",
            DisposalType::Sponge => "Sponge",
            DisposalType::Electronic => "Electronic",
        }
    }
}

impl fmt::Display for DisposalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Single item of a disposal claim. Weight is in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disposal {
    pub credits: f32,
    pub weight: f32,
    pub disposal_type: DisposalType,
}

/// Disposal claim unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisposalClaimId(pub Uuid);

impl DisposalClaimId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a claim ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, DisposalClaimIdError> {
        Uuid::parse_str(s)
            .map(DisposalClaimId)
            .map_err(|e| DisposalClaimIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for DisposalClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DisposalClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Batch of disposals registered by an operator and redeemable once by a
/// user through its token.
#[derive(Debug, Clone, PartialEq)]
pub struct DisposalClaim {
    pub id: DisposalClaimId,
    pub user_id: Option<UserId>,
    pub operator_id: UserId,
    pub token: String,
    pub credits: f32,
    pub weight: f32,
    pub is_claimed: bool,
    pub disposals: Vec<Disposal>,
    pub created_at: DateTime<Utc>,
}

impl DisposalClaim {
    /// Unclaimed claim with a fresh token; credits and weight are the sums
    /// over `disposals`.
    pub fn new(operator_id: UserId, disposals: Vec<Disposal>) -> Self {
        let credits = disposals.iter().map(|d| d.credits).sum();
        let weight = disposals.iter().map(|d| d.weight).sum();

        Self {
            id: DisposalClaimId::new(),
            user_id: None,
            operator_id,
            token: Uuid::new_v4().to_string(),
            credits,
            weight,
            is_claimed: false,
            disposals,
            created_at: Utc::now(),
        }
    }

    /// Human readable ledger line, e.g. `Disposed 1.50kg of Battery and more.`
    pub fn description(&self) -> String {
        let (weight, unit) = largest_unit(self.weight);
        let first = self
            .disposals
            .first()
            .map(|d| d.disposal_type.display_name())
            .unwrap_or_default();
        let more = if self.disposals.len() > 1 {
            " and more."
        } else {
            ""
        };

        format!("Disposed {:.2}{} of {}{}", weight, unit, first, more)
    }

    /// Ledger entry crediting this claim to `user_id`.
    pub fn credit_transaction(&self, user_id: UserId) -> Transaction {
        Transaction {
            transaction_type: TransactionType::Claim,
            user_id,
            claim_id: Some(self.id.0),
            credits: f64::from(self.credits),
            timestamp: Utc::now().timestamp(),
            description: self.description(),
        }
    }
}

/// Scale a gram weight to g, kg or t.
pub fn largest_unit(grams: f32) -> (f32, &'static str) {
    if grams < 1_000.0 {
        (grams, "g")
    } else if grams < 1_000_000.0 {
        (grams / 1_000.0, "kg")
    } else {
        (grams / 1_000_000.0, "t")
    }
}

/// Command to register a disposal claim on behalf of an operator.
#[derive(Debug)]
pub struct RegisterDisposalCommand {
    pub operator_id: UserId,
    pub disposals: Vec<Disposal>,
}

impl RegisterDisposalCommand {
    /// The operator check comes first, so a non-operator learns nothing about
    /// the validity of the payload.
    ///
    /// # Errors
    /// * `NotOperator` - `operator` is not an operator
    /// * `EmptyDisposal` - No disposals given
    /// * `InvalidDisposal` - Negative or non-finite credits or weight
    pub fn new(operator: &User, disposals: Vec<Disposal>) -> Result<Self, DisposalError> {
        if !operator.is_operator {
            return Err(DisposalError::NotOperator);
        }
        if disposals.is_empty() {
            return Err(DisposalError::EmptyDisposal);
        }

        for disposal in &disposals {
            if !disposal.credits.is_finite() || disposal.credits < 0.0 {
                return Err(DisposalError::InvalidDisposal(format!(
                    "credits must be a non-negative number, got {}",
                    disposal.credits
                )));
            }
            if !disposal.weight.is_finite() || disposal.weight < 0.0 {
                return Err(DisposalError::InvalidDisposal(format!(
                    "weight must be a non-negative number, got {}",
                    disposal.weight
                )));
            }
        }

        Ok(Self {
            operator_id: operator.id,
            disposals,
        })
    }
}
