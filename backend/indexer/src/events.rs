//! Event types emitted by the crowdfunding campaign contract.
//!
//! These mirror the topics published in `contracts/crowdfunding/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the campaign contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A contribution was recorded (`contrib` topic).
    Contributed,
    /// A contributor received their badge (`badge` topic).
    BadgeAwarded,
    /// Cumulative contributions crossed the funding goal (`goal_met` topic).
    GoalReached,
    /// The owner withdrew the held balance (`withdrawn` topic).
    FundsWithdrawn,
    /// Campaign ownership moved (`owner_set` topic).
    OwnershipTransferred,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "contrib" => Self::Contributed,
            "badge" => Self::BadgeAwarded,
            "goal_met" => Self::GoalReached,
            "withdrawn" => Self::FundsWithdrawn,
            "owner_set" => Self::OwnershipTransferred,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contributed => "contributed",
            Self::BadgeAwarded => "badge_awarded",
            Self::GoalReached => "goal_reached",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "contributed" => Self::Contributed,
            "badge_awarded" => Self::BadgeAwarded,
            "goal_reached" => Self::GoalReached,
            "funds_withdrawn" => Self::FundsWithdrawn,
            "ownership_transferred" => Self::OwnershipTransferred,
            _ => Self::Unknown,
        }
    }
}

/// A decoded campaign event, ready to be stored.
///
/// Amounts are kept as decimal strings: contract amounts are `i128` and do
/// not fit SQLite integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEvent {
    /// RPC event id, unique per emitted event.
    pub event_id: String,
    pub event_type: String,
    /// Contributor, owner or new owner, depending on the kind.
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub total_raised: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event row as read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub total_raised: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        EventKind::from_db(&self.event_type)
    }
}
