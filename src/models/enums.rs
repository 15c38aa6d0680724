//! Enumerations stored as stable string codes.
//!
//! `RoomStatus`, `StayState` and `AccessLevel` are persisted as their
//! string names, never as positional integers, so codes stay stable
//! across releases.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Operational status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum RoomStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Occupied")]
    Occupied,
    #[sea_orm(string_value = "Maintenance")]
    Maintenance,
    #[sea_orm(string_value = "Cleaning")]
    Cleaning,
    #[sea_orm(string_value = "OutOfOrder")]
    OutOfOrder,
}

/// Lifecycle state of a stay.
///
/// Transitions form a small machine: `Pending -> Active -> Completed`,
/// with cancellation allowed from `Pending` and `Active`. `Completed`
/// and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum StayState {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Canceled")]
    Canceled,
}

impl StayState {
    /// Parses a state name case-insensitively. Returns `None` for
    /// unrecognized names.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "canceled" | "cancelled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Whether the transition `self -> next` is permitted.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active)
                | (Self::Active, Self::Completed)
                | (Self::Pending, Self::Canceled)
                | (Self::Active, Self::Canceled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }
}

/// Staff access hierarchy. Ordering matters: `Staff < Manager < Admin`,
/// used for per-route access floors.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum AccessLevel {
    #[default]
    #[sea_orm(string_value = "Staff")]
    Staff,
    #[sea_orm(string_value = "Manager")]
    Manager,
    #[sea_orm(string_value = "Admin")]
    Admin,
}

impl AccessLevel {
    /// Parses an access level name case-insensitively, defaulting
    /// unknown values to the lowest level.
    pub fn parse_or_staff(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "manager" => Self::Manager,
            _ => Self::Staff,
        }
    }
}
