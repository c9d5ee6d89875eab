// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint records, their status lifecycle, and categories.
//!
//! Status transitions are operator-initiated only. Terminal statuses
//! accept no further transitions.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Complaint status states tracking a complaint through resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Complaint received, no operator has acted on it yet.
    Pending,
    /// An operator is working on the complaint.
    InProgress,
    /// Complaint resolved to the member's satisfaction.
    Resolved,
    /// Complaint rejected as invalid or out of scope.
    Rejected,
}

impl ComplaintStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the human-readable label shown to operators.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }

    /// All statuses, in lifecycle order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pending,
            Self::InProgress,
            Self::Resolved,
            Self::Rejected,
        ]
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "" => Err(DomainError::EmptyStatus),
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidComplaintStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Re-selecting the current status is a no-op and always permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if *self == new_status {
            return Ok(());
        }

        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal status".to_string(),
            });
        }

        let valid = match self {
            Self::Pending => matches!(
                new_status,
                Self::InProgress | Self::Resolved | Self::Rejected
            ),
            Self::InProgress => matches!(new_status, Self::Resolved | Self::Rejected),
            Self::Resolved | Self::Rejected => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by status lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for ComplaintStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Categories a member can file a complaint under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    /// General complaint with no specific area.
    General,
    /// Technical issue with the platform.
    Technical,
    /// Account or membership problem.
    Account,
    /// Anything not covered by the other categories.
    Other,
}

impl ComplaintCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Technical => "technical",
            Self::Account => "account",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable label shown to operators.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Technical => "Technical",
            Self::Account => "Account",
            Self::Other => "Other",
        }
    }
}

impl FromStr for ComplaintCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "technical" => Ok(Self::Technical),
            "account" => Ok(Self::Account),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidComplaintCategory {
                category: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member complaint as held by the backend.
///
/// The console holds only a transient read copy; identity is the
/// server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    /// Server-assigned identifier.
    pub id: String,
    /// Name of the member who filed the complaint.
    pub member_name: String,
    /// Short subject line.
    pub subject: String,
    /// Full complaint text.
    pub description: String,
    /// The complaint category.
    pub category: ComplaintCategory,
    /// Current lifecycle status.
    pub status: ComplaintStatus,
    /// Optional free-text response recorded by an operator.
    pub admin_response: Option<String>,
    /// Creation timestamp as reported by the backend.
    pub created_at: String,
}
