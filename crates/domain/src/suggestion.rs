// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Suggestion records, their status lifecycle, and categories.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Suggestion status states tracking a suggestion through review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    /// Suggestion received, not yet reviewed.
    Pending,
    /// An operator has reviewed the suggestion.
    Reviewed,
    /// The suggestion was implemented.
    Implemented,
    /// The suggestion was rejected.
    Rejected,
}

impl SuggestionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Implemented => "implemented",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the human-readable label shown to operators.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Implemented => "Implemented",
            Self::Rejected => "Rejected",
        }
    }

    /// All statuses, in lifecycle order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pending,
            Self::Reviewed,
            Self::Implemented,
            Self::Rejected,
        ]
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "" => Err(DomainError::EmptyStatus),
            "pending" => Ok(Self::Pending),
            "reviewed" => Ok(Self::Reviewed),
            "implemented" => Ok(Self::Implemented),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidSuggestionStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Implemented | Self::Rejected)
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
                Self::Reviewed | Self::Implemented | Self::Rejected
            ),
            Self::Reviewed => matches!(new_status, Self::Implemented | Self::Rejected),
            Self::Implemented | Self::Rejected => false,
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

impl FromStr for SuggestionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Categories a member can file a suggestion under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    /// General suggestion with no specific area.
    General,
    /// Request for a new feature.
    Feature,
    /// Improvement to something that already exists.
    Improvement,
    /// Anything not covered by the other categories.
    Other,
}

impl SuggestionCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Feature => "feature",
            Self::Improvement => "improvement",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable label shown to operators.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Feature => "Feature",
            Self::Improvement => "Improvement",
            Self::Other => "Other",
        }
    }
}

impl FromStr for SuggestionCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "feature" => Ok(Self::Feature),
            "improvement" => Ok(Self::Improvement),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidSuggestionCategory {
                category: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member suggestion as held by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Server-assigned identifier.
    pub id: String,
    /// Name of the member who filed the suggestion.
    pub member_name: String,
    /// Short subject line.
    pub subject: String,
    /// Full suggestion text.
    pub description: String,
    /// The suggestion category.
    pub category: SuggestionCategory,
    /// Current lifecycle status.
    pub status: SuggestionStatus,
    /// Optional free-text response recorded by an operator.
    pub admin_response: Option<String>,
    /// Creation timestamp as reported by the backend.
    pub created_at: String,
}
