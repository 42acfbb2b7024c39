//! Player order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a player order.
///
/// ```text
/// draft -> validating -> validated | rejected
/// validated -> published -> completed
/// any non-terminal -> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerOrderStatus {
    /// Being composed; freely editable.
    Draft,
    /// Validation fan-out in flight.
    Validating,
    /// Latest validation passed; may be published.
    Validated,
    /// Latest validation failed; must be fixed and revalidated.
    Rejected,
    /// Visible to contractors; no longer editable.
    Published,
    /// Fulfilled. Terminal.
    Completed,
    /// Withdrawn. Terminal.
    Cancelled,
}

impl PlayerOrderStatus {
    /// Returns true if the order accepts no further mutation.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if brief, budget and guarantees may be edited.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Validated | Self::Rejected)
    }

    /// Returns true if an edit in this status discards the latest validation.
    #[must_use]
    pub const fn reverts_on_edit(&self) -> bool {
        matches!(self, Self::Validated | Self::Rejected)
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Validating => "validating",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
            Self::Published => "published",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PlayerOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlayerOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "validating" => Ok(Self::Validating),
            "validated" => Ok(Self::Validated),
            "rejected" => Ok(Self::Rejected),
            "published" => Ok(Self::Published),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}
