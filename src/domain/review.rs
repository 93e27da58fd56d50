//! Review actions
//!
//! Staff decisions on loans and KYC documents form a closed set. The
//! free-text boundary is handled by `FromStr`, so unknown actions are
//! rejected before they reach any handler.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "APPROVE",
            ReviewAction::Reject => "REJECT",
        }
    }

    /// Past-tense form used in notifications ("APPROVED" / "REJECTED").
    pub fn as_outcome(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "APPROVED",
            ReviewAction::Reject => "REJECTED",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReviewAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "APPROVE" => Ok(ReviewAction::Approve),
            "REJECT" => Ok(ReviewAction::Reject),
            other => Err(CoreError::InvalidAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("approve".parse::<ReviewAction>().unwrap(), ReviewAction::Approve);
        assert_eq!("REJECT".parse::<ReviewAction>().unwrap(), ReviewAction::Reject);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let err = "ESCALATE".parse::<ReviewAction>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidAction(ref s) if s == "ESCALATE"));
    }
}
