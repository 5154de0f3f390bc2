//! Status enums for ledger entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a redemption request.
///
/// The only transition is `Pending` -> `Approved`; there is no reject or
/// cancel state in this model. Both statuses reserve grams against the
/// user's balance from the moment the redemption is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RedemptionStatus {
    #[default]
    Pending,
    Approved,
}

impl RedemptionStatus {
    /// Whether a redemption in this status reserves grams against the
    /// redeemable balance. Every current status does; the method exists so
    /// the aggregation engine states the rule rather than assuming it.
    #[must_use]
    pub const fn is_outstanding(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

impl std::fmt::Display for RedemptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
        }
    }
}

impl std::str::FromStr for RedemptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            _ => Err(format!("invalid redemption status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(RedemptionStatus::default(), RedemptionStatus::Pending);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&RedemptionStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");

        let parsed: RedemptionStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, RedemptionStatus::Pending);
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in [RedemptionStatus::Pending, RedemptionStatus::Approved] {
            let parsed: RedemptionStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("rejected".parse::<RedemptionStatus>().is_err());
    }

    #[test]
    fn test_all_statuses_are_outstanding() {
        assert!(RedemptionStatus::Pending.is_outstanding());
        assert!(RedemptionStatus::Approved.is_outstanding());
    }
}
