//! Membership status for persons in the contact book

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A person's membership standing, which gates lending eligibility.
///
/// The wire representation is exactly one of the three literals
/// `ACTIVE`, `EXPIRED`, `NON-MEMBER` (case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "EXPIRED")]
    Expired,
    #[serde(rename = "NON-MEMBER")]
    NonMember,
}

impl Membership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Membership::Active => "ACTIVE",
            Membership::Expired => "EXPIRED",
            Membership::NonMember => "NON-MEMBER",
        }
    }

    /// Whether this standing allows taking out a new loan.
    ///
    /// Expired members keep their borrowing rights; only non-members
    /// are refused.
    pub fn can_borrow(&self) -> bool {
        !matches!(self, Membership::NonMember)
    }
}

impl std::fmt::Display for Membership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Membership {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Membership::Active),
            "EXPIRED" => Ok(Membership::Expired),
            "NON-MEMBER" => Ok(Membership::NonMember),
            _ => Err(AppError::InvalidMembership),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MEMBERSHIP_CONSTRAINTS;

    #[test]
    fn test_parse_valid_statuses() {
        assert_eq!("ACTIVE".parse::<Membership>().unwrap(), Membership::Active);
        assert_eq!("EXPIRED".parse::<Membership>().unwrap(), Membership::Expired);
        assert_eq!(
            "NON-MEMBER".parse::<Membership>().unwrap(),
            Membership::NonMember
        );
    }

    #[test]
    fn test_parse_display_round_trip() {
        for s in ["ACTIVE", "EXPIRED", "NON-MEMBER"] {
            let status: Membership = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
    }

    #[test]
    fn test_parse_rejects_other_strings() {
        for s in ["active", "Active", "NONMEMBER", "NON MEMBER", "", "MEMBER"] {
            let err = s.parse::<Membership>().unwrap_err();
            assert_eq!(err.to_string(), MEMBERSHIP_CONSTRAINTS);
        }
    }

    #[test]
    fn test_borrowing_eligibility() {
        assert!(Membership::Active.can_borrow());
        assert!(Membership::Expired.can_borrow());
        assert!(!Membership::NonMember.can_borrow());
    }

    #[test]
    fn test_serde_uses_display_literals() {
        let json = serde_json::to_string(&Membership::NonMember).unwrap();
        assert_eq!(json, "\"NON-MEMBER\"");
        let back: Membership = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Membership::NonMember);
    }
}
