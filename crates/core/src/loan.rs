//! Loan product types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of loan product guiding which step script is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Home,
    Personal,
    Business,
    Education,
    Vehicle,
}

impl LoanType {
    /// All loan types, in presentation order
    pub fn all() -> [LoanType; 5] {
        [
            LoanType::Home,
            LoanType::Personal,
            LoanType::Business,
            LoanType::Education,
            LoanType::Vehicle,
        ]
    }

    /// Lowercase identifier used in classifier prompts and wire payloads
    pub fn id(&self) -> &'static str {
        match self {
            LoanType::Home => "home",
            LoanType::Personal => "personal",
            LoanType::Business => "business",
            LoanType::Education => "education",
            LoanType::Vehicle => "vehicle",
        }
    }

    /// Display name for user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            LoanType::Home => "Home Loan",
            LoanType::Personal => "Personal Loan",
            LoanType::Business => "Business Loan",
            LoanType::Education => "Education Loan",
            LoanType::Vehicle => "Vehicle Loan",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LoanType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(LoanType::Home),
            "personal" => Ok(LoanType::Personal),
            "business" => Ok(LoanType::Business),
            "education" => Ok(LoanType::Education),
            "vehicle" => Ok(LoanType::Vehicle),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!("home".parse::<LoanType>(), Ok(LoanType::Home));
        assert_eq!(" Vehicle ".parse::<LoanType>(), Ok(LoanType::Vehicle));
    }

    #[test]
    fn test_parse_unknown() {
        assert!("gold".parse::<LoanType>().is_err());
        assert!("unknown".parse::<LoanType>().is_err());
    }

    #[test]
    fn test_roundtrip_ids() {
        for lt in LoanType::all() {
            assert_eq!(lt.id().parse::<LoanType>(), Ok(lt));
        }
    }
}
