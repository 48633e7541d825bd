//! Supported conversation languages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported conversation language
///
/// Codes follow the BCP-47 style codes used by the speech APIs
/// (e.g. `hi-IN`). English is the base language: guidance content is
/// authored in English and translated on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en-IN")]
    English,
    #[serde(rename = "hi-IN")]
    Hindi,
    #[serde(rename = "ta-IN")]
    Tamil,
    #[serde(rename = "te-IN")]
    Telugu,
    #[serde(rename = "kn-IN")]
    Kannada,
    #[serde(rename = "ml-IN")]
    Malayalam,
    #[serde(rename = "mr-IN")]
    Marathi,
    #[serde(rename = "gu-IN")]
    Gujarati,
}

impl Language {
    /// Wire code sent to the speech APIs
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Tamil => "ta-IN",
            Language::Telugu => "te-IN",
            Language::Kannada => "kn-IN",
            Language::Malayalam => "ml-IN",
            Language::Marathi => "mr-IN",
            Language::Gujarati => "gu-IN",
        }
    }

    /// English name, used in translation prompts
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Marathi => "Marathi",
            Language::Gujarati => "Gujarati",
        }
    }

    /// Is this the base language content is authored in?
    pub fn is_base(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en-IN" => Ok(Language::English),
            "hi-IN" => Ok(Language::Hindi),
            "ta-IN" => Ok(Language::Tamil),
            "te-IN" => Ok(Language::Telugu),
            "kn-IN" => Ok(Language::Kannada),
            "ml-IN" => Ok(Language::Malayalam),
            "mr-IN" => Ok(Language::Marathi),
            "gu-IN" => Ok(Language::Gujarati),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("hi-IN".parse::<Language>(), Ok(Language::Hindi));
        assert_eq!("en-IN".parse::<Language>(), Ok(Language::English));
        assert!("fr-FR".parse::<Language>().is_err());
    }

    #[test]
    fn test_base_language() {
        assert!(Language::English.is_base());
        assert!(!Language::Tamil.is_base());
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&Language::Marathi).unwrap();
        assert_eq!(json, "\"mr-IN\"");
        let back: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Language::Marathi);
    }
}
