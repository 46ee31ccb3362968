//! School subject vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subjects taught at the school.
///
/// The set is fixed: marks and routine periods always reference one of
/// these values, so a typo in a submission fails at parse time instead of
/// creating an orphan subject in the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    English,
    Science,
    History,
    Geography,
    Ict,
}

impl Subject {
    /// Return the subject as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::English => "english",
            Self::Science => "science",
            Self::History => "history",
            Self::Geography => "geography",
            Self::Ict => "ict",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Subject {
    type Err = registrar_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "math" => Ok(Self::Math),
            "english" => Ok(Self::English),
            "science" => Ok(Self::Science),
            "history" => Ok(Self::History),
            "geography" => Ok(Self::Geography),
            "ict" => Ok(Self::Ict),
            _ => Err(registrar_core::AppError::validation(format!(
                "Invalid subject: '{s}'. Expected one of: math, english, science, history, geography, ict"
            ))),
        }
    }
}
