//! Letter grade derivation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade derived from a numeric mark.
///
/// Grades are never submitted; they are always computed from the marks at
/// write time, so a stored grade and its marks cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Derive the grade for a 0-100 mark.
    pub fn from_marks(marks: u8) -> Self {
        match marks {
            90..=u8::MAX => Self::A,
            80..=89 => Self::B,
            70..=79 => Self::C,
            60..=69 => Self::D,
            _ => Self::F,
        }
    }

    /// Return the grade letter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
