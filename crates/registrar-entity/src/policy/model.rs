//! School policy entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use registrar_core::AppError;
use registrar_core::traits::{CollectionRecord, Identified};
use registrar_core::types::RecordId;

/// File types accepted for policy uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyFileType {
    Pdf,
    Docx,
}

impl PolicyFileType {
    /// Derive the file type from a file name's extension.
    ///
    /// This is the only way a `PolicyFileType` enters the system, so a
    /// policy record with an unsupported type cannot exist.
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase());
        match extension.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some("docx") => Ok(Self::Docx),
            _ => Err(AppError::validation(format!(
                "Unsupported policy file '{file_name}': only PDF and DOCX are accepted"
            ))),
        }
    }

    /// Return the file type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

impl fmt::Display for PolicyFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PolicyFileType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(AppError::validation(format!(
                "Invalid policy file type: '{s}'. Expected one of: pdf, docx"
            ))),
        }
    }
}

/// A published school policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Unique policy identifier.
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Stored file reference.
    pub file_name: String,
    /// Derived from the file name's extension on upload.
    pub file_type: PolicyFileType,
    /// The admin who published the policy.
    pub uploaded_by: RecordId,
    /// When the policy was published.
    pub upload_date: DateTime<Utc>,
}

impl CollectionRecord for Policy {
    const COLLECTION: &'static str = "policies";
}

impl Identified for Policy {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
