//! Shared document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use registrar_core::traits::{CollectionRecord, Identified};
use registrar_core::types::RecordId;

/// Metadata for a document a teacher has shared with the school.
///
/// Only the metadata lives in the collection; the file body itself is
/// outside this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Stored file reference.
    pub file_name: String,
    /// The teacher who uploaded the document.
    pub uploaded_by: RecordId,
    /// When the document was uploaded.
    pub upload_date: DateTime<Utc>,
}

impl CollectionRecord for Document {
    const COLLECTION: &'static str = "documents";
}

impl Identified for Document {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
