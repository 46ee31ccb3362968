//! Mark entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use registrar_core::traits::CollectionRecord;
use registrar_core::types::RecordId;

use crate::subject::Subject;

use super::grade::Grade;

/// One student's mark in one subject.
///
/// The collection holds at most one record per `(user_id, subject)` pair;
/// that pair is the record's identity. Resubmitting overwrites the marks
/// and the derived grade in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    /// The student this mark belongs to.
    pub user_id: RecordId,
    /// Subject the mark was awarded in.
    pub subject: Subject,
    /// Numeric mark, 0-100 inclusive.
    pub marks: u8,
    /// Letter grade derived from the marks.
    pub grade: Grade,
    /// Account that last recorded this mark.
    pub updated_by: RecordId,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl CollectionRecord for Mark {
    const COLLECTION: &'static str = "marks";
}
