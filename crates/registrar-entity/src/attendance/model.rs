//! Attendance entity model.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use registrar_core::traits::CollectionRecord;
use registrar_core::types::RecordId;

use super::status::AttendanceStatus;

/// Per-student attendance record.
///
/// The collection holds at most one record per student; `user_id` is the
/// record's identity. A submission replaces the whole day map, so the map
/// always reflects the latest upload in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    /// The student this record belongs to.
    pub user_id: RecordId,
    /// Date-keyed attendance statuses. Sorted so the persisted document
    /// lists days chronologically.
    pub days: BTreeMap<NaiveDate, AttendanceStatus>,
    /// Account that last recorded this attendance.
    pub updated_by: RecordId,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl CollectionRecord for Attendance {
    const COLLECTION: &'static str = "attendance";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_serialize_with_iso_date_keys() {
        let mut days = BTreeMap::new();
        days.insert(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            AttendanceStatus::Present,
        );
        days.insert(
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            AttendanceStatus::Late,
        );
        let record = Attendance {
            user_id: 9,
            days,
            updated_by: 2,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["days"]["2026-03-02"], "present");
        assert_eq!(json["days"]["2026-03-03"], "late");
        assert_eq!(json["userId"], 9);
    }
}
