//! Routine entity model.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use registrar_core::traits::{CollectionRecord, Identified};
use registrar_core::types::RecordId;

use crate::subject::Subject;

use super::day::Weekday;

/// One weekly class period for a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    /// Unique routine identifier.
    pub id: RecordId,
    /// Section the period belongs to.
    pub section: String,
    /// Day of the week.
    pub day: Weekday,
    /// Subject taught in the period.
    pub subject: Subject,
    /// Period start time.
    pub start_time: NaiveTime,
    /// Period end time, strictly after the start.
    pub end_time: NaiveTime,
    /// The teacher assigned to the period.
    pub teacher_id: RecordId,
}

impl CollectionRecord for Routine {
    const COLLECTION: &'static str = "routines";
}

impl Identified for Routine {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
