//! Traits connecting domain records to the generic collection store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::types::RecordId;

/// A record type persisted in a named JSON collection.
///
/// Every persisted entity implements this trait once, naming the collection
/// it lives in. The serde bounds are what the store needs to round-trip the
/// record through the collection document.
pub trait CollectionRecord:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Collection name, also the file stem of the backing JSON document.
    const COLLECTION: &'static str;
}

/// A collection record addressed by a store-assigned integer id.
///
/// Records keyed by their own domain fields (one record per student, one
/// record per student and subject) do not implement this trait; their
/// identity never comes from the id sequence.
pub trait Identified: CollectionRecord {
    /// The record's identifier.
    fn id(&self) -> RecordId;

    /// Overwrite the identifier. Called exactly once, on insert.
    fn assign_id(&mut self, id: RecordId);
}
