//! Record identifier type.

/// Identifier assigned to id-addressed records.
///
/// Identifiers are small positive integers drawn from a durable
/// per-collection sequence, so they are unique within one collection and
/// never reused after deletion. They carry no meaning across collections.
pub type RecordId = u64;
