/// Documents are keyed by short alphanumeric strings (see [`crate::ids`]).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
