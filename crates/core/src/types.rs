/// Place ids are derived from the creation timestamp (milliseconds since
/// the Unix epoch) and are unique and monotonically increasing within a
/// registry.
pub type PlaceId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
