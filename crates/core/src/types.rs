/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Wall-clock time of day used for break windows and break records.
pub type TimeOfDay = chrono::NaiveTime;

/// Whole minutes, matching the SMALLINT duration columns.
pub type Minutes = i16;
