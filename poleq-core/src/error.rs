//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    /// The requested key is not in the record.
    #[error("Record key error: {0}")]
    RecordKey(String),

    /// The value stored under `key` is not of the `expected` type.
    #[error("Record value type error: {key} is not {expected}")]
    RecordValueType {
        /// Key of the value.
        key: String,

        /// Name of the expected [`RecordValue`](crate::record::RecordValue) variant.
        expected: &'static str,
    },
}
