//! Base implementation of records.
use crate::error::CoreError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, typically a reward or a counter.
    Scalar(f32),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array of floating-point values, e.g., an observation.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container for storing key-value pairs of various data types.
///
/// # Examples
///
/// ```rust
/// use poleq_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("reward", 1.0);
/// record.insert("episode", RecordValue::Scalar(3.0));
///
/// assert_eq!(record.get_scalar("episode").unwrap(), 3.0);
/// assert!(record.get_array1("reward").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// Values of `record` overwrite values of `self` with the same key.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, CoreError> {
        match self.lookup(k)? {
            RecordValue::Scalar(v) => Ok(*v),
            _ => Err(Self::type_error(k, "Scalar")),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, CoreError> {
        match self.lookup(k)? {
            RecordValue::Array1(v) => Ok(v.clone()),
            _ => Err(Self::type_error(k, "Array1")),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, CoreError> {
        match self.lookup(k)? {
            RecordValue::String(s) => Ok(s.clone()),
            _ => Err(Self::type_error(k, "String")),
        }
    }

    /// Gets a timestamp from the record.
    pub fn get_datetime(&self, k: &str) -> Result<DateTime<Local>, CoreError> {
        match self.lookup(k)? {
            RecordValue::DateTime(t) => Ok(*t),
            _ => Err(Self::type_error(k, "DateTime")),
        }
    }

    /// Returns the number of key-value pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn lookup(&self, k: &str) -> Result<&RecordValue, CoreError> {
        self.0
            .get(k)
            .ok_or_else(|| CoreError::RecordKey(k.to_string()))
    }

    fn type_error(k: &str, expected: &'static str) -> CoreError {
        CoreError::RecordValueType {
            key: k.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_with_second_record() {
        let a = Record::from_slice(&[
            ("reward", RecordValue::Scalar(1.0)),
            ("name", RecordValue::String("cartpole".into())),
        ]);
        let b = Record::from_scalar("reward", 0.0);
        let merged = a.merge(b);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get_scalar("reward"), Ok(0.0));
        assert_eq!(merged.get_string("name"), Ok("cartpole".to_string()));
    }

    #[test]
    fn test_typed_getters_report_errors() {
        let mut record = Record::empty();
        record.insert("obs", RecordValue::Array1(vec![0.5, -0.5]));
        record.insert("time", RecordValue::DateTime(Local::now()));

        assert_eq!(record.get_array1("obs"), Ok(vec![0.5, -0.5]));
        assert!(record.get_datetime("time").is_ok());
        assert_eq!(
            record.get_scalar("missing"),
            Err(CoreError::RecordKey("missing".to_string()))
        );
        assert_eq!(
            record.get_scalar("obs"),
            Err(CoreError::RecordValueType {
                key: "obs".to_string(),
                expected: "Scalar"
            })
        );
    }
}
