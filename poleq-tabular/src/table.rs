//! Sparse tables of action values keyed by discrete observations.
//!
//! An [`ObservationTable`] indexes a conceptually dense array of shape
//! `n_buckets^n x n_actions` without allocating it: one level of nested maps per key
//! coordinate is created when a key is first seen, and the last level holds a vector
//! of `n_actions` values.
mod base;
mod config;
mod node;

pub use base::ObservationTable;
pub use config::{BucketingConfig, ObservationTableConfig};
