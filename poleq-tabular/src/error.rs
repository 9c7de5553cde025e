//! Errors in the library.
use thiserror::Error;

/// Errors raised by bucketers and observation tables.
///
/// A value that falls outside every bucket is not an error; see
/// [`OUT_OF_RANGE`](crate::OUT_OF_RANGE).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabularError {
    /// Bounds of a bucketer are not finite or `lower >= upper`.
    #[error("Invalid bounds: lower = {lower}, upper = {upper}")]
    InvalidBounds {
        /// Lower bound.
        lower: f64,

        /// Upper bound.
        upper: f64,
    },

    /// A bucketer was configured with zero buckets.
    #[error("The number of buckets must be positive")]
    ZeroBuckets,

    /// A coordinate of a multi-bucketer has a different number of buckets.
    #[error("Bucket count mismatch: expected {expected}, got {actual}")]
    BucketCountMismatch {
        /// Number of buckets shared by the multi-bucketer.
        expected: usize,

        /// Number of buckets of the offending coordinate.
        actual: usize,
    },

    /// An observation table was configured with zero actions.
    #[error("The number of actions must be positive")]
    ZeroActions,

    /// Lower and upper bounds of a multi-bucketer have different lengths.
    #[error("Bounds length mismatch: {lower} lower bounds, {upper} upper bounds")]
    BoundsLengthMismatch {
        /// Number of lower bounds.
        lower: usize,

        /// Number of upper bounds.
        upper: usize,
    },

    /// A value vector or key disagrees with the configured dimensionality.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the bucketer or table.
        expected: usize,

        /// Length of the given vector.
        actual: usize,
    },

    /// A zero-length key was given to an observation table.
    #[error("Empty key")]
    EmptyKey,

    /// A raw observation value can not be used as a key without a discretizer.
    #[error("Observation value {0} is not discrete")]
    NonDiscreteObservation(f64),

    /// A stored leaf does not hold one value per action.
    #[error("Leaf length mismatch: expected {expected} action values, got {actual}")]
    LeafLengthMismatch {
        /// Number of actions of the table.
        expected: usize,

        /// Length of the leaf.
        actual: usize,
    },

    /// Stored keys have different lengths.
    #[error("Stored keys have different lengths: {first} and {other}")]
    UnevenKeyLengths {
        /// Length of the first key found.
        first: usize,

        /// Length of a key that differs from it.
        other: usize,
    },

    /// A nested level of a stored table has no entries.
    #[error("Empty branch in a stored table")]
    EmptyBranch,
}
