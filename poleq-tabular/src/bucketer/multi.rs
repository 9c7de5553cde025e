//! Bucketer of vectors.
use super::Bucketer;
use crate::TabularError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Applies an independent [`Bucketer`] to each coordinate of a vector.
///
/// If a bucketer is a map `B: x -> y`, a multi-bucketer is the vector
/// `(B_1: x_1 -> y_1, ..., B_n: x_n -> y_n)`. All coordinates share the same
/// number of buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMultiBucketer")]
pub struct MultiBucketer {
    n_buckets: usize,
    bucketers: Vec<Bucketer>,
}

#[derive(Deserialize)]
struct RawMultiBucketer {
    n_buckets: usize,
    bucketers: Vec<Bucketer>,
}

impl TryFrom<RawMultiBucketer> for MultiBucketer {
    type Error = TabularError;

    fn try_from(raw: RawMultiBucketer) -> Result<Self, Self::Error> {
        if raw.n_buckets == 0 {
            return Err(TabularError::ZeroBuckets);
        }
        match raw.bucketers.iter().find(|b| b.n_buckets() != raw.n_buckets) {
            Some(b) => Err(TabularError::BucketCountMismatch {
                expected: raw.n_buckets,
                actual: b.n_buckets(),
            }),
            None => Ok(Self {
                n_buckets: raw.n_buckets,
                bucketers: raw.bucketers,
            }),
        }
    }
}

impl MultiBucketer {
    /// Creates a multi-bucketer from per-coordinate bounds.
    ///
    /// Coordinate `i` is bucketed on `[lower_bounds[i], upper_bounds[i]]`.
    pub fn new(
        lower_bounds: &[f64],
        upper_bounds: &[f64],
        n_buckets: usize,
    ) -> Result<Self, TabularError> {
        if lower_bounds.len() != upper_bounds.len() {
            return Err(TabularError::BoundsLengthMismatch {
                lower: lower_bounds.len(),
                upper: upper_bounds.len(),
            });
        }
        if n_buckets == 0 {
            return Err(TabularError::ZeroBuckets);
        }

        let bucketers = lower_bounds
            .iter()
            .zip(upper_bounds.iter())
            .map(|(&lower, &upper)| Bucketer::new(lower, upper, n_buckets))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            n_buckets,
            bucketers,
        })
    }

    /// Number of coordinates.
    pub fn n(&self) -> usize {
        self.bucketers.len()
    }

    /// Number of buckets of every coordinate.
    pub fn n_buckets(&self) -> usize {
        self.n_buckets
    }

    /// Bucketers of the coordinates, in order.
    pub fn bucketers(&self) -> &[Bucketer] {
        &self.bucketers
    }

    /// Returns the bucket index of each coordinate of `values`.
    ///
    /// Fails with [`TabularError::DimensionMismatch`] if `values.len() != self.n()`.
    pub fn get_bucketed(&self, values: &[f64]) -> Result<Vec<i64>, TabularError> {
        if values.len() != self.n() {
            return Err(TabularError::DimensionMismatch {
                expected: self.n(),
                actual: values.len(),
            });
        }

        Ok(self
            .bucketers
            .iter()
            .zip(values.iter())
            .map(|(bucketer, &value)| bucketer.get_bucketed(value))
            .collect())
    }
}
