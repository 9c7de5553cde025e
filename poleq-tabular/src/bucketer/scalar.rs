//! Scalar bucketer.
use crate::TabularError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Bucket index returned for a value that falls in no bucket.
pub const OUT_OF_RANGE: i64 = -1;

/// Divides a continuous interval into `n_buckets` buckets of equal size.
///
/// The size of a bucket is
///
/// ```text
/// step_size = |lower_bound| / n_buckets + |upper_bound| / n_buckets
/// ```
///
/// which equals `(upper_bound - lower_bound) / n_buckets` only when the interval
/// contains zero. Bucket `b` is the half-open interval
/// `[lower_bound + b * step_size, lower_bound + (b + 1) * step_size)`.
///
/// A value in no bucket is mapped to [`OUT_OF_RANGE`], except when
/// `n_buckets - 1` equals `upper_bound`, in which case it is mapped to `n_buckets`.
/// Both the step size and this fallback are kept as they are so that tables
/// built with them stay addressable.
///
/// ```rust
/// use poleq_tabular::{Bucketer, OUT_OF_RANGE};
///
/// let bucketer = Bucketer::new(0.0, 10.0, 5).unwrap();
/// assert_eq!(bucketer.get_bucketed(1.999), 0);
/// assert_eq!(bucketer.get_bucketed(2.0), 1);
/// assert_eq!(bucketer.get_bucketed(10.0), OUT_OF_RANGE);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBucketer")]
pub struct Bucketer {
    lower_bound: f64,
    upper_bound: f64,
    n_buckets: usize,
}

/// Unchecked form of [`Bucketer`], validated on deserialization.
#[derive(Deserialize)]
struct RawBucketer {
    lower_bound: f64,
    upper_bound: f64,
    n_buckets: usize,
}

impl TryFrom<RawBucketer> for Bucketer {
    type Error = TabularError;

    fn try_from(raw: RawBucketer) -> Result<Self, Self::Error> {
        Bucketer::new(raw.lower_bound, raw.upper_bound, raw.n_buckets)
    }
}

impl Bucketer {
    /// Creates a bucketer on `[lower_bound, upper_bound]` with `n_buckets` buckets.
    ///
    /// Fails if `n_buckets == 0`, if a bound is not finite or if
    /// `lower_bound >= upper_bound`.
    pub fn new(lower_bound: f64, upper_bound: f64, n_buckets: usize) -> Result<Self, TabularError> {
        if n_buckets == 0 {
            return Err(TabularError::ZeroBuckets);
        }
        if !lower_bound.is_finite() || !upper_bound.is_finite() || lower_bound >= upper_bound {
            return Err(TabularError::InvalidBounds {
                lower: lower_bound,
                upper: upper_bound,
            });
        }

        Ok(Self {
            lower_bound,
            upper_bound,
            n_buckets,
        })
    }

    /// Lower bound of the interval.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Upper bound of the interval.
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Number of buckets.
    pub fn n_buckets(&self) -> usize {
        self.n_buckets
    }

    /// Size of a bucket.
    pub fn step_size(&self) -> f64 {
        let n = self.n_buckets as f64;
        self.lower_bound.abs() / n + self.upper_bound.abs() / n
    }

    /// Returns the bucket index of `value`.
    #[allow(clippy::float_cmp)]
    pub fn get_bucketed(&self, value: f64) -> i64 {
        let step_size = self.step_size();

        for bucket in 0..self.n_buckets {
            let lower = self.lower_bound + bucket as f64 * step_size;
            let upper = self.lower_bound + (bucket + 1) as f64 * step_size;
            if lower <= value && value < upper {
                return bucket as i64;
            }
        }

        // The last index tried in the loop, compared against the upper bound.
        if (self.n_buckets - 1) as f64 == self.upper_bound {
            self.n_buckets as i64
        } else {
            OUT_OF_RANGE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_lower_inclusive() -> Result<(), TabularError> {
        let bucketer = Bucketer::new(0.0, 10.0, 5)?;
        assert_eq!(bucketer.step_size(), 2.0);

        assert_eq!(bucketer.get_bucketed(0.0), 0);
        assert_eq!(bucketer.get_bucketed(1.999), 0);
        assert_eq!(bucketer.get_bucketed(2.0), 1);
        assert_eq!(bucketer.get_bucketed(3.999), 1);
        assert_eq!(bucketer.get_bucketed(4.0), 2);
        assert_eq!(bucketer.get_bucketed(9.999), 4);
        Ok(())
    }

    #[test]
    fn test_step_size_sums_absolute_bounds() -> Result<(), TabularError> {
        // Same-sign bounds: (|2| + |6|) / 4 = 2, not (6 - 2) / 4 = 1.
        let bucketer = Bucketer::new(2.0, 6.0, 4)?;
        assert_eq!(bucketer.step_size(), 2.0);
        assert_eq!(bucketer.get_bucketed(2.0), 0);
        assert_eq!(bucketer.get_bucketed(3.9), 0);
        assert_eq!(bucketer.get_bucketed(4.0), 1);
        assert_eq!(bucketer.get_bucketed(6.0), 2);
        assert_eq!(bucketer.get_bucketed(9.9), 3);
        assert_eq!(bucketer.get_bucketed(10.0), OUT_OF_RANGE);

        let symmetric = Bucketer::new(-5.0, 5.0, 5)?;
        assert_eq!(symmetric.step_size(), 2.0);
        assert_eq!(symmetric.get_bucketed(0.0), 2);
        assert_eq!(symmetric.get_bucketed(-5.0), 0);
        assert_eq!(symmetric.get_bucketed(4.999), 4);
        Ok(())
    }

    #[test]
    fn test_out_of_range_values() -> Result<(), TabularError> {
        let bucketer = Bucketer::new(0.0, 10.0, 5)?;
        assert_eq!(bucketer.get_bucketed(10.0), OUT_OF_RANGE);
        assert_eq!(bucketer.get_bucketed(25.0), OUT_OF_RANGE);
        assert_eq!(bucketer.get_bucketed(-0.001), OUT_OF_RANGE);
        assert_eq!(bucketer.get_bucketed(f64::NAN), OUT_OF_RANGE);
        Ok(())
    }

    #[test]
    fn test_fallback_when_last_index_equals_upper_bound() -> Result<(), TabularError> {
        // n_buckets - 1 == 4 == upper_bound: every unmatched value maps to n_buckets,
        // including values below the lower bound.
        let bucketer = Bucketer::new(0.0, 4.0, 5)?;
        assert_eq!(bucketer.get_bucketed(3.9), 4);
        assert_eq!(bucketer.get_bucketed(4.0), 5);
        assert_eq!(bucketer.get_bucketed(100.0), 5);
        assert_eq!(bucketer.get_bucketed(-1.0), 5);

        let single = Bucketer::new(-1.0, 0.0, 1)?;
        assert_eq!(single.get_bucketed(-0.5), 0);
        assert_eq!(single.get_bucketed(0.0), 1);
        Ok(())
    }

    #[test]
    fn test_values_inside_interval_are_monotone() -> Result<(), TabularError> {
        for (lower, upper, n) in [(-2.4, 2.4, 10), (0.0, 1.0, 7), (-0.21, 0.5, 3)] {
            let bucketer = Bucketer::new(lower, upper, n)?;
            let mut prev = 0;
            for i in 0..1000 {
                let value = lower + (upper - lower) * i as f64 / 1000.0;
                let bucket = bucketer.get_bucketed(value);
                assert!(bucket >= 0 && bucket < n as i64, "{} -> {}", value, bucket);
                assert!(bucket >= prev);
                prev = bucket;
            }
        }
        Ok(())
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(Bucketer::new(0.0, 1.0, 0), Err(TabularError::ZeroBuckets));
        assert_eq!(
            Bucketer::new(1.0, 1.0, 3),
            Err(TabularError::InvalidBounds {
                lower: 1.0,
                upper: 1.0
            })
        );
        assert!(Bucketer::new(f64::NEG_INFINITY, 1.0, 3).is_err());
        assert!(Bucketer::new(0.0, f64::NAN, 3).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Bucketer =
            serde_yaml::from_str("lower_bound: -1.0\nupper_bound: 1.0\nn_buckets: 4\n").unwrap();
        assert_eq!(ok, Bucketer::new(-1.0, 1.0, 4).unwrap());

        let err = serde_yaml::from_str::<Bucketer>("lower_bound: 1.0\nupper_bound: -1.0\nn_buckets: 4\n");
        assert!(err.is_err());
    }
}
