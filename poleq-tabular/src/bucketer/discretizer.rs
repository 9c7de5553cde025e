//! Closed set of bucketing variants used by observation tables.
use super::{Bucketer, MultiBucketer};
use crate::TabularError;
use serde::{Deserialize, Serialize};

/// Bucketing applied by an [`ObservationTable`](crate::ObservationTable) to raw observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Discretizer {
    /// One-dimensional observations.
    Scalar(Bucketer),

    /// Observations with one bucketer per coordinate.
    Vector(MultiBucketer),
}

impl Discretizer {
    /// Number of coordinates of the observations accepted by [`Discretizer::bucket`].
    pub fn dim(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Vector(b) => b.n(),
        }
    }

    /// Converts an observation into a discrete key.
    pub fn bucket(&self, values: &[f64]) -> Result<Vec<i64>, TabularError> {
        match self {
            Self::Scalar(b) => match values {
                [value] => Ok(vec![b.get_bucketed(*value)]),
                _ => Err(TabularError::DimensionMismatch {
                    expected: 1,
                    actual: values.len(),
                }),
            },
            Self::Vector(b) => b.get_bucketed(values),
        }
    }
}

impl From<Bucketer> for Discretizer {
    fn from(b: Bucketer) -> Self {
        Self::Scalar(b)
    }
}

impl From<MultiBucketer> for Discretizer {
    fn from(b: MultiBucketer) -> Self {
        Self::Vector(b)
    }
}
