//! Bucketing of continuous values into discrete indices.
//!
//! [`Bucketer`] handles a scalar, [`MultiBucketer`] a vector with one bucketer per
//! coordinate. [`Discretizer`] wraps both behind one call contract,
//! [`Discretizer::bucket`], which is what [`ObservationTable`](crate::ObservationTable) uses.
mod discretizer;
mod multi;
mod scalar;

pub use discretizer::Discretizer;
pub use multi::MultiBucketer;
pub use scalar::{Bucketer, OUT_OF_RANGE};
