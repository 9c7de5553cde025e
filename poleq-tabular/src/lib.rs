#![warn(missing_docs)]
//! Discretization of continuous observations and sparse action-value tables.
//!
//! A tabular agent on a continuous environment needs a discrete key for each observation.
//! This crate provides:
//!
//! * [`Bucketer`] maps a scalar into a bucket index of a closed interval.
//! * [`MultiBucketer`] applies one [`Bucketer`] per coordinate of an observation.
//! * [`Discretizer`] is the closed set of bucketing variants accepted by the table.
//! * [`ObservationTable`] lazily materializes one vector of action values per
//!   discrete key, and hands it out as a mutable slice.
//!
//! ```rust
//! use poleq_tabular::{MultiBucketer, ObservationTable};
//!
//! # fn main() -> Result<(), poleq_tabular::TabularError> {
//! let bucketer = MultiBucketer::new(&[0.0, -5.0], &[10.0, 5.0], 5)?;
//! let mut table = ObservationTable::new(0.0, 2, Some(bucketer.into()))?;
//!
//! table.get(&[2.0, 0.0])?[1] = 5.0;
//! assert_eq!(table.get_key(&[1, 2])?, &[0.0, 5.0]);
//! # Ok(())
//! # }
//! ```
pub mod bucketer;
mod error;
pub mod table;

pub use bucketer::{Bucketer, Discretizer, MultiBucketer, OUT_OF_RANGE};
pub use error::TabularError;
pub use table::{BucketingConfig, ObservationTable, ObservationTableConfig};
