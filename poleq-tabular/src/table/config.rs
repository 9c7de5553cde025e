//! Configuration of [`ObservationTable`](super::ObservationTable).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Per-coordinate bounds and the shared number of buckets of a discretizer.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct BucketingConfig {
    /// The number of buckets of every coordinate.
    pub n_buckets: usize,

    /// Lower bounds of the coordinates.
    pub lower_bounds: Vec<f64>,

    /// Upper bounds of the coordinates.
    pub upper_bounds: Vec<f64>,
}

/// Configuration of [`ObservationTable`](super::ObservationTable).
///
/// ```rust
/// use poleq_tabular::{ObservationTable, ObservationTableConfig};
///
/// let config = ObservationTableConfig::default()
///     .n_actions(3)
///     .init_value(1.0)
///     .bucketing(4, vec![-1.0, 0.0], vec![1.0, 2.0]);
/// let table = ObservationTable::build(&config).unwrap();
/// assert_eq!(table.discretizer().unwrap().dim(), 2);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ObservationTableConfig {
    /// The number of actions.
    pub n_actions: usize,

    /// The value of every action in a newly created leaf.
    pub init_value: f64,

    /// Discretization of observations. If `None`, observations must already be discrete.
    pub bucketing: Option<BucketingConfig>,
}

impl Default for ObservationTableConfig {
    fn default() -> Self {
        Self {
            n_actions: 2,
            init_value: 0.0,
            bucketing: None,
        }
    }
}

impl ObservationTableConfig {
    /// Bounds of cart position, cart velocity, pole angle and pole angular velocity.
    const CARTPOLE_BOUNDS: [(f64, f64); 4] = [(-2.4, 2.4), (-3.0, 3.0), (-0.21, 0.21), (-3.5, 3.5)];

    /// Configuration for CartPole with two actions and `n_buckets` buckets per coordinate.
    pub fn cartpole(n_buckets: usize) -> Self {
        let (lower_bounds, upper_bounds) = Self::CARTPOLE_BOUNDS.iter().cloned().unzip();
        Self::default().bucketing(n_buckets, lower_bounds, upper_bounds)
    }

    /// Sets the number of actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }

    /// Sets the initial value of action values.
    pub fn init_value(mut self, v: f64) -> Self {
        self.init_value = v;
        self
    }

    /// Sets the discretization of observations.
    pub fn bucketing(mut self, n_buckets: usize, lower_bounds: Vec<f64>, upper_bounds: Vec<f64>) -> Self {
        self.bucketing = Some(BucketingConfig {
            n_buckets,
            lower_bounds,
            upper_bounds,
        });
        self
    }

    /// Removes the discretization; observations must then be discrete.
    pub fn no_bucketing(mut self) -> Self {
        self.bucketing = None;
        self
    }

    /// Constructs [`ObservationTableConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ObservationTableConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
