//! Configuration of [`CartPole`](crate::CartPole).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`CartPole`](crate::CartPole).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CartPoleConfig {
    /// The number of steps after which an episode is truncated.
    pub max_steps: usize,

    /// Every component of the initial state is drawn from `[-init_range, init_range]`.
    pub init_range: f64,

    /// Magnitude of the force applied to the cart.
    pub force_mag: f64,

    /// Seconds between state updates.
    pub tau: f64,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            max_steps: 200,
            init_range: 0.05,
            force_mag: 10.0,
            tau: 0.02,
        }
    }
}

impl CartPoleConfig {
    /// Sets the number of steps after which an episode is truncated.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the range of the initial state.
    pub fn init_range(mut self, v: f64) -> Self {
        self.init_range = v;
        self
    }

    /// Sets the magnitude of the force applied to the cart.
    pub fn force_mag(mut self, v: f64) -> Self {
        self.force_mag = v;
        self
    }

    /// Sets the time step of the simulation.
    pub fn tau(mut self, v: f64) -> Self {
        self.tau = v;
        self
    }

    /// Constructs [`CartPoleConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CartPoleConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
