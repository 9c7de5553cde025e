//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Environments in this workspace are not vectorized, so an observation holds
/// the state of a single environment. [`Obs::len`] returns the number of
/// coordinates in that state.
pub trait Obs: Clone + Debug {
    /// Returns the number of coordinates of the observation.
    fn len(&self) -> usize;

    /// Returns `true` if the observation has no coordinates.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An action of an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of components of the action.
    fn len(&self) -> usize;

    /// Returns `true` if the action has no components.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
