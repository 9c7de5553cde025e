//! Action of [`CartPole`](crate::CartPole).
use anyhow::{bail, Result};
use poleq_core::Act;

/// Direction of the force applied to the cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartPoleAct {
    /// Push the cart to the left.
    Left,

    /// Push the cart to the right.
    Right,
}

impl CartPoleAct {
    /// Number of actions.
    pub const N: usize = 2;

    /// Constructs an action from its index: 0 pushes left, 1 pushes right.
    pub fn from_index(ix: usize) -> Result<Self> {
        match ix {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            _ => bail!("Invalid CartPole action index: {}", ix),
        }
    }

    /// Index of the action, e.g., in a vector of action values.
    pub fn index(&self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl Act for CartPoleAct {
    fn len(&self) -> usize {
        1
    }
}
