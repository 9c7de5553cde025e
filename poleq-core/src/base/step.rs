//! Environment step.
use super::Env;

/// Additional information to `Obs` and `Act`.
pub trait Info {}

impl Info for () {}

/// Outcome of applying an action `a_t` to an environment: the next observation
/// `o_t+1`, the reward `r_t` and whether the episode ended.
///
/// Environments are not vectorized, so every field describes a single environment.
pub struct Step<E: Env> {
    /// The action that was applied.
    pub act: E::Act,

    /// The observation after the action.
    pub obs: E::Obs,

    /// Reward of the transition.
    pub reward: f32,

    /// The episode reached a terminal state.
    pub is_terminated: bool,

    /// The episode was cut off, e.g., by a step limit.
    pub is_truncated: bool,

    /// Environment specific information.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`].
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Self {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    /// Returns `true` if the episode was terminated or truncated.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}
