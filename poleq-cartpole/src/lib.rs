#![warn(missing_docs)]
//! CartPole environment.
//!
//! A pole is attached by an unactuated joint to a cart moving along a frictionless
//! track. The agent pushes the cart to the left or to the right at every step and
//! receives a reward of 1 for every step the pole stays upright.
//!
//! [`CartPole`] implements [`poleq_core::Env`] with the dynamics of the classic
//! `CartPole-v0` task:
//!
//! * Observation ([`CartPoleObs`]): cart position, cart velocity, pole angle and
//!   pole angular velocity.
//! * Action ([`CartPoleAct`]): push left or push right.
//! * An episode terminates when the cart leaves `[-2.4, 2.4]` or the pole tilts
//!   more than 12 degrees, and is truncated after [`CartPoleConfig`]`::max_steps` steps.
mod act;
mod base;
mod config;
mod obs;
pub use act::CartPoleAct;
pub use base::CartPole;
pub use config::CartPoleConfig;
pub use obs::CartPoleObs;
