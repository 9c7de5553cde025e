#![warn(missing_docs)]
//! Core components of poleq.
//!
//! This crate defines the pieces shared by environments and the code driving them:
//!
//! * [`Env`], [`Obs`], [`Act`] and [`Step`] describe an environment and its interaction steps.
//! * [`Policy`] maps an observation to an action.
//! * [`record`] provides [`Record`](record::Record) and recorders for collecting
//!   values produced while running episodes.
//! * [`util::eval_with_recorder`] runs episodes of a policy on an environment.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};
