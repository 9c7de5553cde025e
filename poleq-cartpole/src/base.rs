//! CartPole environment.
use crate::{CartPoleAct, CartPoleConfig, CartPoleObs};
use anyhow::{ensure, Result};
use log::{debug, trace, warn};
use poleq_core::{
    record::{Record, RecordValue},
    Env, Step,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};

const GRAVITY: f64 = 9.8;
const MASS_CART: f64 = 1.0;
const MASS_POLE: f64 = 0.1;
const TOTAL_MASS: f64 = MASS_CART + MASS_POLE;
/// Half of the pole length.
const LENGTH: f64 = 0.5;
const POLE_MASS_LENGTH: f64 = MASS_POLE * LENGTH;

/// 12 degrees.
const THETA_THRESHOLD: f64 = 12.0 * 2.0 * std::f64::consts::PI / 360.0;
const X_THRESHOLD: f64 = 2.4;

/// CartPole environment.
///
/// ```rust
/// use poleq_cartpole::{CartPole, CartPoleAct, CartPoleConfig};
/// use poleq_core::Env;
///
/// let mut env = CartPole::build(&CartPoleConfig::default(), 42).unwrap();
/// let obs = env.reset().unwrap();
/// let (step, _) = env.step(&CartPoleAct::Right);
/// assert!(step.obs.0[1] > obs.0[1]);
/// ```
#[derive(Debug)]
pub struct CartPole {
    config: CartPoleConfig,

    /// Seed given to [`Env::build`].
    seed: i64,

    rng: SmallRng,

    /// `(x, x_dot, theta, theta_dot)`.
    state: [f64; 4],

    count_steps: usize,

    done: bool,
}

impl CartPole {
    /// Current state.
    pub fn state(&self) -> CartPoleObs {
        CartPoleObs(self.state)
    }

    /// The number of steps in the current episode.
    pub fn count_steps(&self) -> usize {
        self.count_steps
    }

    fn is_failed(&self) -> bool {
        let [x, _, theta, _] = self.state;
        x.abs() > X_THRESHOLD || theta.abs() > THETA_THRESHOLD
    }

    /// Advances the state by one explicit Euler step.
    fn integrate(&mut self, act: &CartPoleAct) {
        let [x, x_dot, theta, theta_dot] = self.state;
        let force = match act {
            CartPoleAct::Left => -self.config.force_mag,
            CartPoleAct::Right => self.config.force_mag,
        };

        let (sin_theta, cos_theta) = theta.sin_cos();
        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin_theta) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin_theta - cos_theta * temp)
            / (LENGTH * (4.0 / 3.0 - MASS_POLE * cos_theta * cos_theta / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos_theta / TOTAL_MASS;

        let tau = self.config.tau;
        self.state = [
            x + tau * x_dot,
            x_dot + tau * x_acc,
            theta + tau * theta_dot,
            theta_dot + tau * theta_acc,
        ];
    }
}

impl Env for CartPole {
    type Config = CartPoleConfig;
    type Obs = CartPoleObs;
    type Act = CartPoleAct;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        ensure!(config.max_steps > 0, "max_steps must be positive");
        ensure!(
            config.init_range >= 0.0 && config.init_range.is_finite(),
            "init_range must be a non-negative number, got {}",
            config.init_range
        );

        Ok(Self {
            config: config.clone(),
            seed,
            rng: SmallRng::seed_from_u64(seed as u64),
            state: [0.0; 4],
            count_steps: 0,
            done: false,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        if self.done {
            warn!("CartPole::step() called after the episode ended; call reset() first");
        }

        self.integrate(a);
        self.count_steps += 1;

        let is_terminated = self.is_failed();
        let is_truncated = !is_terminated && self.count_steps >= self.config.max_steps;
        self.done = is_terminated || is_truncated;
        if self.done {
            debug!(
                "Episode ended after {} steps (terminated = {})",
                self.count_steps, is_terminated
            );
        }

        let obs = CartPoleObs(self.state);
        let record = Record::from_slice(&[("obs", RecordValue::Array1(obs.into()))]);
        let step = Step::new(obs, *a, 1.0, is_terminated, is_truncated, ());

        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        trace!("CartPole::reset()");
        let r = self.config.init_range;
        for v in self.state.iter_mut() {
            *v = if r > 0.0 { self.rng.gen_range(-r..=r) } else { 0.0 };
        }
        self.count_steps = 0;
        self.done = false;
        Ok(CartPoleObs(self.state))
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng = SmallRng::seed_from_u64(self.seed.wrapping_add(ix as i64) as u64);
        self.reset()
    }
}
