//! Observation of [`CartPole`](crate::CartPole).
use poleq_core::Obs;

/// Cart position, cart velocity, pole angle and pole angular velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartPoleObs(pub [f64; 4]);

impl CartPoleObs {
    /// The observation as a slice, e.g., to look it up in an observation table.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Cart position.
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    /// Pole angle in radians.
    pub fn theta(&self) -> f64 {
        self.0[2]
    }

    /// Draws the cart on a track of `[-2.4, 2.4]` as a line of text.
    pub fn render(&self) -> String {
        const WIDTH: usize = 41;
        let pos = ((self.x() + 2.4) / 4.8 * (WIDTH - 1) as f64).round();
        let pos = pos.max(0.0).min((WIDTH - 1) as f64) as usize;
        let pole = match self.theta() {
            t if t < -0.05 => '\\',
            t if t > 0.05 => '/',
            _ => '|',
        };

        let mut line = vec!['-'; WIDTH];
        line[pos] = pole;
        format!("[{}] theta = {:+.3}", line.into_iter().collect::<String>(), self.theta())
    }
}

impl Obs for CartPoleObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<CartPoleObs> for Vec<f32> {
    fn from(obs: CartPoleObs) -> Self {
        obs.0.iter().map(|v| *v as f32).collect()
    }
}
