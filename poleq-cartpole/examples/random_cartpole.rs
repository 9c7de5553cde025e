use anyhow::Result;
use clap::Parser;
use poleq_cartpole::{CartPole, CartPoleAct, CartPoleConfig, CartPoleObs};
use poleq_core::{record::BufferedRecorder, util, Env as _, Policy};
use poleq_tabular::{ObservationTable, ObservationTableConfig, OUT_OF_RANGE};

/// Run a random policy on CartPole and count visits of bucketed state-action pairs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of episodes
    #[arg(long, default_value_t = 100)]
    n_episodes: usize,

    /// Number of buckets per observation coordinate
    #[arg(long, default_value_t = 10)]
    n_buckets: usize,

    /// Random seed of the environment and the policy
    #[arg(long, default_value_t = 42)]
    seed: i64,

    /// Print the cart at every step
    #[arg(long, default_value_t = false)]
    render: bool,

    /// YAML file of the observation table configuration, overrides `n_buckets`
    #[arg(long)]
    config: Option<String>,

    /// YAML file of the environment configuration
    #[arg(long)]
    env_config: Option<String>,

    /// Default log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Picks actions uniformly at random and counts how often each is taken in a bucket.
struct RandomPolicy {
    table: ObservationTable,
    render: bool,
    error: Option<anyhow::Error>,
}

impl RandomPolicy {
    fn new(table: ObservationTable, render: bool) -> Self {
        Self {
            table,
            render,
            error: None,
        }
    }

    fn count(&mut self, obs: &CartPoleObs) -> Result<CartPoleAct> {
        let act = CartPoleAct::from_index(fastrand::usize(..CartPoleAct::N))?;
        self.table.get(obs.as_slice())?[act.index()] += 1.0;
        Ok(act)
    }
}

impl Policy<CartPole> for RandomPolicy {
    fn sample(&mut self, obs: &CartPoleObs) -> CartPoleAct {
        if self.render {
            println!("{}", obs.render());
        }

        match self.count(obs) {
            Ok(act) => act,
            Err(e) => {
                self.error.get_or_insert(e);
                CartPoleAct::Left
            }
        }
    }
}

fn table_config(args: &Args) -> Result<ObservationTableConfig> {
    let config = match &args.config {
        Some(path) => ObservationTableConfig::load(path)?,
        None => ObservationTableConfig::cartpole(args.n_buckets),
    };
    Ok(config.n_actions(CartPoleAct::N).init_value(0.0))
}

fn run(args: &Args) -> Result<(Vec<f32>, ObservationTable)> {
    let env_config = match &args.env_config {
        Some(path) => CartPoleConfig::load(path)?,
        None => CartPoleConfig::default(),
    };
    let mut env = CartPole::build(&env_config, args.seed)?;
    let table = ObservationTable::build(&table_config(args)?)?;
    let mut policy = RandomPolicy::new(table, args.render);
    let mut recorder = BufferedRecorder::new();

    let returns = util::eval_with_recorder(&mut env, &mut policy, args.n_episodes, &mut recorder)?;
    if let Some(e) = policy.error {
        return Err(e);
    }
    log::debug!("{} steps recorded", recorder.len());

    Ok((returns, policy.table))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();
    fastrand::seed(args.seed as u64);

    let (returns, table) = run(&args)?;

    let total_steps: f32 = returns.iter().sum();
    let n_out_of_range = table
        .iter()
        .filter(|(key, _)| key.contains(&OUT_OF_RANGE))
        .count();
    log::info!(
        "{} episodes, mean length = {:.2}, total steps = {}",
        returns.len(),
        total_steps / returns.len().max(1) as f32,
        total_steps
    );
    log::info!(
        "{} observation buckets visited, {} with an out-of-range coordinate, depth = {}",
        table.n_leaves(),
        n_out_of_range,
        table.depth()
    );

    Ok(())
}
