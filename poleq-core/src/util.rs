//! Utilities for interaction of policies and environments.
use crate::{
    record::{RecordValue, Recorder},
    Env, Policy,
};
use anyhow::Result;
use log::info;
use std::time::SystemTime;

/// Run episodes with a policy and recorder.
///
/// Every step of every episode is written to `recorder`. The record of a step is
/// the one returned by [`Env::step`], extended with `episode`, `step` and `reward`.
/// Returns the cumulative reward of each episode.
///
/// Episode `i` starts from [`Env::reset_with_index`] with index `i`.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::with_capacity(n_episodes);

    for episode in 0..n_episodes {
        let timer = SystemTime::now();
        let mut prev_obs = env.reset_with_index(episode)?;
        let mut count_step = 0;
        let mut r_total = 0.0;

        loop {
            let act = policy.sample(&prev_obs);
            let (step, mut record) = env.step(&act);
            r_total += step.reward;

            record.insert("reward", RecordValue::Scalar(step.reward));
            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            recorder.write(record);
            count_step += 1;

            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
        }

        info!(
            "Episode {}, {} steps in {:.3}s, return = {}",
            episode,
            count_step,
            timer.elapsed()?.as_secs_f32(),
            r_total
        );
        rs.push(r_total);
    }

    Ok(rs)
}
