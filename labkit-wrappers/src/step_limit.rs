//! Environment wrapper that cuts off episodes after a set number of steps.
use anyhow::Result;
use labkit_core::{Env, Space, Step};

/// Truncates episodes after `max_episode_steps` steps.
pub struct StepLimit<E: Env> {
    env: E,
    max_episode_steps: usize,
    current_steps: usize,
}

impl<E: Env> StepLimit<E> {
    /// Wraps `env` with a per-episode step limit.
    pub fn new(env: E, max_episode_steps: usize) -> Self {
        Self {
            env,
            max_episode_steps,
            current_steps: 0,
        }
    }

    /// Maximum number of steps per episode.
    pub fn max_episode_steps(&self) -> usize {
        self.max_episode_steps
    }

    /// Returns a reference to the wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }
}

impl<E: Env> Env for StepLimit<E> {
    type Obs = E::Obs;
    type Act = E::Act;

    fn reset(&mut self) -> Result<Self::Obs> {
        self.current_steps = 0;
        self.env.reset()
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self::Obs>> {
        let mut step = self.env.step(a)?;
        self.current_steps += 1;

        // Cut off the episode, but don't mark it as terminated.
        if self.current_steps >= self.max_episode_steps {
            step.is_truncated = true;
        }
        Ok(step)
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.env.seed(seed)
    }

    fn observation_space(&self) -> Space {
        self.env.observation_space()
    }

    fn action_space(&self) -> Space {
        self.env.action_space()
    }

    fn close(&mut self) {
        self.env.close()
    }
}
