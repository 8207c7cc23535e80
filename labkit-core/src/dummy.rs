//! This module is used for tests.
use crate::{Env, Space, Step};
use anyhow::Result;

/// Deterministic environment with scripted episode lengths.
///
/// Every step yields reward `1.0`, so the return of an episode equals its
/// length. Episode lengths cycle through `lengths`. The observation is
/// `[t * scale; dim]` where `t` is the step counter within the episode.
/// The action is ignored.
#[derive(Clone, Debug)]
pub struct ScriptedEnv {
    lengths: Vec<usize>,
    dim: usize,
    scale: f64,
    episode: usize,
    t: usize,

    /// Last seed given through [`Env::seed`].
    pub seed: Option<u64>,

    /// Number of times [`Env::close`] was called.
    pub n_closed: usize,
}

impl ScriptedEnv {
    /// Creates the environment.
    ///
    /// Episodes end after at least one step, so zero lengths and an empty
    /// `lengths` both run one-step episodes.
    pub fn new(lengths: Vec<usize>, dim: usize) -> Self {
        let lengths = if lengths.is_empty() { vec![1] } else { lengths };
        Self {
            lengths,
            dim,
            scale: 1.0,
            episode: 0,
            t: 0,
            seed: None,
            n_closed: 0,
        }
    }

    /// Sets the factor applied to the step counter in observations.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    fn obs(&self) -> Vec<f64> {
        vec![self.t as f64 * self.scale; self.dim]
    }

    fn current_length(&self) -> usize {
        self.lengths[self.episode % self.lengths.len()]
    }
}

impl Env for ScriptedEnv {
    type Obs = Vec<f64>;
    type Act = usize;

    fn reset(&mut self) -> Result<Self::Obs> {
        if self.t > 0 {
            self.episode += 1;
        }
        self.t = 0;
        Ok(self.obs())
    }

    fn step(&mut self, _a: &Self::Act) -> Result<Step<Self::Obs>> {
        self.t += 1;
        let is_terminated = self.t >= self.current_length();
        Ok(Step::new(self.obs(), 1.0, is_terminated, false))
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.seed = Some(seed);
        Ok(())
    }

    fn observation_space(&self) -> Space {
        Space::Box {
            low: vec![0.0; self.dim],
            high: vec![f64::INFINITY; self.dim],
        }
    }

    fn action_space(&self) -> Space {
        Space::Discrete(2)
    }

    fn close(&mut self) {
        self.n_closed += 1;
    }
}
