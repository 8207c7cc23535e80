//! Observation wrappers producing discrete states.
use super::Discretizer;
use anyhow::Result;
use labkit_core::{Env, Space, Step};

/// Replaces continuous observations with a single discrete state.
pub struct DiscretizationWrapper<E: Env> {
    env: E,
    discretizer: Discretizer,
}

impl<E> DiscretizationWrapper<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
{
    /// Wraps `env` with one separator list per observation dimension.
    pub fn new(env: E, separators: Vec<Vec<f64>>) -> Result<Self> {
        Ok(Self {
            env,
            discretizer: Discretizer::new(separators, None)?,
        })
    }

    /// Discretizer used by the wrapper.
    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    /// Converts an observation of the wrapped environment.
    pub fn observation(&self, obs: &E::Obs) -> Result<usize> {
        Ok(self.discretizer.state(obs.as_ref())?)
    }

    /// Returns a reference to the wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }
}

impl<E> Env for DiscretizationWrapper<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
{
    type Obs = usize;
    type Act = E::Act;

    fn reset(&mut self) -> Result<Self::Obs> {
        let obs = self.env.reset()?;
        self.observation(&obs)
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self::Obs>> {
        let step = self.env.step(a)?;
        let state = self.observation(&step.obs)?;
        Ok(step.map_obs(|_| state))
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.env.seed(seed)
    }

    fn observation_space(&self) -> Space {
        self.discretizer.observation_space()
    }

    fn action_space(&self) -> Space {
        self.env.action_space()
    }

    fn close(&mut self) {
        self.env.close()
    }
}

/// Replaces continuous observations with their states in several tilings.
pub struct TileCodingWrapper<E: Env> {
    env: E,
    discretizer: Discretizer,
}

impl<E> TileCodingWrapper<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
{
    /// Wraps `env` using `tiles` tilings of the grid given by `separators`.
    pub fn new(env: E, separators: Vec<Vec<f64>>, tiles: usize) -> Result<Self> {
        Ok(Self {
            env,
            discretizer: Discretizer::new(separators, Some(tiles))?,
        })
    }

    /// Discretizer used by the wrapper.
    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    /// Converts an observation of the wrapped environment.
    pub fn observation(&self, obs: &E::Obs) -> Result<Vec<usize>> {
        Ok(self.discretizer.tile_states(obs.as_ref())?)
    }

    /// Returns a reference to the wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }
}

impl<E> Env for TileCodingWrapper<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
{
    type Obs = Vec<usize>;
    type Act = E::Act;

    fn reset(&mut self) -> Result<Self::Obs> {
        let obs = self.env.reset()?;
        self.observation(&obs)
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self::Obs>> {
        let step = self.env.step(a)?;
        let states = self.observation(&step.obs)?;
        Ok(step.map_obs(|_| states))
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.env.seed(seed)
    }

    fn observation_space(&self) -> Space {
        self.discretizer.observation_space()
    }

    fn action_space(&self) -> Space {
        self.env.action_space()
    }

    fn close(&mut self) {
        self.env.close()
    }
}
