//! Environment.
use super::{Space, Step};
use anyhow::Result;
use std::fmt::Debug;

/// Represents an environment, typically an MDP.
///
/// Wrappers such as the evaluation and discretization wrappers implement this
/// trait themselves, so they can be stacked on top of each other.
pub trait Env {
    /// Observation of the environment.
    type Obs: Clone + Debug;

    /// Action of the environment.
    type Act: Clone + Debug;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self::Obs>>;

    /// Sets the random seed of the environment.
    fn seed(&mut self, seed: u64) -> Result<()>;

    /// Space of observations emitted by [`Env::reset`] and [`Env::step`].
    fn observation_space(&self) -> Space;

    /// Space of actions accepted by [`Env::step`].
    fn action_space(&self) -> Space;

    /// Releases resources held by the environment.
    fn close(&mut self) {}
}
