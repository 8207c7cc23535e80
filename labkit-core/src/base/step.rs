//! Environment step.

/// Represents an observation and reward pair `(o_t+1, r_t)` with the flags
/// denoting the end of an episode.
///
/// An environment emits a [`Step`] object at every interaction step.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<O> {
    /// Observation.
    pub obs: O,

    /// Reward.
    pub reward: f64,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated.
    pub is_truncated: bool,
}

impl<O> Step<O> {
    /// Constructs a [`Step`] object.
    pub fn new(obs: O, reward: f64, is_terminated: bool, is_truncated: bool) -> Self {
        Step {
            obs,
            reward,
            is_terminated,
            is_truncated,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }

    /// Replaces the observation, keeping reward and flags.
    pub fn map_obs<P>(self, f: impl FnOnce(O) -> P) -> Step<P> {
        Step {
            obs: f(self.obs),
            reward: self.reward,
            is_terminated: self.is_terminated,
            is_truncated: self.is_truncated,
        }
    }
}
