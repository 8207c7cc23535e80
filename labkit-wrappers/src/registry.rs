//! Registered environment specifications.
use crate::StepLimit;
use labkit_core::Env;

/// Registration record of an environment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvSpec {
    /// Identifier of the environment.
    pub id: &'static str,

    /// Implementation the environment is created from.
    pub entry_point: &'static str,

    /// Episodes are truncated after this number of steps.
    pub max_episode_steps: usize,

    /// Mean return at which the environment is considered solved.
    pub reward_threshold: Option<f64>,
}

/// MountainCar with episodes of up to 1000 steps instead of 200.
pub const MOUNTAIN_CAR_1000: EnvSpec = EnvSpec {
    id: "MountainCar1000-v0",
    entry_point: "gymnasium.envs.classic_control.mountain_car:MountainCarEnv",
    max_episode_steps: 1000,
    reward_threshold: Some(-110.0),
};

const REGISTRY: &[EnvSpec] = &[MOUNTAIN_CAR_1000];

/// Returns the specification registered under `id`.
pub fn spec(id: &str) -> Option<&'static EnvSpec> {
    REGISTRY.iter().find(|spec| spec.id == id)
}

impl EnvSpec {
    /// Applies the step limit of the specification to `env`.
    pub fn wrap<E: Env>(&self, env: E) -> StepLimit<E> {
        StepLimit::new(env, self.max_episode_steps)
    }

    /// Returns `true` if `mean_return` reaches the reward threshold.
    pub fn is_solved(&self, mean_return: f64) -> bool {
        match self.reward_threshold {
            Some(threshold) => mean_return >= threshold,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labkit_core::dummy::ScriptedEnv;

    #[test]
    fn test_lookup() {
        assert_eq!(spec("MountainCar1000-v0"), Some(&MOUNTAIN_CAR_1000));
        assert_eq!(spec("MountainCar-v0"), None);
    }

    #[test]
    fn test_wrap_and_threshold() {
        let env = MOUNTAIN_CAR_1000.wrap(ScriptedEnv::new(vec![5000], 2));
        assert_eq!(env.max_episode_steps(), 1000);
        assert!(MOUNTAIN_CAR_1000.is_solved(-105.0));
        assert!(!MOUNTAIN_CAR_1000.is_solved(-150.0));
    }
}
