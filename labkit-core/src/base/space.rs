//! Observation and action spaces.
use serde::{Deserialize, Serialize};

/// Set of values an observation or an action can take.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Space {
    /// Integers in `[0, n)`.
    Discrete(usize),

    /// Vectors whose `i`-th element is an integer in `[0, nvec[i])`.
    MultiDiscrete(Vec<usize>),

    /// Real vectors bounded elementwise by `low` and `high`.
    Box {
        /// Lower bounds.
        low: Vec<f64>,
        /// Upper bounds.
        high: Vec<f64>,
    },
}

impl Space {
    /// Returns `true` if `value` is a valid element of a [`Space::Discrete`] space.
    ///
    /// Always `false` for the other variants.
    pub fn contains_discrete(&self, value: usize) -> bool {
        match self {
            Self::Discrete(n) => value < *n,
            _ => false,
        }
    }

    /// Returns `true` if `values` is a valid element of a [`Space::MultiDiscrete`] space.
    pub fn contains_multi_discrete(&self, values: &[usize]) -> bool {
        match self {
            Self::MultiDiscrete(nvec) => {
                nvec.len() == values.len() && values.iter().zip(nvec.iter()).all(|(v, n)| v < n)
            }
            _ => false,
        }
    }

    /// Returns `true` if `values` lies inside a [`Space::Box`] space.
    pub fn contains_box(&self, values: &[f64]) -> bool {
        match self {
            Self::Box { low, high } => {
                low.len() == values.len()
                    && values
                        .iter()
                        .zip(low.iter().zip(high.iter()))
                        .all(|(v, (l, h))| l <= v && v <= h)
            }
            _ => false,
        }
    }
}
