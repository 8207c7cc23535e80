//! Configuration of [`EvaluationEnv`](super::EvaluationEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Returns `false` only if the `VERBOSE` environment variable is set to an
/// empty string or `0`.
pub(super) fn verbose_from_env() -> bool {
    match std::env::var("VERBOSE") {
        Ok(v) => !(v.is_empty() || v == "0"),
        Err(_) => true,
    }
}

/// Configuration of [`EvaluationEnv`](super::EvaluationEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EvaluationEnvConfig {
    /// Seed given to the wrapped environment on construction.
    pub seed: Option<u64>,

    /// Number of episodes used for the moving statistics and for the final evaluation.
    pub evaluate_for: usize,

    /// Interval of progress reports in episodes. `0` disables reports.
    pub report_each: usize,

    /// Whether progress reports list the individual returns.
    ///
    /// Defaults to the value derived from the `VERBOSE` environment variable.
    #[serde(default = "verbose_from_env")]
    pub report_verbose: bool,
}

impl Default for EvaluationEnvConfig {
    fn default() -> Self {
        Self {
            seed: None,
            evaluate_for: 100,
            report_each: 10,
            report_verbose: verbose_from_env(),
        }
    }
}

impl EvaluationEnvConfig {
    /// Sets the seed of the wrapped environment.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of episodes of the final evaluation.
    pub fn evaluate_for(mut self, evaluate_for: usize) -> Self {
        self.evaluate_for = evaluate_for;
        self
    }

    /// Sets the interval of progress reports in episodes.
    pub fn report_each(mut self, report_each: usize) -> Self {
        self.report_each = report_each;
        self
    }

    /// Sets whether progress reports list the individual returns.
    pub fn report_verbose(mut self, report_verbose: bool) -> Self {
        self.report_verbose = report_verbose;
        self
    }

    /// Constructs [`EvaluationEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EvaluationEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
