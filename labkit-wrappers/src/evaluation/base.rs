//! Evaluation wrapper.
use super::EvaluationEnvConfig;
use anyhow::Result;
use labkit_core::{Env, LabkitError, Space, Step};
use log::info;
use std::fmt;

/// Options of [`EvaluationEnv::reset_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOptions {
    /// Starts the final evaluation with the episode that is being reset.
    pub start_evaluation: bool,

    /// Records the return of the episode. Episodes are always recorded
    /// during evaluation.
    pub logging: bool,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            start_evaluation: false,
            logging: true,
        }
    }
}

impl ResetOptions {
    /// Sets `start_evaluation`.
    pub fn start_evaluation(mut self, v: bool) -> Self {
        self.start_evaluation = v;
        self
    }

    /// Sets `logging`.
    pub fn logging(mut self, v: bool) -> Self {
        self.logging = v;
        self
    }
}

/// Result of the final evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    /// Number of evaluated episodes.
    pub n_episodes: usize,

    /// Mean return of the evaluated episodes.
    pub mean: f64,

    /// Standard deviation of the returns of the evaluated episodes.
    pub std: f64,
}

impl fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The mean {}-episode return after evaluation {:.2} +-{:.2}",
            self.n_episodes, self.mean, self.std
        )
    }
}

/// Mean and population standard deviation.
fn mean_std(xs: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Formats `x` like C's `%g`: 6 significant digits, trailing zeros removed,
/// scientific notation for exponents below -4 or from 6 on.
fn format_g(x: f64) -> String {
    if !x.is_finite() {
        return if x.is_nan() {
            "nan".to_string()
        } else if x > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    fn trim(s: &str) -> &str {
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.')
        } else {
            s
        }
    }

    // The exponent after rounding to 6 significant digits.
    let sci = format!("{:.5e}", x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..6).contains(&exp) {
        trim(&format!("{:.*}", (5 - exp) as usize, x)).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim(mantissa), sign, exp.abs())
    }
}

fn last_n(xs: &[f64], n: usize) -> &[f64] {
    &xs[xs.len().saturating_sub(n)..]
}

/// Wraps an environment to record episode returns and run the final evaluation.
///
/// # Examples
///
/// ```rust
/// use labkit_core::{dummy::ScriptedEnv, Env};
/// use labkit_wrappers::{EvaluationEnv, EvaluationEnvConfig, ResetOptions};
///
/// let config = EvaluationEnvConfig::default().evaluate_for(2).report_each(0);
/// let mut env = EvaluationEnv::new(ScriptedEnv::new(vec![3], 1), config).unwrap();
///
/// let mut options = ResetOptions::default().start_evaluation(true);
/// while env.evaluation_summary().is_none() {
///     env.reset_with(options).unwrap();
///     options = ResetOptions::default();
///     while !env.step(&0).unwrap().is_done() {}
/// }
/// assert_eq!(env.evaluation_summary().unwrap().mean, 3.0);
/// ```
pub struct EvaluationEnv<E: Env> {
    env: E,
    config: EvaluationEnvConfig,
    episode_running: bool,
    episode_return: Option<f64>,
    episode_returns: Vec<f64>,
    evaluating_from: Option<usize>,
    summary: Option<EvaluationSummary>,
}

impl<E: Env> EvaluationEnv<E> {
    /// Wraps `env`, seeding it with [`EvaluationEnvConfig::seed`] if given.
    pub fn new(mut env: E, config: EvaluationEnvConfig) -> Result<Self> {
        if config.evaluate_for == 0 {
            return Err(LabkitError::InvalidArgument(
                "evaluate_for must be positive".to_string(),
            )
            .into());
        }
        if let Some(seed) = config.seed {
            env.seed(seed)?;
        }

        Ok(Self {
            env,
            config,
            episode_running: false,
            episode_return: None,
            episode_returns: Vec::new(),
            evaluating_from: None,
            summary: None,
        })
    }

    /// Number of recorded episodes.
    pub fn episode(&self) -> usize {
        self.episode_returns.len()
    }

    /// Returns of the recorded episodes, oldest first.
    pub fn episode_returns(&self) -> &[f64] {
        &self.episode_returns
    }

    /// Returns `true` after evaluation has been started.
    pub fn is_evaluating(&self) -> bool {
        self.evaluating_from.is_some()
    }

    /// Result of the final evaluation, available once it has finished.
    pub fn evaluation_summary(&self) -> Option<&EvaluationSummary> {
        self.summary.as_ref()
    }

    /// Returns a reference to the wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Consumes the wrapper and returns the wrapped environment.
    pub fn into_inner(self) -> E {
        self.env
    }

    /// Resets the environment.
    ///
    /// Fails once the evaluation has finished, and when evaluation has
    /// started while an episode is still running.
    pub fn reset_with(&mut self, options: ResetOptions) -> Result<E::Obs> {
        if self.summary.is_some() {
            let err = LabkitError::InvalidState("the evaluation has already finished".into());
            return Err(err.into());
        }
        if self.evaluating_from.is_some() && self.episode_running {
            return Err(LabkitError::InvalidState(
                "cannot reset a running episode after evaluation has started".into(),
            )
            .into());
        }
        if options.start_evaluation && self.evaluating_from.is_none() {
            info!("Starts evaluation after {} episodes", self.episode());
            self.evaluating_from = Some(self.episode());
        }

        self.episode_running = true;
        self.episode_return = if options.logging || self.evaluating_from.is_some() {
            Some(0.0)
        } else {
            None
        };
        self.env.reset()
    }

    /// Progress message over the recorded episodes.
    pub fn progress_report(&self) -> String {
        let (mean, std) = mean_std(last_n(&self.episode_returns, self.config.evaluate_for));
        let returns = if self.config.report_verbose {
            let rs = last_n(&self.episode_returns, self.config.report_each)
                .iter()
                .map(|&r| format_g(r))
                .collect::<Vec<_>>();
            format!(", returns {}", rs.join(" "))
        } else {
            String::new()
        };

        format!(
            "Episode {}, mean {}-episode return {:.2} +-{:.2}{}",
            self.episode(),
            self.config.evaluate_for,
            mean,
            std,
            returns
        )
    }

    fn end_episode(&mut self, r: f64) {
        self.episode_returns.push(r);
        let episode = self.episode();

        if self.config.report_each != 0 && episode % self.config.report_each == 0 {
            info!("{}", self.progress_report());
        }

        if let Some(from) = self.evaluating_from {
            if episode >= from + self.config.evaluate_for {
                let (mean, std) =
                    mean_std(last_n(&self.episode_returns, self.config.evaluate_for));
                let summary = EvaluationSummary {
                    n_episodes: self.config.evaluate_for,
                    mean,
                    std,
                };
                info!("{}", summary);
                self.env.close();
                self.summary = Some(summary);
            }
        }
    }
}

impl<E: Env> Env for EvaluationEnv<E> {
    type Obs = E::Obs;
    type Act = E::Act;

    /// Resets with the default [`ResetOptions`].
    fn reset(&mut self) -> Result<Self::Obs> {
        self.reset_with(ResetOptions::default())
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self::Obs>> {
        if !self.episode_running {
            return Err(LabkitError::InvalidState(
                "cannot step an environment without an active episode, reset it first".into(),
            )
            .into());
        }

        let step = self.env.step(a)?;
        let done = step.is_done();
        self.episode_running = !done;

        if let Some(r) = self.episode_return.as_mut() {
            *r += step.reward;
        }
        if done {
            if let Some(r) = self.episode_return.take() {
                self.end_episode(r);
            }
        }

        Ok(step)
    }

    /// Always fails; the wrapped environment is seeded on construction.
    fn seed(&mut self, _seed: u64) -> Result<()> {
        let err = LabkitError::InvalidState("the evaluation environment cannot be reseeded".into());
        Err(err.into())
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
