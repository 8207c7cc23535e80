//! Evaluation bookkeeping for environments.
//!
//! [`EvaluationEnv`] wraps an environment and records the return of every
//! episode. Every `report_each` episodes it logs the mean and standard
//! deviation of the last `evaluate_for` returns. Once evaluation is started
//! with [`ResetOptions::start_evaluation`], it runs `evaluate_for` more
//! episodes, produces an [`EvaluationSummary`] and closes the environment.
mod base;
mod config;
pub use base::{EvaluationEnv, EvaluationSummary, ResetOptions};
pub use config::EvaluationEnvConfig;
