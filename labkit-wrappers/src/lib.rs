#![warn(missing_docs)]
//! Environment wrappers for reinforcement learning labs.
//!
//! * [`EvaluationEnv`] keeps track of episode returns, periodically reports
//!   their moving statistics and runs a final evaluation.
//! * [`DiscretizationWrapper`] and [`TileCodingWrapper`] turn continuous
//!   observations into discrete states for tabular methods.
//! * [`StepLimit`] cuts off episodes after a number of steps; it is used by
//!   the environments in [`registry`].
pub mod discretization;
pub mod evaluation;
pub mod registry;
mod step_limit;

pub use discretization::{DiscretizationWrapper, Discretizer, TileCodingWrapper};
pub use evaluation::{EvaluationEnv, EvaluationEnvConfig, EvaluationSummary, ResetOptions};
pub use registry::EnvSpec;
pub use step_limit::StepLimit;
