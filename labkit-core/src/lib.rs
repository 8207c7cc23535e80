#![warn(missing_docs)]
//! Core components of the reinforcement learning lab utilities.
//!
//! The central piece is [`ReplayBuffer`], a bounded (or unbounded) sequence of
//! transitions with circular overwrite and uniform random sampling. The crate
//! also defines the environment abstraction ([`Env`], [`Step`], [`Space`])
//! that the wrappers in `labkit-wrappers` build on.
pub mod dummy;
pub mod error;
pub mod replay_buffer;

mod base;
pub use base::{Env, ExperienceBufferBase, ReplayBufferBase, Space, Step};
pub use error::LabkitError;
pub use replay_buffer::{ReplayBuffer, ReplayBufferConfig};
