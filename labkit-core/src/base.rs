//! Core functionalities.
mod env;
mod replay_buffer;
mod space;
mod step;
pub use env::Env;
pub use replay_buffer::{ExperienceBufferBase, ReplayBufferBase};
pub use space::Space;
pub use step::Step;
