//! Replay buffer with possibly limited capacity.
//!
//! [`ReplayBuffer`] keeps items in a plain vector. While the buffer is not
//! full, items are appended; once it is full, the oldest item is overwritten
//! in place, so indexing stays O(1) without preallocating the whole capacity.
mod base;
mod config;
pub use base::ReplayBuffer;
pub use config::ReplayBufferConfig;
