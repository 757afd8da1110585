//! Sound subsystem: waves and streaming playback

pub mod sound_system;
pub mod streaming;
pub mod wave;

pub use sound_system::SoundSystem;
pub use streaming::{StreamingDesc, StreamingPhase, StreamingPlayer};
pub use wave::Wave;
