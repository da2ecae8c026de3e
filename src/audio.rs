//! Audio playback: the playback session and the thread that owns it.
//!
//! `PlaybackSession` is generic over an `AudioEngine`; the program runs it on
//! a dedicated thread with the `rodio` engine and talks to it through
//! [`AudioPlayer`].

mod engine;
mod player;
mod queue;
mod session;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;
