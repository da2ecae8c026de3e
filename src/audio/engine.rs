//! Seams between the playback session and whatever actually makes sound.

use std::time::Duration;

use thiserror::Error;

use super::types::PlaybackStatus;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output available: {0}")]
    Unavailable(String),
    #[error("failed to fetch {locator}: {reason}")]
    Fetch { locator: String, reason: String },
    #[error("failed to read {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("failed to decode {0}: {1}")]
    Decode(String, String),
    #[error("{0}")]
    Rejected(String),
}

/// Produces one playable handle per preview locator.
pub trait AudioEngine {
    type Handle: AudioHandle;

    fn acquire(&mut self, locator: &str) -> Result<Self::Handle, EngineError>;
}

/// One loaded, controllable audio stream.
pub trait AudioHandle {
    fn play(&mut self) -> Result<(), EngineError>;
    fn pause(&mut self) -> Result<(), EngineError>;
    /// Pause and rewind to the start.
    fn stop(&mut self) -> Result<(), EngineError>;
    fn seek(&mut self, position: Duration) -> Result<(), EngineError>;
    /// Stop output and free the stream. The handle is dropped afterwards.
    fn release(&mut self) -> Result<(), EngineError>;
    /// Engine tick: the current status, or `None` when the engine has
    /// nothing new to report.
    fn poll_status(&mut self) -> Option<PlaybackStatus>;
}
