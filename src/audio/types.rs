//! Audio-related small types and handles.
//!
//! This module defines the status snapshot, the commands accepted by the
//! audio thread and the shared handle the UI reads playback state from.

use std::sync::{Arc, Mutex};

use crate::catalog::Track;

/// Point-in-time read of playback progress.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub is_playing: bool,
    pub position_millis: u64,
    pub duration_millis: u64,
    pub is_loaded: bool,
}

impl PlaybackStatus {
    /// The all-zero snapshot of a session with nothing loaded.
    pub const UNLOADED: Self = Self {
        is_playing: false,
        position_millis: 0,
        duration_millis: 0,
        is_loaded: false,
    };
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Make `track` the active track (paused at 0).
    Load(Arc<Track>),
    Play,
    Pause,
    /// Pause and rewind; the track stays loaded.
    Stop,
    /// Seek to an absolute position; clamped by the session.
    SeekTo(i64),
    /// Seek relative to the last known position (milliseconds, either sign).
    SeekBy(i64),
    /// Release the active track.
    Unload,
    /// Release everything and end the audio thread.
    Quit,
}

/// What the UI needs to render the player: the active track and its latest status.
#[derive(Debug, Clone, Default)]
pub struct NowPlaying {
    pub track: Option<Arc<Track>>,
    pub status: PlaybackStatus,
}

pub type NowPlayingHandle = Arc<Mutex<NowPlaying>>;
