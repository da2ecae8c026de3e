//! The playback session: one optional active track and the handle playing it.
//!
//! Every operation degrades to a logged no-op when the engine refuses it;
//! nothing here returns an error to the caller. Acquisition failures are
//! additionally raised to the user through the [`Notifier`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::catalog::Track;
use crate::notify::{Alert, Notifier};

use super::engine::{AudioEngine, AudioHandle, EngineError};
use super::types::PlaybackStatus;

struct ActiveTrack<H> {
    track: Arc<Track>,
    handle: H,
}

pub struct PlaybackSession<E: AudioEngine> {
    engine: E,
    active: Option<ActiveTrack<E::Handle>>,
    status: PlaybackStatus,
    notifier: Box<dyn Notifier + Send>,
}

impl<E: AudioEngine> PlaybackSession<E> {
    pub fn new(engine: E, notifier: Box<dyn Notifier + Send>) -> Self {
        Self {
            engine,
            active: None,
            status: PlaybackStatus::UNLOADED,
            notifier,
        }
    }

    /// Latest status snapshot.
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current_track(&self) -> Option<&Arc<Track>> {
        self.active.as_ref().map(|a| &a.track)
    }

    /// Make `track` the active track.
    ///
    /// Re-loading the active track while it is loaded does nothing. Otherwise
    /// the previous handle is released first, so at most one is ever open.
    pub fn load_track(&mut self, track: Arc<Track>) {
        if let Some(active) = &self.active {
            if active.track.id == track.id && self.status.is_loaded {
                debug!(id = track.id, "track already loaded");
                return;
            }
        }

        self.release_active();
        self.status = PlaybackStatus::UNLOADED;

        match self.engine.acquire(&track.preview_url) {
            Ok(handle) => {
                info!(id = track.id, title = %track.title, "track loaded");
                self.active = Some(ActiveTrack { track, handle });
                // First status report for the new handle.
                self.tick();
            }
            Err(e) => {
                error!(id = track.id, locator = %track.preview_url, "error loading track: {e}");
                self.notifier
                    .notify(Alert::new("Playback error", "Could not load track preview."));
            }
        }
    }

    pub fn play(&mut self) {
        self.forward("play", |h| h.play());
    }

    pub fn pause(&mut self) {
        self.forward("pause", |h| h.pause());
    }

    pub fn stop(&mut self) {
        self.forward("stop", |h| h.stop());
    }

    /// Seek to `millis`, clamped into `[0, duration]` of the last known status.
    pub fn seek_to(&mut self, millis: i64) {
        let target = clamp_position(millis, self.status.duration_millis);
        self.forward("seek", |h| h.seek(Duration::from_millis(target)));
    }

    /// Seek relative to the last known position.
    pub fn seek_by(&mut self, delta_millis: i64) {
        let current = i64::try_from(self.status.position_millis).unwrap_or(i64::MAX);
        self.seek_to(current.saturating_add(delta_millis));
    }

    /// Release the active track and reset status to the unloaded snapshot.
    pub fn unload(&mut self) {
        self.release_active();
        self.status = PlaybackStatus::UNLOADED;
    }

    /// Engine tick: copy the handle's current status into the snapshot.
    pub fn tick(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if let Some(status) = active.handle.poll_status() {
                self.status = status;
            }
        }
    }

    fn forward(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut E::Handle) -> Result<(), EngineError>,
    ) {
        let Some(active) = self.active.as_mut() else {
            debug!(op, "ignored, nothing loaded");
            return;
        };
        if let Err(e) = f(&mut active.handle) {
            warn!(op, id = active.track.id, "playback control failed: {e}");
        }
    }

    fn release_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            if let Err(e) = active.handle.release() {
                // The handle is dropped either way.
                debug!(id = active.track.id, "release failed: {e}");
            }
        }
    }
}

impl<E: AudioEngine> Drop for PlaybackSession<E> {
    fn drop(&mut self) {
        self.release_active();
    }
}

pub(crate) fn clamp_position(millis: i64, duration_millis: u64) -> u64 {
    if millis <= 0 {
        0
    } else {
        (millis as u64).min(duration_millis)
    }
}
