use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::notify::Notifier;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, NowPlaying, NowPlayingHandle};

/// Front of the audio thread. Commands are queued and applied in order;
/// playback state is read back through [`AudioPlayer::now_playing`].
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    now_playing: NowPlayingHandle,
    join: Mutex<Option<JoinHandle<()>>>,
    shutdown_wait: Duration,
}

impl AudioPlayer {
    pub fn new(
        audio_settings: AudioSettings,
        notifier: Box<dyn Notifier + Send>,
    ) -> std::io::Result<Self> {
        let shutdown_wait = Duration::from_millis(audio_settings.shutdown_wait_ms);
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let now_playing: NowPlayingHandle = Arc::new(Mutex::new(NowPlaying::default()));

        let audio_handle =
            spawn_audio_thread(rx, now_playing.clone(), notifier, audio_settings)?;

        Ok(Self {
            tx,
            now_playing,
            join: Mutex::new(Some(audio_handle)),
            shutdown_wait,
        })
    }

    /// Copy of the latest published snapshot.
    pub fn now_playing(&self) -> NowPlaying {
        self.now_playing
            .lock()
            .map(|np| np.clone())
            .unwrap_or_default()
    }

    /// Queue `cmd` for the audio thread. A dead audio thread is logged, not surfaced.
    pub fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!("audio thread is gone, dropped {:?}", e.0);
        }
    }

    /// Unload the active track, stop the audio thread and wait for it.
    /// A thread still busy after `audio.shutdown_wait_ms` is left to exit
    /// with the process.
    /// Calling this again after the thread is gone does nothing.
    pub fn shutdown(&self) {
        let Ok(mut join) = self.join.lock() else {
            return;
        };
        let Some(h) = join.take() else {
            return;
        };

        self.send(AudioCmd::Unload);
        self.send(AudioCmd::Quit);

        match join_within(h, self.shutdown_wait) {
            Some(Ok(())) => debug!("audio thread joined"),
            Some(Err(_)) => warn!("audio thread panicked"),
            None => warn!(
                wait_ms = self.shutdown_wait.as_millis() as u64,
                "audio thread still busy, not waiting for it"
            ),
        }
    }
}

/// Join `h` if it finishes within `wait`. `None` means it was still running.
pub(super) fn join_within(h: JoinHandle<()>, wait: Duration) -> Option<thread::Result<()>> {
    let deadline = Instant::now() + wait;
    while !h.is_finished() {
        if Instant::now() >= deadline {
            return None;
        }
        thread::sleep(Duration::from_millis(10));
    }
    Some(h.join())
}
