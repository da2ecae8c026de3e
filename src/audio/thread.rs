use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::AudioSettings;
use crate::notify::{Alert, Notifier};

use super::engine::AudioEngine;
use super::queue::supersede_loads;
use super::session::PlaybackSession;
use super::sink::RodioEngine;
use super::types::{AudioCmd, NowPlayingHandle};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    now_playing: NowPlayingHandle,
    notifier: Box<dyn Notifier + Send>,
    audio_settings: AudioSettings,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("cadenza-audio".into())
        .spawn(move || {
            let engine = match RodioEngine::new(&audio_settings) {
                Ok(engine) => engine,
                Err(e) => {
                    error!("audio engine unavailable: {e}");
                    notifier.notify(Alert::new("Playback error", e.to_string()));
                    return;
                }
            };
            let session = PlaybackSession::new(engine, notifier);
            let tick = Duration::from_millis(audio_settings.tick_ms);
            run_loop(session, &rx, &now_playing, tick);
        })
}

/// Drive `session` from `rx` until `Quit` or until every sender is gone.
///
/// Each wakeup drains whatever is queued, applies it in order, then ticks
/// the session and publishes the snapshot.
pub(super) fn run_loop<E: AudioEngine>(
    mut session: PlaybackSession<E>,
    rx: &Receiver<AudioCmd>,
    now_playing: &NowPlayingHandle,
    tick: Duration,
) {
    loop {
        let mut batch = match rx.recv_timeout(tick) {
            Ok(cmd) => vec![cmd],
            Err(RecvTimeoutError::Timeout) => Vec::new(),
            Err(RecvTimeoutError::Disconnected) => {
                debug!("audio command channel closed");
                break;
            }
        };
        batch.extend(rx.try_iter());
        supersede_loads(&mut batch);

        for cmd in batch {
            if apply(&mut session, cmd).is_break() {
                info!("audio thread quitting");
                session.unload();
                publish(&session, now_playing);
                return;
            }
        }

        session.tick();
        publish(&session, now_playing);
    }

    session.unload();
    publish(&session, now_playing);
}

fn apply<E: AudioEngine>(session: &mut PlaybackSession<E>, cmd: AudioCmd) -> ControlFlow<()> {
    match cmd {
        AudioCmd::Load(track) => session.load_track(track),
        AudioCmd::Play => session.play(),
        AudioCmd::Pause => session.pause(),
        AudioCmd::Stop => session.stop(),
        AudioCmd::SeekTo(millis) => session.seek_to(millis),
        AudioCmd::SeekBy(delta) => session.seek_by(delta),
        AudioCmd::Unload => session.unload(),
        AudioCmd::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

fn publish<E: AudioEngine>(session: &PlaybackSession<E>, now_playing: &NowPlayingHandle) {
    if let Ok(mut np) = now_playing.lock() {
        np.track = session.current_track().cloned();
        np.status = session.status();
    }
}
