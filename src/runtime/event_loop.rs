use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::app::{Action, App};
use crate::audio::AudioPlayer;
use crate::catalog::TrackSearch;
use crate::config;
use crate::notify::Alert;
use crate::ui;

use super::search::{SearchDone, spawn_search};

/// Everything the loop talks to besides the model.
pub struct Channels<'a> {
    pub audio_player: &'a AudioPlayer,
    pub searcher: Arc<dyn TrackSearch + Send + Sync>,
    pub search_tx: Sender<SearchDone>,
    pub search_rx: Receiver<SearchDone>,
    pub alert_rx: Receiver<Alert>,
}

/// Main terminal event loop: pulls playback state and finished searches into
/// the model, draws, and dispatches key presses. Returns `Ok(())` when the
/// user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    channels: &Channels<'_>,
) -> Result<()> {
    loop {
        app.now_playing = channels.audio_player.now_playing();

        while let Ok(done) = channels.search_rx.try_recv() {
            app.finish_search(done.seq, done.result);
        }
        while let Ok(alert) = channels.alert_rx.try_recv() {
            app.show_alert(alert);
        }

        terminal.draw(|f| ui::draw(f, app, settings))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = app.on_key(key, settings.controls.scrub_seconds) {
                    if dispatch(action, channels) {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Carry out `action`. Returns `true` when the loop should end.
pub fn dispatch(action: Action, channels: &Channels<'_>) -> bool {
    match action {
        Action::Quit => {
            info!("quit requested");
            channels.audio_player.shutdown();
            return true;
        }
        Action::Search(seq, term) => {
            debug!(seq, term = %term, "starting search");
            spawn_search(
                channels.searcher.clone(),
                seq,
                term,
                channels.search_tx.clone(),
            );
        }
        Action::Audio(cmd) => channels.audio_player.send(cmd),
    }
    false
}
