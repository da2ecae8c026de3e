use std::path::PathBuf;
use std::sync::{Arc, mpsc};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::catalog::{ItunesSearch, TrackSearch};
use crate::notify::{Alert, ChannelNotifier};

mod event_loop;
mod logging;
mod search;
mod settings;

/// Startup options gathered from the command line.
pub struct Options {
    pub query: Option<String>,
    pub config: Option<PathBuf>,
    pub print_config: bool,
}

pub fn run(opts: Options) -> Result<()> {
    let (settings, config_warning) = settings::load_settings(opts.config.as_deref());

    if opts.print_config {
        print!("{}", settings.to_toml().context("rendering settings")?);
        return Ok(());
    }

    match logging::init(&settings.logging) {
        Ok(path) => info!(log = %path.display(), "cadenza starting"),
        Err(e) => eprintln!("cadenza: logging disabled: {e:#}"),
    }
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let searcher: Arc<dyn TrackSearch + Send + Sync> = Arc::new(
        ItunesSearch::new(settings.search.clone()).context("building search client")?,
    );

    let (alert_tx, alert_rx) = mpsc::channel::<Alert>();
    let audio_player = AudioPlayer::new(
        settings.audio.clone(),
        Box::new(ChannelNotifier::new(alert_tx)),
    )
    .context("starting audio thread")?;

    let query = opts
        .query
        .unwrap_or_else(|| settings.search.default_term.clone());
    let mut app = App::new(query, settings.ui.theme.into());

    let (search_tx, search_rx) = mpsc::channel();
    let channels = event_loop::Channels {
        audio_player: &audio_player,
        searcher,
        search_tx,
        search_rx,
        alert_rx,
    };
    // Initial search, like opening the home screen.
    event_loop::dispatch(app.begin_search(), &channels);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &channels);

    // Also covers leaving the loop through an error; a no-op after a normal quit.
    audio_player.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("cadenza stopped");
    run_result
}
