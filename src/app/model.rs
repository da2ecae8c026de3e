//! Application model types: `App`, `Screen`, `Theme` and the `Action`s a
//! key press turns into.
//!
//! The model never talks to the audio thread or the network itself; the
//! runtime carries out the returned actions.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::audio::{AudioCmd, NowPlaying};
use crate::catalog::Track;
use crate::config::ThemeSetting;
use crate::notify::Alert;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Search,
    Player,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Search, Screen::Player, Screen::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Search => "Home",
            Screen::Player => "Player",
            Screen::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Screen::Search => 0,
            Screen::Player => 1,
            Screen::Settings => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl From<ThemeSetting> for Theme {
    fn from(s: ThemeSetting) -> Self {
        match s {
            ThemeSetting::Light => Theme::Light,
            ThemeSetting::Dark => Theme::Dark,
        }
    }
}

/// Side effects requested by a key press.
#[derive(Debug)]
pub enum Action {
    Quit,
    /// Start a search; the `u64` identifies it so stale results can be dropped.
    Search(u64, String),
    Audio(AudioCmd),
}

/// The main application model.
pub struct App {
    pub screen: Screen,
    pub theme: Theme,

    pub query: String,
    pub editing: bool,
    pub searching: bool,
    search_seq: u64,

    pub results: Vec<Arc<Track>>,
    pub selected: usize,

    /// Track picked from the results for the player screen.
    pub chosen: Option<Arc<Track>>,
    /// Latest playback snapshot, refreshed by the runtime every frame.
    pub now_playing: NowPlaying,

    pub alert: Option<Alert>,
}

impl App {
    pub fn new(query: impl Into<String>, theme: Theme) -> Self {
        Self {
            screen: Screen::Search,
            theme,
            query: query.into(),
            editing: false,
            searching: false,
            search_seq: 0,
            results: Vec::new(),
            selected: 0,
            chosen: None,
            now_playing: NowPlaying::default(),
            alert: None,
        }
    }

    /// Mark a new search as in flight and return the action that runs it.
    pub fn begin_search(&mut self) -> Action {
        self.search_seq += 1;
        self.searching = true;
        Action::Search(self.search_seq, self.query.trim().to_string())
    }

    /// Apply a finished search. Results from anything but the latest search are ignored.
    pub fn finish_search(&mut self, seq: u64, result: Result<Vec<Track>, String>) {
        if seq != self.search_seq {
            return;
        }
        self.searching = false;
        match result {
            Ok(tracks) => {
                self.results = tracks.into_iter().map(Arc::new).collect();
                self.selected = 0;
            }
            Err(_) => self.show_alert(Alert::new("Network error", "Could not fetch tracks.")),
        }
    }

    pub fn selected_track(&self) -> Option<&Arc<Track>> {
        self.results.get(self.selected)
    }

    /// Track shown on the player screen: what is loaded, else what was picked.
    pub fn player_track(&self) -> Option<&Arc<Track>> {
        self.now_playing.track.as_ref().or(self.chosen.as_ref())
    }

    pub fn next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1).min(self.results.len() - 1);
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    pub fn show_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Translate a key press into model changes plus an optional side effect.
    pub fn on_key(&mut self, key: KeyEvent, scrub_seconds: u64) -> Option<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                self.dismiss_alert();
            }
            return None;
        }

        if self.editing {
            return self.on_edit_key(key);
        }

        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Tab => {
                self.screen = self.screen.next();
                return None;
            }
            KeyCode::Char('1') => {
                self.screen = Screen::Search;
                return None;
            }
            KeyCode::Char('2') => {
                self.screen = Screen::Player;
                return None;
            }
            KeyCode::Char('3') => {
                self.screen = Screen::Settings;
                return None;
            }
            _ => {}
        }

        match self.screen {
            Screen::Search => self.on_search_key(key),
            Screen::Player => self.on_player_key(key, scrub_seconds),
            Screen::Settings => {
                if key.code == KeyCode::Char('t') {
                    self.toggle_theme();
                }
                None
            }
        }
    }

    fn on_edit_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => self.editing = false,
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Enter => {
                self.editing = false;
                return Some(self.begin_search());
            }
            KeyCode::Char(c) if !c.is_control() => self.query.push(c),
            _ => {}
        }
        None
    }

    fn on_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('i') => self.editing = true,
            KeyCode::Char('r') => return Some(self.begin_search()),
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.prev(),
            KeyCode::Enter => {
                let track = self.selected_track()?.clone();
                self.chosen = Some(track.clone());
                self.screen = Screen::Player;
                return Some(Action::Audio(AudioCmd::Load(track)));
            }
            _ => {}
        }
        None
    }

    fn on_player_key(&mut self, key: KeyEvent, scrub_seconds: u64) -> Option<Action> {
        let scrub_ms = i64::try_from(scrub_seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
        let cmd = match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                if self.now_playing.status.is_playing {
                    AudioCmd::Pause
                } else {
                    AudioCmd::Play
                }
            }
            KeyCode::Char('s') => AudioCmd::Stop,
            KeyCode::Char('h') | KeyCode::Left => AudioCmd::SeekBy(-scrub_ms),
            KeyCode::Char('l') | KeyCode::Right => AudioCmd::SeekBy(scrub_ms),
            KeyCode::Char('u') => AudioCmd::Unload,
            KeyCode::Char('f') => {
                self.show_alert(Alert::new("Info", "Add favorite feature later."));
                return None;
            }
            _ => return None,
        };
        Some(Action::Audio(cmd))
    }
}
