//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};

use crate::app::{App, Screen, Theme};
use crate::audio::PlaybackStatus;
use crate::catalog::display_from_fields;
use crate::config::Settings;

const ACCENT: Color = Color::Rgb(233, 30, 99);

#[derive(Clone, Copy)]
struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(18, 18, 18),
                fg: Color::White,
                muted: Color::Rgb(204, 204, 204),
                accent: ACCENT,
            },
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Rgb(96, 96, 96),
                accent: ACCENT,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(self.muted))
            .style(self.base())
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
    }
}

/// Format milliseconds as `MM:SS`; anything not positive renders as `00:00`.
pub(crate) fn format_mmss(millis: u64) -> String {
    let secs = millis / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Fraction of the track played, in `[0, 1]`.
pub(crate) fn progress_ratio(status: &PlaybackStatus) -> f64 {
    if status.duration_millis == 0 {
        return 0.0;
    }
    (status.position_millis as f64 / status.duration_millis as f64).clamp(0.0, 1.0)
}

/// Controls help for the given screen.
fn controls_text(screen: Screen, editing: bool, scrub_seconds: u64) -> String {
    let keys: Vec<String> = match screen {
        _ if editing => vec![
            "[enter] search".into(),
            "[esc] stop editing".into(),
            "[backspace] delete".into(),
        ],
        Screen::Search => vec![
            "[/] edit query".into(),
            "[r] search again".into(),
            "[j/k] up/down".into(),
            "[enter] play selected".into(),
        ],
        Screen::Player => vec![
            "[space/p] play/pause".into(),
            format!("[h/l] -/+{scrub_seconds}s"),
            "[s] stop".into(),
            "[u] unload".into(),
            "[f] favorite".into(),
        ],
        Screen::Settings => vec!["[t] toggle theme".into()],
    };
    keys.into_iter()
        .chain(["[tab/1-3] screens".to_string(), "[q] quit".to_string()])
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10).min(r.width);
    height = height.min(r.height.saturating_sub(2)).max(5).min(r.height);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, settings: &Settings) {
    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadenza ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(palette.accent)),
        );
    frame.render_widget(header, chunks[0]);

    let tabs = Tabs::new(Screen::ALL.iter().map(|s| s.title()).collect::<Vec<_>>())
        .select(app.screen.index())
        .style(palette.base())
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(palette.block(" screens "));
    frame.render_widget(tabs, chunks[1]);

    match app.screen {
        Screen::Search => draw_search(frame, app, settings, palette, chunks[2]),
        Screen::Player => draw_player(frame, app, palette, chunks[2]),
        Screen::Settings => draw_settings(frame, app, palette, chunks[2]),
    }

    let footer = Paragraph::new(controls_text(
        app.screen,
        app.editing,
        settings.controls.scrub_seconds,
    ))
    .block(palette.block(" controls "))
    .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    if let Some(alert) = &app.alert {
        let popup_area = centered_rect_sized(56, 7, frame.area());
        frame.render_widget(Clear, popup_area);
        let body = Paragraph::new(format!("{}\n\n[enter/esc] dismiss", alert.message))
            .block(
                palette
                    .block(alert.title.as_str())
                    .border_style(Style::default().fg(palette.accent)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(body, popup_area);
    }
}

fn draw_search(frame: &mut Frame, app: &App, settings: &Settings, palette: Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let mut input = vec![Span::raw(app.query.as_str())];
    if app.editing {
        input.push(Span::styled("▏", Style::default().fg(palette.accent)));
    }
    if app.searching {
        input.push(Span::styled(
            "  Searching…",
            Style::default().fg(palette.muted),
        ));
    }
    let title = if app.editing {
        " search (editing) "
    } else {
        " search artist or song "
    };
    frame.render_widget(
        Paragraph::new(Line::from(input)).block(palette.block(title)),
        rows[0],
    );

    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|t| {
            ListItem::new(display_from_fields(
                t,
                &settings.ui.track_fields,
                &settings.ui.track_separator,
            ))
        })
        .collect();
    let title = format!(" tracks ({}) ", app.results.len());
    let list = List::new(items)
        .block(palette.block(&title))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::REVERSED),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    if !app.results.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, rows[1], &mut state);
}

fn draw_player(frame: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let status = app.now_playing.status;
    let info = match app.player_track() {
        Some(track) => {
            let state = if !status.is_loaded {
                "Not loaded"
            } else if status.is_playing {
                "Playing"
            } else {
                "Paused"
            };
            vec![
                Line::from(Span::styled(
                    track.title.as_str(),
                    Style::default()
                        .fg(palette.fg)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    track.artist.as_str(),
                    Style::default().fg(palette.muted),
                )),
                Line::from(Span::styled(
                    track.artwork_url.as_deref().unwrap_or("-"),
                    Style::default().fg(palette.muted),
                )),
                Line::from(""),
                Line::from(Span::styled(state, Style::default().fg(palette.accent))),
            ]
        }
        None => vec![Line::from("Pick a track on the Home screen.")],
    };
    frame.render_widget(
        Paragraph::new(info)
            .alignment(Alignment::Center)
            .block(palette.block(" now playing "))
            .wrap(Wrap { trim: true }),
        rows[0],
    );

    let gauge = Gauge::default()
        .block(palette.block(" progress "))
        .gauge_style(Style::default().fg(palette.accent).bg(palette.bg))
        .ratio(progress_ratio(&status))
        .label(format!(
            "{} / {}",
            format_mmss(status.position_millis),
            format_mmss(status.duration_millis)
        ));
    frame.render_widget(gauge, rows[1]);
}

fn draw_settings(frame: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let option = |label: &'static str, theme: Theme| {
        let style = if app.theme == theme {
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        Span::styled(format!(" {label} "), style)
    };

    let lines = vec![
        Line::from("Appearance"),
        Line::from(""),
        Line::from(vec![
            option("Light", Theme::Light),
            Span::raw("  "),
            option("Dark", Theme::Dark),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(palette.block(" settings ")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(999), "00:00");
        assert_eq!(format_mmss(1_000), "00:01");
        assert_eq!(format_mmss(61_500), "01:01");
        assert_eq!(format_mmss(30_000), "00:30");
        assert_eq!(format_mmss(3_600_000), "60:00");
    }

    #[test]
    fn progress_ratio_handles_unknown_duration() {
        let mut s = PlaybackStatus::UNLOADED;
        assert_eq!(progress_ratio(&s), 0.0);

        s.duration_millis = 30_000;
        s.position_millis = 15_000;
        assert_eq!(progress_ratio(&s), 0.5);

        s.position_millis = 45_000;
        assert_eq!(progress_ratio(&s), 1.0);
    }

    #[test]
    fn controls_text_mentions_scrub_seconds_on_player() {
        let text = controls_text(Screen::Player, false, 10);
        assert!(text.contains("[h/l] -/+10s"));
        assert!(text.ends_with("[q] quit"));
        assert!(controls_text(Screen::Search, true, 10).starts_with("[enter] search"));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect_sized(56, 7, area);
        assert!(r.width <= 38);
        assert!(r.x + r.width <= area.width);
        assert!(r.y + r.height <= area.height);
    }

    #[test]
    fn centered_rect_never_outgrows_a_tiny_area() {
        for area in [Rect::new(0, 0, 8, 4), Rect::new(3, 2, 12, 6), Rect::new(0, 0, 0, 0)] {
            let r = centered_rect_sized(56, 7, area);
            assert!(r.x >= area.x && r.y >= area.y);
            assert!(r.x + r.width <= area.x + area.width);
            assert!(r.y + r.height <= area.y + area.height);
        }
    }
}
