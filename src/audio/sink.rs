//! The `rodio` audio engine.
//!
//! Previews are small, so a locator is fetched into memory once and every
//! seek simply rebuilds a paused `Sink` over the same bytes, skipping into
//! the decoded source.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, info};

use crate::config::AudioSettings;

use super::engine::{AudioEngine, AudioHandle, EngineError};
use super::types::PlaybackStatus;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

pub struct RodioEngine {
    // Opened on first acquire so a missing device only fails loads.
    stream: Option<OutputStream>,
    http: Client,
}

impl RodioEngine {
    pub fn new(settings: &AudioSettings) -> Result<Self, EngineError> {
        let total = Duration::from_secs(settings.fetch_timeout_secs.max(1));
        let http = Client::builder()
            .connect_timeout(total.min(CONNECT_TIMEOUT))
            .timeout(total)
            .build()
            .map_err(|e| EngineError::Unavailable(format!("http client: {e}")))?;
        Ok(Self { stream: None, http })
    }

    fn mixer(&mut self) -> Result<Mixer, EngineError> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| EngineError::Unavailable(e.to_string()))?;
            // rodio logs to stderr when OutputStream is dropped, which would
            // scribble over the TUI.
            stream.log_on_drop(false);
            info!("audio output opened");
            self.stream = Some(stream);
        }
        match self.stream.as_ref() {
            Some(stream) => Ok(stream.mixer().clone()),
            None => Err(EngineError::Unavailable("output stream missing".into())),
        }
    }

    fn fetch(&self, locator: &str) -> Result<Vec<u8>, EngineError> {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            let fetch_err = |reason: String| EngineError::Fetch {
                locator: locator.to_string(),
                reason,
            };
            let resp = self
                .http
                .get(locator)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| fetch_err(e.to_string()))?;
            let bytes = resp.bytes().map_err(|e| fetch_err(e.to_string()))?;
            debug!(locator, len = bytes.len(), "preview fetched");
            Ok(bytes.to_vec())
        } else {
            let path = locator.strip_prefix("file://").unwrap_or(locator);
            std::fs::read(path).map_err(|e| EngineError::Io(locator.to_string(), e))
        }
    }
}

impl AudioEngine for RodioEngine {
    type Handle = RodioHandle;

    fn acquire(&mut self, locator: &str) -> Result<RodioHandle, EngineError> {
        let data: Arc<[u8]> = self.fetch(locator)?.into();
        // Bad bytes must fail before the output device is opened.
        decode(locator, &data)?;
        let mixer = self.mixer()?;
        RodioHandle::open(mixer, locator, data)
    }
}

pub struct RodioHandle {
    mixer: Mixer,
    locator: String,
    data: Arc<[u8]>,
    sink: Option<Sink>,
    /// Where the current sink's source starts within the track.
    offset: Duration,
    duration: Option<Duration>,
}

impl RodioHandle {
    /// Decode `data` and park it, paused at the start, on `mixer`.
    pub(super) fn open(mixer: Mixer, locator: &str, data: Arc<[u8]>) -> Result<Self, EngineError> {
        let duration = decode(locator, &data)?.total_duration();
        let sink = create_sink_at(&mixer, locator, &data, Duration::ZERO)?;
        Ok(Self {
            mixer,
            locator: locator.to_string(),
            data,
            sink: Some(sink),
            offset: Duration::ZERO,
            duration,
        })
    }

    fn sink(&self) -> Result<&Sink, EngineError> {
        self.sink
            .as_ref()
            .ok_or_else(|| EngineError::Rejected("handle already released".into()))
    }

    /// Replace the sink with a paused one starting at `at`.
    fn rebuild_at(&mut self, at: Duration) -> Result<(), EngineError> {
        self.sink()?;
        let at = match self.duration {
            Some(d) => at.min(d),
            None => at,
        };
        let new_sink = create_sink_at(&self.mixer, &self.locator, &self.data, at)?;
        if let Some(old) = self.sink.replace(new_sink) {
            old.stop();
        }
        self.offset = at;
        Ok(())
    }

    fn position(&self, sink: &Sink) -> Duration {
        let pos = if sink.empty() {
            // Source ran out: report the end rather than wherever get_pos stopped.
            self.duration.unwrap_or(self.offset + sink.get_pos())
        } else {
            self.offset + sink.get_pos()
        };
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }
}

impl AudioHandle for RodioHandle {
    fn play(&mut self) -> Result<(), EngineError> {
        if self.sink()?.empty() {
            self.rebuild_at(Duration::ZERO)?;
        }
        self.sink()?.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.sink()?.pause();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.rebuild_at(Duration::ZERO)
    }

    fn seek(&mut self, position: Duration) -> Result<(), EngineError> {
        let was_playing = {
            let sink = self.sink()?;
            !sink.is_paused() && !sink.empty()
        };
        self.rebuild_at(position)?;
        if was_playing {
            self.sink()?.play();
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), EngineError> {
        let sink = self
            .sink
            .take()
            .ok_or_else(|| EngineError::Rejected("handle already released".into()))?;
        sink.stop();
        Ok(())
    }

    fn poll_status(&mut self) -> Option<PlaybackStatus> {
        let sink = self.sink.as_ref()?;
        Some(PlaybackStatus {
            is_playing: !sink.is_paused() && !sink.empty(),
            position_millis: self.position(sink).as_millis() as u64,
            duration_millis: self.duration.map_or(0, |d| d.as_millis() as u64),
            is_loaded: true,
        })
    }
}

impl Drop for RodioHandle {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

fn decode(locator: &str, data: &Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, EngineError> {
    Decoder::new(Cursor::new(data.clone()))
        .map_err(|e| EngineError::Decode(locator.to_string(), e.to_string()))
}

/// Create a paused `Sink` over `data` that starts playback at `start_at`.
fn create_sink_at(
    mixer: &Mixer,
    locator: &str,
    data: &Arc<[u8]>,
    start_at: Duration,
) -> Result<Sink, EngineError> {
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decode(locator, data)?.skip_duration(start_at);

    let sink = Sink::connect_new(mixer);
    sink.pause();
    sink.append(source);
    Ok(sink)
}
