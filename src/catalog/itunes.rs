//! Blocking client for the iTunes Search API.
//!
//! `GET {base_url}?term=..&entity=song&limit=..[&country=..]`

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::config::SearchSettings;

use super::model::SearchResponse;
use super::{SearchError, Track, TrackSearch};

const USER_AGENT: &str = concat!("cadenza/", env!("CARGO_PKG_VERSION"));

pub struct ItunesSearch {
    client: Client,
    settings: SearchSettings,
}

impl ItunesSearch {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()?;
        Ok(Self { client, settings })
    }

    /// Query parameters for `term`, in the order they are sent.
    pub(crate) fn query_params(&self, term: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("term", term.trim().to_string()),
            ("entity", self.settings.entity.clone()),
            ("limit", self.settings.limit.to_string()),
        ];
        if let Some(country) = self.settings.country.as_deref().map(str::trim) {
            if !country.is_empty() {
                params.push(("country", country.to_ascii_lowercase()));
            }
        }
        params
    }
}

impl TrackSearch for ItunesSearch {
    fn search(&self, term: &str) -> Result<Vec<Track>, SearchError> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let params = self.query_params(term);
        debug!(url = %self.settings.base_url, ?params, "searching catalog");

        let resp = self
            .client
            .get(&self.settings.base_url)
            .query(&params)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = resp.text()?;
        let tracks = parse_response(&body)?;
        info!(term = term.trim(), count = tracks.len(), "search finished");
        Ok(tracks)
    }
}

/// Decode a search response body into playable tracks, keeping API order.
pub(crate) fn parse_response(body: &str) -> Result<Vec<Track>, SearchError> {
    let resp: SearchResponse = serde_json::from_str(body)?;
    let total = resp.result_count;
    let tracks: Vec<Track> = resp
        .results
        .into_iter()
        .filter_map(|raw| raw.into_track())
        .collect();
    if tracks.len() < total {
        debug!(
            skipped = total - tracks.len(),
            "dropped results without an id or preview"
        );
    }
    Ok(tracks)
}
