use std::future::Future;

use rosterwatch_types::Player;
use tracing::{debug, info};
use url::Url;

use crate::{parse_http_url, Error, Result};

/// Somewhere a fresh copy of the roster can be read from.
pub trait PlayerSource {
    /// Reads the full roster, in feed order.
    fn fetch_players(&self) -> impl Future<Output = Result<Vec<Player>>>;
}

/// Reads the roster with a single GET against a JSON feed.
#[derive(Clone, Debug)]
pub struct HttpSource {
    http_client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(http_client: reqwest::Client, url: &str) -> Result<Self> {
        Ok(Self {
            http_client,
            url: parse_http_url(url)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PlayerSource for HttpSource {
    async fn fetch_players(&self) -> Result<Vec<Player>> {
        debug!(url = %self.url, "fetching roster");
        let response = self
            .http_client
            .get(self.url.clone())
            .send()
            .await
            .map_err(Error::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::FetchStatus { status, body });
        }

        // Parse separately so malformed bodies surface as parse errors.
        let body = response.text().await.map_err(Error::Fetch)?;
        let players: Vec<Player> = serde_json::from_str(&body)?;
        info!(count = players.len(), "fetched roster");
        Ok(players)
    }
}
