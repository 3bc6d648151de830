use std::future::Future;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{parse_http_url, Error, Result};

/// Characters the realtime database refuses in a path segment.
const FORBIDDEN_KEY_CHARS: [char; 5] = ['.', '$', '#', '[', ']'];

/// A keyed JSON document store.
///
/// Keys are hierarchical, with `/` separating segments. A put replaces the
/// whole value stored at the key.
pub trait Store {
    fn put(&self, key: &str, value: &Value) -> impl Future<Output = Result<()>>;
}

/// Writes to a Firebase Realtime Database over its REST surface.
#[derive(Clone, Debug)]
pub struct FirebaseStore {
    http_client: reqwest::Client,
    base_url: Url,
}

impl FirebaseStore {
    pub fn new(http_client: reqwest::Client, database_url: &str) -> Result<Self> {
        let mut base_url = parse_http_url(database_url)?;
        // Joining relative keys requires a directory-style base.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn key_url(&self, key: &str) -> Result<Url> {
        validate_key(key)?;
        Ok(self.base_url.join(&format!("{key}.json"))?)
    }
}

impl Store for FirebaseStore {
    async fn put(&self, key: &str, value: &Value) -> Result<()> {
        let url = self.key_url(key)?;
        debug!(key, "writing to store");
        let response = self
            .http_client
            .put(url)
            .json(value)
            .send()
            .await
            .map_err(|source| Error::Publish {
                key: key.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::PublishStatus {
                key: key.to_string(),
                status,
                body,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.split('/').all(|segment| {
            !segment.is_empty()
                && !segment
                    .chars()
                    .any(|c| c.is_control() || FORBIDDEN_KEY_CHARS.contains(&c))
        });
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidKey(key.to_string()))
    }
}
