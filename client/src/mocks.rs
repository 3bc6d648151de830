//! In-memory sources and stores for exercising pipelines without a network.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use rosterwatch_types::Player;
use serde_json::Value;

use crate::{source::PlayerSource, store::Store, Error, Result};

/// Serves a fixed roster, or fails every fetch when built with [`StaticSource::offline`].
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    players: Option<Vec<Player>>,
}

impl StaticSource {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players: Some(players),
        }
    }

    pub fn offline() -> Self {
        Self { players: None }
    }
}

impl PlayerSource for StaticSource {
    async fn fetch_players(&self) -> Result<Vec<Player>> {
        self.players
            .clone()
            .ok_or_else(|| Error::Unavailable("source offline".to_string()))
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, Value>,
    writes: Vec<String>,
}

/// Keeps written documents in memory.
///
/// With [`MemoryStore::failing_after`] the store accepts that many writes and
/// rejects every later one.
///
/// Keys are stored flat: a put to `k` leaves any existing `k/1`, `k/2`, ...
/// in place, unlike the realtime database where it replaces the subtree.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_after: Option<usize>,
}

impl MemoryStore {
    pub fn failing_after(accepted: usize) -> Self {
        Self {
            inner: Mutex::default(),
            fail_after: Some(accepted),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner().entries.get(key).cloned()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.inner().entries.keys().cloned().collect()
    }

    /// Keys in the order they were written.
    pub fn writes(&self) -> Vec<String> {
        self.inner().writes.clone()
    }
}

impl Store for MemoryStore {
    async fn put(&self, key: &str, value: &Value) -> Result<()> {
        crate::store::validate_key(key)?;
        let mut inner = self.inner();
        if self.fail_after.is_some_and(|limit| inner.writes.len() >= limit) {
            return Err(Error::Unavailable(format!("write to {key} rejected")));
        }
        inner.writes.push(key.to_string());
        inner.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_keys_are_flat() {
        let store = MemoryStore::default();
        store.put("list/1", &json!(1)).await.unwrap();
        store.put("list", &json!([])).await.unwrap();
        assert_eq!(store.keys(), vec!["list", "list/1"]);
        assert_eq!(store.get("list/1"), Some(json!(1)));
    }
}
