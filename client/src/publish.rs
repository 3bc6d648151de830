//! Writing result sets to a [`Store`].
//!
//! Blob mode stores a whole result set under one key. Indexed mode stores
//! element `i` under `key/i` (1-based), one write at a time in ascending
//! order. A failed indexed write aborts the run and leaves the earlier
//! entries in place; nothing is retried or rolled back.

use serde::Serialize;
use tracing::{info, warn};

use crate::{store::Store, Result};

/// Inactive or stale players, stored as one array.
pub const INACTIVE_PLAYERS_KEY: &str = "final_exam_bai1_low_level_player";

/// Low-level listing, stored one entry per rank.
pub const LOW_LEVEL_LIST_KEY: &str = "final_exam_bai1_2_low_level_list";

/// VIP awards, stored as one array.
pub const VIP_AWARDS_KEY: &str = "final_exam_bai2_top3_vip_awards";

/// Key of the entry at 1-based `position` under `key`.
pub fn indexed_key(key: &str, position: usize) -> String {
    format!("{key}/{position}")
}

/// Writes `value` under `key` as a single document.
pub async fn publish_blob<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: Store,
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value)?;
    store.put(key, &value).await?;
    info!(key, "published");
    Ok(())
}

/// Writes each item under `key/1`, `key/2`, ... and returns how many were written.
pub async fn publish_indexed<S, T>(store: &S, key: &str, items: &[T]) -> Result<usize>
where
    S: Store,
    T: Serialize,
{
    for (index, item) in items.iter().enumerate() {
        let entry_key = indexed_key(key, index + 1);
        let result = match serde_json::to_value(item) {
            Ok(value) => store.put(&entry_key, &value).await,
            Err(err) => Err(err.into()),
        };
        if let Err(err) = result {
            warn!(
                key,
                written = index,
                total = items.len(),
                %err,
                "indexed publish aborted, earlier entries remain"
            );
            return Err(err);
        }
    }
    info!(key, count = items.len(), "published indexed");
    Ok(items.len())
}
