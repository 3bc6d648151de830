//! Roster queries.
//!
//! Each query borrows the full roster and builds a new result set; none of
//! them mutate or cache their input. Sorting is stable, so ties keep the
//! order the players were fetched in.

use chrono::{DateTime, Duration, Utc};

use crate::player::{AwardedVipPlayer, Player};

/// A login older than this (strictly) marks a player as stale.
pub const INACTIVITY_THRESHOLD_DAYS: i64 = 5;

/// Highest level included in the low-level listing.
pub const LOW_LEVEL_CAP: u32 = 10;

/// Gold awarded to the top VIP players, by rank.
pub const VIP_AWARDS: [u64; 3] = [2000, 1500, 1000];

/// Reference instant used when none is configured.
pub const DEFAULT_REFERENCE_TIME: &str = "2025-06-30T00:00:00Z";

const DEFAULT_REFERENCE_TIMESTAMP: i64 = 1_751_241_600;

/// [`DEFAULT_REFERENCE_TIME`] as a timestamp.
pub fn default_reference_time() -> DateTime<Utc> {
    DateTime::from_timestamp(DEFAULT_REFERENCE_TIMESTAMP, 0).unwrap_or_default()
}

impl Player {
    /// Whether the last login is more than [`INACTIVITY_THRESHOLD_DAYS`] before `reference`.
    pub fn is_stale(&self, reference: DateTime<Utc>) -> bool {
        reference - self.last_login > Duration::days(INACTIVITY_THRESHOLD_DAYS)
    }
}

/// Players that are inactive or whose last login is stale relative to `reference`.
///
/// Results keep input order.
pub fn inactive_or_stale(players: &[Player], reference: DateTime<Utc>) -> Vec<Player> {
    players
        .iter()
        .filter(|player| !player.is_active || player.is_stale(reference))
        .cloned()
        .collect()
}

/// Players at or below [`LOW_LEVEL_CAP`], ascending by level.
pub fn low_level_listing(players: &[Player]) -> Vec<Player> {
    let mut listing: Vec<Player> = players
        .iter()
        .filter(|player| player.level <= LOW_LEVEL_CAP)
        .cloned()
        .collect();
    listing.sort_by_key(|player| player.level);
    listing
}

/// The highest-level VIP players, each paired with the award for their rank.
///
/// At most [`VIP_AWARDS`]`.len()` players are returned; with fewer VIPs only
/// the leading ranks are awarded.
pub fn vip_top3_awards(players: &[Player]) -> Vec<AwardedVipPlayer> {
    let mut vips: Vec<&Player> = players.iter().filter(|player| player.is_vip()).collect();
    vips.sort_by(|a, b| b.level.cmp(&a.level));
    vips.into_iter()
        .zip(VIP_AWARDS)
        .map(|(player, award)| AwardedVipPlayer::new(player, award))
        .collect()
}
