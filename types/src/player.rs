use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// A player record as published by the upstream roster feed.
///
/// Field names follow the feed (PascalCase) in both directions so documents
/// written to the store keep the same shape as the source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub name: String,
    pub is_active: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_login: DateTime<Utc>,
    /// Paid tier, 0 when the player is not VIP.
    pub vip_level: u32,
    pub level: u32,
    pub gold: u64,
}

impl Player {
    pub fn is_vip(&self) -> bool {
        self.vip_level > 0
    }
}

/// A VIP player together with the gold awarded for their rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwardedVipPlayer {
    pub name: String,
    pub vip_level: u32,
    pub level: u32,
    /// Gold balance copied from the player when the award was computed.
    pub current_gold: u64,
    pub awarded_gold_amount: u64,
}

impl AwardedVipPlayer {
    pub fn new(player: &Player, awarded_gold_amount: u64) -> Self {
        Self {
            name: player.name.clone(),
            vip_level: player.vip_level,
            level: player.level,
            current_gold: player.gold,
            awarded_gold_amount,
        }
    }
}

/// Parses a login timestamp from the feed.
///
/// Accepts RFC 3339 with an offset, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (read as UTC), or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}
