//! Player records and the roster queries run over them.
//!
//! Everything in this crate is pure: the queries take a borrowed slice of
//! [`Player`]s and return freshly built result sets. Fetching and publishing
//! live in `rosterwatch-client`.

pub mod player;
pub mod query;

pub use player::{parse_timestamp, AwardedVipPlayer, Player};
pub use query::{
    default_reference_time, inactive_or_stale, low_level_listing, vip_top3_awards,
    DEFAULT_REFERENCE_TIME, INACTIVITY_THRESHOLD_DAYS, LOW_LEVEL_CAP, VIP_AWARDS,
};
