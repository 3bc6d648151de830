//! Text views of roster results.

use chrono::{DateTime, Utc};
use rosterwatch_types::{AwardedVipPlayer, Player};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NAME_WIDTH: usize = 17;
const LEVEL_WIDTH: usize = 6;
const EMPTY: &str = "No players matched.";

fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn section(title: &str, rows: Vec<String>) -> String {
    let mut lines = vec![String::new(), title.to_string()];
    if rows.is_empty() {
        lines.push(EMPTY.to_string());
    } else {
        lines.extend(rows);
    }
    lines.join("\n") + "\n"
}

pub fn raw_players(players: &[Player]) -> String {
    let rows = players
        .iter()
        .map(|p| {
            format!(
                "{} | Active: {} | LastLogin: {} | VIP: {} | Level: {} | Gold: {}",
                p.name,
                p.is_active,
                timestamp(&p.last_login),
                p.vip_level,
                p.level,
                p.gold
            )
        })
        .collect();
    section("RAW PLAYER DATA", rows)
}

pub fn inactive_players(players: &[Player]) -> String {
    let rows = players
        .iter()
        .map(|p| {
            format!(
                "{} | Active: {} | LastLogin: {}",
                p.name,
                p.is_active,
                timestamp(&p.last_login)
            )
        })
        .collect();
    section("INACTIVE OR STALE PLAYERS", rows)
}

fn table_row(name: &str, level: &str, gold: &str) -> String {
    format!(
        "{name:<name_width$}| {level:<level_width$}| {gold}",
        name_width = NAME_WIDTH,
        level_width = LEVEL_WIDTH
    )
}

/// Three-column table: name, level, current gold.
pub fn low_level_table(players: &[Player]) -> String {
    let ruler = format!(
        "{}|{}|{}",
        "-".repeat(NAME_WIDTH),
        "-".repeat(LEVEL_WIDTH + 1),
        "-".repeat(14)
    );
    let mut rows = vec![table_row("Player Name", "Level", "Current Gold"), ruler.clone()];
    rows.extend(
        players
            .iter()
            .map(|p| table_row(&p.name, &p.level.to_string(), &p.gold.to_string())),
    );
    rows.push(ruler);
    section("LOW-LEVEL PLAYERS (LEVEL <= 10)", rows)
}

pub fn vip_awards(awards: &[AwardedVipPlayer]) -> String {
    let rows = awards
        .iter()
        .map(|a| {
            format!(
                "{} | VIP: {} | Level: {} | Gold: {} -> Awarded: {}",
                a.name, a.vip_level, a.level, a.current_gold, a.awarded_gold_amount
            )
        })
        .collect();
    section("TOP 3 VIP REWARDS", rows)
}
