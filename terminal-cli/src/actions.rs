//! Scenario pipelines: fetch, transform, render, publish.
//!
//! Every run fetches its own roster; nothing is shared between runs.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rosterwatch_client::{
    publish_blob, publish_indexed, PlayerSource, Store, INACTIVE_PLAYERS_KEY, LOW_LEVEL_LIST_KEY,
    VIP_AWARDS_KEY,
};
use rosterwatch_types::{inactive_or_stale, low_level_listing, vip_top3_awards, Player};
use tracing::info;

use crate::render;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Print the roster as fetched
    Raw,
    /// List inactive or stale players and upload them
    Inactive,
    /// List players at level 10 or below and upload them one per rank
    LowLevel,
    /// Compute top 3 VIP awards and upload them
    Vip,
}

pub struct Pipeline<S, D> {
    pub source: S,
    pub store: D,
    pub reference_time: DateTime<Utc>,
}

impl<S: PlayerSource, D: Store> Pipeline<S, D> {
    pub async fn run<W: Write>(&self, action: Action, out: &mut W) -> Result<()> {
        info!(?action, "running action");
        match action {
            Action::Raw => self.view_raw(out).await,
            Action::Inactive => self.inactive(out).await,
            Action::LowLevel => self.low_level(out).await,
            Action::Vip => self.vip(out).await,
        }
    }

    async fn fetch(&self) -> Result<Vec<Player>> {
        self.source
            .fetch_players()
            .await
            .context("failed to fetch roster")
    }

    async fn view_raw<W: Write>(&self, out: &mut W) -> Result<()> {
        let players = self.fetch().await?;
        write!(out, "{}", render::raw_players(&players))?;
        Ok(())
    }

    async fn inactive<W: Write>(&self, out: &mut W) -> Result<()> {
        let players = self.fetch().await?;
        let inactive = inactive_or_stale(&players, self.reference_time);
        write!(out, "{}", render::inactive_players(&inactive))?;
        out.flush()?;

        publish_blob(&self.store, INACTIVE_PLAYERS_KEY, &inactive)
            .await
            .with_context(|| format!("failed to upload {INACTIVE_PLAYERS_KEY}"))?;
        writeln!(out, "\nUploaded {} players to {INACTIVE_PLAYERS_KEY}.", inactive.len())?;
        Ok(())
    }

    async fn low_level<W: Write>(&self, out: &mut W) -> Result<()> {
        let players = self.fetch().await?;
        let listing = low_level_listing(&players);
        write!(out, "{}", render::low_level_table(&listing))?;
        out.flush()?;

        let written = publish_indexed(&self.store, LOW_LEVEL_LIST_KEY, &listing)
            .await
            .with_context(|| format!("failed to upload {LOW_LEVEL_LIST_KEY}"))?;
        writeln!(out, "\nUploaded {written} entries to {LOW_LEVEL_LIST_KEY}.")?;
        Ok(())
    }

    async fn vip<W: Write>(&self, out: &mut W) -> Result<()> {
        let players = self.fetch().await?;
        let awards = vip_top3_awards(&players);
        write!(out, "{}", render::vip_awards(&awards))?;
        out.flush()?;

        publish_blob(&self.store, VIP_AWARDS_KEY, &awards)
            .await
            .with_context(|| format!("failed to upload {VIP_AWARDS_KEY}"))?;
        writeln!(out, "\nUploaded {} awards to {VIP_AWARDS_KEY}.", awards.len())?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;
    use rosterwatch_client::mocks::{MemoryStore, StaticSource};
    use rosterwatch_types::default_reference_time;
    use serde_json::json;

    pub(crate) fn roster() -> Vec<Player> {
        let reference = default_reference_time();
        let player = |name: &str, is_active, days_ago, vip_level, level, gold| Player {
            name: String::from(name),
            is_active,
            last_login: reference - Duration::days(days_ago),
            vip_level,
            level,
            gold,
        };
        vec![
            player("Aria", true, 1, 1, 20, 400),
            player("Bao", false, 0, 2, 5, 50),
            player("Chi", true, 9, 1, 50, 900),
            player("Dung", true, 5, 0, 0, 10),
            player("Em", true, 2, 0, 10, 75),
        ]
    }

    pub(crate) fn pipeline(source: StaticSource, store: MemoryStore) -> Pipeline<StaticSource, MemoryStore> {
        Pipeline {
            source,
            store,
            reference_time: default_reference_time(),
        }
    }

    async fn run(pipeline: &Pipeline<StaticSource, MemoryStore>, action: Action) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = pipeline.run(action, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_raw_prints_without_publishing() {
        let pipeline = pipeline(StaticSource::new(roster()), MemoryStore::default());
        let (result, out) = run(&pipeline, Action::Raw).await;
        result.unwrap();
        assert_eq!(out.lines().filter(|l| l.contains("| Gold:")).count(), 5);
        assert!(pipeline.store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_inactive_publishes_blob() {
        let pipeline = pipeline(StaticSource::new(roster()), MemoryStore::default());
        let (result, out) = run(&pipeline, Action::Inactive).await;
        result.unwrap();

        // Bao is inactive, Chi is 9 days stale, Dung is exactly 5 days and stays out.
        assert!(out.contains("Bao | Active: false"));
        assert!(out.contains("Chi | Active: true"));
        assert!(!out.contains("Dung |"));
        let stored = pipeline.store.get(INACTIVE_PLAYERS_KEY).unwrap();
        let names: Vec<&str> = stored
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["Name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Bao", "Chi"]);
        assert_eq!(pipeline.store.keys(), vec![INACTIVE_PLAYERS_KEY]);
    }

    #[tokio::test]
    async fn test_low_level_publishes_indexed_entries() {
        let pipeline = pipeline(StaticSource::new(roster()), MemoryStore::default());
        let (result, out) = run(&pipeline, Action::LowLevel).await;
        result.unwrap();

        assert!(out.contains("Uploaded 3 entries"));
        assert_eq!(
            pipeline.store.writes(),
            vec![
                format!("{LOW_LEVEL_LIST_KEY}/1"),
                format!("{LOW_LEVEL_LIST_KEY}/2"),
                format!("{LOW_LEVEL_LIST_KEY}/3"),
            ]
        );
        let first = pipeline.store.get(&format!("{LOW_LEVEL_LIST_KEY}/1")).unwrap();
        assert_eq!(first["Name"], json!("Dung"));
        assert_eq!(first["Level"], json!(0));
        let last = pipeline.store.get(&format!("{LOW_LEVEL_LIST_KEY}/3")).unwrap();
        assert_eq!(last["Name"], json!("Em"));
    }

    #[tokio::test]
    async fn test_vip_publishes_awards() {
        let pipeline = pipeline(StaticSource::new(roster()), MemoryStore::default());
        let (result, out) = run(&pipeline, Action::Vip).await;
        result.unwrap();

        assert!(out.contains("Chi | VIP: 1 | Level: 50 | Gold: 900 -> Awarded: 2000"));
        assert_eq!(
            pipeline.store.get(VIP_AWARDS_KEY),
            Some(json!([
                { "Name": "Chi", "VipLevel": 1, "Level": 50, "CurrentGold": 900, "AwardedGoldAmount": 2000 },
                { "Name": "Aria", "VipLevel": 1, "Level": 20, "CurrentGold": 400, "AwardedGoldAmount": 1500 },
                { "Name": "Bao", "VipLevel": 2, "Level": 5, "CurrentGold": 50, "AwardedGoldAmount": 1000 },
            ]))
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_before_output() {
        let pipeline = pipeline(StaticSource::offline(), MemoryStore::default());
        let (result, out) = run(&pipeline, Action::Vip).await;
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("failed to fetch roster"));
        assert!(out.is_empty());
        assert!(pipeline.store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_keeps_printed_results_and_partial_entries() {
        let pipeline = pipeline(StaticSource::new(roster()), MemoryStore::failing_after(1));
        let (result, out) = run(&pipeline, Action::LowLevel).await;
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains(LOW_LEVEL_LIST_KEY));
        assert!(out.contains("Dung"));
        assert!(!out.contains("Uploaded"));
        assert_eq!(
            pipeline.store.keys(),
            vec![format!("{LOW_LEVEL_LIST_KEY}/1")]
        );
    }

    #[tokio::test]
    async fn test_reference_time_is_injected() {
        let mut pipeline = pipeline(StaticSource::new(roster()), MemoryStore::default());
        // Ten days earlier nobody active is stale yet.
        pipeline.reference_time = default_reference_time() - Duration::days(10);
        let (result, _) = run(&pipeline, Action::Inactive).await;
        result.unwrap();
        let stored = pipeline.store.get(INACTIVE_PLAYERS_KEY).unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 1);
        assert_eq!(stored[0]["Name"], json!("Bao"));
    }

    #[tokio::test]
    async fn test_empty_roster_publishes_empty_results() {
        let pipeline = pipeline(StaticSource::new(Vec::new()), MemoryStore::default());
        for action in [Action::Inactive, Action::LowLevel, Action::Vip] {
            let (result, _) = run(&pipeline, action).await;
            result.unwrap();
        }
        assert_eq!(pipeline.store.get(INACTIVE_PLAYERS_KEY), Some(json!([])));
        assert_eq!(pipeline.store.get(VIP_AWARDS_KEY), Some(json!([])));
        assert_eq!(pipeline.store.keys().len(), 2);
    }
}
