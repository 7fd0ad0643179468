use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use chrono::Local;
use serde::Deserialize;
use slotwise_core::dto::CampaignRecord;
use slotwise_core::Campaign;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

pub const STDIN_SOURCE: &str = "-";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Records {
    Many(Vec<CampaignRecord>),
    One(Box<CampaignRecord>),
}

#[derive(Debug, Default)]
pub struct LoadedCampaigns {
    pub campaigns: Vec<Campaign>,
    pub skipped: usize,
}

impl LoadedCampaigns {
    pub fn find(&self, id: &str) -> Option<&Campaign> {
        let id = id.trim();
        self.campaigns
            .iter()
            .find(|campaign| campaign.id.as_ref().map(|value| value.as_str()) == Some(id))
    }
}

/// Reads campaign records exported from the campaigns API. Records that do
/// not decode are logged and skipped so one bad row does not hide the rest.
pub fn load_campaigns(source: &Path) -> Result<LoadedCampaigns> {
    let contents = read_source(source)?;
    let records = parse_records(&contents)?;
    debug!(count = records.len(), source = %source.display(), "campaign records read");

    let mut loaded = LoadedCampaigns::default();
    for (index, record) in records.into_iter().enumerate() {
        let id = record.id.clone();
        match record.into_campaign(&Local) {
            Ok(campaign) => loaded.campaigns.push(campaign),
            Err(err) => {
                warn!(index, id = ?id, error = %err, "skipping campaign record");
                loaded.skipped += 1;
            }
        }
    }
    Ok(loaded)
}

fn read_source(source: &Path) -> Result<String> {
    if source.as_os_str() == STDIN_SOURCE {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| "read campaign records from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(source).with_context(|| format!("read {}", source.display()))
}

fn parse_records(contents: &str) -> Result<Vec<CampaignRecord>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Records = serde_json::from_str(contents)
        .map_err(|err| invalid_input(format!("campaign records are not valid JSON: {err}")))?;
    Ok(match records {
        Records::Many(records) => records,
        Records::One(record) => vec![*record],
    })
}
