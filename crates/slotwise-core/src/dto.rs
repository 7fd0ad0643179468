use crate::domain::{Campaign, CampaignId, CampaignType, ScheduleDay, ScheduleEntry};
use crate::error::CoreError;
use crate::time::{parse_record_timestamp, parse_time_of_day};
use chrono::TimeZone;
use serde::{Deserialize, Serialize};

/// Campaign as returned by the campaigns API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub campaign_type: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntryRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryRecord {
    #[serde(default)]
    pub weekday: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl CampaignRecord {
    pub fn into_campaign<Tz: TimeZone>(self, tz: &Tz) -> Result<Campaign, CoreError> {
        let id = self.id.as_deref().and_then(CampaignId::new);
        let campaign_type = CampaignType::parse(&self.campaign_type)?;
        let start_at = record_date(self.start_date.as_deref(), tz);
        let end_at = record_date(self.end_date.as_deref(), tz);
        let mut schedule = Vec::with_capacity(self.schedule.len());
        for entry in self.schedule {
            if let Some(entry) = entry.into_entry()? {
                schedule.push(entry);
            }
        }

        Ok(Campaign {
            id,
            campaign_type,
            start_at,
            end_at,
            schedule,
        })
    }
}

impl ScheduleEntryRecord {
    /// Entries on an unrecognized weekday never activate, so their times are
    /// only kept when they parse; otherwise the entry is dropped.
    pub fn into_entry(self) -> Result<Option<ScheduleEntry>, CoreError> {
        let weekday = ScheduleDay::parse(&self.weekday);
        let start_time = parse_time_of_day(&self.start_time);
        let end_time = parse_time_of_day(&self.end_time);

        if !weekday.is_recognized() {
            return Ok(match (start_time, end_time) {
                (Ok(start_time), Ok(end_time)) => {
                    Some(ScheduleEntry::new(weekday, start_time, end_time))
                }
                _ => None,
            });
        }

        let start_time = start_time.map_err(|_| CoreError::InvalidTimeOfDay(self.start_time))?;
        let end_time = end_time.map_err(|_| CoreError::InvalidTimeOfDay(self.end_time))?;
        Ok(Some(ScheduleEntry::new(weekday, start_time, end_time)))
    }
}

// An unreadable date is treated as absent: without an end date a campaign
// has no upcoming activation.
fn record_date<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> Option<i64> {
    raw.and_then(|value| parse_record_timestamp(value, tz).ok().flatten())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntryDto {
    pub weekday: String,
    pub recognized: bool,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummaryDto {
    pub id: Option<CampaignId>,
    pub campaign_type: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub next_activation_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDetailDto {
    pub id: Option<CampaignId>,
    pub campaign_type: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub next_activation_at: Option<i64>,
    pub schedule: Vec<ScheduleEntryDto>,
}

impl CampaignSummaryDto {
    pub fn new(campaign: &Campaign, next_activation_at: Option<i64>) -> Self {
        Self {
            id: campaign.id.clone(),
            campaign_type: campaign.campaign_type.label().to_string(),
            start_date: campaign.start_at,
            end_date: campaign.end_at,
            next_activation_at,
        }
    }
}

impl CampaignDetailDto {
    pub fn new(campaign: &Campaign, next_activation_at: Option<i64>) -> Self {
        Self {
            id: campaign.id.clone(),
            campaign_type: campaign.campaign_type.label().to_string(),
            start_date: campaign.start_at,
            end_date: campaign.end_at,
            next_activation_at,
            schedule: campaign.schedule.iter().map(schedule_entry_dto).collect(),
        }
    }
}

fn schedule_entry_dto(entry: &ScheduleEntry) -> ScheduleEntryDto {
    ScheduleEntryDto {
        weekday: entry.weekday.to_string(),
        recognized: entry.weekday.is_recognized(),
        start_time: entry.start_time.format("%H:%M").to_string(),
        end_time: entry.end_time.format("%H:%M").to_string(),
    }
}
