use crate::domain::ids::CampaignId;
use crate::domain::schedule::ScheduleEntry;
use crate::error::CoreError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignType {
    CostPerOrder,
    CostPerClick,
    BuyOneGetOne,
    Other(String),
}

impl CampaignType {
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyCampaignType);
        }
        let kind = if trimmed.eq_ignore_ascii_case("Cost per Order") {
            Self::CostPerOrder
        } else if trimmed.eq_ignore_ascii_case("Cost per Click") {
            Self::CostPerClick
        } else if trimmed.eq_ignore_ascii_case("Buy One Get One") {
            Self::BuyOneGetOne
        } else {
            Self::Other(trimmed.to_string())
        };
        Ok(kind)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::CostPerOrder => "Cost per Order",
            Self::CostPerClick => "Cost per Click",
            Self::BuyOneGetOne => "Buy One Get One",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Timestamps are UTC seconds. A campaign without `end_at` never activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: Option<CampaignId>,
    pub campaign_type: CampaignType,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub schedule: Vec<ScheduleEntry>,
}
