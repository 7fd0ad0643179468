use crate::commands::source::{load_campaigns, LoadedCampaigns, STDIN_SOURCE};
use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{format_activation, format_optional_date};
use anyhow::Result;
use clap::Args;
use slotwise_core::dto::{CampaignDetailDto, CampaignSummaryDto};
use slotwise_core::Campaign;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// JSON export of campaign records, `-` for stdin
    #[arg(long, short, value_name = "PATH", default_value = STDIN_SOURCE)]
    pub file: PathBuf,
    /// Only campaigns with an upcoming activation
    #[arg(long)]
    pub upcoming: bool,
}

#[derive(Debug, Args)]
pub struct NextArgs {
    pub id: String,
    #[arg(long, short, value_name = "PATH", default_value = STDIN_SOURCE)]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
    #[arg(long, short, value_name = "PATH", default_value = STDIN_SOURCE)]
    pub file: PathBuf,
}

pub fn list_campaigns(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let loaded = load_campaigns(&args.file)?;
    let mut items = Vec::with_capacity(loaded.campaigns.len());
    for campaign in &loaded.campaigns {
        let next = ctx.next_activation(campaign)?;
        if args.upcoming && next.is_none() {
            continue;
        }
        items.push(CampaignSummaryDto::new(campaign, next));
    }

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no campaigns");
    }

    let display = &ctx.config.display;
    for item in &items {
        println!(
            "{}  {}  {}  {}  {}",
            item.id.as_ref().map(|id| id.as_str()).unwrap_or("-"),
            item.campaign_type,
            format_optional_date(item.start_date, &display.date_format),
            format_optional_date(item.end_date, &display.date_format),
            format_activation(item.next_activation_at, &display.datetime_format),
        );
    }
    if loaded.skipped > 0 {
        eprintln!("skipped {} invalid campaign record(s)", loaded.skipped);
    }
    Ok(())
}

pub fn next_activation(ctx: &Context<'_>, args: NextArgs) -> Result<()> {
    let loaded = load_campaigns(&args.file)?;
    let campaign = find_campaign(&loaded, &args.id)?;
    let next = ctx.next_activation(campaign)?;

    if ctx.json {
        print_json(&serde_json::json!({
            "id": campaign.id,
            "next_activation_at": next,
        }))?;
    } else {
        println!(
            "{}",
            format_activation(next, &ctx.config.display.datetime_format)
        );
    }
    Ok(())
}

pub fn show_campaign(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let loaded = load_campaigns(&args.file)?;
    let campaign = find_campaign(&loaded, &args.id)?;
    let dto = CampaignDetailDto::new(campaign, ctx.next_activation(campaign)?);

    if ctx.json {
        return print_json(&dto);
    }

    let display = &ctx.config.display;
    println!(
        "id: {}",
        dto.id.as_ref().map(|id| id.as_str()).unwrap_or("-")
    );
    println!("type: {}", dto.campaign_type);
    println!(
        "start: {}",
        format_optional_date(dto.start_date, &display.date_format)
    );
    println!(
        "end: {}",
        format_optional_date(dto.end_date, &display.date_format)
    );
    println!(
        "next activation: {}",
        format_activation(dto.next_activation_at, &display.datetime_format)
    );

    if dto.schedule.is_empty() {
        println!("schedule: none");
        return Ok(());
    }
    println!("schedule:");
    for entry in &dto.schedule {
        let marker = if entry.recognized {
            ""
        } else {
            "  (unrecognized weekday, skipped)"
        };
        println!(
            "  {}  {}-{}{}",
            entry.weekday, entry.start_time, entry.end_time, marker
        );
    }
    Ok(())
}

fn find_campaign<'a>(loaded: &'a LoadedCampaigns, id: &str) -> Result<&'a Campaign> {
    loaded
        .find(id)
        .ok_or_else(|| not_found(format!("campaign {}", id.trim())))
}
