use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use slotwise_config::AppConfig;
use slotwise_core::rules::next_activation;
use slotwise_core::Campaign;
use std::io::{self, Write};

pub mod campaigns;
pub mod source;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
    pub now_utc: i64,
}

impl Context<'_> {
    pub fn next_activation(&self, campaign: &Campaign) -> Result<Option<i64>> {
        Ok(next_activation(
            campaign,
            self.now_utc,
            &Local,
            self.config.end_date_bound,
        )?)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
