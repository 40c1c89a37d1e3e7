use anyhow::{Context, Result};
use chrono::Utc;
use log::error;
use crate::status::save_status;

mod config;
mod digest;
mod errors;
mod initialization;
mod manager_gismeteo;
mod manager_telegram;
mod models;
mod status;
mod worker;

/// One invocation per external scheduler trigger. The exit code is always
/// zero: a changed page layout or a flaky network must never look like an
/// infrastructure fault to the scheduler, so everything is logged and
/// converted into the alerting state machine instead.
fn main() {
    if let Err(e) = try_main() {
        error!("{:#}", e);
        eprintln!("meteobot: {:#}", e);
    }
}

fn try_main() -> Result<()> {
    let (config, gismeteo, telegram, mut status) = initialization::init()
        .context("initialization failed")?;

    let outcome = gismeteo.get_forecast();
    worker::run(&config, outcome, &telegram, &mut status, Utc::now());

    save_status(&config.files.status_file, &status)
        .context("persisting status")?;

    Ok(())
}
