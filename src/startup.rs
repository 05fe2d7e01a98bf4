//! # The Main Entry Point of a Download Run
//!
//! `run` drives a whole run, from loading the tracking file to the
//! final summary.
//!
//! # Steps:
//! 1. Loads the tracking file
//! 2. Downloads every artist
//! 3. Downloads every playlist
//! 4. Prints the summary
//!
//! A tracking file that cannot be loaded aborts the run. Failing entries do not.
use crate::configuration::Settings;
use crate::download::Downloader;
use crate::process::{self, SyncReport};
use crate::tracking;
use anyhow::Context;
use std::path::Path;
use tracing::info;

pub async fn run(
    settings: &Settings,
    tracking_file: &Path,
    downloader: &dyn Downloader,
) -> anyhow::Result<SyncReport> {
    println!(
        "\x1b[1m\x1b[34mI will download music as {} files with {} threads into {}\x1b[0m",
        settings.format,
        settings.threads,
        settings.music_dir.display()
    );

    println!("Loading tracking info...");
    let tracking = tracking::load_tracking(tracking_file)
        .with_context(|| format!("Unable to load {}", tracking_file.display()))?;
    println!("Tracking info loaded");
    info!(
        entries = tracking.total(),
        file = %tracking_file.display(),
        "Tracking file loaded"
    );

    let report = process::process_tracking(&tracking, settings, downloader).await;
    report.print_summary();

    Ok(report)
}
