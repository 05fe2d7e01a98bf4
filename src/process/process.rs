//! This module walks the tracking file and downloads every entry into its own
//! directory below the music directory.
//!
//! Entries are handled one after another. A failing entry is reported and
//! counted, and processing moves on to the next one.

use crate::configuration::Settings;
use crate::download::{DownloadCommand, DownloadError, Downloader};
use crate::foundation::utils::to_dir_name;
use crate::process::SyncReport;
use crate::tracking::{Category, Entry, TrackingConfig};
use std::path::Path;
use std::{fs, io};
use tracing::debug;

/// State of an entry's directory before downloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDir {
    /// The directory did not exist and was created.
    Created,
    /// The directory exists and will be downloaded into again.
    Existing,
    /// The directory already has content and the entry must not be refreshed.
    Populated,
}

/// What happened to an entry that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Downloaded,
    Skipped,
}

/// Process every entry of the tracking file, artists first, then playlists.
///
/// # Arguments
///
/// * `tracking` - The loaded tracking file.
/// * `settings` - Runtime settings shared by every download.
/// * `downloader` - Runs the download command of each entry.
///
pub async fn process_tracking(
    tracking: &TrackingConfig,
    settings: &Settings,
    downloader: &dyn Downloader,
) -> SyncReport {
    let mut report = SyncReport::default();

    for category in Category::ALL {
        println!("\x1b[1m\x1b[34mProcessing {category}...\x1b[0m");

        for entry in tracking.entries(category) {
            match process_entry(entry, settings, downloader).await {
                Ok(EntryOutcome::Downloaded) => {
                    println!(
                        "\x1b[32mspotdl exited successfully for query: {}\x1b[0m",
                        entry.url
                    );
                    report.downloaded += 1;
                }
                Ok(EntryOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    println!("{}", failure_line(&entry.url, &e));
                    debug!(entry = %entry.name, error = ?e, "Entry failed");
                    report.failed.push(entry.name.clone());
                }
            }
        }

        println!("\x1b[32m{category} processed\x1b[0m");
    }

    report
}

/// The line printed for a failed entry, next to the success lines on stdout.
fn failure_line(url: &str, error: &DownloadError) -> String {
    format!("\x1b[31mspotdl exited with errors for query: {url} ({error})\x1b[0m")
}

/// Download a single entry.
///
/// The entry directory is created when missing. An entry with `refresh: false`
/// whose directory already has content is skipped without running the
/// downloader.
///
pub async fn process_entry(
    entry: &Entry,
    settings: &Settings,
    downloader: &dyn Downloader,
) -> Result<EntryOutcome, DownloadError> {
    println!("Downloading: {}", entry.name);

    let dir_name =
        to_dir_name(&entry.name).ok_or_else(|| DownloadError::InvalidName(entry.name.clone()))?;
    let target = settings.music_dir.join(dir_name);

    let state = prepare_target_dir(&target, entry.refresh).map_err(|source| {
        DownloadError::TargetDir {
            path: target.clone(),
            source,
        }
    })?;
    debug!(entry = %entry.name, ?state, dir = %target.display(), "Target directory ready");

    match state {
        TargetDir::Created => println!("Directory created: {}", target.display()),
        TargetDir::Existing => println!("Directory already exists: {}", target.display()),
        TargetDir::Populated => {
            println!(
                "\x1b[33mDirectory contains files and property 'refresh' is set to false -> Skipping...\x1b[0m"
            );
            return Ok(EntryOutcome::Skipped);
        }
    }

    let command = DownloadCommand::new(settings, &entry.url, &target);
    downloader.download(&command).await?;

    Ok(EntryOutcome::Downloaded)
}

/// Make sure the directory of an entry exists and decide whether to download into it.
///
/// # Arguments
///
/// * `path` - The entry directory.
/// * `refresh` - Whether a directory that already has content is downloaded into again.
///
pub fn prepare_target_dir(path: &Path, refresh: bool) -> io::Result<TargetDir> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        return Ok(TargetDir::Created);
    }

    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "path exists and is not a directory",
        ));
    }

    if !refresh && has_entries(path)? {
        Ok(TargetDir::Populated)
    } else {
        Ok(TargetDir::Existing)
    }
}

/// Check if a directory contains anything at all.
fn has_entries(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_some())
}
