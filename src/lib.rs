pub mod configuration;
pub mod download;
pub mod foundation;
pub mod process;
pub mod startup;
pub mod tracking;

pub use configuration::*;
pub use download::{DownloadCommand, DownloadError, Downloader, SpotdlDownloader};
pub use process::{process_tracking, SyncReport};
pub use tracking::{load_tracking, Category, Entry, TrackingConfig, TrackingError};
