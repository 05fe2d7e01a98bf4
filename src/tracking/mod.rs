//! The tracking file: which artists and playlists to download.

mod loader;
mod models;

pub use loader::{load_tracking, TrackingError};
pub use models::{Category, Entry, TrackingConfig};
