use crate::tracking::TrackingConfig;
use config::{ConfigError, FileFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("tracking file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid tracking file {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Loads the tracking file at `path`.
///
/// The file is parsed as YAML. Every entry must carry a `name` and a `url`,
/// so a malformed entry fails the whole load before anything is downloaded.
///
/// Keys are matched case-insensitively: `Artists:` or `URL:` are read as
/// `artists` and `url`.
///
/// # Examples
///
/// ```no_run
/// use spotrack::tracking::{load_tracking, Category};
/// use std::path::Path;
///
/// let tracking = load_tracking(Path::new("tracking.yaml"))?;
/// for entry in tracking.entries(Category::Artists) {
///     println!("{} -> {}", entry.name, entry.url);
/// }
/// # Ok::<(), spotrack::tracking::TrackingError>(())
/// ```
pub fn load_tracking(path: &Path) -> Result<TrackingConfig, TrackingError> {
    if !path.is_file() {
        return Err(TrackingError::NotFound(path.to_path_buf()));
    }

    let invalid = |source| TrackingError::Invalid {
        path: path.to_path_buf(),
        source,
    };

    let settings = config::Config::builder()
        .add_source(config::File::new(&path.to_string_lossy(), FileFormat::Yaml))
        .build()
        .map_err(invalid)?;

    settings.try_deserialize::<TrackingConfig>().map_err(invalid)
}
