mod command;
mod downloader;
mod error;

pub use command::DownloadCommand;
#[cfg(test)]
pub use downloader::MockDownloader;
pub use downloader::{relay_output, run_command, Downloader, SpotdlDownloader};
pub use error::DownloadError;
