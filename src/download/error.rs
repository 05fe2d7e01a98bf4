use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("entry name {0:?} is not usable as a directory name")]
    InvalidName(String),
    #[error("failed to prepare {}: {source}", .path.display())]
    TargetDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to relay downloader output: {0}")]
    Output(#[from] io::Error),
    #[error("downloader exited with {}", exit_label(.0))]
    Exited(Option<i32>),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status code {code}"),
        None => "no status code (terminated by a signal)".to_string(),
    }
}
