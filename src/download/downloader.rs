//! Running spotdl as a child process and relaying what it prints.

use crate::download::{DownloadCommand, DownloadError};
use async_trait::async_trait;
use std::io::{self, Write};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Performs a single download.
///
/// `Ok(())` means the downloader ran to completion and reported success.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, command: &DownloadCommand) -> Result<(), DownloadError>;
}

/// Runs the real spotdl executable and relays its output to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpotdlDownloader;

#[async_trait]
impl Downloader for SpotdlDownloader {
    async fn download(&self, command: &DownloadCommand) -> Result<(), DownloadError> {
        let mut out = io::stdout();
        run_command(command, &mut out).await
    }
}

/// Spawns `command` in its working directory and writes every line the child
/// prints on stdout or stderr to `out`, flushing after each line.
///
/// Lines from the two streams are interleaved in the order they arrive.
pub async fn run_command<W>(command: &DownloadCommand, out: &mut W) -> Result<(), DownloadError>
where
    W: Write + Send,
{
    debug!(
        "Running {} in {}",
        command,
        command.working_dir.display()
    );

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .current_dir(&command.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| DownloadError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    let relayed = match (child.stdout.take(), child.stderr.take()) {
        (Some(stdout), Some(stderr)) => relay_output(stdout, stderr, out).await,
        _ => Ok(()),
    };

    let status = child.wait().await?;
    relayed?;

    if status.success() {
        Ok(())
    } else {
        Err(DownloadError::Exited(status.code()))
    }
}

/// Copies lines from both readers to `out` until both are exhausted.
///
/// Output that is not valid UTF-8 is converted lossily. A trailing carriage
/// return is dropped so progress lines do not overwrite each other.
pub async fn relay_output<A, B, W>(stdout: A, stderr: B, out: &mut W) -> io::Result<()>
where
    A: AsyncRead + Unpin,
    B: AsyncRead + Unpin,
    W: Write,
{
    let mut stdout = BufReader::new(stdout).split(b'\n');
    let mut stderr = BufReader::new(stderr).split(b'\n');
    let (mut stdout_open, mut stderr_open) = (true, true);

    while stdout_open || stderr_open {
        tokio::select! {
            segment = stdout.next_segment(), if stdout_open => match segment? {
                Some(line) => write_line(out, &line)?,
                None => stdout_open = false,
            },
            segment = stderr.next_segment(), if stderr_open => match segment? {
                Some(line) => write_line(out, &line)?,
                None => stderr_open = false,
            },
        }
    }

    Ok(())
}

fn write_line<W: Write>(out: &mut W, line: &[u8]) -> io::Result<()> {
    let line = String::from_utf8_lossy(line);
    writeln!(out, "{}", line.trim_end_matches('\r'))?;
    out.flush()
}
