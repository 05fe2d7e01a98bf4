use crate::configuration::Settings;
use std::fmt;
use std::path::{Path, PathBuf};

/// One spotdl invocation: what to run, with which arguments, and where.
///
/// The working directory travels with the command instead of being set on
/// the current process, so building and running commands never touches
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl DownloadCommand {
    /// Builds the command downloading `url` into `working_dir`.
    ///
    /// The argument order is fixed:
    /// `download <url> --format <fmt> --threads <n> [--client-id <id> --client-secret <secret>] [options...]`.
    pub fn new(settings: &Settings, url: &str, working_dir: &Path) -> Self {
        let mut args = vec![
            "download".to_string(),
            url.to_string(),
            "--format".to_string(),
            settings.format.clone(),
            "--threads".to_string(),
            settings.threads.to_string(),
        ];

        if let Some(credentials) = &settings.credentials {
            args.extend([
                "--client-id".to_string(),
                credentials.id.clone(),
                "--client-secret".to_string(),
                credentials.secret.clone(),
            ]);
        }

        args.extend(settings.options.iter().cloned());

        Self {
            program: settings.spotdl_path.clone(),
            args,
            working_dir: working_dir.to_path_buf(),
        }
    }
}

impl fmt::Display for DownloadCommand {
    /// Renders the command line with the client secret masked.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        let mut mask_next = false;
        for arg in &self.args {
            if mask_next {
                write!(f, " ***")?;
            } else {
                write!(f, " {arg}")?;
            }
            mask_next = arg == "--client-secret";
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ClientCredentials;

    fn settings() -> Settings {
        let mut settings = Settings::new(
            PathBuf::from("/music"),
            PathBuf::from("/usr/local/bin/spotdl"),
        );
        settings.threads = 8;
        settings
    }

    #[test]
    fn test_default_command_line() {
        let command = DownloadCommand::new(&settings(), "u1", Path::new("/music/A"));

        assert_eq!(command.program, PathBuf::from("/usr/local/bin/spotdl"));
        assert_eq!(
            command.args,
            vec!["download", "u1", "--format", "opus", "--threads", "8"]
        );
        assert_eq!(command.working_dir, PathBuf::from("/music/A"));
    }

    #[test]
    fn test_options_follow_format_and_threads() {
        let mut settings = settings();
        settings.format = "mp3".to_string();
        settings.options = vec!["--lyrics".to_string(), "genius".to_string()];

        let command = DownloadCommand::new(&settings, "u1", Path::new("/music/A"));

        assert_eq!(
            command.args,
            vec![
                "download", "u1", "--format", "mp3", "--threads", "8", "--lyrics", "genius"
            ]
        );
    }

    #[test]
    fn test_credentials_are_forwarded_and_masked() {
        let mut settings = settings();
        settings.credentials = Some(ClientCredentials {
            id: "my-id".to_string(),
            secret: "my-secret".to_string(),
        });
        settings.options = vec!["--bitrate".to_string(), "160k".to_string()];

        let command = DownloadCommand::new(&settings, "u1", Path::new("/music/A"));

        assert_eq!(
            command.args[6..],
            [
                "--client-id",
                "my-id",
                "--client-secret",
                "my-secret",
                "--bitrate",
                "160k"
            ]
        );

        let rendered = command.to_string();
        assert!(rendered.contains("--client-secret ***"));
        assert!(!rendered.contains("my-secret"));
        assert!(rendered.starts_with("/usr/local/bin/spotdl download u1 --format opus"));
    }
}
