use crate::foundation::utils::split_options;
use clap::builder::RangedU64ValueParser;
use clap::error::{Error as ClapError, ErrorKind};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

pub const DEFAULT_FORMAT: &str = "opus";
pub const DEFAULT_MUSIC_DIR: &str = "/music";
pub const DEFAULT_SPOTDL_PATH: &str = "/usr/local/bin/spotdl";

/// Credentials forwarded to spotdl so it does not share the public client quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub id: String,
    pub secret: String,
}

/// Everything a run needs besides the tracking file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: String,
    pub threads: usize,
    pub options: Vec<String>,
    pub music_dir: PathBuf,
    pub spotdl_path: PathBuf,
    pub credentials: Option<ClientCredentials>,
}

impl Settings {
    pub fn new(music_dir: PathBuf, spotdl_path: PathBuf) -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            threads: default_threads(),
            options: Vec::new(),
            music_dir,
            spotdl_path,
            credentials: None,
        }
    }

    /// Builds settings from parsed command line matches.
    ///
    /// Flags fall back to their environment variables (`FORMAT`, `OPTIONS`, ...)
    /// and then to the built-in defaults. Credentials are used only when both
    /// the id and the secret are present.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let string = |id: &str| matches.get_one::<String>(id).cloned();

        let credentials = match (string("client-id"), string("client-secret")) {
            (Some(id), Some(secret)) => Some(ClientCredentials { id, secret }),
            _ => None,
        };

        Self {
            format: string("format").unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            threads: matches
                .get_one::<usize>("threads")
                .copied()
                .unwrap_or_else(default_threads),
            options: string("options")
                .map(|o| split_options(&o))
                .unwrap_or_default(),
            music_dir: matches
                .get_one::<PathBuf>("music-dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MUSIC_DIR)),
            spotdl_path: matches
                .get_one::<PathBuf>("spotdl")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SPOTDL_PATH)),
            credentials,
        }
    }
}

/// Number of logical CPUs, or 1 when it cannot be determined.
pub fn default_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// What the binary should do with its command line.
#[derive(Debug)]
pub enum CliAction {
    /// Arguments are valid, start a run.
    Run(ArgMatches),
    /// Wrong number of arguments: print the usage banner and do nothing else.
    Usage,
    /// Help, version or an invalid value: let clap print it and exit.
    Exit(ClapError),
}

/// Parses `args` with `cli` and decides how the binary reacts.
///
/// Only a missing or surplus argument falls back to the usage banner. A value
/// that fails validation (for example `THREADS=abc`) keeps clap's message and
/// exit code so the offending setting is named.
pub fn parse_args<I, T>(cli: Command, args: I) -> CliAction
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match cli.try_get_matches_from(args) {
        Ok(matches) => CliAction::Run(matches),
        Err(e) => match e.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::TooManyValues
            | ErrorKind::UnknownArgument => CliAction::Usage,
            _ => CliAction::Exit(e),
        },
    }
}

pub fn build_cli() -> Command {
    Command::new("spotrack")
        .about("🎵 Download every artist and playlist listed in a tracking file with spotdl 🎵")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("tracking")
                .help("YAML file listing the artists and playlists to download")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .env("FORMAT")
                .help("Output audio format passed to spotdl")
                .default_value(DEFAULT_FORMAT),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .env("OPTIONS")
                .help("Extra space-separated arguments appended to every spotdl call")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .env("THREADS")
                .help("Threads spotdl may use [default: number of logical CPUs]")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..)),
        )
        .arg(
            Arg::new("music-dir")
                .long("music-dir")
                .env("MUSIC_DIR")
                .help("Directory holding one sub-directory per entry")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_MUSIC_DIR),
        )
        .arg(
            Arg::new("spotdl")
                .long("spotdl")
                .env("SPOTDL_PATH")
                .help("Path of the spotdl executable")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_SPOTDL_PATH),
        )
        .arg(
            Arg::new("client-id")
                .long("client-id")
                .env("SPOTIFY_CLIENT_ID")
                .help("Spotify client id forwarded to spotdl")
                .hide_env_values(true),
        )
        .arg(
            Arg::new("client-secret")
                .long("client-secret")
                .env("SPOTIFY_CLIENT_SECRET")
                .help("Spotify client secret forwarded to spotdl")
                .hide_env_values(true),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Explicit flags always win over the environment, so these tests do not
    // depend on FORMAT or OPTIONS being unset in the test environment.
    fn settings_from(args: &[&str]) -> Settings {
        let matches = build_cli()
            .try_get_matches_from(std::iter::once("spotrack").chain(args.iter().copied()))
            .unwrap();
        Settings::from_matches(&matches)
    }

    #[test]
    fn test_explicit_flags() {
        let settings = settings_from(&[
            "--format",
            "flac",
            "--threads",
            "3",
            "--options=--lyrics genius  --bitrate 160k",
            "--music-dir",
            "/tmp/music",
            "--spotdl",
            "/opt/spotdl",
            "tracking.yaml",
        ]);

        assert_eq!(settings.format, "flac");
        assert_eq!(settings.threads, 3);
        assert_eq!(
            settings.options,
            vec!["--lyrics", "genius", "--bitrate", "160k"]
        );
        assert_eq!(settings.music_dir, PathBuf::from("/tmp/music"));
        assert_eq!(settings.spotdl_path, PathBuf::from("/opt/spotdl"));
    }

    #[test]
    fn test_credentials_need_both_parts() {
        let settings = settings_from(&[
            "--client-id",
            "id",
            "--client-secret",
            "secret",
            "tracking.yaml",
        ]);
        assert_eq!(
            settings.credentials,
            Some(ClientCredentials {
                id: "id".to_string(),
                secret: "secret".to_string()
            })
        );
    }

    #[test]
    fn test_tracking_argument_is_required() {
        assert!(build_cli().try_get_matches_from(["spotrack"]).is_err());
        assert!(build_cli()
            .try_get_matches_from(["spotrack", "a.yaml", "b.yaml"])
            .is_err());

        let matches = build_cli()
            .try_get_matches_from(["spotrack", "tracking.yaml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("tracking"),
            Some(&PathBuf::from("tracking.yaml"))
        );
    }

    fn action_for(cli: Command, args: &[&str]) -> CliAction {
        parse_args(cli, std::iter::once("spotrack").chain(args.iter().copied()))
    }

    #[test]
    fn test_wrong_argument_count_prints_usage() {
        assert!(matches!(action_for(build_cli(), &[]), CliAction::Usage));
        assert!(matches!(
            action_for(build_cli(), &["a.yaml", "b.yaml"]),
            CliAction::Usage
        ));
        assert!(matches!(
            action_for(build_cli(), &["--bogus", "a.yaml"]),
            CliAction::Usage
        ));
        assert!(matches!(
            action_for(build_cli(), &["--threads", "2", "a.yaml"]),
            CliAction::Run(_)
        ));
    }

    #[test]
    fn test_invalid_thread_values_are_not_usage_errors() {
        for threads in ["0", "abc"] {
            match action_for(build_cli(), &["--threads", threads, "a.yaml"]) {
                CliAction::Exit(e) => {
                    assert!(matches!(
                        e.kind(),
                        ErrorKind::InvalidValue | ErrorKind::ValueValidation
                    ));
                    assert_ne!(e.exit_code(), 0);
                }
                other => panic!("expected an exit for --threads {threads}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_thread_value_from_environment_is_reported() {
        // Same argument, read from a variable no other test touches.
        std::env::set_var("SPOTRACK_TEST_BAD_THREADS", "abc");
        let cli = build_cli().mut_arg("threads", |arg| arg.env("SPOTRACK_TEST_BAD_THREADS"));

        let action = action_for(cli, &["a.yaml"]);

        match action {
            CliAction::Exit(e) => assert!(e.to_string().contains("threads")),
            other => panic!("expected an exit, got {other:?}"),
        }
    }

    #[test]
    fn test_help_and_version_exit_through_clap() {
        for flag in ["--help", "--version"] {
            match action_for(build_cli(), &[flag]) {
                CliAction::Exit(e) => assert!(matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
                )),
                other => panic!("expected {flag} to exit, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_threads_is_rejected() {
        assert!(build_cli()
            .try_get_matches_from(["spotrack", "--threads", "0", "tracking.yaml"])
            .is_err());
    }

    #[test]
    fn test_settings_new_defaults() {
        let settings = Settings::new(PathBuf::from("/music"), PathBuf::from("spotdl"));
        assert_eq!(settings.format, "opus");
        assert!(settings.threads >= 1);
        assert!(settings.options.is_empty());
        assert!(settings.credentials.is_none());
    }
}
