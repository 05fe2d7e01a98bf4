use spotrack::configuration::{build_cli, parse_args, CliAction, Settings};
use spotrack::download::SpotdlDownloader;
use spotrack::startup::run;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "spotrack=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args(build_cli(), std::env::args_os()) {
        CliAction::Run(args) => args,
        CliAction::Usage => {
            println!("\x1b[1m\x1b[34mProgram started\x1b[0m");
            print_usage();
            println!("\x1b[1m\x1b[34mProgram finished\x1b[0m");
            return Ok(());
        }
        CliAction::Exit(e) => e.exit(),
    };

    println!("\x1b[1m\x1b[34mProgram started\x1b[0m");

    let settings = Settings::from_matches(&args);
    let tracking_file = args
        .get_one::<PathBuf>("tracking")
        .cloned()
        .unwrap_or_default();

    run(&settings, &tracking_file, &SpotdlDownloader).await?;

    println!("\x1b[1m\x1b[34mProgram finished\x1b[0m");
    Ok(())
}

fn print_usage() {
    println!("\x1b[1m\x1b[31mInvalid arguments!\x1b[0m\n");
    println!("📖 Usage:");
    println!("  \x1b[1m\x1b[32mspotrack <tracking.yaml>\x1b[0m - 🎵 Download every tracked artist and playlist");
    println!("  \x1b[1m\x1b[32mspotrack --help\x1b[0m          - 📚 Show every option and its environment variable");
    println!("\x1b[33mFORMAT, OPTIONS, THREADS and MUSIC_DIR can also be set in the environment.\x1b[0m\n");
}
