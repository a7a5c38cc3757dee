use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pschart::config::AppConfig;
use pschart::version::VERSION;
use pschart::{ingest, store, web};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (the default when no subcommand is given)
    Serve,
    /// Parse the raw monitor log and rewrite the profile file
    Generate,
}

fn init_logging() {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily("logs", "pschart.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Manually check for --version before full parsing to keep the output simple.
    if std::env::args().any(|arg| arg == "--version") {
        println!("pschart {VERSION}");
        return Ok(());
    }

    let args = Args::parse();

    init_logging();
    info!("Starting pschart, version: {}", VERSION);
    dotenv::dotenv().ok();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => web::run_server(config).await,
        Command::Generate => generate(&config),
    }
}

/// The manually-triggered generation step: raw log in, profile file out.
/// Never wired to the HTTP path; the server only ever reads the profile.
fn generate(config: &AppConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let samples = ingest::load_monitor_log(&config.log_path)?;
    store::save_profile(&config.profile_path, &samples)?;
    info!(
        count = samples.len(),
        path = %config.profile_path,
        "profile file written"
    );
    Ok(())
}
