use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use gym_registry::{Console, DateSource, RegistryConfig};

#[derive(Parser)]
#[command(name = "gym-registry")]
#[command(about = "Add, view, update and delete gym members for this session.")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Path to a TOML config file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Registration date stamped on new members (YYYY-MM-DD)")]
    date: Option<String>,

    #[arg(long, conflicts_with = "date", help = "Stamp today's date on new members")]
    today: bool,

    #[arg(long, help = "Print the member list as JSON")]
    json: bool,

    #[arg(long, help = "Log level when RUST_LOG is unset (error, warn, info, debug, trace)")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), config);

    #[cfg(feature = "tui")]
    {
        console = console.with_browser(Box::new(gym_registry::ui::run_browser));
    }

    console.run()
}

fn load_config(cli: &Cli) -> Result<RegistryConfig> {
    let mut config = RegistryConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("failed to load config from {}", path.display()),
        None => "failed to load default config".to_string(),
    })?;

    if let Some(date) = &cli.date {
        config.registration_date = date.clone();
        config.date_source = DateSource::Fixed;
    }
    if cli.today {
        config.date_source = DateSource::Today;
    }
    if cli.json {
        config.json = true;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    config.validate().context("invalid --date")?;
    Ok(config)
}
