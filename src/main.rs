use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seating_plan::{
    config::{Config, LogFormat},
    controllers::{self, Cli},
    AppState,
};

fn init_tracing(config: &Config) {
    let json = config.app.log_format == LogFormat::Json;
    // Logs go to stderr so exports on stdout stay clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);

    let cli = Cli::parse();
    debug!(environment = %config.app.environment, "seatmap starting");

    let state = AppState::new(config);
    debug!(dir = %state.projects.dir().display(), "using project store");

    let output = controllers::run(&state, cli.command).context("Command failed")?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
