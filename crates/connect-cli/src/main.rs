//! Connect More terminal client.

use clap::Parser;
use std::io;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;
mod prompt;
mod render;

use app::App;
use cli::Cli;
use prompt::Prompter;

fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so it stays out of the board display
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    info!(?cli, "Starting Connect More...");

    let pace = Duration::from_millis(cli.pace_ms);
    let prompter = Prompter::new(io::stdin().lock(), io::stdout(), pace);

    let mut app = App::new(cli, prompter);
    app.run()?;

    if let Some(outcome) = app.session().and_then(|s| s.outcome()) {
        info!(?outcome, "Game finished");
    }
    Ok(())
}
