mod analytics;
mod categorize;
mod config;
mod export;
mod models;
mod run;
mod session;
mod ui;
mod voice;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;

    match args.len() {
        1 => run::as_tui(config),
        2.. => run::as_cli(&args, &config),
        _ => {
            eprintln!("Usage: walletui [command]");
            Ok(())
        }
    }
}

/// RUST_LOG wins; otherwise only warnings, on stderr so the TUI and CLI
/// output stay clean.
fn init_logging() {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
