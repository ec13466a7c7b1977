mod api;
mod app;
mod cli;
mod config;
mod documents;
mod routes;
mod state;
mod storage;
mod task;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr so CLI output on stdout stays parseable
fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Any argument selects the CLI; a bare launch opens the window
    if std::env::args_os().len() > 1 {
        let cli = cli::Cli::parse();
        init_tracing("seguchamba=warn");

        if let Err(e) = cli::run(cli).await {
            cli::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Ok(());
    }

    init_tracing("seguchamba=debug,info");
    tracing::info!("Starting SeguChamba");

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1024.0, 720.0])
        .with_min_inner_size([720.0, 480.0])
        .with_title("SeguChamba");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "SeguChamba",
        native_options,
        Box::new(|cc| Ok(Box::new(app::SeguChambaApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
