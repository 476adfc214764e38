//! Exam timetable lookup server.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use examtime_server::config::{Backend, Cli};
use examtime_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examtime_core=info".parse()?)
                .add_directive("examtime_server=info".parse()?),
        )
        .init();

    info!("starting examtime v{}", env!("CARGO_PKG_VERSION"));

    let extractor = cli
        .build_extractor()
        .context("failed to set up timetable extractor")?;
    match cli.backend {
        Backend::Browser => info!(
            serverless = cli.is_serverless(),
            chrome = ?cli.chrome_path,
            "using headless browser backend"
        ),
        Backend::Http => info!("using plain HTTP backend"),
    }
    info!(source = extractor.source_url(), "timetable source");

    let listener = TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!("listening on http://{}", listener.local_addr()?);

    serve(listener, AppState::new(extractor), async {
        let _ = tokio::signal::ctrl_c().await;
        info!("received shutdown signal");
    })
    .await
    .context("server error")?;

    Ok(())
}
