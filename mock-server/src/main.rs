use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use github_mock::{build_router, run_until, Fixtures, MockError};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "github-mock", version, about = "Serve canned GitHub API responses")]
struct Cli {
    /// JSON fixture file describing the mocked endpoints
    #[arg(long, env = "GITHUB_MOCK_FIXTURES")]
    fixtures: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    bind_address: IpAddr,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("github-mock failed: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), MockError> {
    let cli = Cli::parse();
    setup_logging();

    let options = match &cli.fixtures {
        Some(path) => Fixtures::from_path(path)?.into_options()?,
        None => Vec::new(),
    };
    let router = build_router(options)?;
    for endpoint in router.endpoints() {
        info!(%endpoint, "mocking");
    }

    let addr = SocketAddr::new(cli.bind_address, cli.port);
    let listener = TcpListener::bind(addr).await.map_err(MockError::Bind)?;
    info!(%addr, endpoints = router.len(), "listening");

    run_until(listener, router, shutdown_signal())
        .await
        .map_err(MockError::Serve)
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("GITHUB_MOCK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}
