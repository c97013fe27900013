use tokio::signal::unix::{SignalKind, signal};

use skiff::config::Config;
use skiff::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::from_args()?;

    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }

        _ = terminate.recv() => {
            tracing::info!("Shutdown signal received");
        }

        _ = hangup.recv() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
