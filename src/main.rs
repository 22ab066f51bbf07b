use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::sync::watch;

use hilo_oracle::api;
use hilo_oracle::config::{Config, LoggingConfig};
use hilo_oracle::error_log::append_startup_error;
use hilo_oracle::feed::{FeedClient, FeedCoordinator};

#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install rustls crypto provider"))?;

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            fail_startup(&LoggingConfig::default().error_log_path, e);
        }
    };

    init_tracing(&config.logging);
    tracing::info!(
        feed_url = %config.feed.url,
        poll_interval_ms = config.feed.poll_interval_ms,
        ema_alpha = config.ensemble.ema_alpha,
        history_window = config.ensemble.history_window,
        "Starting hilo-oracle"
    );

    let coordinator = Arc::new(FeedCoordinator::new(
        config.ensemble,
        config.server.display_history_len,
    ));
    let started = async {
        let client = FeedClient::new(&config.feed.url, config.feed.request_timeout())
            .context("failed to build feed client")?;
        let listener = api::bind(&config.server).await?;
        anyhow::Ok((client, listener))
    };
    let (client, listener) = match started.await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!(error = %e, "Server failed to start");
            fail_startup(&config.logging.error_log_path, e);
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poll_task = tokio::spawn(coordinator.clone().run(
        client,
        config.feed.poll_interval(),
        shutdown_rx.clone(),
    ));
    let server_task = tokio::spawn(api::serve(listener, coordinator, shutdown_rx));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    tracing::info!("Ctrl+C received");
    let _ = shutdown_tx.send(true);

    if let Err(e) = poll_task.await {
        tracing::warn!(error = %e, "Poll task ended abnormally");
    }
    match server_task.await {
        Ok(Err(e)) => tracing::error!(error = %e, "Read API stopped with error"),
        Err(e) => tracing::warn!(error = %e, "Read API task ended abnormally"),
        Ok(Ok(())) => {}
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        logging
            .level
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    });
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn fail_startup(error_log_path: &str, error: anyhow::Error) -> ! {
    if let Err(log_err) = append_startup_error(Path::new(error_log_path), &error) {
        eprintln!("Failed to write {}: {:#}", error_log_path, log_err);
    }
    std::process::exit(1);
}
