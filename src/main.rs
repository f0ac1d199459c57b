/*!
 * Task Manager - Main Entry Point
 *
 * Serves the process table over HTTP:
 * - POST   /processes?addMethod=&id=&priority=
 * - GET    /processes?sortBy=&descending=
 * - DELETE /processes[?id= | ?priority=]
 * - GET    /processes/stats
 */

use anyhow::Context;
use tracing::info;

use task_manager::{init_tracing, start_http_server, Config, ProcessStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Task manager starting...");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        max_capacity = config.max_capacity,
        lock_timeout_ms = config.lock_timeout.as_millis() as u64,
        addr = %config.listen_addr,
        "Configuration loaded"
    );

    let store = ProcessStore::from_config(&config).context("Failed to create process store")?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    start_http_server(config.listen_addr, store, shutdown)
        .await
        .context("HTTP server failed")?;

    info!("Task manager stopped");
    Ok(())
}
