//! wardrobot-server/src/server.rs
//!
//! Builds the ServerContext, spawns the laundry sweep, and serves the HTTP
//! API until ctrl-c.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum_server::{Handle, Server};
use tracing::{error, info};

use wardrobot_core::tasks::laundry_sweep::spawn_laundry_sweep_task;
use wardrobot_core::Error;

use crate::context::ServerContext;
use crate::routes;
use crate::Args;

pub async fn run_server(args: Args) -> Result<(), Error> {
    let ctx = Arc::new(ServerContext::new(&args).await?);

    // The sweep runs for the life of the process, independent of requests.
    let _sweep_task = spawn_laundry_sweep_task(
        ctx.item_repo.clone(),
        ctx.user_repo.clone(),
        Duration::from_secs(args.sweep_interval_secs),
    );

    let app = routes::router(ctx.clone());
    let addr: SocketAddr = args.server_addr.parse()?;
    info!("Starting HTTP server on {}", addr);

    let handle = Handle::new();
    let handle_clone = handle.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {:?}", e);
        }
        info!("Ctrl-C detected; shutting down HTTP server...");
        handle_clone.graceful_shutdown(None);
    });

    let server = Server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service());

    if let Err(e) = server.await {
        error!("HTTP server error: {:?}", e);
    }
    info!("HTTP server shut down.");

    Ok(())
}
