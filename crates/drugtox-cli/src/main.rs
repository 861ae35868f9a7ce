#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use drugtox_server::handler::routes;
use drugtox_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use drugtox_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig, create_completion_service, create_predictor_service};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "drugtox_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "drugtox_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "drugtox_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "Application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "Application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "Starting drugtox server"
    );

    cli.log();
    cli.validate()?;

    let predictor = create_predictor_service(&cli)
        .await
        .context("toxicity predictor is required to serve predictions")?;
    let completion = create_completion_service(&cli);

    let state = ServiceState::bootstrap(cli.service.clone(), Ok(predictor), completion);
    let health = state.health();
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        predictor_ready = health.predictor_ready,
        ai_ready = health.ai_ready,
        "Service state ready"
    );

    let router = create_router(state, &cli.middleware);
    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Layers wrap in reverse order, so recovery is outermost and sees every
/// panic and timeout, then request IDs and tracing, then CORS, body limits
/// and compression around the routes.
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes(state)
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
