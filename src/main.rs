// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty-Tracker API Server
//!
//! Serves the workout session to the browser map front end.

use anyhow::Context;
use mapty_tracker::{config::Config, routes::create_router, startup::open_session, AppState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("loading configuration")?;
    tracing::info!(port = config.port, "Starting Mapty-Tracker API");

    let session = open_session(&config)?;

    let state = Arc::new(AppState {
        config: config.clone(),
        session: Mutex::new(session),
    });

    let app = create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mapty_tracker=debug,info")),
        )
        .with(format)
        .init();
}
