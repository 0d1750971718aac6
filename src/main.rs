// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Channel-Frame API Server
//!
//! Renders the Farcaster channel a wallet casts in most as a frame image,
//! using Neynar to resolve address -> FID -> popular casts.

use channel_frame::{
    config::Config,
    services::{ChannelActivityResolver, ImageLoader, NeynarClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        api = %config.neynar_api_url,
        template = %config.template_path.display(),
        "Starting Channel-Frame API"
    );

    let neynar = NeynarClient::new(
        config.neynar_api_url.clone(),
        config.neynar_api_key.clone(),
        config.api_timeout,
    )
    .expect("Failed to build Neynar client");
    let images = ImageLoader::new(config.image_timeout).expect("Failed to build image client");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        resolver: ChannelActivityResolver::new(neynar),
        images,
    });

    // Build router
    let app = channel_frame::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
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
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("channel_frame=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
