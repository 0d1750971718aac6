// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Channel-Frame: render a wallet's most active Farcaster channel as a PNG.
//!
//! This crate provides the HTTP service that resolves an Ethereum address to
//! a Farcaster account via Neynar, finds the channel that account casts in
//! most often, and composites that channel's artwork onto a frame template.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ChannelActivityResolver, ImageLoader};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub resolver: ChannelActivityResolver,
    pub images: ImageLoader,
}
