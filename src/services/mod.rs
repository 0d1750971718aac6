// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod artwork;
pub mod channel;
pub mod neynar;
pub mod render;

pub use artwork::{ImageError, ImageLoader};
pub use channel::{ChannelActivityResolver, ResolveError};
pub use neynar::{NeynarClient, NeynarError};
