// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod address;
pub mod cast;
pub mod channel;

pub use address::{Address, AddressError};
pub use cast::{BulkUsersByAddress, Cast, Channel, PopularFeed, UserIdentity};
pub use channel::{ChannelActivity, ChannelStats, MostActiveChannelImage};
