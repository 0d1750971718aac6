// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Neynar identity and feed payloads.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// `GET /user/bulk-by-address`: lower-cased address -> matching accounts.
pub type BulkUsersByAddress = HashMap<String, Vec<UserIdentity>>;

/// A Farcaster account linked to an address.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdentity {
    /// Farcaster id
    pub fid: u64,
}

/// `GET /feed/user/popular` response (a single page).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopularFeed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub casts: Vec<Cast>,
}

/// A single cast; only the channel matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cast {
    #[serde(default)]
    pub channel: Option<Channel>,
}

/// Channel a cast was posted in.
///
/// Neynar has shipped the image field as both `image_url` and `imageUrl`
/// depending on the response shape, so both are accepted. Any field may be
/// `null`; a channel without an id is not counted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Channel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default, rename = "imageUrl")]
    image_url_camel: Option<String>,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: Some(image_url.into()),
            image_url_camel: None,
        }
    }

    /// Channel image: `image_url`, then `imageUrl`, else empty.
    pub fn image_url(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or(self.image_url_camel.as_deref())
            .unwrap_or("")
    }
}
