// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resolve an address to the channel its Farcaster account casts in most.

use crate::models::{Address, AddressError, ChannelActivity, MostActiveChannelImage};
use crate::services::neynar::{NeynarClient, NeynarError};

/// Two-step lookup (address -> FID -> popular casts) plus the channel tally.
#[derive(Clone)]
pub struct ChannelActivityResolver {
    client: NeynarClient,
}

impl ChannelActivityResolver {
    pub fn new(client: NeynarClient) -> Self {
        Self { client }
    }

    /// Find the most active channel for `address`.
    ///
    /// `Ok(None)` covers every "nothing to show" case: no linked account,
    /// no casts, no cast posted in a channel, or a 404 from Neynar.
    pub async fn resolve(
        &self,
        address: &str,
    ) -> Result<Option<MostActiveChannelImage>, ResolveError> {
        let address = Address::parse(address)?;
        let upstream = |source| ResolveError::from_upstream(&address, source);

        let Some(users) = self
            .client
            .users_by_address(address.as_str())
            .await
            .map_err(upstream)?
        else {
            return Ok(None);
        };

        let Some(fid) = users
            .get(&address.lookup_key())
            .and_then(|identities| identities.first())
            .map(|identity| identity.fid)
        else {
            tracing::debug!(address = %address, "No Farcaster account for address");
            return Ok(None);
        };

        let Some(feed) = self.client.popular_casts(fid).await.map_err(upstream)? else {
            return Ok(None);
        };
        if feed.casts.is_empty() {
            tracing::debug!(fid, "No popular casts");
            return Ok(None);
        }

        let activity = ChannelActivity::from_casts(&feed.casts);
        let Some((channel_id, stats)) = activity.most_active() else {
            tracing::debug!(fid, casts = feed.casts.len(), "No casts in any channel");
            return Ok(None);
        };

        tracing::info!(
            address = %address,
            fid,
            channel = channel_id,
            count = stats.count,
            channels = activity.len(),
            "Resolved most active channel"
        );

        Ok(Some(MostActiveChannelImage::from_stats(
            address.as_str(),
            stats,
        )))
    }
}

/// Resolution failures. "Not found" is not one of them.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{0}")]
    InvalidInput(#[from] AddressError),

    #[error("Neynar API key was rejected")]
    AuthFailure,

    #[error("Access to the Neynar API is forbidden")]
    Forbidden,

    #[error("Neynar rate limit exceeded")]
    RateLimited,

    #[error("Neynar server error (HTTP {status})")]
    UpstreamServer { status: u16 },

    #[error("Neynar unavailable while resolving {address}: {source}")]
    Unavailable {
        address: String,
        #[source]
        source: NeynarError,
    },
}

impl ResolveError {
    fn from_upstream(address: &Address, err: NeynarError) -> Self {
        match err {
            NeynarError::Unauthorized => ResolveError::AuthFailure,
            NeynarError::Forbidden => ResolveError::Forbidden,
            NeynarError::RateLimited => ResolveError::RateLimited,
            NeynarError::Server(status) => ResolveError::UpstreamServer { status },
            source => ResolveError::Unavailable {
                address: address.to_string(),
                source,
            },
        }
    }
}
