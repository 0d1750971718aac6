// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Neynar API client for Farcaster identity and feed lookups.
//!
//! Handles:
//! - Address -> FID resolution (`/user/bulk-by-address`)
//! - Popular casts for an FID (`/feed/user/popular`)
//! - Status classification (404 is "no data", not an error)

use crate::models::{BulkUsersByAddress, PopularFeed};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Neynar API client.
#[derive(Clone)]
pub struct NeynarClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NeynarClient {
    /// Create a client; `timeout` bounds every request end to end.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NeynarError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Look up Farcaster accounts linked to an address.
    ///
    /// The address is sent as given; Neynar keys the response by its
    /// lower-cased form. `None` means Neynar answered 404.
    pub async fn users_by_address(
        &self,
        address: &str,
    ) -> Result<Option<BulkUsersByAddress>, NeynarError> {
        let url = format!("{}/user/bulk-by-address", self.base_url);
        self.get_json(&url, &[("addresses", address.to_string())])
            .await
    }

    /// Fetch a user's popular casts.
    pub async fn popular_casts(&self, fid: u64) -> Result<Option<PopularFeed>, NeynarError> {
        let url = format!("{}/feed/user/popular", self.base_url);
        self.get_json(&url, &[("fid", fid.to_string())]).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, NeynarError> {
        let response = self
            .http
            .get(url)
            .header("api_key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(url, "Neynar returned 404");
            return Ok(None);
        }

        let response = Self::check_response(response).await?;
        Ok(Some(response.json().await?))
    }

    /// Check response status and return a typed error if not successful.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, NeynarError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, body = %body, "Neynar request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => NeynarError::Unauthorized,
            StatusCode::FORBIDDEN => NeynarError::Forbidden,
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("Neynar rate limit hit (429)");
                NeynarError::RateLimited
            }
            s if s.is_server_error() => NeynarError::Server(s.as_u16()),
            s => NeynarError::UnexpectedStatus(s.as_u16()),
        })
    }
}

/// Errors from Neynar requests, keyed by what the upstream status meant.
#[derive(Debug, thiserror::Error)]
pub enum NeynarError {
    #[error("Neynar rejected the API key (HTTP 401)")]
    Unauthorized,

    #[error("Neynar denied access (HTTP 403)")]
    Forbidden,

    #[error("Neynar rate limit exceeded (HTTP 429)")]
    RateLimited,

    #[error("Neynar server error (HTTP {0})")]
    Server(u16),

    #[error("Neynar returned unexpected HTTP {0}")]
    UnexpectedStatus(u16),

    #[error("Neynar request failed: {0}")]
    Request(#[from] reqwest::Error),
}
