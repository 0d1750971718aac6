// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Frame image route: `GET /?address=0x...` -> PNG.

use crate::error::{AppError, Result};
use crate::models::MostActiveChannelImage;
use crate::services::render;
use crate::AppState;
use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use image::RgbaImage;
use std::sync::Arc;

/// Frame routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(render_frame))
}

/// Raw query pairs, so repeated or odd parameters reach our own error
/// handling instead of axum's plain-text rejection.
type QueryPairs = Query<Vec<(String, String)>>;

/// Pull the single `address` parameter out of the query string.
fn address_param(query: std::result::Result<QueryPairs, QueryRejection>) -> Result<String> {
    let Query(pairs) = query.map_err(|e| AppError::InvalidAddress(e.body_text()))?;

    let mut values = pairs
        .into_iter()
        .filter(|(key, _)| key == "address")
        .map(|(_, value)| value);

    match (values.next(), values.next()) {
        (None, _) => Err(AppError::MissingAddress),
        (Some(_), Some(_)) => Err(AppError::InvalidAddress(
            "address must be given exactly once".to_string(),
        )),
        (Some(address), None) if address.is_empty() => Err(AppError::MissingAddress),
        (Some(address), None) => Ok(address),
    }
}

/// Render the most active channel for `address` onto the frame template.
async fn render_frame(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<QueryPairs, QueryRejection>,
) -> Result<Response> {
    let address = address_param(query)?;

    let template = state
        .images
        .load_template(&state.config.template_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load template {}",
                state.config.template_path.display()
            )
        })?;

    let channel = state.resolver.resolve(&address).await?;
    if channel.is_none() {
        tracing::info!(address = %address, "No channel found, using placeholder");
    }

    let artwork = load_artwork(&state, channel.as_ref()).await;
    let png = render::render_png(template, artwork, state.config.render_timeout)
        .await
        .context("Failed to render frame")?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=300"),
        ],
        png,
    )
        .into_response())
}

/// Channel image, else the placeholder, else nothing (template only).
async fn load_artwork(
    state: &AppState,
    channel: Option<&MostActiveChannelImage>,
) -> Option<RgbaImage> {
    if let Some(url) = channel
        .map(|c| c.channel_image_url.as_str())
        .filter(|url| !url.is_empty())
    {
        match state.images.load_remote(url).await {
            Ok(img) => return Some(img),
            Err(e) => {
                tracing::warn!(error = %e, url, "Channel image failed to load, using placeholder");
            }
        }
    }

    let placeholder = &state.config.placeholder_image_url;
    match state.images.load_remote(placeholder).await {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!(
                error = %e,
                url = %placeholder,
                "Placeholder failed to load, rendering template only"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> std::result::Result<QueryPairs, QueryRejection> {
        Ok(Query(
            raw.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_address_param() {
        assert_eq!(
            address_param(pairs(&[("foo", "1"), ("address", "0xabc")])).unwrap(),
            "0xabc"
        );
        assert!(matches!(
            address_param(pairs(&[])),
            Err(AppError::MissingAddress)
        ));
        assert!(matches!(
            address_param(pairs(&[("address", "")])),
            Err(AppError::MissingAddress)
        ));
        assert!(matches!(
            address_param(pairs(&[("address", "0xabc"), ("address", "0xdef")])),
            Err(AppError::InvalidAddress(_))
        ));
    }
}
