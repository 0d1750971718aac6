// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::channel::ResolveError;
use crate::time_utils::reset_at;
use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Seconds a rate-limited client is told to wait.
pub const RATE_LIMIT_RETRY_SECS: u64 = 60;

/// Seconds a client is told to wait when the lookup service is unavailable.
pub const UNAVAILABLE_RETRY_SECS: u64 = 30;

const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Valid Ethereum address is required")]
    MissingAddress,

    #[error("Invalid Ethereum address provided: {0}")]
    InvalidAddress(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Channel lookup unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidInput(e) => AppError::InvalidAddress(e.to_string()),
            ResolveError::RateLimited => AppError::RateLimited,
            other => AppError::Unavailable(other.to_string()),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: Option<String>) -> Self {
        Self {
            error: error.to_string(),
            retry_after: None,
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingAddress => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Valid Ethereum address is required", None)),
            )
                .into_response(),
            AppError::InvalidAddress(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "Invalid Ethereum address provided",
                    Some(msg),
                )),
            )
                .into_response(),
            AppError::RateLimited => {
                tracing::warn!("Neynar rate limit reached, asking client to back off");
                let reset = reset_at(chrono::Utc::now(), RATE_LIMIT_RETRY_SECS as i64);
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(ErrorResponse {
                        error: "Rate limit exceeded".to_string(),
                        retry_after: Some(RATE_LIMIT_RETRY_SECS),
                        message: Some(format!(
                            "Too many requests to the Farcaster API. Please try again in {} seconds.",
                            RATE_LIMIT_RETRY_SECS
                        )),
                    }),
                )
                    .into_response();
                let headers = response.headers_mut();
                headers.insert(header::RETRY_AFTER, HeaderValue::from(RATE_LIMIT_RETRY_SECS));
                if let Ok(value) = HeaderValue::from_str(&reset) {
                    headers.insert(X_RATELIMIT_RESET, value);
                }
                response
            }
            AppError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Channel lookup failed");
                let mut response = (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse::new(
                        "Service temporarily unavailable",
                        Some(msg),
                    )),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(UNAVAILABLE_RETRY_SECS));
                response
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(
                        "Internal server error",
                        Some(format!("{:#}", err)),
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
