// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Template and artwork image loading.
//!
//! A remote load is bounded end to end: one timeout covers the fetch, the
//! body read and the decode, and a stalled or hostile image host fails like
//! any other broken image. Bodies are capped at [`MAX_IMAGE_BYTES`], raster
//! images at [`MAX_IMAGE_DIMENSION`] per side, and SVGs are rasterized
//! straight at the artwork box size whatever size they declare. Decoding runs
//! on the blocking pool.

use crate::services::render::ARTWORK_BOX;
use image::{ImageReader, Limits, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

/// Largest image body accepted from a remote host.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Largest raster width or height accepted.
pub const MAX_IMAGE_DIMENSION: u32 = 4096;

/// Loads the frame template from disk and artwork over HTTP.
#[derive(Clone)]
pub struct ImageLoader {
    http: reqwest::Client,
    timeout: Duration,
}

impl ImageLoader {
    pub fn new(timeout: Duration) -> Result<Self, ImageError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, timeout })
    }

    /// Read and decode the local template image.
    pub async fn load_template<P: AsRef<Path>>(&self, path: P) -> Result<RgbaImage, ImageError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        decode_blocking(bytes, None).await
    }

    /// Fetch and decode an image URL (raster or SVG) within the load timeout.
    pub async fn load_remote(&self, url: &str) -> Result<RgbaImage, ImageError> {
        match tokio::time::timeout(self.timeout, self.fetch_and_decode(url)).await {
            Ok(result) => result,
            Err(_) => Err(ImageError::TimedOut(self.timeout)),
        }
    }

    async fn fetch_and_decode(&self, url: &str) -> Result<RgbaImage, ImageError> {
        let mut response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if response
            .content_length()
            .is_some_and(|len| len > MAX_IMAGE_BYTES as u64)
        {
            return Err(ImageError::TooLarge(MAX_IMAGE_BYTES));
        }

        // Content-Length can be absent or wrong, so count as we read.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(ImageError::TooLarge(MAX_IMAGE_BYTES));
            }
            body.extend_from_slice(&chunk);
        }

        decode_blocking(body, content_type).await
    }
}

async fn decode_blocking(
    bytes: Vec<u8>,
    content_type: Option<String>,
) -> Result<RgbaImage, ImageError> {
    tokio::task::spawn_blocking(move || decode(&bytes, content_type.as_deref())).await?
}

/// Decode image bytes. SVG is rasterized to fit the artwork box; raster
/// formats are refused beyond [`MAX_IMAGE_DIMENSION`].
pub fn decode(bytes: &[u8], content_type: Option<&str>) -> Result<RgbaImage, ImageError> {
    if is_svg(bytes, content_type) {
        return rasterize_svg(bytes);
    }

    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_IMAGE_DIMENSION);
    limits.max_image_height = Some(MAX_IMAGE_DIMENSION);

    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    reader.limits(limits);
    Ok(reader.decode()?.to_rgba8())
}

fn is_svg(bytes: &[u8], content_type: Option<&str>) -> bool {
    if content_type.is_some_and(|ct| ct.contains("image/svg")) {
        return true;
    }
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

fn rasterize_svg(bytes: &[u8]) -> Result<RgbaImage, ImageError> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| ImageError::Svg(e.to_string()))?;

    // Render at the size the artwork is drawn at, never the declared size.
    let size = tree.size();
    let scale = ARTWORK_BOX as f32 / size.width().max(size.height());
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ImageError::Svg("SVG has an empty canvas".to_string()))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha; `image` expects straight alpha.
    let mut img = RgbaImage::new(width, height);
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(img)
}

/// Errors from image loading.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host returned HTTP {0}")]
    Status(u16),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to render SVG: {0}")]
    Svg(String),

    #[error("Image body exceeds {0} bytes")]
    TooLarge(usize),

    #[error("Image load took longer than {0:?}")]
    TimedOut(Duration),

    #[error("Image decode task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}
