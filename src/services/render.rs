// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Frame compositing: template + channel artwork -> PNG.

use image::{imageops, ImageFormat, Pixel, Rgba, RgbaImage};
use std::io::Cursor;
use std::time::Duration;

/// Artwork is fitted inside a square box of this size.
pub const ARTWORK_BOX: f64 = 670.0;
/// Upward nudge from the centred position, to sit in the template's window.
pub const ARTWORK_SHIFT_UP: f64 = 28.5;
/// Rightward nudge from the centred position.
pub const ARTWORK_SHIFT_RIGHT: f64 = 0.1;

const BORDER_WIDTH: f64 = 2.0;
const BORDER_INSET: f64 = 2.0;
/// rgba(255, 255, 255, 0.3)
const BORDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 77]);

/// Where the artwork lands on the canvas, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtworkLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ArtworkLayout {
    /// Scale `width` x `height` to fit [`ARTWORK_BOX`], keeping aspect ratio.
    ///
    /// Width is fitted first; if that leaves the image too tall, height is
    /// fitted instead.
    pub fn fit(width: u32, height: u32) -> (f64, f64) {
        let (w, h) = (f64::from(width.max(1)), f64::from(height.max(1)));

        let mut draw_w = ARTWORK_BOX;
        let mut draw_h = ARTWORK_BOX * h / w;
        if draw_h > ARTWORK_BOX {
            draw_h = ARTWORK_BOX;
            draw_w = ARTWORK_BOX * w / h;
        }
        (draw_w, draw_h)
    }

    /// Fit the artwork, centre it on the canvas, then apply the shift.
    pub fn compute(canvas: (u32, u32), artwork: (u32, u32)) -> Self {
        let (width, height) = Self::fit(artwork.0, artwork.1);
        let x = (f64::from(canvas.0) - width) / 2.0 + ARTWORK_SHIFT_RIGHT;
        let y = (f64::from(canvas.1) - height) / 2.0 - ARTWORK_SHIFT_UP;
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Draw the template, and the artwork with its border when there is one.
pub fn compose(template: &RgbaImage, artwork: Option<&RgbaImage>) -> RgbaImage {
    let mut canvas = template.clone();

    let Some(artwork) = artwork else {
        return canvas;
    };

    let layout = ArtworkLayout::compute(canvas.dimensions(), artwork.dimensions());
    let scaled = imageops::resize(
        artwork,
        (layout.width.round() as u32).max(1),
        (layout.height.round() as u32).max(1),
        imageops::FilterType::CatmullRom,
    );
    imageops::overlay(
        &mut canvas,
        &scaled,
        layout.x.round() as i64,
        layout.y.round() as i64,
    );
    stroke_border(&mut canvas, &layout);

    canvas
}

/// Stroke the artwork rectangle inset by [`BORDER_INSET`], with the line
/// centred on that rectangle's edge.
fn stroke_border(canvas: &mut RgbaImage, layout: &ArtworkLayout) {
    let half = BORDER_WIDTH / 2.0;
    let outer = Rect {
        left: layout.x + BORDER_INSET - half,
        top: layout.y + BORDER_INSET - half,
        right: layout.x + layout.width - BORDER_INSET + half,
        bottom: layout.y + layout.height - BORDER_INSET + half,
    };
    let inner = outer.shrink(BORDER_WIDTH);

    let (cw, ch) = canvas.dimensions();
    let x0 = outer.left.floor().max(0.0) as u32;
    let y0 = outer.top.floor().max(0.0) as u32;
    let x1 = (outer.right.ceil().max(0.0) as u32).min(cw);
    let y1 = (outer.bottom.ceil().max(0.0) as u32).min(ch);

    for py in y0..y1 {
        for px in x0..x1 {
            let (cx, cy) = (f64::from(px) + 0.5, f64::from(py) + 0.5);
            if outer.contains(cx, cy) && !inner.contains(cx, cy) {
                canvas.get_pixel_mut(px, py).blend(&BORDER_COLOR);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Rect {
    fn shrink(self, by: f64) -> Self {
        Self {
            left: self.left + by,
            top: self.top + by,
            right: self.right - by,
            bottom: self.bottom - by,
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Encode the canvas as PNG bytes.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut png = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// Compose and encode on the blocking pool, giving up after `limit`.
///
/// On timeout the blocking task is left to finish on its own; the request
/// does not wait for it.
pub async fn render_png(
    template: RgbaImage,
    artwork: Option<RgbaImage>,
    limit: Duration,
) -> Result<Vec<u8>, RenderError> {
    let task = tokio::task::spawn_blocking(move || {
        let canvas = compose(&template, artwork.as_ref());
        encode_png(&canvas)
    });

    match tokio::time::timeout(limit, task).await {
        Ok(joined) => Ok(joined??),
        Err(_) => Err(RenderError::TimedOut(limit)),
    }
}

/// Errors from [`render_png`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Rendering took longer than {0:?}")]
    TimedOut(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_fit_wide_artwork() {
        assert_eq!(ArtworkLayout::fit(200, 100), (670.0, 335.0));
        assert_eq!(ArtworkLayout::fit(2000, 1000), (670.0, 335.0));
    }

    #[test]
    fn test_fit_tall_and_square_artwork() {
        assert_eq!(ArtworkLayout::fit(100, 200), (335.0, 670.0));
        assert_eq!(ArtworkLayout::fit(48, 48), (670.0, 670.0));
    }

    #[test]
    fn test_layout_applies_shift() {
        let layout = ArtworkLayout::compute((800, 800), (200, 100));

        assert_eq!(layout.width, 670.0);
        assert_eq!(layout.height, 335.0);
        // Centred at (65, 232.5), then right 0.1 and up 28.5.
        assert!((layout.x - 65.1).abs() < 1e-9);
        assert!((layout.y - 204.0).abs() < 1e-9);
    }

    #[test]
    fn test_compose_without_artwork_is_template() {
        let template = RgbaImage::from_pixel(50, 40, BLACK);
        let canvas = compose(&template, None);
        assert_eq!(canvas, template);
    }

    #[test]
    fn test_compose_draws_artwork_and_border() {
        let template = RgbaImage::from_pixel(800, 800, BLACK);
        let artwork = RgbaImage::from_pixel(10, 10, BLUE);

        let canvas = compose(&template, Some(&artwork));
        assert_eq!(canvas.dimensions(), (800, 800));

        // Artwork spans x 65.1..735.1, y 36.5..706.5.
        assert_eq!(canvas.get_pixel(400, 372), &BLUE);
        assert_eq!(canvas.get_pixel(20, 20), &BLACK);
        assert_eq!(canvas.get_pixel(400, 760), &BLACK);

        // Border band sits between inset 1 and inset 3 from the artwork edge.
        let border = canvas.get_pixel(67, 400);
        assert!(border[0] > 0 && border[1] > 0, "border pixel {:?}", border);
        assert!(border[0] < 255);
        assert_eq!(canvas.get_pixel(70, 400), &BLUE);
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&RgbaImage::from_pixel(2, 2, BLUE)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn test_render_png_off_the_runtime() {
        let template = RgbaImage::from_pixel(800, 800, BLACK);
        let artwork = RgbaImage::from_pixel(10, 10, BLUE);

        let png = render_png(template, Some(artwork), Duration::from_secs(10))
            .await
            .unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(400, 372), &BLUE);
    }

    #[tokio::test]
    async fn test_render_png_times_out() {
        let template = RgbaImage::from_pixel(4000, 4000, BLACK);
        let artwork = RgbaImage::from_pixel(4000, 4000, BLUE);

        let err = render_png(template, Some(artwork), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::TimedOut(_)));
    }
}
