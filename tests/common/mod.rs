// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use channel_frame::config::Config;
use channel_frame::routes::create_router;
use channel_frame::services::{ChannelActivityResolver, ImageLoader, NeynarClient};
use channel_frame::AppState;
use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Respond, ResponseTemplate};

/// Checksummed address; Neynar keys its response by the lower-cased form.
pub const ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
pub const ADDRESS_KEY: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
pub const FID: u64 = 5650;
pub const API_KEY: &str = "test_api_key";

#[allow(dead_code)]
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
#[allow(dead_code)]
pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
#[allow(dead_code)]
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// A pixel inside the artwork area for square artwork on the 800x800
/// fixture template, clear of the border.
#[allow(dead_code)]
pub const ARTWORK_SAMPLE: (u32, u32) = (400, 372);

/// Config pointing every upstream at the mock server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        neynar_api_key: API_KEY.to_string(),
        neynar_api_url: server.uri(),
        template_path: "tests/fixtures/template.png".into(),
        placeholder_image_url: format!("{}/placeholder.png", server.uri()),
        api_timeout: Duration::from_millis(500),
        image_timeout: Duration::from_millis(500),
        ..Config::default()
    }
}

#[allow(dead_code)]
pub fn test_resolver(config: &Config) -> ChannelActivityResolver {
    let client = NeynarClient::new(
        config.neynar_api_url.clone(),
        config.neynar_api_key.clone(),
        config.api_timeout,
    )
    .expect("Failed to build Neynar client");
    ChannelActivityResolver::new(client)
}

/// Create a test app wired to the given config.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> (axum::Router, Arc<AppState>) {
    let resolver = test_resolver(&config);
    let images = ImageLoader::new(config.image_timeout).expect("Failed to build image client");

    let state = Arc::new(AppState {
        config,
        resolver,
        images,
    });

    (create_router(state.clone()), state)
}

/// Load a JSON fixture from `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> Value {
    let raw = std::fs::read_to_string(format!("tests/fixtures/{}", name))
        .expect("Failed to read fixture");
    serde_json::from_str(&raw).expect("Failed to parse fixture")
}

/// Solid-colour PNG.
#[allow(dead_code)]
pub fn png_bytes(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let mut png = Vec::new();
    RgbaImage::from_pixel(width, height, color)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .expect("Failed to encode PNG");
    png
}

/// Feed whose casts post in the given channel ids, in order. Each channel's
/// image is served from `{image_base}/{id}.png`.
#[allow(dead_code)]
pub fn feed_for_channels(image_base: &str, ids: &[&str]) -> Value {
    let casts: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            json!({
                "hash": format!("0x{:04x}", i),
                "channel": {
                    "id": id,
                    "name": id.to_uppercase(),
                    "image_url": format!("{}/{}.png", image_base, id),
                }
            })
        })
        .collect();
    json!({ "casts": casts, "next": { "cursor": null } })
}

/// Body for a bulk-by-address hit on [`ADDRESS`].
#[allow(dead_code)]
pub fn users_for_address() -> Value {
    json!({ ADDRESS_KEY: [{ "fid": FID, "username": "vitalik.eth" }] })
}

#[allow(dead_code)]
pub async fn mount_users(server: &MockServer, response: impl Respond + 'static) {
    Mock::given(method("GET"))
        .and(path("/user/bulk-by-address"))
        .and(query_param("addresses", ADDRESS))
        .and(header("api_key", API_KEY))
        .respond_with(response)
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_feed(server: &MockServer, response: impl Respond + 'static) {
    Mock::given(method("GET"))
        .and(path("/feed/user/popular"))
        .and(query_param("fid", FID.to_string()))
        .and(header("api_key", API_KEY))
        .respond_with(response)
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_image(server: &MockServer, image_path: &str, response: impl Respond + 'static) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(response)
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn json_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[allow(dead_code)]
pub fn png_response(color: Rgba<u8>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "image/png")
        .set_body_bytes(png_bytes(10, 10, color))
}

#[allow(dead_code)]
pub fn status(code: u16) -> ResponseTemplate {
    ResponseTemplate::new(code)
}
