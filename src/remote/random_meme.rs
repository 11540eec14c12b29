// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Random meme fetching from meme-api.com.
//!
//! The endpoint answers `{ "url": ..., "title": ... }`. Anything short of a
//! downloadable, decodable image becomes a [`MemePlaceholder`] explaining
//! what went wrong.

use super::{success_body, FetchError};
use crate::io::media::{decode_image, fetch_bytes};
use image::ImageFormat;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_ENDPOINT: &str = "https://meme-api.com/gimme";
const DEFAULT_TITLE: &str = "Random Meme";

#[derive(Debug, Deserialize)]
struct GimmeResponse {
    url: Option<String>,
    title: Option<String>,
}

/// What the endpoint pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GimmeOutcome {
    Found { url: String, title: String },
    Missing,
}

/// Parse a response body. A body without `url` is `Missing`, a body that
/// is not JSON at all is an error.
pub fn interpret_gimme(body: &str) -> Result<GimmeOutcome, FetchError> {
    let response: GimmeResponse = serde_json::from_str(body)?;
    Ok(match response.url.filter(|url| !url.is_empty()) {
        Some(url) => GimmeOutcome::Found {
            url,
            title: response
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        },
        None => GimmeOutcome::Missing,
    })
}

/// Why no meme is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemePlaceholder {
    NoMeme,
    ImageFailed,
    NetworkError,
}

impl MemePlaceholder {
    /// Text drawn inside the placeholder box.
    pub fn caption(self) -> &'static str {
        match self {
            MemePlaceholder::NoMeme => "No meme found",
            MemePlaceholder::ImageFailed => "Failed to load meme",
            MemePlaceholder::NetworkError => "Network error",
        }
    }

    /// Transient message for the user.
    pub fn notice(self) -> &'static str {
        match self {
            MemePlaceholder::NoMeme => "API returned no meme. Please try again.",
            MemePlaceholder::ImageFailed => "Failed to load the meme. Please try again.",
            MemePlaceholder::NetworkError => "Network error. Could not fetch a random meme.",
        }
    }
}

/// A downloaded random meme.
#[derive(Debug, Clone)]
pub struct LoadedMeme {
    pub title: String,
    pub url: String,
    /// Original encoded bytes, kept for download.
    pub bytes: Arc<[u8]>,
    pub image: image::RgbaImage,
}

impl LoadedMeme {
    /// `random-meme-<millis>.<ext>`, keeping the extension of the image URL
    /// so the saved bytes match their name. Falls back to `png`.
    pub fn file_name(&self, millis: u128) -> String {
        let extension = reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|url| {
                Path::new(url.path())
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(str::to_ascii_lowercase)
            })
            .filter(|ext| ImageFormat::from_extension(ext).is_some())
            .unwrap_or_else(|| "png".to_string());
        format!("random-meme-{}.{}", millis, extension)
    }
}

#[derive(Debug, Clone)]
pub enum RandomMeme {
    Loaded(LoadedMeme),
    Placeholder(MemePlaceholder),
}

async fn fetch_gimme(client: &reqwest::Client, endpoint: &str) -> Result<GimmeOutcome, FetchError> {
    let response = client.get(endpoint).send().await?;
    let body = success_body(response).await?;
    interpret_gimme(&body)
}

/// Fetch a random meme and its image. Never fails; problems turn into a
/// placeholder.
pub async fn fetch_random_meme(client: &reqwest::Client, endpoint: &str) -> RandomMeme {
    let (url, title) = match fetch_gimme(client, endpoint).await {
        Ok(GimmeOutcome::Found { url, title }) => (url, title),
        Ok(GimmeOutcome::Missing) => {
            log::warn!("Random meme API returned no meme");
            return RandomMeme::Placeholder(MemePlaceholder::NoMeme);
        }
        Err(e) => {
            log::error!("Error fetching random meme: {}", e);
            return RandomMeme::Placeholder(MemePlaceholder::NetworkError);
        }
    };

    let image = match fetch_bytes(client, &url).await {
        Ok(bytes) => decode_image(&title, &bytes).map(|decoded| (bytes, decoded)),
        Err(e) => Err(e),
    };
    match image {
        Ok((bytes, decoded)) => {
            log::info!("Loaded random meme '{}' from {}", title, url);
            RandomMeme::Loaded(LoadedMeme {
                title,
                url,
                bytes: Arc::from(bytes),
                image: decoded.pixels().clone(),
            })
        }
        Err(e) => {
            log::error!("Failed to load meme image {}: {}", url, e);
            RandomMeme::Placeholder(MemePlaceholder::ImageFailed)
        }
    }
}
