// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background image loading.
//!
//! Images come from remote template URLs, user-supplied files, or `data:`
//! URLs. Uploads are validated by their declared MIME type only; the bytes
//! are not sniffed. Loading is async and yields a decoded
//! [`BackgroundImage`] or a [`LoadError`].

use crate::models::scene::BackgroundImage;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Please select an image file")]
    NotAnImage { mime: String },
    #[error("malformed data URL")]
    BadDataUrl,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where an uploaded file's bytes live.
#[derive(Debug, Clone)]
pub enum UploadData {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// Something a background image can be loaded from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Remote { label: String, url: String },
    Upload { name: String, data: UploadData },
    DataUrl(String),
}

impl ImageSource {
    /// Accept a user file if its declared MIME type is an image type.
    ///
    /// `reported_mime` is whatever the windowing layer reported (often
    /// empty on desktop); when empty the type is derived from the file
    /// name's extension.
    pub fn upload(
        name: impl Into<String>,
        reported_mime: &str,
        data: UploadData,
    ) -> Result<Self, LoadError> {
        let name = name.into();
        let mime = declared_mime(&name, reported_mime);
        validate_mime(&mime)?;
        Ok(ImageSource::Upload { name, data })
    }

    /// Accept a file picked from disk.
    pub fn upload_path(path: PathBuf) -> Result<Self, LoadError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::upload(name, "", UploadData::Path(path))
    }

    /// Interpret pasted text as an image link: a `data:` URL or an
    /// http(s) URL. Anything else is not a link. A `data:` URL must
    /// declare an image type.
    pub fn from_link(text: &str) -> Result<Option<Self>, LoadError> {
        let text = text.trim();
        if text.starts_with("data:") {
            validate_mime(&data_url_mime(text)?)?;
            return Ok(Some(ImageSource::DataUrl(text.to_string())));
        }
        let Ok(url) = reqwest::Url::parse(text) else {
            return Ok(None);
        };
        Ok(matches!(url.scheme(), "http" | "https").then(|| ImageSource::Remote {
            label: url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|name| !name.is_empty())
                .unwrap_or("Image link")
                .to_string(),
            url: url.to_string(),
        }))
    }

    pub fn label(&self) -> &str {
        match self {
            ImageSource::Remote { label, .. } => label,
            ImageSource::Upload { name, .. } => name,
            ImageSource::DataUrl(_) => "data URL",
        }
    }
}

/// MIME type declared for a file: the reported one if present, else one
/// derived from the extension (empty when the extension is unknown).
pub fn declared_mime(name: &str, reported_mime: &str) -> String {
    if !reported_mime.trim().is_empty() {
        return reported_mime.trim().to_ascii_lowercase();
    }
    ImageFormat::from_path(Path::new(name))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_default()
}

pub fn validate_mime(mime: &str) -> Result<(), LoadError> {
    if mime.starts_with("image/") {
        Ok(())
    } else {
        Err(LoadError::NotAnImage {
            mime: mime.to_string(),
        })
    }
}

fn split_data_url(url: &str) -> Result<(&str, &str), LoadError> {
    let rest = url.strip_prefix("data:").ok_or(LoadError::BadDataUrl)?;
    rest.split_once(',').ok_or(LoadError::BadDataUrl)
}

/// MIME type declared in a `data:` URL header, without decoding the payload.
pub fn data_url_mime(url: &str) -> Result<String, LoadError> {
    let (meta, _) = split_data_url(url)?;
    Ok(meta.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
}

/// Split a `data:` URL into its MIME type and decoded payload.
pub fn parse_data_url(url: &str) -> Result<(String, Vec<u8>), LoadError> {
    let (meta, payload) = split_data_url(url)?;
    let mut params = meta.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        BASE64.decode(payload.trim())?
    } else {
        payload.as_bytes().to_vec()
    };
    Ok((mime, bytes))
}

/// Decode encoded image bytes into a background image.
pub fn decode_image(label: &str, bytes: &[u8]) -> Result<BackgroundImage, LoadError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(BackgroundImage::new(label, decoded.to_rgba8()))
}

/// GET `url` and return the body, treating non-2xx as an error.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, LoadError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status));
    }
    Ok(response.bytes().await?.to_vec())
}

/// Load and decode an image from any source.
pub async fn load(client: &reqwest::Client, source: ImageSource) -> Result<BackgroundImage, LoadError> {
    match source {
        ImageSource::Remote { label, url } => {
            let bytes = fetch_bytes(client, &url).await?;
            decode_image(&label, &bytes)
        }
        ImageSource::Upload { name, data } => match data {
            UploadData::Path(path) => {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|source| LoadError::Read { path, source })?;
                decode_image(&name, &bytes)
            }
            UploadData::Bytes(bytes) => decode_image(&name, &bytes),
        },
        ImageSource::DataUrl(url) => {
            let (mime, bytes) = parse_data_url(&url)?;
            validate_mime(&mime)?;
            decode_image("data URL", &bytes)
        }
    }
}
