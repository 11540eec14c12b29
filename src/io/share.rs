// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sharing exported memes.
//!
//! A share link is handed to the best capability available: a native share
//! sheet, then the clipboard, then simply showing the link. Each missing or
//! failing tier falls through to the next one.

use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use std::path::Path;
use thiserror::Error;

pub const SHARE_TITLE: &str = "Check out my meme!";
pub const SHARE_TEXT: &str = "I created this awesome meme!";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("{0}")]
    Failed(String),
}

/// What gets handed to a native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: url.into(),
        }
    }
}

/// Platform share sheet.
pub trait NativeShare {
    fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// Somewhere text can be copied to.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError>;
}

/// The OS clipboard.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShareError::Failed(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ShareError::Failed(e.to_string()))
    }
}

/// How a share request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share sheet took it.
    Shared,
    /// Link copied to the clipboard (and shown).
    Copied(String),
    /// Link only shown to the user.
    Displayed(String),
}

impl ShareOutcome {
    /// The link to show in the UI, if any.
    pub fn visible_url(&self) -> Option<&str> {
        match self {
            ShareOutcome::Shared => None,
            ShareOutcome::Copied(url) | ShareOutcome::Displayed(url) => Some(url),
        }
    }
}

/// Build `<base>?meme=<file URL>` for an exported file.
pub fn share_url(base: &str, file: &Path) -> Result<String> {
    let mut url = Url::parse(base).with_context(|| format!("invalid share base URL `{}`", base))?;
    let file_url = Url::from_file_path(file)
        .map_err(|_| anyhow!("cannot build a file URL for {}", file.display()))?;
    url.query_pairs_mut().append_pair("meme", file_url.as_str());
    Ok(url.to_string())
}

/// Try each share tier in turn.
pub fn share_link(
    url: String,
    native: Option<&dyn NativeShare>,
    clipboard: Option<&mut dyn ClipboardSink>,
) -> ShareOutcome {
    if let Some(native) = native {
        match native.share(&ShareRequest::new(url.clone())) {
            Ok(()) => return ShareOutcome::Shared,
            Err(e) => log::info!("Native sharing failed ({}), falling back to copy", e),
        }
    }

    if let Some(clipboard) = clipboard {
        match clipboard.set_text(&url) {
            Ok(()) => return ShareOutcome::Copied(url),
            Err(e) => log::warn!("Clipboard unavailable ({}), showing link instead", e),
        }
    }

    ShareOutcome::Displayed(url)
}
