// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings read from `config.json`.

use crate::remote::{random_meme, suggestions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "meme-studio";
const APP_CONFIG_FILE: &str = "config.json";
/// Fits the smallest texture limit of common GPUs.
pub const MAX_CANVAS_SIDE: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

/// Settings from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub random_meme_endpoint: String,
    pub suggestions_endpoint: String,
    pub suggestions_token: Option<String>,
    pub share_base_url: String,
    /// Where shared PNGs are written; the OS temp dir when unset.
    pub share_dir: Option<PathBuf>,
    pub fetch_random_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 600,
            random_meme_endpoint: random_meme::DEFAULT_ENDPOINT.to_string(),
            suggestions_endpoint: suggestions::DEFAULT_ENDPOINT.to_string(),
            suggestions_token: None,
            share_base_url: "https://meme-studio.local/".to_string(),
            share_dir: None,
            fetch_random_on_start: true,
        }
    }
}

impl AppConfig {
    pub fn share_dir(&self) -> PathBuf {
        self.share_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Canvas size, clamped so a zero in the file cannot produce an empty
    /// surface.
    /// Canvas size, kept within what a GPU texture can hold.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.canvas_width.clamp(1, MAX_CANVAS_SIDE),
            self.canvas_height.clamp(1, MAX_CANVAS_SIDE),
        )
    }

    fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.suggestions_token = Some(token);
        }
        self
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
        .with_token_override(std::env::var(suggestions::TOKEN_ENV).ok())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            log::warn!(
                "Failed to parse {}: {}; using defaults",
                path.display(),
                err
            );
            AppConfig::default()
        }),
        Err(err) => {
            log::warn!("Failed to read {}: {}; using defaults", path.display(), err);
            AppConfig::default()
        }
    }
}

fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let root = match xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home
            .ok_or(ConfigPathError::MissingHomeDirectory)?
            .join(".config"),
    };
    Ok(root.join(app_dir).join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).unwrap();
    }

    #[test]
    fn test_config_path_prefers_xdg() {
        let path = app_config_path(
            APP_DIR,
            APP_CONFIG_FILE,
            Some(Path::new("/tmp/xdg")),
            Some(Path::new("/tmp/home")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/xdg/meme-studio/config.json"));

        let path = app_config_path(APP_DIR, APP_CONFIG_FILE, Some(Path::new("")), Some(Path::new("/tmp/home")))
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/home/.config/meme-studio/config.json"));

        assert_eq!(
            app_config_path(APP_DIR, APP_CONFIG_FILE, None, None).unwrap_err(),
            ConfigPathError::MissingHomeDirectory
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_app_config_with(Some(dir.path()), None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.canvas_size(), (600, 600));
        assert!(config.fetch_random_on_start);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), r#"{ "canvas_width": 800, "fetch_random_on_start": false }"#);
        let config = load_app_config_with(Some(dir.path()), None);
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.canvas_height, 600);
        assert!(!config.fetch_random_on_start);
        assert_eq!(config.random_meme_endpoint, random_meme::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "{ canvas_width: ");
        assert_eq!(load_app_config_with(Some(dir.path()), None), AppConfig::default());
    }

    #[test]
    fn test_token_override() {
        let config = AppConfig {
            suggestions_token: Some("from-file".to_string()),
            ..AppConfig::default()
        };
        let kept = config.clone().with_token_override(Some("  ".to_string()));
        assert_eq!(kept.suggestions_token.as_deref(), Some("from-file"));
        let replaced = config.with_token_override(Some("hf_env".to_string()));
        assert_eq!(replaced.suggestions_token.as_deref(), Some("hf_env"));
    }

    #[test]
    fn test_share_dir_and_canvas_size() {
        let config = AppConfig {
            share_dir: Some(PathBuf::from("/tmp/memes")),
            canvas_width: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.share_dir(), PathBuf::from("/tmp/memes"));
        assert_eq!(config.canvas_size(), (1, 600));

        let huge = AppConfig {
            canvas_height: 100_000,
            ..AppConfig::default()
        };
        assert_eq!(huge.canvas_size(), (600, MAX_CANVAS_SIDE));
        assert_eq!(AppConfig::default().share_dir(), std::env::temp_dir());
    }
}
