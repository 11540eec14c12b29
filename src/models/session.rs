// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor session state.
//!
//! Everything the editor knows besides widgets and textures: the scene,
//! which template is active, what is loading, the last random meme and
//! suggestion batch. Background work is started by the app; its result
//! comes back here as a [`Completion`] and may produce a [`Notification`]
//! for the user.

use super::scene::{BackgroundImage, Scene};
use crate::io::media::{ImageSource, LoadError};
use crate::io::share::ShareOutcome;
use crate::remote::random_meme::{LoadedMeme, RandomMeme};
use crate::remote::suggestions::{Suggestion, SuggestionBatch};
use crate::ui::notices::NoticeKind;
use crate::ui::templates::TEMPLATES;
use std::sync::Arc;

pub const SELECT_IMAGE_FIRST: &str = "Please select an image first";
pub const NO_RANDOM_MEME: &str = "No meme to download. Please generate one first.";
pub const NO_IMAGE_LINK: &str = "Clipboard does not hold an image link";
pub const SHARE_COPIED: &str = "Share URL copied to clipboard!";

/// Result of a background task.
pub enum Completion {
    Background {
        request: u64,
        result: Result<BackgroundImage, LoadError>,
    },
    RandomMeme(RandomMeme),
    Suggestions(SuggestionBatch),
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notification {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A background load to start: the request id and what to load.
pub type BackgroundLoad = (u64, ImageSource);

pub struct Session {
    pub scene: Scene,
    /// Index into [`TEMPLATES`] of the current background
    pub active_template: Option<usize>,
    /// Id of the newest background request; older completions are dropped
    background_request: u64,
    pub loading_message: Option<String>,

    pub random_meme: Option<LoadedMeme>,
    pub random_meme_loading: bool,

    pub suggestions: Vec<Suggestion>,
    pub suggestions_loading: bool,

    /// Link from the last share, shown until the next one
    pub share_link: Option<String>,
}

impl Session {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scene: Scene::new(width, height),
            active_template: None,
            background_request: 0,
            loading_message: None,
            random_meme: None,
            random_meme_loading: false,
            suggestions: Vec::new(),
            suggestions_loading: false,
            share_link: None,
        }
    }

    fn begin_background(&mut self, source: ImageSource) -> BackgroundLoad {
        self.background_request += 1;
        self.loading_message = Some(format!("Loading {}...", source.label()));
        log::info!("Loading background from {}", source.label());
        (self.background_request, source)
    }

    /// Mark a template active and start loading it.
    pub fn select_template(&mut self, index: usize) -> Option<BackgroundLoad> {
        let template = TEMPLATES.get(index)?;
        self.active_template = Some(index);
        Some(self.begin_background(template.source()))
    }

    /// Start loading a user image. A rejected file leaves everything as
    /// it was, including any load in flight.
    pub fn upload(&mut self, source: Result<ImageSource, LoadError>) -> Result<BackgroundLoad, Notification> {
        let source = source.map_err(|e| Notification::new(NoticeKind::Alert, e.to_string()))?;
        self.active_template = None;
        Ok(self.begin_background(source))
    }

    /// Start loading an image link pasted by the user.
    pub fn paste_link(&mut self, text: &str) -> Result<BackgroundLoad, Notification> {
        match ImageSource::from_link(text) {
            Ok(Some(source)) => self.upload(Ok(source)),
            Ok(None) => Err(Notification::new(NoticeKind::Alert, NO_IMAGE_LINK)),
            Err(e) => self.upload(Err(e)),
        }
    }

    /// Claim the random meme fetch. False while one is already running.
    pub fn start_random_meme(&mut self) -> bool {
        !std::mem::replace(&mut self.random_meme_loading, true)
    }

    /// Claim the suggestion request. False while one is already running.
    pub fn start_suggestions(&mut self) -> bool {
        !std::mem::replace(&mut self.suggestions_loading, true)
    }

    /// Fold a finished task into the session.
    pub fn apply(&mut self, completion: Completion) -> Option<Notification> {
        match completion {
            Completion::Background { request, result } => {
                if request != self.background_request {
                    log::info!("Dropping stale background load {}", request);
                    return None;
                }
                self.loading_message = None;
                match result {
                    Ok(image) => {
                        self.scene.set_background(image);
                        None
                    }
                    // The previous background, if any, stays on the canvas
                    Err(e) => Some(Notification::new(
                        NoticeKind::Error,
                        format!("Failed to load image: {}", e),
                    )),
                }
            }
            Completion::RandomMeme(meme) => {
                self.random_meme_loading = false;
                match meme {
                    RandomMeme::Loaded(loaded) => {
                        self.random_meme = Some(loaded);
                        None
                    }
                    RandomMeme::Placeholder(placeholder) => {
                        self.random_meme = None;
                        Some(Notification::new(NoticeKind::Error, placeholder.notice()))
                    }
                }
            }
            Completion::Suggestions(batch) => {
                self.suggestions_loading = false;
                self.suggestions = batch.suggestions;
                batch
                    .notice
                    .map(|notice| Notification::new(NoticeKind::Alert, notice))
            }
        }
    }

    /// Export and share need a background on the canvas.
    pub fn require_background(&self) -> Result<(), Notification> {
        match self.scene.background {
            Some(_) => Ok(()),
            None => Err(Notification::new(NoticeKind::Info, SELECT_IMAGE_FIRST)),
        }
    }

    /// File name and bytes of the random meme, for saving.
    pub fn random_meme_download(&self, millis: u128) -> Result<(String, Arc<[u8]>), Notification> {
        self.random_meme
            .as_ref()
            .map(|meme| (meme.file_name(millis), meme.bytes.clone()))
            .ok_or_else(|| Notification::new(NoticeKind::Info, NO_RANDOM_MEME))
    }

    /// Remember where a share ended up.
    pub fn record_share(&mut self, outcome: &ShareOutcome) -> Option<Notification> {
        self.share_link = outcome.visible_url().map(str::to_string);
        matches!(outcome, ShareOutcome::Copied(_))
            .then(|| Notification::new(NoticeKind::Success, SHARE_COPIED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::random_meme::MemePlaceholder;
    use crate::remote::suggestions::{offline_suggestions, UNAVAILABLE_NOTICE};
    use image::RgbaImage;

    fn background(label: &str) -> BackgroundImage {
        BackgroundImage::new(label, RgbaImage::new(4, 4))
    }

    fn loaded_meme() -> LoadedMeme {
        LoadedMeme {
            title: "cat".to_string(),
            url: "https://i.redd.it/cat.jpg".to_string(),
            bytes: Arc::from(&b"jpeg"[..]),
            image: RgbaImage::new(2, 2),
        }
    }

    fn finish(session: &mut Session, request: u64, label: &str) -> Option<Notification> {
        session.apply(Completion::Background {
            request,
            result: Ok(background(label)),
        })
    }

    #[test]
    fn test_select_template_marks_active() {
        let mut session = Session::new(600, 600);
        let (request, source) = session.select_template(2).unwrap();

        assert_eq!(session.active_template, Some(2));
        assert_eq!(source.label(), TEMPLATES[2].name);
        assert_eq!(
            session.loading_message.as_deref(),
            Some("Loading Two Buttons...")
        );

        assert_eq!(finish(&mut session, request, "Two Buttons"), None);
        assert!(session.loading_message.is_none());
        assert_eq!(session.scene.background.as_ref().unwrap().label, "Two Buttons");
    }

    #[test]
    fn test_unknown_template_is_ignored() {
        let mut session = Session::new(600, 600);
        assert!(session.select_template(TEMPLATES.len()).is_none());
        assert!(session.active_template.is_none());
        assert!(session.loading_message.is_none());
    }

    #[test]
    fn test_upload_clears_active_template() {
        let mut session = Session::new(600, 600);
        session.select_template(0).unwrap();

        let source = ImageSource::from_link("https://example.com/me.png").unwrap().unwrap();
        session.upload(Ok(source)).unwrap();
        assert!(session.active_template.is_none());
    }

    #[test]
    fn test_newest_background_request_wins() {
        let mut session = Session::new(600, 600);
        let (first, _) = session.select_template(0).unwrap();
        let (second, _) = session.select_template(1).unwrap();

        assert_eq!(finish(&mut session, second, "second"), None);
        // The older load finishing later does not replace the newer one
        assert_eq!(finish(&mut session, first, "first"), None);
        assert_eq!(session.scene.background.as_ref().unwrap().label, "second");
    }

    #[test]
    fn test_stale_failure_keeps_loading_state() {
        let mut session = Session::new(600, 600);
        let (first, _) = session.select_template(0).unwrap();
        session.select_template(1).unwrap();

        let stale = session.apply(Completion::Background {
            request: first,
            result: Err(LoadError::BadDataUrl),
        });
        assert_eq!(stale, None);
        assert!(session.loading_message.is_some());
    }

    #[test]
    fn test_failed_load_keeps_previous_background() {
        let mut session = Session::new(600, 600);
        let (request, _) = session.select_template(0).unwrap();
        finish(&mut session, request, "first");

        let (request, _) = session.select_template(1).unwrap();
        let notice = session.apply(Completion::Background {
            request,
            result: Err(LoadError::BadDataUrl),
        });
        assert_eq!(
            notice,
            Some(Notification::new(NoticeKind::Error, "Failed to load image: malformed data URL"))
        );
        assert!(session.loading_message.is_none());
        assert_eq!(session.scene.background.as_ref().unwrap().label, "first");
    }

    #[test]
    fn test_rejected_link_does_not_disturb_pending_load() {
        let mut session = Session::new(600, 600);
        let (request, _) = session.select_template(3).unwrap();

        let notice = session.paste_link("data:text/plain;base64,aGVsbG8=").unwrap_err();
        assert_eq!(notice, Notification::new(NoticeKind::Alert, "Please select an image file"));
        assert_eq!(session.active_template, Some(3));

        // The template load is still the newest one
        finish(&mut session, request, "template");
        assert_eq!(session.scene.background.as_ref().unwrap().label, "template");
    }

    #[test]
    fn test_paste_link_without_link() {
        let mut session = Session::new(600, 600);
        assert_eq!(
            session.paste_link("hello there").unwrap_err(),
            Notification::new(NoticeKind::Alert, NO_IMAGE_LINK)
        );
        assert!(session.loading_message.is_none());

        let (_, source) = session.paste_link("data:image/png;base64,AAAA").unwrap();
        assert!(matches!(source, ImageSource::DataUrl(_)));
    }

    #[test]
    fn test_export_and_share_need_background() {
        let mut session = Session::new(600, 600);
        assert_eq!(
            session.require_background(),
            Err(Notification::new(NoticeKind::Info, SELECT_IMAGE_FIRST))
        );
        session.scene.set_background(background("bg"));
        assert_eq!(session.require_background(), Ok(()));
    }

    #[test]
    fn test_random_meme_download_needs_meme() {
        let mut session = Session::new(600, 600);
        assert_eq!(
            session.random_meme_download(1).unwrap_err(),
            Notification::new(NoticeKind::Info, NO_RANDOM_MEME)
        );

        assert!(session.start_random_meme());
        session.apply(Completion::RandomMeme(RandomMeme::Loaded(loaded_meme())));
        let (name, bytes) = session.random_meme_download(42).unwrap();
        assert_eq!(name, "random-meme-42.jpg");
        assert_eq!(&bytes[..], b"jpeg");
    }

    #[test]
    fn test_random_meme_flag_resets_on_every_outcome() {
        let mut session = Session::new(600, 600);
        assert!(session.start_random_meme());
        // A second click while fetching does nothing
        assert!(!session.start_random_meme());

        session.apply(Completion::RandomMeme(RandomMeme::Loaded(loaded_meme())));
        assert!(!session.random_meme_loading);

        assert!(session.start_random_meme());
        let notice = session.apply(Completion::RandomMeme(RandomMeme::Placeholder(
            MemePlaceholder::NetworkError,
        )));
        assert!(!session.random_meme_loading);
        assert!(session.random_meme.is_none());
        assert_eq!(
            notice,
            Some(Notification::new(
                NoticeKind::Error,
                "Network error. Could not fetch a random meme."
            ))
        );
    }

    #[test]
    fn test_suggestions_flag_resets_and_alerts_on_fallback() {
        let mut session = Session::new(600, 600);
        assert!(session.start_suggestions());
        assert!(!session.start_suggestions());

        let notice = session.apply(Completion::Suggestions(SuggestionBatch {
            suggestions: offline_suggestions(),
            notice: Some(UNAVAILABLE_NOTICE),
        }));
        assert!(!session.suggestions_loading);
        assert_eq!(session.suggestions, offline_suggestions());
        assert_eq!(notice, Some(Notification::new(NoticeKind::Alert, UNAVAILABLE_NOTICE)));

        assert!(session.start_suggestions());
        let notice = session.apply(Completion::Suggestions(SuggestionBatch {
            suggestions: Vec::new(),
            notice: None,
        }));
        assert_eq!(notice, None);
        assert!(!session.suggestions_loading);
    }

    #[test]
    fn test_record_share() {
        let mut session = Session::new(600, 600);
        let notice = session.record_share(&ShareOutcome::Copied("https://x/?meme=a".to_string()));
        assert_eq!(notice, Some(Notification::new(NoticeKind::Success, SHARE_COPIED)));
        assert_eq!(session.share_link.as_deref(), Some("https://x/?meme=a"));

        let notice = session.record_share(&ShareOutcome::Displayed("https://x/?meme=b".to_string()));
        assert_eq!(notice, None);
        assert_eq!(session.share_link.as_deref(), Some("https://x/?meme=b"));

        session.record_share(&ShareOutcome::Shared);
        assert!(session.share_link.is_none());
    }
}
