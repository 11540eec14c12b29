// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app owns the scene, the raster surface it is drawn on and a small
//! tokio runtime for network and file work. Background tasks report back
//! through a channel that is drained at the start of every frame, so the
//! scene is only ever touched from the UI thread.

use crate::config::AppConfig;
use crate::interaction::controller::InteractionController;
use crate::io::export::{encode_png, save_png, timestamp_millis, timestamped_file_name, write_file};
use crate::io::media::{self, ImageSource, UploadData};
use crate::io::serialization::{export_layout, import_layout, CaptionLayout};
use crate::io::share::{share_link, share_url, SystemClipboard};
use crate::models::overlay::TextStyle;
use crate::models::session::{BackgroundLoad, Completion, Notification, Session};
use crate::remote::random_meme::fetch_random_meme;
use crate::remote::suggestions::fetch_suggestions;
use crate::render::fonts::FontBook;
use crate::render::raster::RasterSurface;
use crate::render::render_scene;
use crate::ui::canvas::CanvasInput;
use crate::ui::notices::{NoticeKind, Notices};
use crate::ui::random_meme::{RandomMemeAction, RandomMemeView};
use crate::ui::{canvas, properties, random_meme, suggestions, templates, toolbar};
use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

const SHARE_FAILED: &str = "Sharing failed. Please try downloading the meme instead.";

/// Main application state.
pub struct MemeApp {
    config: AppConfig,

    /// Runtime for fetches and file reads
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,

    session: Session,
    controller: InteractionController,
    surface: RasterSurface,
    canvas_texture: Option<egui::TextureHandle>,
    canvas_input: CanvasInput,
    needs_render: bool,

    caption_input: String,
    default_style: TextStyle,

    random_meme: RandomMemeView,
    notices: Notices,
}

impl MemeApp {
    /// Create the application, resolving fonts and starting the runtime.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("meme-studio-io")
            .enable_all()
            .build()
            .context("failed to start async runtime")?;
        let client = crate::remote::http_client().context("failed to build HTTP client")?;

        let (width, height) = config.canvas_size();
        let surface = RasterSurface::new(width, height, FontBook::load_system())?;
        let (completions_tx, completions_rx) = channel();

        let mut app = Self {
            runtime,
            client,
            completions_tx,
            completions_rx,
            session: Session::new(width, height),
            controller: InteractionController::new(),
            surface,
            canvas_texture: None,
            canvas_input: CanvasInput::default(),
            needs_render: true,
            caption_input: String::new(),
            default_style: TextStyle::default(),
            random_meme: RandomMemeView::Empty,
            notices: Notices::default(),
            config,
        };

        if app.config.fetch_random_on_start {
            app.next_random_meme(&cc.egui_ctx);
        }
        Ok(app)
    }

    /// Run `task` on the runtime and deliver its result to the next frame.
    fn spawn<F>(&self, ctx: &egui::Context, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let sender = self.completions_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let completion = task.await;
            let _ = sender.send(completion);
            ctx.request_repaint();
        });
    }

    /// Queue a notice. The notice queue also writes it to the log.
    fn notify(&mut self, ctx: &egui::Context, notification: Notification) {
        let now = ctx.input(|i| i.time);
        self.notices.push(notification.kind, notification.text, now);
    }

    /// Start a load the session accepted, or show why it was refused.
    fn load_background(&mut self, ctx: &egui::Context, load: Result<BackgroundLoad, Notification>) {
        let (request, source) = match load {
            Ok(load) => load,
            Err(notification) => return self.notify(ctx, notification),
        };
        let client = self.client.clone();
        self.spawn(ctx, async move {
            Completion::Background {
                request,
                result: media::load(&client, source).await,
            }
        });
    }

    fn open_image_dialog(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "gif", "bmp", "webp"])
            .pick_file()
        {
            let load = self.session.upload(ImageSource::upload_path(path));
            self.load_background(ctx, load);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };

        let name = if file.name.is_empty() {
            file.path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        } else {
            file.name.clone()
        };
        let data = match (file.bytes, file.path) {
            (Some(bytes), _) => UploadData::Bytes(bytes),
            (None, Some(path)) => UploadData::Path(path),
            (None, None) => return,
        };
        let load = self.session.upload(ImageSource::upload(name, &file.mime, data));
        self.load_background(ctx, load);
    }

    /// Load an image link (http(s) or data URL) from the clipboard.
    fn paste_image_link(&mut self, ctx: &egui::Context) {
        let text = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.get_text())
            .unwrap_or_else(|e| {
                log::warn!("Failed to read clipboard: {}", e);
                String::new()
            });
        let load = self.session.paste_link(&text);
        self.load_background(ctx, load);
    }

    fn next_random_meme(&mut self, ctx: &egui::Context) {
        if !self.session.start_random_meme() {
            return;
        }
        let client = self.client.clone();
        let endpoint = self.config.random_meme_endpoint.clone();
        self.spawn(ctx, async move {
            Completion::RandomMeme(fetch_random_meme(&client, &endpoint).await)
        });
    }

    fn generate_suggestions(&mut self, ctx: &egui::Context) {
        if !self.session.start_suggestions() {
            return;
        }
        let client = self.client.clone();
        let endpoint = self.config.suggestions_endpoint.clone();
        let token = self.config.suggestions_token.clone();
        self.spawn(ctx, async move {
            Completion::Suggestions(fetch_suggestions(&client, &endpoint, token.as_deref()).await)
        });
    }

    fn apply_completion(&mut self, ctx: &egui::Context, completion: Completion) {
        match &completion {
            Completion::Background { .. } => self.needs_render = true,
            Completion::RandomMeme(meme) => self.random_meme = random_meme::view_for(ctx, meme),
            Completion::Suggestions(_) => {}
        }
        if let Some(notification) = self.session.apply(completion) {
            self.notify(ctx, notification);
        }
    }

    /// Redraw the scene onto the surface and upload it as a texture.
    fn render(&mut self, ctx: &egui::Context) {
        render_scene(&self.session.scene, &mut self.surface);
        let snapshot = self.surface.snapshot();
        let size = [snapshot.width() as usize, snapshot.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, snapshot.as_raw());
        match self.canvas_texture.as_mut() {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.canvas_texture =
                    Some(ctx.load_texture("meme_canvas", color_image, egui::TextureOptions::LINEAR));
            }
        }
        self.needs_render = false;
    }

    fn download_meme(&mut self, ctx: &egui::Context) {
        if let Err(notification) = self.session.require_background() {
            return self.notify(ctx, notification);
        }
        let file_name = timestamped_file_name("meme", timestamp_millis());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(file_name.as_str())
            .save_file()
        else {
            return;
        };

        // Make sure the file matches what is on screen
        render_scene(&self.session.scene, &mut self.surface);
        if let Err(e) = save_png(&self.surface.snapshot(), &path) {
            self.notify(
                ctx,
                Notification::new(NoticeKind::Error, format!("Failed to save meme: {:#}", e)),
            );
        }
    }

    /// Write the PNG to the share directory and return the share link.
    fn export_for_share(&mut self) -> Result<String> {
        render_scene(&self.session.scene, &mut self.surface);
        let bytes = encode_png(&self.surface.snapshot())?;
        let dir = self.config.share_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(timestamped_file_name("meme", timestamp_millis()));
        write_file(&bytes, &path)?;
        share_url(&self.config.share_base_url, &path)
    }

    fn share_meme(&mut self, ctx: &egui::Context) {
        if let Err(notification) = self.session.require_background() {
            return self.notify(ctx, notification);
        }
        let url = match self.export_for_share() {
            Ok(url) => url,
            Err(e) => {
                // The notice is generic; keep the cause in the log
                log::warn!("Share export failed: {:#}", e);
                return self.notify(ctx, Notification::new(NoticeKind::Error, SHARE_FAILED));
            }
        };

        // No native share sheet on desktop; go straight to the clipboard.
        let mut clipboard = SystemClipboard;
        let outcome = share_link(url, None, Some(&mut clipboard));
        if let Some(notification) = self.session.record_share(&outcome) {
            self.notify(ctx, notification);
        }
    }

    fn download_random_meme(&mut self, ctx: &egui::Context) {
        let (file_name, bytes) = match self.session.random_meme_download(timestamp_millis()) {
            Ok(download) => download,
            Err(notification) => return self.notify(ctx, notification),
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(file_name.as_str())
            .save_file()
        else {
            return;
        };
        let notification = match write_file(&bytes, &path) {
            Ok(()) => Notification::new(NoticeKind::Success, "Meme downloaded!"),
            Err(e) => Notification::new(NoticeKind::Error, format!("Failed to save meme: {:#}", e)),
        };
        self.notify(ctx, notification);
    }

    fn export_captions(&mut self, ctx: &egui::Context, path: PathBuf) {
        let layout = CaptionLayout::from_scene(&self.session.scene);
        let notification = match export_layout(&layout, &path) {
            Ok(()) => Notification::new(NoticeKind::Success, "Captions exported"),
            Err(e) => Notification::new(
                NoticeKind::Error,
                format!("Failed to export captions: {}", e),
            ),
        };
        self.notify(ctx, notification);
    }

    fn import_captions(&mut self, ctx: &egui::Context, path: PathBuf) {
        let scene = &mut self.session.scene;
        match import_layout(&path) {
            Ok(layout) => {
                if (layout.canvas_width, layout.canvas_height) != (scene.width, scene.height) {
                    log::warn!(
                        "Captions were laid out for {}x{}, canvas is {}x{}",
                        layout.canvas_width,
                        layout.canvas_height,
                        scene.width,
                        scene.height
                    );
                }
                scene.replace_overlays(layout.overlays);
                self.needs_render = true;
            }
            Err(e) => self.notify(
                ctx,
                Notification::new(NoticeKind::Error, format!("Failed to import captions: {}", e)),
            ),
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Image...").clicked() {
                    ui.close_menu();
                    self.open_image_dialog(ctx);
                }
                if ui.button("Paste Image Link").clicked() {
                    ui.close_menu();
                    self.paste_image_link(ctx);
                }
                ui.separator();
                if ui.button("Download Meme...").clicked() {
                    ui.close_menu();
                    self.download_meme(ctx);
                }
                if ui.button("Share Meme").clicked() {
                    ui.close_menu();
                    self.share_meme(ctx);
                }
                ui.separator();
                if ui.button("Load Captions...").clicked() {
                    ui.close_menu();
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Captions", &["yaml", "yml", "json"])
                        .pick_file()
                    {
                        self.import_captions(ctx, path);
                    }
                }
                ui.menu_button("Export Captions", |ui| {
                    if ui.button("Export as YAML...").clicked() {
                        ui.close_menu();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("YAML", &["yaml", "yml"])
                            .set_file_name("captions.yaml")
                            .save_file()
                        {
                            self.export_captions(ctx, path);
                        }
                    }
                    if ui.button("Export as JSON...").clicked() {
                        ui.close_menu();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .set_file_name("captions.json")
                            .save_file()
                        {
                            self.export_captions(ctx, path);
                        }
                    }
                });
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}

impl eframe::App for MemeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(ctx, completion);
        }
        self.handle_dropped_files(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ctx, ui);
        });

        // Caption entry and default style
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.caption_input, &mut self.default_style)
            })
            .inner;
        if let toolbar::ToolbarAction::AddCaption(text) = toolbar_action {
            self.session.scene.add_overlay(text, self.default_style.clone());
            self.needs_render = true;
        }

        // Share link and actions
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⬇ Download").clicked() {
                    self.download_meme(ctx);
                }
                if ui.button("🔗 Share").clicked() {
                    self.share_meme(ctx);
                }
                if let Some(link) = self.session.share_link.clone() {
                    ui.separator();
                    ui.label("Share link:");
                    ui.add(egui::TextEdit::singleline(&mut link.as_str()).desired_width(f32::INFINITY));
                }
            });
        });

        // Templates, random meme and suggestions (left side)
        egui::SidePanel::left("sources")
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let loading = self.session.loading_message.is_some();
                    if let Some(index) = templates::show(ui, self.session.active_template, loading) {
                        if let Some(load) = self.session.select_template(index) {
                            self.load_background(ctx, Ok(load));
                        }
                    }
                    if ui.button("📁 Upload Image...").clicked() {
                        self.open_image_dialog(ctx);
                    }

                    ui.add_space(12.0);
                    match random_meme::show(ui, &self.random_meme, self.session.random_meme_loading) {
                        RandomMemeAction::Next => self.next_random_meme(ctx),
                        RandomMemeAction::Download => self.download_random_meme(ctx),
                        RandomMemeAction::None => {}
                    }

                    ui.add_space(12.0);
                    let session = &self.session;
                    let response = suggestions::show(ui, &session.suggestions, session.suggestions_loading);
                    if response.generate {
                        self.generate_suggestions(ctx);
                    }
                    let session = &mut self.session;
                    if let Some(suggestion) = response.apply.and_then(|i| session.suggestions.get(i)) {
                        suggestions::apply(&mut session.scene, suggestion, &self.default_style);
                        self.needs_render = true;
                    }
                });
            });

        // Caption list (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(300.0)
            .show(ctx, |ui| properties::show(ui, &mut self.session.scene.overlays))
            .inner;
        match properties_action {
            properties::PropertiesAction::Changed => self.needs_render = true,
            properties::PropertiesAction::DeleteOverlay(id) => {
                self.session.scene.remove_overlay(id);
                self.needs_render = true;
            }
            properties::PropertiesAction::ClearAll => {
                self.session.scene.clear_overlays();
                self.needs_render = true;
            }
            properties::PropertiesAction::None => {}
        }

        if self.needs_render {
            self.render(ctx);
        }

        // Main canvas (center)
        let output = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let output = canvas::show(
                    ui,
                    self.canvas_texture.as_ref(),
                    (self.session.scene.width, self.session.scene.height),
                    self.session.scene.drag.is_some(),
                    &mut self.canvas_input,
                );
                if let Some(ref message) = self.session.loading_message {
                    ui.put(
                        egui::Rect::from_center_size(ui.max_rect().center(), egui::vec2(240.0, 40.0)),
                        egui::Label::new(egui::RichText::new(message).size(16.0).strong()),
                    );
                }
                output
            })
            .inner;

        self.controller.set_viewport(output.viewport);
        let mut changed = false;
        for event in &output.events {
            changed |= self.controller.handle(&mut self.session.scene, &self.surface, event);
        }
        if changed || self.needs_render {
            self.render(ctx);
            ctx.request_repaint();
        }

        self.notices.show(ctx);
    }
}
