// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transient message boxes stacked in the top-right corner.

/// Seconds a notice stays on screen.
pub const NOTICE_SECONDS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Alert,
    Error,
    Success,
    Info,
}

impl NoticeKind {
    fn color(self) -> egui::Color32 {
        match self {
            NoticeKind::Alert => egui::Color32::from_rgb(0xf3, 0x9c, 0x12),
            NoticeKind::Error => egui::Color32::from_rgb(0xe7, 0x4c, 0x3c),
            NoticeKind::Success => egui::Color32::from_rgb(0x27, 0xae, 0x60),
            NoticeKind::Info => egui::Color32::from_rgb(0x34, 0x98, 0xdb),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    expires_at: f64,
}

/// Queue of visible notices.
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>, now: f64) {
        let text = text.into();
        match kind {
            NoticeKind::Error => log::error!("{}", text),
            NoticeKind::Alert => log::warn!("{}", text),
            NoticeKind::Success | NoticeKind::Info => log::info!("{}", text),
        }
        self.items.push(Notice {
            kind,
            text,
            expires_at: now + NOTICE_SECONDS,
        });
    }

    /// Drop notices whose time is up.
    pub fn prune(&mut self, now: f64) {
        self.items.retain(|n| n.expires_at > now);
    }

    #[cfg(test)]
    pub fn visible(&self) -> &[Notice] {
        &self.items
    }

    /// Draw the current notices and keep repainting until they expire.
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.prune(now);
        let Some(next_expiry) = self
            .items
            .iter()
            .map(|n| n.expires_at)
            .min_by(|a, b| a.total_cmp(b))
        else {
            return;
        };

        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 36.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for notice in &self.items {
                    egui::Frame::none()
                        .fill(notice.kind.color())
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(14.0, 10.0))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&notice.text)
                                    .color(egui::Color32::WHITE)
                                    .strong(),
                            );
                        });
                    ui.add_space(6.0);
                }
            });

        ctx.request_repaint_after(std::time::Duration::from_secs_f64(
            (next_expiry - now).max(0.0),
        ));
    }
}
