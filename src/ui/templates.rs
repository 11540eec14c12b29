// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Built-in meme templates.

use crate::io::media::ImageSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub url: &'static str,
}

impl Template {
    pub fn source(&self) -> ImageSource {
        ImageSource::Remote {
            label: self.name.to_string(),
            url: self.url.to_string(),
        }
    }
}

pub const TEMPLATES: [Template; 8] = [
    Template { name: "Drake Pointing", url: "https://i.imgflip.com/30b1gx.jpg" },
    Template { name: "Distracted Boyfriend", url: "https://i.imgflip.com/1ur9b0.jpg" },
    Template { name: "Two Buttons", url: "https://i.imgflip.com/1g8my4.jpg" },
    Template { name: "Mocking SpongeBob", url: "https://i.imgflip.com/1otk96.jpg" },
    Template { name: "Woman Yelling at Cat", url: "https://i.imgflip.com/345v97.jpg" },
    Template { name: "This is Fine", url: "https://i.imgflip.com/26am.jpg" },
    Template { name: "Change My Mind", url: "https://i.imgflip.com/24y43o.jpg" },
    Template { name: "Expanding Brain", url: "https://i.imgflip.com/1jwhww.jpg" },
];

/// Template grid. Returns the index of a clicked template.
pub fn show(ui: &mut egui::Ui, active: Option<usize>, loading: bool) -> Option<usize> {
    let mut picked = None;
    ui.heading("Templates");
    ui.separator();
    egui::Grid::new("templates").num_columns(2).spacing([6.0, 6.0]).show(ui, |ui| {
        for (index, template) in TEMPLATES.iter().enumerate() {
            let button = egui::SelectableLabel::new(active == Some(index), template.name);
            if ui.add_enabled(!loading, button).clicked() {
                picked = Some(index);
            }
            if index % 2 == 1 {
                ui.end_row();
            }
        }
    });
    picked
}
