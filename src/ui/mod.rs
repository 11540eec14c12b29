// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the meme editor.

pub mod canvas;
pub mod notices;
pub mod properties;
pub mod random_meme;
pub mod suggestions;
pub mod templates;
pub mod toolbar;
