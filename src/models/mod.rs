// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models for the meme scene, its captions and the editor session.

pub mod overlay;
pub mod scene;
pub mod session;
