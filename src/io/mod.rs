// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, exports, sharing and caption files.

pub mod export;
pub mod media;
pub mod serialization;
pub mod share;
