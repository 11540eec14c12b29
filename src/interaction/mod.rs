// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer interaction with captions on the canvas.

pub mod controller;
pub mod pointer;
