// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: rectangles, image items with their hotspots, and the project.

pub mod item;
pub mod project;
pub mod rect;
