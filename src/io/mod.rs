// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, project files and the HTML export.

pub mod html;
pub mod media;
pub mod serialization;
