// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor constants.
//!
//! Sizes and tolerances shared by the crop and hotspot editors, plus the
//! fixed export resolution and the project file format version.

/// Smallest crop rectangle, in image pixels.
pub const CROP_MIN_SIZE: f64 = 20.0;

/// Smallest hotspot rectangle, in output pixels.
pub const HOTSPOT_MIN_SIZE: f64 = 8.0;

/// Half-size of the square grab zone around a crop handle, in canvas pixels.
pub const CROP_HANDLE_TOLERANCE: f64 = 12.0;

/// Half-size of the square grab zone around a hotspot handle, in output pixels.
pub const HOTSPOT_HANDLE_TOLERANCE: f64 = 10.0;

/// Resolution the HTML export is rendered at.
pub const EXPORT_WIDTH: u32 = 1920;
pub const EXPORT_HEIGHT: u32 = 1080;

/// Editing resolution of the preview frame.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 1920;
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 1080;

/// Letterbox fill for new projects.
pub const DEFAULT_BACKGROUND: &str = "#0b0f1a";

/// Version written into saved project files.
pub const PROJECT_VERSION: u32 = 1;
