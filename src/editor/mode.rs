// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interaction mode selection.

/// Which editor receives pointer input and which canvas is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Crop,
    Hotspot,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Crop => "Crop",
            Mode::Hotspot => "Hotspot",
        }
    }
}

/// What the pointer is over while no gesture is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Over the crop body.
    Move,
    /// Over a hotspot body.
    Pointer,
    /// Draw mode is armed and nothing is under the pointer.
    Crosshair,
    /// Over an `nw` or `se` handle.
    ResizeNwSe,
    /// Over an `ne` or `sw` handle.
    ResizeNeSw,
}

impl CursorHint {
    pub(crate) fn for_handle(handle: crate::util::geometry::Handle) -> Self {
        use crate::util::geometry::Handle;
        match handle {
            Handle::Nw | Handle::Se => CursorHint::ResizeNwSe,
            Handle::Ne | Handle::Sw => CursorHint::ResizeNeSw,
        }
    }
}
