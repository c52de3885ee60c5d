// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed top-down stacking of label fields.

use partlabel_core::{FieldRole, Frame, RenderedField};

/// Cursor position before the first field.
pub const START_Y: f64 = 45.0;
/// Left edge of every field.
pub const FIELD_X: f64 = 10.0;
pub const FIELD_WIDTH: f64 = 80.0;
pub const FIELD_HEIGHT: f64 = 20.0;
/// Distance the cursor drops after each field.
pub const ROW_STEP: f64 = 25.0;

/// Running vertical cursor. Coordinates are bottom-left origin, so the
/// cursor moves towards zero and past it for long templates.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    y: f64,
}

impl LayoutCursor {
    pub fn new() -> Self {
        Self { y: START_Y }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Place `text` in the next row and advance.
    pub fn place(&mut self, text: String, role: FieldRole) -> RenderedField {
        let field = RenderedField {
            text,
            frame: Frame {
                x: FIELD_X,
                y: self.y - FIELD_HEIGHT,
                width: FIELD_WIDTH,
                height: FIELD_HEIGHT,
            },
            role,
        };
        self.y -= ROW_STEP;
        field
    }
}

impl Default for LayoutCursor {
    fn default() -> Self {
        Self::new()
    }
}
