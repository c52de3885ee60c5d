// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test double for print surfaces.

use std::cell::RefCell;

use partlabel_bridge::PrintSurface;
use partlabel_core::{
    LabelCanvas, LabelField, LabelRecord, PageGeometry, PrintOutcome, TemplateSelector,
};
use partlabel_render::TemplateRenderer;

/// A small barcode-only label on default stock.
pub fn sample_canvas() -> LabelCanvas {
    TemplateRenderer::new()
        .render(
            &LabelRecord::new().with(LabelField::Barcode, "123"),
            TemplateSelector::new(0),
            PageGeometry::default(),
            "label",
        )
        .unwrap()
}

/// Records every submitted canvas and answers with a fixed outcome.
pub struct RecordingSurface {
    outcome: PrintOutcome,
    submitted: RefCell<Vec<LabelCanvas>>,
}

impl RecordingSurface {
    pub fn new(outcome: PrintOutcome) -> Self {
        Self {
            outcome,
            submitted: RefCell::new(Vec::new()),
        }
    }

    pub fn completing() -> Self {
        Self::new(PrintOutcome::Completed)
    }

    pub fn submissions(&self) -> Vec<LabelCanvas> {
        self.submitted.borrow().clone()
    }
}

impl PrintSurface for RecordingSurface {
    fn name(&self) -> &str {
        "recording"
    }

    fn submit(&self, canvas: &LabelCanvas) -> PrintOutcome {
        self.submitted.borrow_mut().push(canvas.clone());
        self.outcome.clone()
    }
}
