// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The narrow interface between label rendering and whatever puts ink on
// the label.

use partlabel_core::{LabelCanvas, PrintOutcome};

/// Something that can print a rendered label canvas.
///
/// `submit` is synchronous: a native implementation blocks until the user
/// confirms or dismisses the modal print dialog. Implementations fold their
/// own errors into `PrintOutcome::Failed` rather than returning them.
pub trait PrintSurface {
    /// Short name for logs (e.g. "macOS print dialog", "ipp").
    fn name(&self) -> &str;

    /// Print `canvas` and report how it went.
    fn submit(&self, canvas: &LabelCanvas) -> PrintOutcome;
}

impl<S: PrintSurface + ?Sized> PrintSurface for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn submit(&self, canvas: &LabelCanvas) -> PrintOutcome {
        (**self).submit(canvas)
    }
}

impl<S: PrintSurface + ?Sized> PrintSurface for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn submit(&self, canvas: &LabelCanvas) -> PrintOutcome {
        (**self).submit(canvas)
    }
}
