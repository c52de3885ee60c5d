// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub surface for builds without a native print dialog.
//
// Every submission fails; configure an IPP or PDF-directory surface on these
// platforms instead.

use partlabel_core::{LabelCanvas, LabelError, PrintOutcome};

use crate::traits::PrintSurface;

/// Surface returned by `platform_surface()` on non-macOS targets.
pub struct StubSurface;

impl PrintSurface for StubSurface {
    fn name(&self) -> &str {
        "native (stub)"
    }

    fn submit(&self, canvas: &LabelCanvas) -> PrintOutcome {
        tracing::warn!(
            fields = canvas.fields.len(),
            "PrintSurface::submit called on stub surface"
        );
        PrintOutcome::Failed(LabelError::PlatformUnavailable.to_string())
    }
}
