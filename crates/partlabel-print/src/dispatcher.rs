// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print dispatcher — owns the page geometry, renders the label and hands it
// to a print surface in a single synchronous call.
//
// Job lifecycle: Pending → Printing → Completed | Failed. Whatever the
// surface reports on failure is logged and then replaced by the one generic
// `PrintFailed` error; callers never see surface-specific detail.

use partlabel_bridge::PrintSurface;
use partlabel_core::error::{LabelError, Result};
use partlabel_core::{
    JobStatus, LabelJob, LabelRecord, PageGeometry, PrintConfig, PrintOutcome, TemplateSelector,
};
use partlabel_render::TemplateRenderer;
use tracing::{info, instrument, warn};

/// Renders and prints one label per call.
pub struct PrintDispatcher<S: PrintSurface> {
    surface: S,
    renderer: TemplateRenderer,
    geometry: PageGeometry,
    job_title: String,
}

impl<S: PrintSurface> PrintDispatcher<S> {
    /// Dispatcher with the default label geometry and lenient selector policy.
    pub fn new(surface: S) -> Self {
        Self::from_config(surface, &PrintConfig::default())
    }

    /// Dispatcher configured from persisted settings.
    pub fn from_config(surface: S, config: &PrintConfig) -> Self {
        let renderer = if config.strict_template_selector {
            TemplateRenderer::strict()
        } else {
            TemplateRenderer::new()
        };
        Self {
            surface,
            renderer,
            geometry: config.geometry,
            job_title: config.job_title.clone(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Render `record` with `selector` and print it.
    ///
    /// Blocks for as long as the surface does (for the native surface, until
    /// the user closes the print dialog). No retries.
    #[instrument(
        skip(self, record, selector),
        fields(selector = selector.index(), surface = self.surface.name())
    )]
    pub fn print(&self, record: &LabelRecord, selector: TemplateSelector) -> Result<LabelJob> {
        let canvas = self
            .renderer
            .render(record, selector, self.geometry, &self.job_title)?;

        let mut job = LabelJob::new(selector, canvas.fields.len());
        job.transition(JobStatus::Printing);
        info!(job_id = %job.id, fields = job.field_count, "submitting label");

        match self.surface.submit(&canvas) {
            PrintOutcome::Completed => {
                job.transition(JobStatus::Completed);
                info!(job_id = %job.id, "label printed");
                Ok(job)
            }
            PrintOutcome::Cancelled => {
                job.transition(JobStatus::Failed);
                warn!(job_id = %job.id, "print dialog cancelled");
                Err(LabelError::PrintFailed)
            }
            PrintOutcome::Failed(detail) => {
                job.transition(JobStatus::Failed);
                warn!(job_id = %job.id, %detail, "print surface failed");
                Err(LabelError::PrintFailed)
            }
        }
    }
}
