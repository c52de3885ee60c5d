// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// IPP print surface for network label printers.
//
// Renders the canvas to PDF and submits it with an IPP Print-Job
// (RFC 8011 §4.2.1). The `ipp` client is async; the surface owns a private
// current-thread Tokio runtime and blocks on it so that `submit` keeps the
// same synchronous contract as the native dialog.

use std::io::Cursor;

use ipp::prelude::*;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info, instrument};

use partlabel_bridge::PrintSurface;
use partlabel_core::error::{LabelError, Result};
use partlabel_core::{LabelCanvas, PrintOutcome};
use partlabel_render::LabelPdfWriter;

const PDF_MIME: &str = "application/pdf";
/// `requesting-user-name` sent with every job.
const REQUESTING_USER: &str = "partlabel";

/// Prints labels on an IPP printer.
pub struct IppSurface {
    /// The target printer URI (ipp:// or ipps://).
    uri: Uri,
    runtime: Runtime,
    writer: LabelPdfWriter,
}

impl IppSurface {
    /// Create a surface targeting `uri`.
    pub fn new(uri: &str) -> Result<Self> {
        let parsed: Uri = uri
            .parse()
            .map_err(|e| LabelError::IppRequest(format!("invalid URI '{uri}': {e}")))?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(LabelError::Io)?;
        Ok(Self {
            uri: parsed,
            runtime,
            writer: LabelPdfWriter::new(),
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Send one rendered label and return the printer's job-id.
    #[instrument(skip(self, label), fields(uri = %self.uri, title = %label.title))]
    async fn send_label(&self, label: LabelSubmission) -> Result<i32> {
        let LabelSubmission {
            title,
            fields,
            document,
        } = label;
        let bytes = document.len();

        let operation =
            IppOperationBuilder::print_job(self.uri.clone(), IppPayload::new(Cursor::new(document)))
                .user_name(REQUESTING_USER)
                .job_title(&title)
                .document_format(PDF_MIME)
                .build();

        info!(fields, bytes, "submitting label over IPP");
        let response = AsyncIppClient::new(self.uri.clone())
            .send(operation)
            .await
            .map_err(|e| LabelError::IppRequest(format!("Print-Job: {e}")))?;

        let status = response.header().status_code();
        if !status.is_success() {
            error!(?status, "printer refused label");
            return Err(LabelError::IppRequest(format!(
                "Print-Job returned status {status:?}"
            )));
        }

        match extract_job_id(response.attributes()) {
            Some(job_id) => {
                info!(job_id, "label queued on printer");
                Ok(job_id)
            }
            None => Err(LabelError::IppRequest(
                "Print-Job response missing job-id attribute".into(),
            )),
        }
    }
}

/// A label rendered to PDF, ready to go out as a Print-Job.
struct LabelSubmission {
    title: String,
    fields: usize,
    document: Vec<u8>,
}

impl LabelSubmission {
    fn render(writer: &LabelPdfWriter, canvas: &LabelCanvas) -> Result<Self> {
        Ok(Self {
            title: canvas.title.clone(),
            fields: canvas.fields.len(),
            document: writer.create(canvas)?,
        })
    }
}

impl PrintSurface for IppSurface {
    fn name(&self) -> &str {
        "ipp"
    }

    fn submit(&self, canvas: &LabelCanvas) -> PrintOutcome {
        let sent = LabelSubmission::render(&self.writer, canvas)
            .and_then(|label| self.runtime.block_on(self.send_label(label)));
        match sent {
            Ok(_) => PrintOutcome::Completed,
            Err(e) => PrintOutcome::Failed(e.to_string()),
        }
    }
}

/// Extract the `job-id` integer from a response's Job Attributes group.
fn extract_job_id(attrs: &IppAttributes) -> Option<i32> {
    attrs
        .groups_of(DelimiterTag::JobAttributes)
        .filter_map(|group| group.attributes().get("job-id"))
        .find_map(|attr| match attr.value() {
            IppValue::Integer(id) => Some(*id),
            _ => None,
        })
}
