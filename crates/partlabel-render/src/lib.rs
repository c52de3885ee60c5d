// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// partlabel-render — Template rendering for barcode labels.
//
// Turns a label record and a template selector into positioned text fields
// (composer table + layout cursor), encodes inventory barcodes as Code 128,
// and writes a finished canvas out as a one-page PDF for surfaces that do
// not draw natively.

pub mod composer;
pub mod layout;
pub mod pdf;
pub mod symbol;

pub use composer::{Composer, TemplateRenderer};
pub use layout::LayoutCursor;
pub use pdf::LabelPdfWriter;
pub use symbol::Code128Symbol;
