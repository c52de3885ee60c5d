// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label PDF writer — draws a rendered canvas onto a single page using
// `printpdf` 0.8.
//
// Canvas coordinates are points with a bottom-left origin, the same
// convention PDF uses, so field frames map onto the page without flipping.
//
// Text is set in built-in Helvetica, whose font dictionary declares
// WinAnsiEncoding. printpdf passes built-in font strings through as UTF-8,
// so each line is encoded to WinAnsi here and written with a raw `Tj`.

use std::path::Path;

use encoding_rs::WINDOWS_1252;
use partlabel_core::error::Result;
use partlabel_core::{FieldRole, Frame, LabelCanvas, RenderedField};
use printpdf::{
    BuiltinFont, Color, DictItem, Greyscale, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Pt, Rect,
};
use tracing::{debug, info, instrument};

use crate::symbol::Code128Symbol;

/// Font size for label text, in points.
const FONT_SIZE_PT: f32 = 8.0;
/// Baseline distance between lines of a multi-line field.
const LINE_HEIGHT_PT: f32 = 9.5;
/// Height of the bars drawn for a barcode field.
const BAR_HEIGHT_PT: f32 = 10.0;

/// Writes label canvases as one-page PDFs sized to the label stock.
#[derive(Debug, Clone)]
pub struct LabelPdfWriter {
    font_size: f32,
}

impl Default for LabelPdfWriter {
    fn default() -> Self {
        Self {
            font_size: FONT_SIZE_PT,
        }
    }
}

impl LabelPdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different font size for all fields.
    pub fn with_font_size(mut self, size_pt: f32) -> Self {
        self.font_size = size_pt;
        self
    }

    /// Render `canvas` to PDF bytes.
    ///
    /// Each field's lines start at the top of its frame and flow downward.
    /// A barcode field holding a valid inventory code gets Code 128 bars
    /// across the top of its frame with the code printed underneath.
    /// Fields that sit partly or wholly below the page are still emitted; the
    /// viewer or printer clips them, exactly as the native view would.
    #[instrument(skip(self, canvas), fields(fields = canvas.fields.len()))]
    pub fn create(&self, canvas: &LabelCanvas) -> Result<Vec<u8>> {
        let geometry = canvas.geometry;
        info!(
            width = geometry.width,
            height = geometry.height,
            title = %canvas.title,
            "Creating label PDF"
        );

        let ops = self.page_ops(canvas);

        let mut doc = PdfDocument::new(&canvas.title);
        doc.with_pages(vec![PdfPage::new(
            pt_to_mm(geometry.width),
            pt_to_mm(geometry.height),
            ops,
        )]);

        // The raw `Tj` operations are dropped unless unknown ops are allowed.
        let options = PdfSaveOptions {
            secure: false,
            ..PdfSaveOptions::default()
        };
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&options, &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }

    /// Render `canvas` and write the PDF to `path`.
    pub fn write_to_file(&self, canvas: &LabelCanvas, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.create(canvas)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote label PDF to {}", path.as_ref().display());
        Ok(())
    }

    fn page_ops(&self, canvas: &LabelCanvas) -> Vec<Op> {
        let geometry = canvas.geometry;
        let line_height = LINE_HEIGHT_PT * self.font_size / FONT_SIZE_PT;
        let mut ops: Vec<Op> = Vec::new();
        let mut clipped = 0usize;

        for field in &canvas.fields {
            let frame = field.frame;
            if frame.y < 0.0 || frame.y + frame.height > geometry.height {
                clipped += 1;
            }

            let mut top = (frame.y + frame.height) as f32;
            if let Some(symbol) = barcode_symbol(field) {
                push_bars(&mut ops, &symbol, &frame);
                top -= BAR_HEIGHT_PT;
            }

            for (idx, line) in field.lines().enumerate() {
                let baseline = top - self.font_size - idx as f32 * line_height;
                self.push_line(&mut ops, frame.x as f32, baseline, line);
            }
        }

        if clipped > 0 {
            debug!(clipped, "fields extend beyond the label edge");
        }
        ops
    }

    fn push_line(&self, ops: &mut Vec<Op>, x: f32, baseline: f32, line: &str) {
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(x),
                y: Pt(baseline),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(self.font_size),
            font: BuiltinFont::Helvetica,
        });
        // Empty write: registers Helvetica in the page resources.
        ops.push(Op::WriteTextBuiltinFont {
            items: Vec::new(),
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::Unknown {
            key: "Tj".into(),
            value: vec![DictItem::Bytes(win_ansi(line))],
        });
        ops.push(Op::EndTextSection);
    }
}

/// The Code 128 symbol for a barcode field, if its text is a valid code.
fn barcode_symbol(field: &RenderedField) -> Option<Code128Symbol> {
    if field.role != FieldRole::Barcode {
        return None;
    }
    match Code128Symbol::encode(&field.text) {
        Ok(symbol) => Some(symbol),
        Err(e) => {
            debug!(text = %field.text, error = %e, "barcode field printed as text only");
            None
        }
    }
}

/// Fill one black rectangle per bar across the top of `frame`.
fn push_bars(ops: &mut Vec<Op>, symbol: &Code128Symbol, frame: &Frame) {
    let module = frame.width as f32 / symbol.modules().len() as f32;
    let top = (frame.y + frame.height) as f32;

    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetFillColor {
        col: Color::Greyscale(Greyscale::new(0.0, None)),
    });
    for (start, len) in symbol.bars() {
        let bar = Rect {
            x: Pt(frame.x as f32 + start as f32 * module),
            y: Pt(top),
            width: Pt(len as f32 * module),
            height: Pt(BAR_HEIGHT_PT),
        };
        ops.push(Op::DrawPolygon {
            polygon: bar.to_polygon(),
        });
    }
    ops.push(Op::RestoreGraphicsState);
}

/// Encode `text` for a WinAnsi font. Turkish letters the encoding lacks fold
/// to their base letter; anything else unmappable becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut utf8 = [0u8; 4];
    for c in text.chars() {
        let c = match c {
            'ı' => 'i',
            'İ' => 'I',
            'ş' => 's',
            'Ş' => 'S',
            'ğ' => 'g',
            'Ğ' => 'G',
            other => other,
        };
        let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut utf8));
        if had_errors {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

fn pt_to_mm(points: f64) -> Mm {
    Mm((points * 25.4 / 72.0) as f32)
}

#[cfg(test)]
mod tests {
    use partlabel_core::{LabelField, LabelRecord, PageGeometry, TemplateSelector};

    use super::*;
    use crate::TemplateRenderer;

    fn canvas_for(record: &LabelRecord, selector: i64) -> LabelCanvas {
        TemplateRenderer::new()
            .render(
                record,
                TemplateSelector::new(selector),
                PageGeometry::default(),
                "test label",
            )
            .unwrap()
    }

    fn canvas(selector: i64) -> LabelCanvas {
        let record = LabelRecord::new()
            .with(LabelField::Barcode, "BR00004210155")
            .with(LabelField::Oem, "1K0615301")
            .with(LabelField::Description, "Front brake disc");
        canvas_for(&record, selector)
    }

    /// Every string shown with `Tj` on page 1, decoded from WinAnsi.
    fn shown_text(pdf: &[u8]) -> Vec<String> {
        let doc = lopdf::Document::load_mem(pdf).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = doc.get_and_decode_page_content(page_id).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(lopdf::Object::String(bytes, _)) => {
                    Some(WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned())
                }
                _ => None,
            })
            .collect()
    }

    fn bar_count(ops: &[Op]) -> usize {
        ops.iter()
            .filter(|op| matches!(op, Op::DrawPolygon { .. }))
            .count()
    }

    #[test]
    fn produces_pdf_bytes() {
        let bytes = LabelPdfWriter::new().create(&canvas(2)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn blank_label_still_produces_a_page() {
        let bytes = LabelPdfWriter::new().create(&canvas(9)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn turkish_text_is_written_as_win_ansi() {
        let record = LabelRecord::new()
            .with(LabelField::Barcode, "123")
            .with(LabelField::Category, "Fren Balatası")
            .with(LabelField::PartNumber, "Ş-1");
        let bytes = LabelPdfWriter::new()
            .create(&canvas_for(&record, 3))
            .unwrap();

        let text = shown_text(&bytes);
        assert!(text.contains(&"Kategori: Fren Balatasi".to_owned()), "{text:?}");
        assert!(text.contains(&"Parça No: S-1".to_owned()), "{text:?}");
    }

    #[test]
    fn win_ansi_maps_latin_and_folds_turkish() {
        assert_eq!(win_ansi("Parça"), b"Par\xe7a");
        assert_eq!(win_ansi("Ölçü"), b"\xd6l\xe7\xfc");
        assert_eq!(win_ansi("ığşİĞŞ"), b"igsIGS");
        assert_eq!(win_ansi("部品"), b"??");
    }

    #[test]
    fn valid_barcode_field_gets_bars() {
        let canvas = canvas(0);
        let symbol = Code128Symbol::encode("BR00004210155").unwrap();
        let ops = LabelPdfWriter::new().page_ops(&canvas);
        assert_eq!(bar_count(&ops), symbol.bars().len());

        let bytes = LabelPdfWriter::new().create(&canvas).unwrap();
        assert_eq!(shown_text(&bytes), vec!["BR00004210155".to_owned()]);
    }

    #[test]
    fn invalid_barcode_field_is_text_only() {
        let record = LabelRecord::new().with(LabelField::Barcode, "123");
        let ops = LabelPdfWriter::new().page_ops(&canvas_for(&record, 0));
        assert_eq!(bar_count(&ops), 0);
    }

    #[test]
    fn points_convert_to_millimetres() {
        let mm = pt_to_mm(72.0);
        assert!((mm.0 - 25.4).abs() < 1e-4);
    }
}
