// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label composers and the template table.
//
// A composer reads a fixed set of record keys and formats one text block.
// Templates are rows in a static table; each row extends the previous one.

use partlabel_core::error::{LabelError, Result};
use partlabel_core::{
    FieldRole, LabelCanvas, LabelField, LabelRecord, PageGeometry, RenderedField,
    TemplateSelector,
};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::layout::LayoutCursor;

/// One text block on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Composer {
    /// The barcode value itself.
    BarcodeAndCode,
    /// `make model submodel (yearRange)`.
    VehicleInfo,
    /// OEM code over the free-text description.
    OemAndDescription,
    /// Category over part number.
    CategoryAndPart,
    /// Stock count over shelf location.
    StockAndLocation,
}

const SIMPLE: &[Composer] = &[Composer::BarcodeAndCode];
const BASIC: &[Composer] = &[Composer::BarcodeAndCode, Composer::VehicleInfo];
const STANDARD: &[Composer] = &[
    Composer::BarcodeAndCode,
    Composer::VehicleInfo,
    Composer::OemAndDescription,
];
const DETAILED: &[Composer] = &[
    Composer::BarcodeAndCode,
    Composer::VehicleInfo,
    Composer::OemAndDescription,
    Composer::CategoryAndPart,
];
const FULL: &[Composer] = &[
    Composer::BarcodeAndCode,
    Composer::VehicleInfo,
    Composer::OemAndDescription,
    Composer::CategoryAndPart,
    Composer::StockAndLocation,
];

/// Selector index → composers, in stacking order.
pub const TEMPLATE_TABLE: [&[Composer]; 5] = [SIMPLE, BASIC, STANDARD, DETAILED, FULL];

impl Composer {
    /// Record keys this composer reads.
    pub fn keys(&self) -> &'static [LabelField] {
        match self {
            Self::BarcodeAndCode => &[LabelField::Barcode],
            Self::VehicleInfo => &[
                LabelField::Make,
                LabelField::Model,
                LabelField::Submodel,
                LabelField::YearRange,
            ],
            Self::OemAndDescription => &[LabelField::Oem, LabelField::Description],
            Self::CategoryAndPart => &[LabelField::Category, LabelField::PartNumber],
            Self::StockAndLocation => &[LabelField::Stock, LabelField::Location],
        }
    }

    /// The barcode composer's field can be drawn as bars; the rest are text.
    pub fn role(&self) -> FieldRole {
        match self {
            Self::BarcodeAndCode => FieldRole::Barcode,
            _ => FieldRole::Text,
        }
    }

    /// Format this composer's text block. Absent keys contribute `""`.
    pub fn compose(&self, record: &LabelRecord) -> String {
        use LabelField::*;
        let get = |field| record.get(field);
        match self {
            Self::BarcodeAndCode => get(Barcode).to_owned(),
            Self::VehicleInfo => format!(
                "{} {} {} ({})",
                get(Make),
                get(Model),
                get(Submodel),
                get(YearRange)
            ),
            Self::OemAndDescription => format!("OEM: {}\n{}", get(Oem), get(Description)),
            Self::CategoryAndPart => {
                format!("Kategori: {}\nParça No: {}", get(Category), get(PartNumber))
            }
            Self::StockAndLocation => format!("Stok: {}\nKonum: {}", get(Stock), get(Location)),
        }
    }
}

/// Composers fired by `selector`; empty for indices outside the table.
pub fn composers_for(selector: TemplateSelector) -> &'static [Composer] {
    usize::try_from(selector.index())
        .ok()
        .and_then(|i| TEMPLATE_TABLE.get(i).copied())
        .unwrap_or(&[])
}

/// Turns records into positioned label fields.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    /// Reject unknown selectors instead of producing an empty label.
    strict: bool,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that fails on selectors outside 0–4.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Render the fields for `selector`, stacked top-down.
    #[instrument(
        skip(self, record, selector),
        fields(selector = selector.index(), keys = record.len())
    )]
    pub fn render_fields(
        &self,
        record: &LabelRecord,
        selector: TemplateSelector,
    ) -> Result<Vec<RenderedField>> {
        let composers = composers_for(selector);
        if composers.is_empty() {
            if self.strict {
                return Err(LabelError::InvalidArguments(format!(
                    "unknown template index {selector}"
                )));
            }
            warn!("template index out of range, label will be blank");
        }

        let mut cursor = LayoutCursor::new();
        let fields: Vec<RenderedField> = composers
            .iter()
            .map(|composer| cursor.place(composer.compose(record), composer.role()))
            .collect();

        debug!(count = fields.len(), "rendered label fields");
        Ok(fields)
    }

    /// Render a complete canvas ready for a print surface.
    pub fn render(
        &self,
        record: &LabelRecord,
        selector: TemplateSelector,
        geometry: PageGeometry,
        title: &str,
    ) -> Result<LabelCanvas> {
        let fields = self.render_fields(record, selector)?;
        Ok(LabelCanvas {
            title: title.to_owned(),
            geometry,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> LabelRecord {
        LabelRecord::new()
            .with(LabelField::Barcode, "123")
            .with(LabelField::Make, "Ford")
            .with(LabelField::Model, "Focus")
            .with(LabelField::Submodel, "")
            .with(LabelField::YearRange, "2010-2015")
            .with(LabelField::Oem, "OEM1")
            .with(LabelField::Description, "Desc")
            .with(LabelField::Category, "Fren")
            .with(LabelField::PartNumber, "P-9")
            .with(LabelField::Stock, "7")
            .with(LabelField::Location, "A3")
    }

    fn texts(fields: &[RenderedField]) -> Vec<&str> {
        fields.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn simple_template_prints_barcode_only() {
        let record = LabelRecord::new().with(LabelField::Barcode, "123");
        let fields = TemplateRenderer::new()
            .render_fields(&record, TemplateSelector::new(0))
            .unwrap();
        assert_eq!(texts(&fields), vec!["123"]);
    }

    #[test]
    fn standard_template_matches_reference_label() {
        let fields = TemplateRenderer::new()
            .render_fields(&full_record(), TemplateSelector::new(2))
            .unwrap();
        assert_eq!(
            texts(&fields),
            vec!["123", "Ford Focus  (2010-2015)", "OEM: OEM1\nDesc"]
        );
    }

    #[test]
    fn full_template_fires_every_composer() {
        let fields = TemplateRenderer::new()
            .render_fields(&full_record(), TemplateSelector::new(4))
            .unwrap();
        assert_eq!(
            texts(&fields),
            vec![
                "123",
                "Ford Focus  (2010-2015)",
                "OEM: OEM1\nDesc",
                "Kategori: Fren\nParça No: P-9",
                "Stok: 7\nKonum: A3",
            ]
        );
    }

    #[test]
    fn each_template_extends_the_previous() {
        for i in 1..TEMPLATE_TABLE.len() {
            let prev = TEMPLATE_TABLE[i - 1];
            let next = TEMPLATE_TABLE[i];
            assert_eq!(next.len(), prev.len() + 1);
            assert_eq!(&next[..prev.len()], prev);
        }
    }

    #[test]
    fn missing_keys_render_empty() {
        let fields = TemplateRenderer::new()
            .render_fields(&LabelRecord::new(), TemplateSelector::new(4))
            .unwrap();
        assert_eq!(
            texts(&fields),
            vec![
                "",
                "   ()",
                "OEM: \n",
                "Kategori: \nParça No: ",
                "Stok: \nKonum: ",
            ]
        );
    }

    #[test]
    fn out_of_range_selector_yields_blank_label() {
        let renderer = TemplateRenderer::new();
        for index in [-1, 5, 99, i64::MAX] {
            let fields = renderer
                .render_fields(&full_record(), TemplateSelector::new(index))
                .unwrap();
            assert!(fields.is_empty(), "index {index} should render nothing");
        }
    }

    #[test]
    fn strict_renderer_rejects_unknown_selector() {
        let err = TemplateRenderer::strict()
            .render_fields(&full_record(), TemplateSelector::new(5))
            .unwrap_err();
        assert!(err.is_invalid_arguments());
    }

    #[test]
    fn fields_are_stacked_by_fixed_step() {
        let fields = TemplateRenderer::new()
            .render_fields(&full_record(), TemplateSelector::new(4))
            .unwrap();
        let offsets: Vec<f64> = fields.iter().map(|f| f.vertical_offset()).collect();
        assert_eq!(offsets, vec![25.0, 0.0, -25.0, -50.0, -75.0]);
    }

    #[test]
    fn only_the_barcode_field_carries_the_barcode_role() {
        let fields = TemplateRenderer::new()
            .render_fields(&full_record(), TemplateSelector::new(4))
            .unwrap();
        let roles: Vec<FieldRole> = fields.iter().map(|f| f.role).collect();
        assert_eq!(roles[0], FieldRole::Barcode);
        assert!(roles[1..].iter().all(|&r| r == FieldRole::Text));
    }

    #[test]
    fn canvas_carries_geometry_and_title() {
        let canvas = TemplateRenderer::new()
            .render(
                &full_record(),
                TemplateSelector::new(1),
                PageGeometry::default(),
                "Barcode label",
            )
            .unwrap();
        assert_eq!(canvas.title, "Barcode label");
        assert_eq!(canvas.geometry, PageGeometry::default());
        assert_eq!(canvas.texts(), vec!["123", "Ford Focus  (2010-2015)"]);
    }
}
