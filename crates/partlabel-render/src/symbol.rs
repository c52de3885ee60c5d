// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Code 128 symbols for inventory barcodes.
//
// Only codes that pass `barcode::validate` are encoded. The whole code is
// written in code set B, which covers both the letter prefix and the digits.

use barcoders::sym::code128::Code128;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use partlabel_core::barcode;
use partlabel_core::error::{LabelError, Result};
use tracing::{debug, instrument};

/// Start character selecting code set B.
const CODE_SET_B: char = 'Ɓ';

/// Default PNG size, matching the inventory backend's label images.
pub const DEFAULT_IMAGE_WIDTH: u32 = 300;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 100;

/// An encoded barcode: one entry per module, `1` for a bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code128Symbol {
    code: String,
    modules: Vec<u8>,
}

impl Code128Symbol {
    /// Validate `code` and encode it.
    pub fn encode(code: &str) -> Result<Self> {
        if !barcode::validate(code) {
            return Err(LabelError::Barcode("invalid barcode format".into()));
        }

        let data = format!("{CODE_SET_B}{code}");
        let symbol = Code128::new(&data)
            .map_err(|e| LabelError::Barcode(format!("failed to encode barcode: {e}")))?;
        let modules = symbol.encode();
        debug!(code, modules = modules.len(), "encoded Code 128 symbol");

        Ok(Self {
            code: code.to_owned(),
            modules,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn modules(&self) -> &[u8] {
        &self.modules
    }

    /// Dark runs as `(first module, run length)`, left to right.
    pub fn bars(&self) -> Vec<(usize, usize)> {
        let mut bars = Vec::new();
        let mut start = None;
        for (i, &m) in self.modules.iter().enumerate() {
            match (m == 1, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    bars.push((s, i - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            bars.push((s, self.modules.len() - s));
        }
        bars
    }

    /// Render as a greyscale PNG of `width`×`height` pixels.
    ///
    /// Every module gets the same whole number of pixels; leftover width is
    /// split evenly into quiet zones on both sides.
    #[instrument(skip(self), fields(code = %self.code))]
    pub fn to_png(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        let count = self.modules.len() as u32;
        if count == 0 || width < count || height == 0 {
            return Err(LabelError::Barcode(format!(
                "cannot scale {count} modules to {width}x{height}"
            )));
        }

        let module_px = width / count;
        let offset = (width - count * module_px) / 2;
        let image = GrayImage::from_fn(width, height, |x, _| {
            let dark = x >= offset
                && self
                    .modules
                    .get(((x - offset) / module_px) as usize)
                    .is_some_and(|&m| m == 1);
            if dark { Luma([0u8]) } else { Luma([255u8]) }
        });

        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        DynamicImage::ImageLuma8(image)
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| LabelError::Barcode(format!("failed to encode PNG: {e}")))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "BR00004210155";

    #[test]
    fn encodes_valid_code() {
        let symbol = Code128Symbol::encode(CODE).unwrap();
        assert_eq!(symbol.code(), CODE);
        // Start, thirteen data symbols, check and stop.
        assert!(symbol.modules().len() >= 15 * 11 + 13);
        assert!(symbol.modules().iter().all(|&m| m <= 1));

        let other = Code128Symbol::encode("FR00000120001").unwrap();
        assert_ne!(symbol.modules(), other.modules());
    }

    #[test]
    fn rejects_codes_failing_validation() {
        for code in ["123", "BR00004210154", "C3100200310153"] {
            assert!(
                matches!(Code128Symbol::encode(code), Err(LabelError::Barcode(_))),
                "{code} should be rejected"
            );
        }
    }

    #[test]
    fn bars_cover_every_dark_module() {
        let symbol = Code128Symbol::encode(CODE).unwrap();
        let dark: usize = symbol.modules().iter().filter(|&&m| m == 1).count();
        let covered: usize = symbol.bars().iter().map(|&(_, len)| len).sum();
        assert_eq!(dark, covered);
        assert!(symbol.bars().iter().all(|&(_, len)| (1..=4).contains(&len)));
    }

    #[test]
    fn png_has_requested_size_and_quiet_zone() {
        let symbol = Code128Symbol::encode(CODE).unwrap();
        let png = symbol
            .to_png(DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_HEIGHT)
            .unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (300, 100));

        assert_eq!(decoded.get_pixel(0, 50).0, [255]);
        assert_eq!(decoded.get_pixel(299, 50).0, [255]);
        let dark = (0..300).filter(|&x| decoded.get_pixel(x, 50).0 == [0]).count();
        let module_px = 300 / symbol.modules().len();
        let expected = symbol.modules().iter().filter(|&&m| m == 1).count();
        assert_eq!(dark, expected * module_px);
    }

    #[test]
    fn png_narrower_than_symbol_is_an_error() {
        let symbol = Code128Symbol::encode(CODE).unwrap();
        assert!(symbol.to_png(50, 100).is_err());
    }
}
