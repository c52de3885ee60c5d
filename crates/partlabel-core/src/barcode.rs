// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inventory barcode generation and validation.
//
// Code layout: `XXnnnnnnYYZZv`
//   XX     — category prefix (first two characters, uppercased)
//   nnnnnn — item id, zero-padded to six digits
//   YY ZZ  — last two digits of the first and last model year
//   v      — check digit over the preceding twelve characters

use tracing::debug;

use crate::error::{LabelError, Result};

/// Length of a well-formed code, check digit included.
pub const BARCODE_LEN: usize = 13;

/// Build a code for an item.
pub fn generate(category: &str, item_id: i64, year_from: i32, year_to: i32) -> Result<String> {
    let upper = category.to_uppercase();
    let prefix: String = upper.chars().take(2).collect();
    if prefix.chars().count() < 2 {
        return Err(LabelError::Barcode("category name too short".into()));
    }

    let base = format!(
        "{prefix}{item_id:06}{:02}{:02}",
        year_from % 100,
        year_to % 100
    );
    let check = check_digit(&base);
    debug!(%base, check, "generated barcode");

    Ok(format!("{base}{check}"))
}

/// Build a code from catalogue ids.
///
/// The category prefix becomes `C<category_id>` and the item id packs the
/// make, model and submodel ids as `make * 1_000_000 + model * 1_000 + submodel`.
pub fn generate_for_item(
    make_id: i64,
    model_id: i64,
    submodel_id: i64,
    category_id: i64,
    year_from: i32,
    year_to: i32,
) -> Result<String> {
    if make_id <= 0 || model_id <= 0 || submodel_id <= 0 || category_id <= 0 {
        return Err(LabelError::Barcode("invalid input parameters".into()));
    }
    if year_from <= 0 || year_to <= 0 || year_from > year_to {
        return Err(LabelError::Barcode("invalid year range".into()));
    }

    let item_id = make_id
        .checked_mul(1_000_000)
        .zip(model_id.checked_mul(1_000))
        .and_then(|(make, model)| make.checked_add(model))
        .and_then(|packed| packed.checked_add(submodel_id))
        .ok_or_else(|| LabelError::Barcode("invalid input parameters".into()))?;
    generate(&format!("C{category_id}"), item_id, year_from, year_to)
        .map_err(|e| LabelError::Barcode(format!("failed to generate barcode: {e}")))
}

/// Check length, shape and check digit.
pub fn validate(code: &str) -> bool {
    if code.len() != BARCODE_LEN {
        return false;
    }

    let bytes = code.as_bytes();
    let shape_ok = bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..].iter().all(u8::is_ascii_digit);
    if !shape_ok {
        return false;
    }

    let expected = u32::from(bytes[12] - b'0');
    check_digit(&code[..12]) == expected
}

/// Weighted sum over character values: weight 3 at even byte offsets, 1 at
/// odd ones.
fn check_digit(base: &str) -> u32 {
    let sum: u32 = base
        .char_indices()
        .map(|(i, c)| if i % 2 == 0 { c as u32 * 3 } else { c as u32 })
        .sum();
    (10 - sum % 10) % 10
}
