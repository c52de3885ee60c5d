// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// partlabel — Core types, error definitions, configuration and barcode
// generation shared across all crates.

pub mod barcode;
pub mod config;
pub mod error;
pub mod types;

pub use config::PrintConfig;
pub use error::LabelError;
pub use types::*;
