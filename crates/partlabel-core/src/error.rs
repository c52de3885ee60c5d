// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for partlabel.

use thiserror::Error;

/// Top-level error type for all partlabel operations.
///
/// Only `InvalidArguments` and `PrintFailed` ever reach a method-call
/// caller; the remaining variants belong to the surfaces and tooling and are
/// folded into a print failure before they cross that boundary.
#[derive(Debug, Error)]
pub enum LabelError {
    // -- Request errors --
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("print operation failed")]
    PrintFailed,

    // -- Surface errors --
    #[error("IPP request failed: {0}")]
    IppRequest(String),

    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("native printing not available on this platform")]
    PlatformUnavailable,

    // -- Tooling --
    #[error("barcode generation failed: {0}")]
    Barcode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LabelError {
    /// Whether this error belongs to the request-shape category rather than
    /// the print pipeline.
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Self::InvalidArguments(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelError>;
