// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// partlabel Print — the print dispatcher, the `printBarcode` method channel,
// and the non-native print surfaces (IPP network printers and a PDF output
// directory). This crate ties the renderer in `partlabel-render` to a
// `PrintSurface` from `partlabel-bridge`.

pub mod channel;
pub mod dispatcher;
pub mod ipp_surface;
pub mod pdf_surface;

pub use channel::{MethodCall, MethodResponse, PrintChannel};
pub use dispatcher::PrintDispatcher;
pub use ipp_surface::IppSurface;
pub use pdf_surface::{PdfDirectorySurface, StoredLabel};

use partlabel_bridge::PrintSurface;
use partlabel_core::config::SurfaceConfig;
use partlabel_core::error::Result;

/// Build the surface selected in configuration.
pub fn surface_from_config(config: &SurfaceConfig) -> Result<Box<dyn PrintSurface>> {
    Ok(match config {
        SurfaceConfig::Native => partlabel_bridge::platform_surface(),
        SurfaceConfig::Ipp { uri } => Box::new(IppSurface::new(uri)?),
        SurfaceConfig::PdfDirectory { path } => Box::new(PdfDirectorySurface::new(path)?),
    })
}

#[cfg(test)]
pub(crate) mod testing;
