// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// partlabel — Native print bridge.
//
// Defines the `PrintSurface` seam the dispatcher prints through, and picks
// the operating system's implementation: AppKit's print operation on macOS,
// a stub that always fails everywhere else.

pub mod traits;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(not(target_os = "macos"))]
pub mod stub;

pub use traits::PrintSurface;

/// The native print surface for the target operating system.
pub fn platform_surface() -> Box<dyn PrintSurface> {
    #[cfg(target_os = "macos")]
    {
        Box::new(macos::MacPrintSurface::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(stub::StubSurface)
    }
}
