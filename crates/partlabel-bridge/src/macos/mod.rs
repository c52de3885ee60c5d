// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// macOS print surface via objc2 / AppKit.
//
// Builds an NSView the size of the label, adds one plain NSTextField per
// rendered field, configures the shared NSPrintInfo with the label geometry
// and runs an NSPrintOperation with its print panel. `runOperation` is
// modal: this call blocks until the user prints or cancels.
//
// All AppKit calls must happen on the main thread. Off-main submissions are
// reported as failures without touching AppKit.

#![cfg(target_os = "macos")]

use objc2::rc::Retained;
use objc2::{ClassType, MainThreadMarker, msg_send};
use objc2_app_kit::{NSPrintInfo, NSPrintOperation, NSPrintPanel, NSTextField, NSView};
use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

use partlabel_core::{Frame, LabelCanvas, LabelError, PageGeometry, PrintOutcome};

use crate::traits::PrintSurface;

/// `NSPrintPanelShowsPrintSelection`.
const PANEL_SHOWS_PRINT_SELECTION: usize = 1 << 5;
/// `NSPrintPanelShowsPageSetupAccessory`.
const PANEL_SHOWS_PAGE_SETUP_ACCESSORY: usize = 1 << 8;

/// Prints labels through the system print dialog.
#[derive(Debug, Default)]
pub struct MacPrintSurface;

impl MacPrintSurface {
    pub fn new() -> Self {
        Self
    }
}

fn ns_rect(frame: &Frame) -> NSRect {
    NSRect::new(
        NSPoint::new(frame.x, frame.y),
        NSSize::new(frame.width, frame.height),
    )
}

/// Apply paper size and margins to the shared print info.
fn configure_print_info(geometry: &PageGeometry) -> Retained<NSPrintInfo> {
    // SAFETY: class method returning the process-wide shared instance; the
    // setters take plain geometry values.
    unsafe {
        let info: Retained<NSPrintInfo> = msg_send![NSPrintInfo::class(), sharedPrintInfo];
        let _: () = msg_send![&info, setPaperSize: NSSize::new(geometry.width, geometry.height)];
        let _: () = msg_send![&info, setLeftMargin: geometry.margin_left];
        let _: () = msg_send![&info, setRightMargin: geometry.margin_right];
        let _: () = msg_send![&info, setTopMargin: geometry.margin_top];
        let _: () = msg_send![&info, setBottomMargin: geometry.margin_bottom];
        info
    }
}

/// Build the printable view with one label per field.
fn build_view(canvas: &LabelCanvas, mtm: MainThreadMarker) -> Retained<NSView> {
    let g = canvas.geometry;
    let bounds = NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(g.width, g.height));
    let view = NSView::initWithFrame(mtm.alloc(), bounds);

    for field in &canvas.fields {
        let text = NSString::from_str(&field.text);
        let label = NSTextField::labelWithString(&text, mtm);
        // SAFETY: plain property setters on a freshly created control; the
        // main-thread marker above guarantees AppKit thread affinity.
        unsafe {
            let _: () = msg_send![&label, setFrame: ns_rect(&field.frame)];
            let _: () = msg_send![&label, setBezeled: false];
            let _: () = msg_send![&label, setDrawsBackground: false];
            let _: () = msg_send![&label, setEditable: false];
        }
        view.addSubview(&label);
    }

    view
}

impl PrintSurface for MacPrintSurface {
    fn name(&self) -> &str {
        "macOS print dialog"
    }

    fn submit(&self, canvas: &LabelCanvas) -> PrintOutcome {
        let Some(mtm) = MainThreadMarker::new() else {
            let err = LabelError::Bridge("AppKit printing must run on the main thread".into());
            return PrintOutcome::Failed(err.to_string());
        };

        tracing::info!(
            fields = canvas.fields.len(),
            width = canvas.geometry.width,
            height = canvas.geometry.height,
            "macOS: presenting NSPrintOperation"
        );

        let print_info = configure_print_info(&canvas.geometry);
        let view = build_view(canvas, mtm);
        let title = NSString::from_str(&canvas.title);

        // SAFETY: documented NSPrintPanel / NSPrintOperation selectors, all on
        // the main thread. `runOperation` spins a modal loop and returns once
        // the user has printed or cancelled.
        let printed: bool = unsafe {
            let panel: Retained<NSPrintPanel> = msg_send![NSPrintPanel::class(), printPanel];
            let options = PANEL_SHOWS_PAGE_SETUP_ACCESSORY | PANEL_SHOWS_PRINT_SELECTION;
            let _: () = msg_send![&panel, setOptions: options];

            let operation: Retained<NSPrintOperation> = msg_send![
                NSPrintOperation::class(),
                printOperationWithView: &*view,
                printInfo: &*print_info
            ];
            let _: () = msg_send![&operation, setPrintPanel: &*panel];
            let _: () = msg_send![&operation, setJobTitle: &*title];
            let _: () = msg_send![&operation, setShowsPrintPanel: true];

            msg_send![&operation, runOperation]
        };

        if printed {
            tracing::info!("macOS: print operation completed");
            PrintOutcome::Completed
        } else {
            tracing::info!("macOS: print operation cancelled or failed");
            PrintOutcome::Cancelled
        }
    }
}
