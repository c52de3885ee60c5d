// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use partlabel_render::symbol::{DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};

#[derive(Debug, Parser)]
#[command(
    name = "partlabel",
    about = "Render and print auto-parts barcode labels",
    author,
    version
)]
pub struct Cli {
    /// Configuration file (defaults to config.json in the data directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Handle a method call given as JSON ({"method": ..., "arguments": ...}).
    Call {
        /// Read the call from this file instead of stdin.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Print a label from a JSON record.
    Print {
        /// Template index (0 = barcode only … 4 = full detail).
        #[arg(short, long, allow_negative_numbers = true)]
        template: i64,
        /// Record file; stdin when omitted.
        #[arg(long, value_name = "PATH")]
        data: Option<PathBuf>,
    },
    /// Show the rendered fields without printing.
    Render {
        #[arg(short, long, allow_negative_numbers = true)]
        template: i64,
        #[arg(long, value_name = "PATH")]
        data: Option<PathBuf>,
        /// Also write the label as a PDF.
        #[arg(long, value_name = "OUT")]
        pdf: Option<PathBuf>,
    },
    /// List the label templates.
    Templates,
    /// Inventory barcode helpers.
    #[command(subcommand)]
    Barcode(BarcodeCommand),
}

#[derive(Debug, Subcommand)]
pub enum BarcodeCommand {
    /// Generate a code from category, item id and model years.
    Generate {
        #[arg(long)]
        category: String,
        #[arg(long)]
        item: i64,
        #[arg(long)]
        from: i32,
        #[arg(long)]
        to: i32,
    },
    /// Generate a code from catalogue ids (make, model, submodel, category).
    Item {
        #[arg(long)]
        make: i64,
        #[arg(long)]
        model: i64,
        #[arg(long)]
        submodel: i64,
        #[arg(long)]
        category: i64,
        #[arg(long)]
        from: i32,
        #[arg(long)]
        to: i32,
    },
    /// Check a code's shape and check digit.
    Validate { code: String },
    /// Write a valid code as a Code 128 PNG.
    Image {
        code: String,
        #[arg(long, value_name = "PATH")]
        out: PathBuf,
        #[arg(long, default_value_t = DEFAULT_IMAGE_WIDTH)]
        width: u32,
        #[arg(long, default_value_t = DEFAULT_IMAGE_HEIGHT)]
        height: u32,
    },
}
