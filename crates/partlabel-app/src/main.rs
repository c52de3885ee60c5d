// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// partlabel — barcode label printing bridge.
//
// Entry point. Initialises logging, loads configuration and runs one
// command: a raw method call, a direct print, a dry-run render, or one of
// the barcode helpers.

mod cli;
mod services;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{BarcodeCommand, Cli, Command};
use partlabel_core::{LabelRecord, TemplateKind, TemplateSelector, barcode};
use partlabel_print::MethodCall;
use partlabel_render::{Code128Symbol, LabelPdfWriter};
use partlabel_render::composer::composers_for;
use services::label_service::LabelService;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "partlabel failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Call { file } => {
            let service = LabelService::init(cli.config.as_deref())?;
            let raw = read_input(file.as_deref())?;
            let call: MethodCall =
                serde_json::from_str(&raw).context("method call is not valid JSON")?;
            tracing::debug!(channel = %service.config().channel_name, "dispatching call");
            let response = service.call(&call);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Print { template, data } => {
            let service = LabelService::init(cli.config.as_deref())?;
            let record = read_record(data.as_deref())?;
            let job = service.print(&record, TemplateSelector::new(template))?;
            println!("{}", serde_json::to_string_pretty(&job)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Render {
            template,
            data,
            pdf,
        } => {
            let service = LabelService::init(cli.config.as_deref())?;
            let record = read_record(data.as_deref())?;
            let canvas = service.render(&record, TemplateSelector::new(template))?;
            if let Some(out) = pdf {
                LabelPdfWriter::new()
                    .write_to_file(&canvas, &out)
                    .with_context(|| format!("writing {}", out.display()))?;
            }
            println!("{}", serde_json::to_string_pretty(&canvas.fields)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Templates => {
            for kind in TemplateKind::ALL {
                let selector = TemplateSelector::new(kind.index() as i64);
                let composers: Vec<String> = composers_for(selector)
                    .iter()
                    .map(|c| {
                        let keys: Vec<&str> = c.keys().iter().map(|k| k.key()).collect();
                        format!("{c:?}({})", keys.join(","))
                    })
                    .collect();
                println!("{} {:<9} {}", kind.index(), kind.name(), composers.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Barcode(BarcodeCommand::Generate {
            category,
            item,
            from,
            to,
        }) => {
            println!("{}", barcode::generate(&category, item, from, to)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Barcode(BarcodeCommand::Item {
            make,
            model,
            submodel,
            category,
            from,
            to,
        }) => {
            let code = barcode::generate_for_item(make, model, submodel, category, from, to)?;
            println!("{code}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Barcode(BarcodeCommand::Image {
            code,
            out,
            width,
            height,
        }) => {
            write_barcode_png(&code, &out, width, height)?;
            println!("{}", out.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Barcode(BarcodeCommand::Validate { code }) => {
            let valid = barcode::validate(&code);
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Encode `code` as Code 128 and write it to `out` as a PNG.
fn write_barcode_png(code: &str, out: &Path, width: u32, height: u32) -> Result<()> {
    let png = Code128Symbol::encode(code)?.to_png(width, height)?;
    std::fs::write(out, png).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(code, path = %out.display(), "barcode image written");
    Ok(())
}

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn read_record(path: Option<&Path>) -> Result<LabelRecord> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("label data must be a JSON object")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barcode_png_is_written_for_valid_code() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("code.png");
        write_barcode_png("BR00004210155", &out, 300, 100).unwrap();
        assert!(std::fs::read(&out).unwrap().starts_with(b"\x89PNG"));
    }

    #[test]
    fn barcode_png_refuses_invalid_code() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("code.png");
        assert!(write_barcode_png("BR00004210154", &out, 300, 100).is_err());
        assert!(!out.exists());
    }
}
