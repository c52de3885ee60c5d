// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label service — owns the loaded configuration and the print channel built
// from it.

use std::path::{Path, PathBuf};

use partlabel_bridge::PrintSurface;
use partlabel_core::error::Result;
use partlabel_core::{LabelCanvas, LabelJob, LabelRecord, PrintConfig, TemplateSelector};
use partlabel_print::{MethodCall, MethodResponse, PrintChannel, PrintDispatcher};
use tracing::info;

use super::data_dir;

/// Everything the CLI needs to render and print labels.
pub struct LabelService {
    config: PrintConfig,
    channel: PrintChannel<Box<dyn PrintSurface>>,
}

impl LabelService {
    /// Load configuration and build the channel.
    ///
    /// An explicit `config_path` must be readable; otherwise `config.json` in
    /// the data directory is used when present, defaults when not.
    pub fn init(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => PrintConfig::load_from(path)?,
            None => {
                let dir: PathBuf = data_dir::data_dir()?;
                info!(path = %dir.display(), "loading configuration");
                PrintConfig::load_or_default(&dir)
            }
        };
        Self::from_config(config)
    }

    pub fn from_config(config: PrintConfig) -> Result<Self> {
        let surface = partlabel_print::surface_from_config(&config.surface)?;
        info!(surface = surface.name(), channel = %config.channel_name, "label service ready");

        let dispatcher = PrintDispatcher::from_config(surface, &config);
        let channel = PrintChannel::new(config.channel_name.clone(), dispatcher);
        Ok(Self { config, channel })
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Handle a raw method call.
    pub fn call(&self, call: &MethodCall) -> MethodResponse {
        self.channel.handle(call)
    }

    /// Print a record directly, bypassing argument parsing.
    pub fn print(&self, record: &LabelRecord, selector: TemplateSelector) -> Result<LabelJob> {
        self.channel.dispatcher().print(record, selector)
    }

    /// Render without printing.
    pub fn render(&self, record: &LabelRecord, selector: TemplateSelector) -> Result<LabelCanvas> {
        self.channel.dispatcher().renderer().render(
            record,
            selector,
            self.config.geometry,
            &self.config.job_title,
        )
    }
}

#[cfg(test)]
mod tests {
    use partlabel_core::LabelField;
    use partlabel_core::config::SurfaceConfig;
    use serde_json::json;

    use super::*;

    fn pdf_service(dir: &Path) -> LabelService {
        LabelService::from_config(PrintConfig {
            surface: SurfaceConfig::PdfDirectory {
                path: dir.to_path_buf(),
            },
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn call_through_pdf_surface_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let service = pdf_service(dir.path());

        let response = service.call(&MethodCall::new(
            "printBarcode",
            json!({ "templateData": { "barcode": "BR00004210155" }, "templateIndex": 3 }),
        ));
        assert!(response.is_success());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn render_uses_configured_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let service = pdf_service(dir.path());
        let record = LabelRecord::new().with(LabelField::Barcode, "1");

        let canvas = service.render(&record, TemplateSelector::new(0)).unwrap();
        assert_eq!(canvas.geometry, service.config().geometry);
        assert_eq!(canvas.title, service.config().job_title);
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(LabelService::init(Some(missing.as_path())).is_err());
    }
}
