// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print-to-file surface: each label becomes `<sha256>.pdf` in a directory,
// named by a hash of the canvas so the same label always maps to one file.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::info;

use partlabel_bridge::PrintSurface;
use partlabel_core::error::Result;
use partlabel_core::{LabelCanvas, PrintOutcome};
use partlabel_render::LabelPdfWriter;

/// Writes labels as PDF files named by content hash.
pub struct PdfDirectorySurface {
    dir: PathBuf,
    writer: LabelPdfWriter,
}

impl PdfDirectorySurface {
    /// Use `dir` as the output directory, creating it if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            writer: LabelPdfWriter::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render and store `canvas`.
    ///
    /// Reprinting an identical canvas finds its file already in place and
    /// leaves it untouched. PDF bytes carry a timestamp, so the name comes
    /// from the canvas itself.
    pub fn write(&self, canvas: &LabelCanvas) -> Result<StoredLabel> {
        let path = self.path_for(canvas)?;
        if path.exists() {
            info!(path = %path.display(), "identical label already on disk, not rewritten");
            return Ok(StoredLabel {
                path,
                already_present: true,
            });
        }
        let bytes = self.writer.create(canvas)?;
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "label written");
        Ok(StoredLabel {
            path,
            already_present: false,
        })
    }

    fn path_for(&self, canvas: &LabelCanvas) -> Result<PathBuf> {
        let key = serde_json::to_vec(canvas)?;
        Ok(self.dir.join(format!("{}.pdf", hash_bytes(&key))))
    }
}

/// Where a label landed, and whether an identical file was already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLabel {
    pub path: PathBuf,
    pub already_present: bool,
}

impl PrintSurface for PdfDirectorySurface {
    fn name(&self) -> &str {
        "pdf directory"
    }

    fn submit(&self, canvas: &LabelCanvas) -> PrintOutcome {
        match self.write(canvas) {
            Ok(_) => PrintOutcome::Completed,
            Err(e) => PrintOutcome::Failed(e.to_string()),
        }
    }
}

/// Lower-case hex SHA-256 of `data`.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_canvas;

    #[test]
    fn submit_writes_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let surface = PdfDirectorySurface::new(dir.path().join("out")).unwrap();

        assert_eq!(surface.submit(&sample_canvas()), PrintOutcome::Completed);

        let files: Vec<_> = std::fs::read_dir(surface.dir()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let path = files[0].as_ref().unwrap().path();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn reprinting_identical_label_reuses_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let surface = PdfDirectorySurface::new(dir.path()).unwrap();

        let first = surface.write(&sample_canvas()).unwrap();
        assert!(!first.already_present);
        let written = std::fs::metadata(&first.path).unwrap().modified().unwrap();

        let second = surface.write(&sample_canvas()).unwrap();
        assert!(second.already_present);
        assert_eq!(second.path, first.path);
        assert_eq!(
            std::fs::metadata(&second.path).unwrap().modified().unwrap(),
            written
        );
        assert_eq!(surface.submit(&sample_canvas()), PrintOutcome::Completed);
        assert_eq!(std::fs::read_dir(surface.dir()).unwrap().count(), 1);
    }

    #[test]
    fn different_labels_get_different_files() {
        let dir = tempfile::tempdir().unwrap();
        let surface = PdfDirectorySurface::new(dir.path()).unwrap();

        let mut other = sample_canvas();
        other.title = "another label".into();
        let a = surface.write(&sample_canvas()).unwrap();
        let b = surface.write(&other).unwrap();
        assert_ne!(a.path, b.path);
        assert!(!b.already_present);
    }

    #[test]
    fn hash_is_hex_sha256() {
        assert_eq!(
            hash_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
