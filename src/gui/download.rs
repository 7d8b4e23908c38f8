// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::renderer::{Diagram, DiagramExporter};
use crate::utils::{ensure_png_extension, export_diagram, format_file_size, ExportFormat};
use log::{info, warn};
use poll_promise::Promise;
use rfd::AsyncFileDialog;
use std::path::{Path, PathBuf};

/// Drives the native save dialog for the PNG download.
///
/// The dialog runs on a background thread; the diagram captured when the
/// download started is written once a path comes back.
pub struct DownloadManager {
    file_name: String,
    pending_diagram: Option<Diagram>,
    save_dialog_promise: Option<Promise<Option<PathBuf>>>,
    pub last_saved: Option<PathBuf>,
}

impl DownloadManager {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            pending_diagram: None,
            save_dialog_promise: None,
            last_saved: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.save_dialog_promise.is_some()
    }

    /// Open the save dialog for `diagram`. Ignored while a dialog is open.
    pub fn start(&mut self, diagram: &Diagram) {
        if self.is_pending() {
            return;
        }

        let task = AsyncFileDialog::new()
            .add_filter("PNG Image", &[ExportFormat::Png.extension()])
            .set_title("Save Stackup Image")
            .set_file_name(&self.file_name)
            .save_file();

        let promise = Promise::spawn_thread("save_dialog", move || {
            pollster::block_on(async move { task.await.map(|handle| handle.path().to_path_buf()) })
        });

        self.pending_diagram = Some(diagram.clone());
        self.save_dialog_promise = Some(promise);
    }

    /// Check the dialog and write the file once a path has been chosen.
    pub fn poll(&mut self, exporter: &DiagramExporter) -> Option<DownloadOutcome> {
        let chosen = self.save_dialog_promise.as_ref()?.ready()?.clone();
        self.save_dialog_promise = None;

        let diagram = self.pending_diagram.take()?;
        Some(match chosen {
            Some(path) => self.save(&diagram, &path, exporter),
            None => {
                info!("Download cancelled");
                DownloadOutcome::Cancelled
            }
        })
    }

    /// Write `diagram` as PNG to `path`, adding the extension if missing.
    pub fn save(
        &mut self,
        diagram: &Diagram,
        path: &Path,
        exporter: &DiagramExporter,
    ) -> DownloadOutcome {
        let path = ensure_png_extension(path);
        match export_diagram(diagram, &path, exporter) {
            Ok(size) => {
                info!("Saved {} ({})", path.display(), format_file_size(size));
                self.last_saved = Some(path.clone());
                DownloadOutcome::Saved(path)
            }
            Err(e) => {
                warn!("Download failed: {e}");
                DownloadOutcome::Failed(e.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    Cancelled,
    Failed(String),
}
