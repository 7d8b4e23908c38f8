// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::renderer::{Diagram, DiagramExporter, ExportError};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// File name offered when downloading the interactive diagram.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "pcb_stackup.png";

/// File name written by the static preset.
pub const LEGACY_EXPORT_FILE_NAME: &str = "pcb_stackup_vertical.png";

pub const PNG_MIME_TYPE: &str = "image/png";
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    /// Pick the format from the file extension; anything but `.svg` is PNG.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let is_svg = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(ExportFormat::Svg.extension()))
            .unwrap_or(false);

        if is_svg {
            ExportFormat::Svg
        } else {
            ExportFormat::Png
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => PNG_MIME_TYPE,
            ExportFormat::Svg => SVG_MIME_TYPE,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

/// Append `.png` unless the path already carries a PNG extension.
pub fn ensure_png_extension<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let has_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(ExportFormat::Png.extension()))
        .unwrap_or(false);

    if has_png {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(ExportFormat::Png.extension());
        PathBuf::from(name)
    }
}

/// Get human-readable file size string
pub fn format_file_size(size_bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    const THRESHOLD: u64 = 1024;

    if size_bytes < THRESHOLD {
        return format!("{size_bytes} B");
    }

    let mut size = size_bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD as f64 && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD as f64;
        unit_index += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_index])
}

/// Encode the diagram in the format implied by `path` and write it.
///
/// Returns the number of bytes written.
pub fn export_diagram<P: AsRef<Path>>(
    diagram: &Diagram,
    path: P,
    exporter: &DiagramExporter,
) -> Result<u64, FileError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(FileError::DirectoryNotFound(parent.to_path_buf()));
        }
    }

    let format = ExportFormat::from_path(path);
    let bytes = match format {
        ExportFormat::Png => exporter.to_png(diagram)?,
        ExportFormat::Svg => exporter.to_svg(diagram).into_bytes(),
    };

    fs::write(path, &bytes).map_err(|e| FileError::WriteError(path.to_path_buf(), e))?;

    let size = bytes.len() as u64;
    info!(
        "Wrote {} ({}, {})",
        path.display(),
        format.mime_type(),
        format_file_size(size)
    );
    Ok(size)
}

/// File operation errors
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to write file {0}: {1}")]
    WriteError(PathBuf, std::io::Error),

    #[error("Failed to export image: {0}")]
    Export(#[from] ExportError),
}
