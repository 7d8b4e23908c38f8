// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! PCB Stackup Library
//!
//! A Rust library for drawing the vertical cross-section of a printed circuit
//! board stackup from a list of layer thicknesses.
//!
//! # Features
//!
//! - Parse comma-separated thickness lists with per-entry error reporting
//! - Stack layers bottom-up and alternate insulator / copper coloring
//! - Label every layer with its value and an optional unit suffix
//! - Export diagrams as SVG or as PNG at a chosen resolution (300 DPI by default)
//! - Interactive GUI with a recalculating form, pan and zoom
//!
//! # Usage
//!
//! ```rust,no_run
//! use pcb_stackup::{RenderOptions, StackupRenderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = StackupRenderer::new(RenderOptions::interactive());
//! let diagram = renderer.render("0.01,0.0175,0.196,0.0175,0.01")?;
//!
//! for command in &diagram.commands {
//!     println!(
//!         "layer {} at {} height {} label {:?}",
//!         command.index,
//!         command.bottom_offset(),
//!         command.height(),
//!         command.label_text()
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Modules:
//!
//! - `data`: Layers and the stacked board with cumulative offsets
//! - `parser`: Thickness list parsing
//! - `renderer`: Draw commands, figure geometry, colors and image export
//! - `gui`: eframe application, form, canvas and download flow
//! - `utils`: Output file helpers

pub mod data;
pub mod gui;
pub mod parser;
pub mod renderer;
pub mod utils;


pub use data::{ColorClass, Layer, Stackup, StackupError, StackupSummary};

pub use parser::{parse_thicknesses, ParseError, ThicknessParser};

pub use renderer::{
    rasterize_png, render_legacy_stackup, ColorScheme, Diagram, DiagramExporter, DrawCommand,
    ExportError, RenderError, RenderOptions, StackupRenderer, ViewTransform,
    DEFAULT_EXPORT_DPI, DEFAULT_THICKNESS_INPUT,
};

pub use utils::{export_diagram, FileError, DEFAULT_EXPORT_FILE_NAME, PNG_MIME_TYPE};

pub use gui::{InputPanel, MainWindow, StackViewer, Toolbar};

/// Crate version, from Cargo metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// One-line `name vX.Y.Z - description` banner.
pub fn get_library_info() -> String {
    format!("{NAME} v{VERSION} - {DESCRIPTION}")
}

/// Render a thickness list with the interactive defaults and write it to `path`.
///
/// The format follows the extension: `.svg` writes the vector document,
/// anything else a PNG at [`DEFAULT_EXPORT_DPI`].
///
/// # Example
///
/// ```rust,no_run
/// use pcb_stackup::export_stackup_to_file;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let diagram = export_stackup_to_file("0.01,0.0175,0.196", "pcb_stackup.png")?;
/// println!("Wrote {} layers", diagram.layer_count());
/// # Ok(())
/// # }
/// ```
pub fn export_stackup_to_file<P: AsRef<std::path::Path>>(
    thicknesses: &str,
    path: P,
) -> Result<Diagram, Box<dyn std::error::Error>> {
    let diagram = StackupRenderer::new(RenderOptions::interactive()).render(thicknesses)?;
    export_diagram(&diagram, path, &DiagramExporter::new())?;
    Ok(diagram)
}

/// Settings the GUI starts with when nothing is overridden.
pub fn get_default_config() -> AppConfig {
    AppConfig::default()
}

/// Window and form settings for [`run_app`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    pub window_width: f32,
    pub window_height: f32,
    /// Thickness list shown when the form opens
    pub default_thickness_input: String,
    /// Whether the first and last layer start unlabelled
    pub hide_end_labels: bool,
    /// Suffix appended to every label
    pub unit_suffix: String,
    /// Resolution of downloaded images
    pub export_dpi: f32,
    /// File name offered by the save dialog
    pub export_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: format!("{NAME} v{VERSION}"),
            window_width: 1000.0,
            window_height: 760.0,
            default_thickness_input: DEFAULT_THICKNESS_INPUT.to_string(),
            hide_end_labels: true,
            unit_suffix: "mm".to_string(),
            export_dpi: DEFAULT_EXPORT_DPI,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

/// Open the stackup window and block until it is closed.
///
/// # Example
///
/// ```rust,no_run
/// use pcb_stackup::{run_app, get_default_config};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = get_default_config();
/// run_app(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run_app(config: AppConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title(&config.window_title),
        ..Default::default()
    };

    let app = MainWindow::from_config(&config);

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_info() {
        let info = get_library_info();
        assert!(info.contains("pcb-stackup"));
        assert!(info.contains("0.1.0"));
    }

    #[test]
    fn test_app_config() {
        let config = AppConfig::default();
        assert!(config.window_width > 0.0);
        assert!(config.window_height > 0.0);
        assert!(config.hide_end_labels);
        assert_eq!(config.unit_suffix, "mm");
        assert_eq!(config.export_dpi, 300.0);
        assert_eq!(config.export_file_name, "pcb_stackup.png");
        assert_eq!(config.default_thickness_input, DEFAULT_THICKNESS_INPUT);

        let default_config = get_default_config();
        assert_eq!(config.window_width, default_config.window_width);
        assert_eq!(config.window_height, default_config.window_height);
    }

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.trim().is_empty());
        assert!(!NAME.trim().is_empty());
        assert!(!DESCRIPTION.trim().is_empty());

        assert_eq!(NAME, "pcb-stackup");
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_export_stackup_to_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("stackup.svg");

        let diagram = export_stackup_to_file("1,2,3", &path).unwrap();
        assert_eq!(diagram.layer_count(), 3);
        assert!(std::fs::read_to_string(&path).unwrap().contains(">2 mm</text>"));

        assert!(export_stackup_to_file("1,x", &path).is_err());
    }

    #[test]
    fn test_config_clone_and_debug() {
        let config = AppConfig::default();
        let cloned = config.clone();

        assert_eq!(config.window_width, cloned.window_width);
        assert_eq!(config.unit_suffix, cloned.unit_suffix);

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("AppConfig"));
        assert!(debug_str.contains("window_title"));
    }
}
