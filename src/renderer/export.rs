// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Vector and raster export of rendered diagrams.
//!
//! A [`Diagram`] is first written as a standalone SVG document measured in
//! points, then rasterized with `resvg` at the requested resolution and
//! encoded as PNG with the matching physical pixel density.

use crate::renderer::colors::{to_svg_color, ColorScheme};
use crate::renderer::geometry::*;
use crate::renderer::stack_renderer::Diagram;
use log::{debug, info};
use resvg::{tiny_skia, usvg};
use std::fmt::Write as _;
use std::sync::Arc;

/// Resolution of exported images.
pub const DEFAULT_EXPORT_DPI: f32 = 300.0;

/// Refuse to allocate rasters beyond this many pixels.
pub const MAX_EXPORT_PIXELS: u64 = 200_000_000;

const METERS_PER_INCH: f64 = 0.0254;

pub struct DiagramExporter {
    color_scheme: ColorScheme,
    dpi: f32,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl DiagramExporter {
    pub fn new() -> Self {
        Self::with_dpi(DEFAULT_EXPORT_DPI)
    }

    pub fn with_dpi(dpi: f32) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!("Loaded {} font faces for export", fontdb.len());

        Self {
            color_scheme: ColorScheme::new(),
            dpi: if dpi > 0.0 { dpi } else { DEFAULT_EXPORT_DPI },
            fontdb: Arc::new(fontdb),
        }
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn pixel_size(&self, diagram: &Diagram) -> (u32, u32) {
        diagram.figure.to_pixels(self.dpi)
    }

    pub fn to_svg(&self, diagram: &Diagram) -> String {
        svg_document(diagram, &self.color_scheme)
    }

    /// Rasterize the diagram and encode it as PNG.
    pub fn to_png(&self, diagram: &Diagram) -> Result<Vec<u8>, ExportError> {
        let (width, height) = self.pixel_size(diagram);
        if u64::from(width) * u64::from(height) > MAX_EXPORT_PIXELS {
            return Err(ExportError::ImageTooLarge { width, height });
        }

        let svg = self.to_svg(diagram);
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| ExportError::Svg(e.to_string()))?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(ExportError::PixmapAllocation { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let scale = self.dpi / POINTS_PER_INCH as f32;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let bytes = self.encode_png(&pixmap)?;
        info!(
            "Rasterized {} layers to {width}x{height} PNG at {} DPI ({} bytes)",
            diagram.layer_count(),
            self.dpi,
            bytes.len()
        );
        Ok(bytes)
    }

    fn encode_png(&self, pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
        let pixels_per_meter = (self.dpi as f64 / METERS_PER_INCH).round() as u32;
        let mut buffer = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut buffer, pixmap.width(), pixmap.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: pixels_per_meter,
                yppu: pixels_per_meter,
                unit: png::Unit::Meter,
            }));

            // The background is opaque, so premultiplied data equals straight RGBA.
            let mut writer = encoder.write_header()?;
            writer.write_image_data(pixmap.data())?;
            writer.finish()?;
        }

        Ok(buffer)
    }
}

impl Default for DiagramExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Standalone SVG document for the diagram, sized in points.
pub fn svg_document(diagram: &Diagram, color_scheme: &ColorScheme) -> String {
    let mapping = diagram.plot_mapping();
    let width = diagram.figure.width_pt();
    let height = diagram.figure.height_pt();
    let outline = to_svg_color(color_scheme.outline);
    let text_color = to_svg_color(color_scheme.text_color);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}pt" height="{height}pt" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
        to_svg_color(color_scheme.background)
    );

    for command in &diagram.commands {
        let rect = &command.rect;
        let x = mapping.x_to_figure(rect.x_min);
        let y = mapping.y_to_figure(rect.y_top.max(rect.y_bottom));
        let w = mapping.x_to_figure(rect.x_max) - x;
        let h = mapping.length_to_figure(rect.height().abs());
        let fill = to_svg_color(color_scheme.get_fill_color(command.color_class));

        if command.outlined {
            let _ = writeln!(
                svg,
                r#"  <rect x="{x:.4}" y="{y:.4}" width="{w:.4}" height="{h:.4}" fill="{fill}" stroke="{outline}" stroke-width="{}"/>"#,
                color_scheme.outline_width_pt
            );
        } else {
            let _ = writeln!(
                svg,
                r#"  <rect x="{x:.4}" y="{y:.4}" width="{w:.4}" height="{h:.4}" fill="{fill}"/>"#
            );
        }
    }

    for label in diagram.commands.iter().filter_map(|c| c.label.as_ref()) {
        write_text(
            &mut svg,
            mapping.x_to_figure(label.x),
            mapping.y_to_figure(label.y),
            label,
            LABEL_FONT_SIZE_PT,
            &text_color,
        );
    }

    if let Some(title) = &diagram.title {
        let title_label = LabelPlacement {
            text: title.clone(),
            x: 0.0,
            y: 0.0,
            h_align: HorizontalAlign::Center,
            v_align: VerticalAlign::Center,
        };
        write_text(
            &mut svg,
            width * 0.5,
            mapping.plot_top() * 0.5,
            &title_label,
            TITLE_FONT_SIZE_PT,
            &text_color,
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Rasterize a diagram at the given resolution with a one-off exporter.
pub fn rasterize_png(diagram: &Diagram, dpi: f32) -> Result<Vec<u8>, ExportError> {
    DiagramExporter::with_dpi(dpi).to_png(diagram)
}

impl Diagram {
    pub fn to_svg(&self) -> String {
        svg_document(self, &ColorScheme::new())
    }
}

fn write_text(
    svg: &mut String,
    x: f64,
    y: f64,
    label: &LabelPlacement,
    font_size: f64,
    color: &str,
) {
    let anchor = match label.h_align {
        HorizontalAlign::Left => "start",
        HorizontalAlign::Center => "middle",
        HorizontalAlign::Right => "end",
    };
    let baseline = match label.v_align {
        VerticalAlign::Top => "hanging",
        VerticalAlign::Center => "central",
        VerticalAlign::Bottom => "alphabetic",
    };

    let _ = writeln!(
        svg,
        r#"  <text x="{x:.4}" y="{y:.4}" font-family="sans-serif" font-size="{font_size}" fill="{color}" text-anchor="{anchor}" dominant-baseline="{baseline}">{}</text>"#,
        escape_xml(&label.text)
    );
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to build SVG document: {0}")]
    Svg(String),

    #[error("Image of {width}x{height} pixels is too large to export")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("Failed to allocate a {width}x{height} pixel image")]
    PixmapAllocation { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),
}
