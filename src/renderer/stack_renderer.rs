// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::data::{Stackup, StackupError, StackupSummary};
use crate::parser::{ParseError, ThicknessParser};
use crate::renderer::geometry::*;
use log::debug;
use serde::{Deserialize, Serialize};

/// Conversion factor from mils to millimetres.
pub const MILS_TO_MM: f64 = 0.0254;

/// Layer thicknesses of the static preset, in mils, bottom first.
pub const LEGACY_STACKUP_MILS: [f64; 5] = [0.4, 1.4, 12.6, 1.4, 0.4];

/// Sample input shown in the interactive form, in millimetres.
pub const DEFAULT_THICKNESS_INPUT: &str =
    "0.01,0.0175,0.1960,0.0350,1.0300,0.0350,0.1960,0.0175,0.01";

pub const LEGACY_TITLE: &str = "Stackup REAL thickness";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Appended to every label after a space, when non-empty.
    pub unit_suffix: String,
    /// Suppress labels on the first and the last layer.
    pub hide_end_labels: bool,
    /// Multiplies every value before geometry; labels keep the raw value.
    pub unit_factor: f64,
    pub sizing: SizingRule,
    pub title: Option<String>,
}

impl RenderOptions {
    /// Defaults of the interactive form.
    pub fn interactive() -> Self {
        Self {
            unit_suffix: "mm".to_string(),
            hide_end_labels: true,
            unit_factor: 1.0,
            sizing: SizingRule::Interactive,
            title: None,
        }
    }

    /// Static preset: mil input drawn in millimetres, mil labels.
    pub fn legacy() -> Self {
        Self {
            unit_suffix: "mil".to_string(),
            hide_end_labels: false,
            unit_factor: MILS_TO_MM,
            sizing: SizingRule::Legacy,
            title: Some(LEGACY_TITLE.to_string()),
        }
    }

    pub fn with_unit_suffix(mut self, unit_suffix: impl Into<String>) -> Self {
        self.unit_suffix = unit_suffix.into();
        self
    }

    pub fn with_hide_end_labels(mut self, hide_end_labels: bool) -> Self {
        self.hide_end_labels = hide_end_labels;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            unit_suffix: String::new(),
            hide_end_labels: false,
            unit_factor: 1.0,
            sizing: SizingRule::Interactive,
            title: None,
        }
    }
}

/// Fully resolved drawing of a stackup, ready for any surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub commands: Vec<DrawCommand>,
    pub figure: FigureSize,
    pub bounds: DataBounds,
    pub title: Option<String>,
    pub summary: StackupSummary,
}

impl Diagram {
    pub fn layer_count(&self) -> usize {
        self.commands.len()
    }

    pub fn total_height(&self) -> f64 {
        self.commands.iter().map(DrawCommand::height).sum()
    }

    pub fn plot_mapping(&self) -> PlotMapping {
        PlotMapping::new(self.figure, self.bounds)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Stackup(#[from] StackupError),
}

impl RenderError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, RenderError::Parse(_))
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, RenderError::Stackup(StackupError::EmptyInput))
    }
}

/// Turns thickness lists into draw commands. Holds no state between renders.
pub struct StackupRenderer {
    options: RenderOptions,
    parser: ThicknessParser,
}

impl StackupRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            parser: ThicknessParser::new(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Parse comma-separated input and render it. Any invalid entry aborts
    /// the whole render.
    pub fn render(&self, input: &str) -> Result<Diagram, RenderError> {
        let values = self.parser.parse(input)?;
        self.render_values(&values)
    }

    pub fn render_values(&self, values: &[f64]) -> Result<Diagram, RenderError> {
        let stackup = Stackup::from_values(values, self.options.unit_factor)?;
        Ok(self.render_stackup(&stackup))
    }

    pub fn render_stackup(&self, stackup: &Stackup) -> Diagram {
        let commands = self.create_draw_commands(stackup);
        let total = stackup.get_total_thickness();

        debug!(
            "Rendered {} layers, total thickness {total}",
            commands.len()
        );

        Diagram {
            commands,
            figure: self.options.sizing.figure_size(total),
            bounds: DataBounds::for_total_thickness(total),
            title: self.options.title.clone(),
            summary: stackup.get_summary(),
        }
    }

    pub fn create_draw_commands(&self, stackup: &Stackup) -> Vec<DrawCommand> {
        stackup
            .iter_with_offsets()
            .map(|(layer, bottom_offset)| {
                let index = layer.index();
                let rect = LayerRect::bar(bottom_offset, layer.thickness);

                let label = if self.options.hide_end_labels && stackup.is_end_layer(index) {
                    None
                } else {
                    Some(LabelPlacement::beside(
                        layer.label_text(&self.options.unit_suffix),
                        &rect,
                    ))
                };

                DrawCommand {
                    index,
                    rect,
                    color_class: layer.color_class(),
                    outlined: true,
                    label,
                }
            })
            .collect()
    }
}

impl Default for StackupRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Render the static mil preset.
pub fn render_legacy_stackup() -> Result<Diagram, RenderError> {
    StackupRenderer::new(RenderOptions::legacy()).render_values(&LEGACY_STACKUP_MILS)
}
