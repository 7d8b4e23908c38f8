// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::data::ColorClass;
use crate::renderer::{ColorScheme, Diagram, RenderOptions};
use egui::{CollapsingHeader, Color32, Context, RichText, ScrollArea, SidePanel, TextEdit};

/// The stackup form: thickness list, end-label toggle and label suffix.
pub struct InputPanel {
    pub is_open: bool,
    pub thickness_input: String,
    pub hide_end_labels: bool,
    pub unit_suffix: String,
    color_scheme: ColorScheme,
}

impl InputPanel {
    pub fn new(thickness_input: &str, hide_end_labels: bool, unit_suffix: &str) -> Self {
        Self {
            is_open: true,
            thickness_input: thickness_input.to_string(),
            hide_end_labels,
            unit_suffix: unit_suffix.to_string(),
            color_scheme: ColorScheme::new(),
        }
    }

    /// Render options matching the current form state.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::interactive()
            .with_unit_suffix(&self.unit_suffix)
            .with_hide_end_labels(self.hide_end_labels)
    }

    pub fn show(
        &mut self,
        ctx: &Context,
        diagram: Option<&Diagram>,
        input_error: Option<&str>,
        status_message: Option<&str>,
    ) -> InputAction {
        let mut action = InputAction::None;

        if !self.is_open {
            return action;
        }

        SidePanel::left("input_panel")
            .resizable(true)
            .default_width(320.0)
            .width_range(260.0..=520.0)
            .show(ctx, |ui| {
                ui.heading("PCB Stackup Visualization");
                ui.separator();

                ui.label("Layer thicknesses (comma-separated), starting from soldermask:");
                let thickness_response = ui.add(
                    TextEdit::singleline(&mut self.thickness_input)
                        .desired_width(f32::INFINITY)
                        .hint_text("0.01,0.0175,0.196"),
                );
                if thickness_response.lost_focus() {
                    action = InputAction::Recalculate;
                }

                if ui
                    .checkbox(&mut self.hide_end_labels, "Hide soldermask (top, bot)")
                    .changed()
                {
                    action = InputAction::Recalculate;
                }

                ui.label("Text appended to each layer label (optional):");
                let suffix_response = ui.add(
                    TextEdit::singleline(&mut self.unit_suffix).desired_width(f32::INFINITY),
                );
                if suffix_response.lost_focus() {
                    action = InputAction::Recalculate;
                }

                ui.label(RichText::new("Press Enter to calculate.").small().weak());

                if ui
                    .add_enabled(diagram.is_some(), egui::Button::new("Download Image"))
                    .on_hover_text("Save the diagram as a 300 DPI PNG")
                    .clicked()
                {
                    action = InputAction::Download;
                }
                if let Some(status) = status_message {
                    ui.label(RichText::new(status).small().color(Color32::DARK_GREEN));
                }

                if let Some(error) = input_error {
                    ui.separator();
                    ui.colored_label(Color32::RED, error);
                }

                if let Some(diagram) = diagram {
                    ui.separator();
                    ScrollArea::vertical()
                        .id_salt("layer_list")
                        .show(ui, |ui| {
                            self.show_summary(ui, diagram);
                            self.show_layer_list(ui, diagram);
                        });
                }
            });

        action
    }

    fn show_summary(&self, ui: &mut egui::Ui, diagram: &Diagram) {
        CollapsingHeader::new("Stackup Summary")
            .default_open(true)
            .show(ui, |ui| {
                let summary = &diagram.summary;
                ui.label(format!("Total layers: {}", summary.total_layers));
                ui.label(format!("Copper layers: {}", summary.copper_layers));
                ui.label(format!("Insulator layers: {}", summary.insulator_layers));
                ui.label(format!("Total thickness: {:.4}", summary.total_thickness));
                ui.label(format!(
                    "Thinnest / thickest: {} / {}",
                    summary.thinnest_layer, summary.thickest_layer
                ));
            });
    }

    fn show_layer_list(&self, ui: &mut egui::Ui, diagram: &Diagram) {
        CollapsingHeader::new("Layers (top to bottom)")
            .default_open(false)
            .show(ui, |ui| {
                for command in diagram.commands.iter().rev() {
                    let color = self.color_scheme.get_fill_color(command.color_class);
                    let icon = match command.color_class {
                        ColorClass::Copper => "Cu",
                        ColorClass::Insulator => "Di",
                    };
                    let text = format!(
                        "{icon} #{} {}",
                        command.index,
                        command.label_text().unwrap_or("(hidden)")
                    );
                    ui.label(RichText::new(text).color(color));
                }
            });
    }

    pub fn toggle_visibility(&mut self) {
        self.is_open = !self.is_open;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Recalculate,
    Download,
}
