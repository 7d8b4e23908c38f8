// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use egui::{Button, Context, TopBottomPanel};

/// View buttons in display order: label, tooltip, action.
const VIEW_BUTTONS: [(&str, &str, ToolbarAction); 4] = [
    ("Zoom+", "Zoom in", ToolbarAction::ZoomIn),
    ("Zoom-", "Zoom out", ToolbarAction::ZoomOut),
    ("Fit", "Fit the diagram to the canvas (Ctrl+R)", ToolbarAction::AutoFit),
    ("1:1", "Reset pan and zoom", ToolbarAction::ResetView),
];

pub struct Toolbar {
    pub zoom_level: f32,
    pub can_download: bool,
    pub export_dpi: f32,
}

impl Toolbar {
    pub fn new(export_dpi: f32) -> Self {
        Self {
            zoom_level: 1.0,
            can_download: false,
            export_dpi,
        }
    }

    pub fn show(&mut self, ctx: &Context) -> ToolbarAction {
        let mut action = ToolbarAction::None;

        TopBottomPanel::top("stackup_toolbar")
            .resizable(false)
            .min_height(30.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    if ui.button("Form").on_hover_text("Show or hide the input form").clicked() {
                        action = ToolbarAction::ToggleInputPanel;
                    }

                    let download = ui
                        .add_enabled(self.can_download, Button::new("Download Image"))
                        .on_hover_text(format!("Save as PNG at {:.0} DPI", self.export_dpi));
                    if download.clicked() {
                        action = ToolbarAction::Download;
                    }

                    ui.separator();

                    for (label, tooltip, button_action) in VIEW_BUTTONS {
                        if ui.button(label).on_hover_text(tooltip).clicked() {
                            action = button_action;
                        }
                    }

                    ui.separator();
                    ui.label(format!("{:.0}%", self.zoom_level * 100.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("About").clicked() {
                            action = ToolbarAction::About;
                        }
                    });
                });
            });

        action
    }

    pub fn update_zoom(&mut self, zoom: f32) {
        self.zoom_level = zoom;
    }

    pub fn set_can_download(&mut self, can_download: bool) {
        self.can_download = can_download;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    ToggleInputPanel,
    Download,
    AutoFit,
    ResetView,
    ZoomIn,
    ZoomOut,
    About,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbar_starts_disabled() {
        let toolbar = Toolbar::new(300.0);
        assert_eq!(toolbar.zoom_level, 1.0);
        assert_eq!(toolbar.export_dpi, 300.0);
        assert!(!toolbar.can_download);
    }

    #[test]
    fn test_toolbar_state_updates() {
        let mut toolbar = Toolbar::new(300.0);

        toolbar.update_zoom(2.5);
        toolbar.set_can_download(true);

        assert_eq!(toolbar.zoom_level, 2.5);
        assert!(toolbar.can_download);
    }

    #[test]
    fn test_view_buttons_are_distinct() {
        for (i, (_, _, a)) in VIEW_BUTTONS.iter().enumerate() {
            assert_ne!(*a, ToolbarAction::None);
            for (_, _, b) in VIEW_BUTTONS.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
