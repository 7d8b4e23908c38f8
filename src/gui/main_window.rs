// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::gui::{
    DownloadManager, DownloadOutcome, InputAction, InputPanel, StackViewer, Toolbar, ToolbarAction,
};
use crate::renderer::{Diagram, DiagramExporter, StackupRenderer};
use crate::AppConfig;
use egui::Context;
use log::{debug, warn};

pub struct MainWindow {
    input_panel: InputPanel,
    stack_viewer: StackViewer,
    toolbar: Toolbar,
    download: DownloadManager,
    exporter: Option<DiagramExporter>,
    export_dpi: f32,
    current_diagram: Option<Diagram>,
    input_error: Option<String>,
    show_about: bool,
    error_message: Option<String>,
    status_message: Option<String>,
}

impl MainWindow {
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut window = Self {
            input_panel: InputPanel::new(
                &config.default_thickness_input,
                config.hide_end_labels,
                &config.unit_suffix,
            ),
            stack_viewer: StackViewer::new(),
            toolbar: Toolbar::new(config.export_dpi),
            download: DownloadManager::new(&config.export_file_name),
            exporter: None,
            export_dpi: config.export_dpi,
            current_diagram: None,
            input_error: None,
            show_about: false,
            error_message: None,
            status_message: None,
        };
        window.recalculate();
        window
    }

    pub fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let toolbar_action = self.toolbar.show(ctx);
        self.handle_toolbar_action(toolbar_action);

        let input_action = self.input_panel.show(
            ctx,
            self.current_diagram.as_ref(),
            self.input_error.as_deref(),
            self.status_message.as_deref(),
        );
        self.handle_input_action(input_action);

        self.poll_download();
        if self.download.is_pending() {
            ctx.request_repaint();
        }

        self.stack_viewer.show(ctx, self.current_diagram.as_ref());

        if self.show_about {
            self.show_about_dialog(ctx);
        }

        if self.error_message.is_some() {
            self.show_error_dialog_ui(ctx);
        }

        self.toolbar.update_zoom(self.stack_viewer.get_zoom());
        self.toolbar.set_can_download(self.can_download());
    }

    fn handle_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::None => {}

            ToolbarAction::ToggleInputPanel => {
                self.toggle_input_panel();
            }

            ToolbarAction::Download => {
                self.start_download();
            }

            ToolbarAction::AutoFit => {
                if let Some(ref diagram) = self.current_diagram {
                    self.stack_viewer.auto_fit(diagram);
                }
            }

            ToolbarAction::ResetView => {
                self.stack_viewer.reset_view();
            }

            ToolbarAction::ZoomIn => {
                self.stack_viewer.zoom_in();
            }

            ToolbarAction::ZoomOut => {
                self.stack_viewer.zoom_out();
            }

            ToolbarAction::About => {
                self.show_about = true;
            }
        }
    }

    fn handle_input_action(&mut self, action: InputAction) {
        match action {
            InputAction::None => {}
            InputAction::Recalculate => self.recalculate(),
            InputAction::Download => self.start_download(),
        }
    }

    /// Re-render from the form. A failed render clears the diagram.
    pub fn recalculate(&mut self) {
        let renderer = StackupRenderer::new(self.input_panel.render_options());

        match renderer.render(&self.input_panel.thickness_input) {
            Ok(diagram) => {
                debug!("Diagram updated with {} layers", diagram.layer_count());
                if self.current_diagram.as_ref() != Some(&diagram) {
                    self.stack_viewer.request_fit();
                }
                self.current_diagram = Some(diagram);
                self.input_error = None;
            }
            Err(e) => {
                warn!("Rejected stackup input: {e}");
                self.current_diagram = None;
                self.input_error = Some(e.to_string());
            }
        }
    }

    fn start_download(&mut self) {
        if let Some(ref diagram) = self.current_diagram {
            self.download.start(diagram);
        }
    }

    fn poll_download(&mut self) {
        if !self.download.is_pending() {
            return;
        }

        let export_dpi = self.export_dpi;
        let exporter = self
            .exporter
            .get_or_insert_with(|| DiagramExporter::with_dpi(export_dpi));

        match self.download.poll(exporter) {
            Some(DownloadOutcome::Saved(path)) => {
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Some(DownloadOutcome::Failed(message)) => {
                self.show_error_dialog(&format!("Failed to save image: {message}"));
            }
            Some(DownloadOutcome::Cancelled) | None => {}
        }
    }

    fn show_about_dialog(&mut self, ctx: &Context) {
        egui::Window::new("About PCB Stackup")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("PCB Stackup");
                    ui.label(format!("Version {}", crate::VERSION));
                    ui.separator();

                    ui.label("Draws a PCB stackup cross-section from layer thicknesses.");
                    ui.label("Layers stack bottom-up and alternate insulator / copper.");

                    ui.separator();

                    ui.label("Controls:");
                    ui.label("• Enter: Recalculate");
                    ui.label("• Mouse wheel: Zoom in/out");
                    ui.label("• Drag: Pan view");
                    ui.label("• Ctrl+R: Fit view");

                    ui.separator();

                    if ui.button("Close").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    pub fn get_current_diagram(&self) -> Option<&Diagram> {
        self.current_diagram.as_ref()
    }

    pub fn get_input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn get_status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn can_download(&self) -> bool {
        self.current_diagram.is_some() && !self.download.is_pending()
    }

    pub fn set_thickness_input(&mut self, input: &str) {
        self.input_panel.thickness_input = input.to_string();
    }

    pub fn set_hide_end_labels(&mut self, hide: bool) {
        self.input_panel.hide_end_labels = hide;
    }

    pub fn set_unit_suffix(&mut self, suffix: &str) {
        self.input_panel.unit_suffix = suffix.to_string();
    }

    pub fn set_show_about(&mut self, show: bool) {
        self.show_about = show;
    }

    pub fn toggle_input_panel(&mut self) {
        self.input_panel.toggle_visibility();
    }

    fn show_error_dialog(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    fn show_error_dialog_ui(&mut self, ctx: &Context) {
        if let Some(ref error_msg) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("Error")
                                .color(egui::Color32::RED)
                                .size(16.0),
                        );
                        ui.separator();

                        ui.label(error_msg);

                        ui.separator();

                        if ui.button("OK").clicked() {
                            self.error_message = None;
                        }
                    });
                });
        }
    }
}

impl Default for MainWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for MainWindow {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        self.update(ctx, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_window_creation() {
        let window = MainWindow::new();
        assert!(window.input_panel.is_open);
        assert!(window.input_panel.hide_end_labels);
        assert_eq!(window.input_panel.unit_suffix, "mm");
        assert!(!window.show_about);
        assert!(window.error_message.is_none());

        // The sample input renders right away.
        let diagram = window.get_current_diagram().unwrap();
        assert_eq!(diagram.layer_count(), 9);
        assert!(window.get_input_error().is_none());
        assert!(window.can_download());
    }

    #[test]
    fn test_recalculate_updates_diagram() {
        let mut window = MainWindow::new();
        window.set_thickness_input("1,2,3");
        window.set_hide_end_labels(false);
        window.set_unit_suffix("");
        window.recalculate();

        let labels: Vec<Option<&str>> = window
            .get_current_diagram()
            .unwrap()
            .commands
            .iter()
            .map(|c| c.label_text())
            .collect();
        assert_eq!(labels, vec![Some("1"), Some("2"), Some("3")]);
        assert!(window.stack_viewer.needs_fit());
    }

    #[test]
    fn test_invalid_input_clears_diagram() {
        let mut window = MainWindow::new();
        assert!(window.get_current_diagram().is_some());

        window.set_thickness_input("1,abc,3");
        window.recalculate();

        assert!(window.get_current_diagram().is_none());
        assert!(!window.can_download());
        let error = window.get_input_error().unwrap();
        assert!(error.contains("abc"));

        window.set_thickness_input("1,2");
        window.recalculate();
        assert!(window.get_current_diagram().is_some());
        assert!(window.get_input_error().is_none());
    }

    #[test]
    fn test_empty_input_clears_diagram() {
        let mut window = MainWindow::new();
        window.set_thickness_input("  ");
        window.recalculate();

        assert!(window.get_current_diagram().is_none());
        assert!(window.get_input_error().is_some());
    }

    #[test]
    fn test_overflowing_input_clears_diagram() {
        let mut window = MainWindow::new();
        window.set_thickness_input("1e308,1e308");
        window.recalculate();

        assert!(window.get_current_diagram().is_none());
        assert!(!window.can_download());
        assert!(window.get_input_error().unwrap().contains("too large"));
    }

    #[test]
    fn test_toggle_relabels_end_layers() {
        let mut window = MainWindow::new();
        window.set_thickness_input("1,2,3");
        window.recalculate();
        assert!(window.get_current_diagram().unwrap().commands[0].label.is_none());

        window.set_hide_end_labels(false);
        window.handle_input_action(InputAction::Recalculate);
        assert_eq!(
            window.get_current_diagram().unwrap().commands[0].label_text(),
            Some("1 mm")
        );
    }

    #[test]
    fn test_about_dialog() {
        let mut window = MainWindow::new();
        assert!(!window.show_about);

        window.handle_toolbar_action(ToolbarAction::About);
        assert!(window.show_about);

        window.set_show_about(false);
        assert!(!window.show_about);
    }

    #[test]
    fn test_input_panel_toggle() {
        let mut window = MainWindow::new();
        let initial_state = window.input_panel.is_open;

        window.handle_toolbar_action(ToolbarAction::ToggleInputPanel);
        assert_ne!(window.input_panel.is_open, initial_state);

        window.toggle_input_panel();
        assert_eq!(window.input_panel.is_open, initial_state);
    }

    #[test]
    fn test_view_actions() {
        let mut window = MainWindow::new();

        window.handle_toolbar_action(ToolbarAction::ZoomIn);
        assert!(window.stack_viewer.get_zoom() > 1.0);

        window.handle_toolbar_action(ToolbarAction::ResetView);
        assert_eq!(window.stack_viewer.get_zoom(), 1.0);

        window.handle_toolbar_action(ToolbarAction::ZoomOut);
        assert!(window.stack_viewer.get_zoom() < 1.0);

        window.handle_toolbar_action(ToolbarAction::AutoFit);
        assert!(!window.stack_viewer.needs_fit());
    }

    #[test]
    fn test_auto_fit_without_diagram() {
        let mut window = MainWindow::new();
        window.set_thickness_input("");
        window.recalculate();

        // Should not panic when nothing is rendered
        window.handle_toolbar_action(ToolbarAction::AutoFit);
        window.handle_toolbar_action(ToolbarAction::Download);
        assert!(!window.download.is_pending());
    }
}
