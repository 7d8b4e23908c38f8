// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::renderer::{
    ColorScheme, Diagram, ViewTransform, LABEL_FONT_SIZE_PT, TITLE_FONT_SIZE_PT,
};
use egui::{
    CentralPanel, Color32, Context, CursorIcon, FontId, Frame, Pos2, Rect, Sense, Shape, Stroke,
    StrokeKind, Vec2,
};

const FIT_MARGIN: f32 = 40.0;

pub struct StackViewer {
    color_scheme: ColorScheme,
    transform: ViewTransform,
    needs_fit: bool,
    zoom_sensitivity: f32,
    pan_sensitivity: f32,
}

impl StackViewer {
    pub fn new() -> Self {
        Self {
            color_scheme: ColorScheme::new(),
            transform: ViewTransform::new(Vec2::new(800.0, 600.0)),
            needs_fit: true,
            zoom_sensitivity: 1.1,
            pan_sensitivity: 1.0,
        }
    }

    pub fn show(&mut self, ctx: &Context, diagram: Option<&Diagram>) {
        CentralPanel::default()
            .frame(Frame::canvas(&ctx.style()).fill(self.color_scheme.background))
            .show(ctx, |ui| {
                let viewport_rect = ui.available_rect_before_wrap();
                self.transform.viewport_size = viewport_rect.size();

                let response = ui.allocate_rect(viewport_rect, Sense::click_and_drag());
                self.handle_mouse_input(ui, &response, viewport_rect);
                self.handle_keyboard_input(ui);

                match diagram {
                    Some(diagram) => {
                        if self.needs_fit {
                            self.auto_fit(diagram);
                        }

                        let painter = ui.painter_at(viewport_rect);
                        for shape in self.create_layer_shapes(diagram, viewport_rect) {
                            painter.add(shape);
                        }
                        self.paint_labels(&painter, diagram, viewport_rect);
                        self.show_status_overlay(ui, diagram, viewport_rect);
                    }
                    None => {
                        ui.painter_at(viewport_rect).text(
                            viewport_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "No stackup to display. Enter layer thicknesses on the left.",
                            FontId::proportional(14.0),
                            Color32::DARK_GRAY,
                        );
                    }
                }
            });
    }

    /// Fill and outline shapes for every layer, in index order. World
    /// coordinates are figure points, so the canvas shows the exported figure.
    pub fn create_layer_shapes(&self, diagram: &Diagram, viewport_rect: Rect) -> Vec<Shape> {
        let mapping = diagram.plot_mapping();
        let stroke_width = (self.color_scheme.outline_width_pt * self.transform.scale).max(1.0);
        let mut shapes = Vec::with_capacity(diagram.commands.len() * 2);

        for command in &diagram.commands {
            let rect = self.to_screen_rect(mapping.rect_to_figure(&command.rect), viewport_rect);
            let fill = self.color_scheme.get_fill_color(command.color_class);
            shapes.push(Shape::rect_filled(rect, 0.0, fill));

            if command.outlined {
                let stroke = Stroke::new(stroke_width, self.color_scheme.outline);
                shapes.push(Shape::rect_stroke(rect, 0.0, stroke, StrokeKind::Middle));
            }
        }

        shapes
    }

    fn paint_labels(&self, painter: &egui::Painter, diagram: &Diagram, viewport_rect: Rect) {
        let mapping = diagram.plot_mapping();
        let label_font = FontId::proportional((LABEL_FONT_SIZE_PT as f32 * self.transform.scale).max(1.0));

        for label in diagram.commands.iter().filter_map(|c| c.label.as_ref()) {
            let pos = self.to_screen_pos(mapping.point_to_figure(label.x, label.y), viewport_rect);
            painter.text(
                pos,
                label.egui_align(),
                &label.text,
                label_font.clone(),
                self.color_scheme.text_color,
            );
        }

        if let Some(title) = &diagram.title {
            painter.text(
                self.to_screen_pos(mapping.title_anchor(), viewport_rect),
                egui::Align2::CENTER_CENTER,
                title,
                FontId::proportional((TITLE_FONT_SIZE_PT as f32 * self.transform.scale).max(1.0)),
                self.color_scheme.text_color,
            );
        }
    }

    fn to_screen_pos(&self, world_pos: Pos2, viewport_rect: Rect) -> Pos2 {
        self.transform.world_to_screen(world_pos) + viewport_rect.min.to_vec2()
    }

    fn to_screen_rect(&self, world_rect: Rect, viewport_rect: Rect) -> Rect {
        self.transform
            .world_rect_to_screen(world_rect)
            .translate(viewport_rect.min.to_vec2())
    }

    fn handle_mouse_input(&mut self, ui: &mut egui::Ui, response: &egui::Response, viewport_rect: Rect) {
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.raw_scroll_delta);
            if scroll_delta.y != 0.0 {
                let zoom_factor = if scroll_delta.y > 0.0 {
                    self.zoom_sensitivity
                } else {
                    1.0 / self.zoom_sensitivity
                };

                let zoom_center = response
                    .hover_pos()
                    .unwrap_or_else(|| viewport_rect.center())
                    - viewport_rect.min.to_vec2();

                self.transform.zoom(zoom_factor, zoom_center);
            }
        }

        if response.dragged() {
            self.transform
                .pan(response.drag_delta() * self.pan_sensitivity);
        }

        let cursor_icon = if response.dragged() {
            CursorIcon::Grabbing
        } else if response.hovered() {
            CursorIcon::Grab
        } else {
            CursorIcon::Default
        };
        if response.hovered() || response.dragged() {
            ui.ctx().set_cursor_icon(cursor_icon);
        }
    }

    fn handle_keyboard_input(&mut self, ui: &mut egui::Ui) {
        let (zoom_in, zoom_out, left, right, up, down, reset) = ui.input(|i| {
            (
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowUp),
                i.key_pressed(egui::Key::ArrowDown),
                i.key_pressed(egui::Key::R) && i.modifiers.ctrl,
            )
        });

        // Keys typed into the form fields must not move the canvas.
        if ui.ctx().memory(|m| m.focused().is_some()) {
            return;
        }

        if zoom_in {
            self.zoom_in();
        }
        if zoom_out {
            self.zoom_out();
        }

        let pan_step = 20.0;
        if left {
            self.transform.pan(Vec2::new(pan_step, 0.0));
        }
        if right {
            self.transform.pan(Vec2::new(-pan_step, 0.0));
        }
        if up {
            self.transform.pan(Vec2::new(0.0, pan_step));
        }
        if down {
            self.transform.pan(Vec2::new(0.0, -pan_step));
        }

        if reset {
            self.request_fit();
        }
    }

    fn show_status_overlay(&self, ui: &mut egui::Ui, diagram: &Diagram, viewport_rect: Rect) {
        let overlay_rect = Rect::from_min_size(
            viewport_rect.min + Vec2::new(10.0, 10.0),
            Vec2::new(200.0, 90.0),
        );

        ui.scope_builder(egui::UiBuilder::new().max_rect(overlay_rect), |ui| {
            Frame::popup(ui.style())
                .fill(Color32::from_black_alpha(200))
                .show(ui, |ui| {
                    ui.label(format!("Scale: {:.1}x", self.transform.scale));
                    ui.label(format!("Layers: {}", diagram.layer_count()));
                    ui.label(format!(
                        "Total thickness: {:.4}",
                        diagram.summary.total_thickness
                    ));
                    ui.label(format!(
                        "Figure: {:.1} x {:.1} in",
                        diagram.figure.width_in, diagram.figure.height_in
                    ));
                });
        });
    }

    /// Fit the whole figure, margins included, into the viewport.
    pub fn auto_fit(&mut self, diagram: &Diagram) {
        self.transform
            .fit_bounds(diagram.figure.to_rect(), FIT_MARGIN);
        self.needs_fit = false;
    }

    /// Fit again on the next frame that has a diagram.
    pub fn request_fit(&mut self) {
        self.needs_fit = true;
    }

    pub fn needs_fit(&self) -> bool {
        self.needs_fit
    }

    pub fn reset_view(&mut self) {
        self.transform = ViewTransform::new(self.transform.viewport_size);
    }

    pub fn get_zoom(&self) -> f32 {
        self.transform.scale
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom_about_center(zoom.max(0.01) / self.transform.scale);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_about_center(self.zoom_sensitivity);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_about_center(self.zoom_sensitivity.recip());
    }

    fn zoom_about_center(&mut self, factor: f32) {
        let center = (self.transform.viewport_size * 0.5).to_pos2();
        self.transform.zoom(factor, center);
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.transform.pan(delta);
    }
}

impl Default for StackViewer {
    fn default() -> Self {
        Self::new()
    }
}
