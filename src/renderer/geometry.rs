// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::data::ColorClass;
use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Horizontal centre of every layer bar, in data units.
pub const BAR_CENTER_X: f64 = 0.0;
/// Width of every layer bar, in data units.
pub const BAR_WIDTH: f64 = 0.5;
/// Horizontal anchor of layer labels, in data units.
pub const LABEL_X: f64 = 0.6;
/// Visible horizontal data range.
pub const X_LIMITS: (f64, f64) = (-1.0, 2.0);
/// Padding added below and above the stack, relative to its total thickness.
pub const Y_PADDING_RATIO: f64 = 0.05;

/// Fraction of the figure height kept free above and below the plot area.
pub const FIGURE_MARGIN_RATIO: f64 = 0.05;
pub const FIGURE_WIDTH_IN: f64 = 3.0;
pub const POINTS_PER_INCH: f64 = 72.0;
pub const LABEL_FONT_SIZE_PT: f64 = 8.0;
pub const TITLE_FONT_SIZE_PT: f64 = 12.0;

/// Axis-aligned rectangle in data units, y grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_bottom: f64,
    pub y_top: f64,
}

impl LayerRect {
    /// Bar spanning `[bottom, bottom + height]` at the fixed horizontal position.
    pub fn bar(bottom: f64, height: f64) -> Self {
        let half_width = BAR_WIDTH * 0.5;
        Self {
            x_min: BAR_CENTER_X - half_width,
            x_max: BAR_CENTER_X + half_width,
            y_bottom: bottom,
            y_top: bottom + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_top - self.y_bottom
    }

    pub fn center_y(&self) -> f64 {
        self.y_bottom + self.height() * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
}

impl LabelPlacement {
    /// Left-aligned, vertically centred label beside a layer bar.
    pub fn beside(text: String, rect: &LayerRect) -> Self {
        Self {
            text,
            x: LABEL_X,
            y: rect.center_y(),
            h_align: HorizontalAlign::Left,
            v_align: VerticalAlign::Center,
        }
    }

    pub fn egui_align(&self) -> egui::Align2 {
        let h = match self.h_align {
            HorizontalAlign::Left => egui::Align::Min,
            HorizontalAlign::Center => egui::Align::Center,
            HorizontalAlign::Right => egui::Align::Max,
        };
        let v = match self.v_align {
            VerticalAlign::Top => egui::Align::Min,
            VerticalAlign::Center => egui::Align::Center,
            VerticalAlign::Bottom => egui::Align::Max,
        };
        egui::Align2([h, v])
    }
}

/// One rectangle with its fill class, outline flag and optional label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub index: usize,
    pub rect: LayerRect,
    pub color_class: ColorClass,
    pub outlined: bool,
    pub label: Option<LabelPlacement>,
}

impl DrawCommand {
    pub fn bottom_offset(&self) -> f64 {
        self.rect.y_bottom
    }

    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_ref().map(|label| label.text.as_str())
    }
}

/// Visible data range of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataBounds {
    /// Fixed horizontal range and a vertical range padded by
    /// [`Y_PADDING_RATIO`] of the total thickness. A non-positive total falls
    /// back to a unit span.
    pub fn for_total_thickness(total: f64) -> Self {
        let span = if total > 0.0 { total } else { 1.0 };
        Self {
            x_min: X_LIMITS.0,
            x_max: X_LIMITS.1,
            y_min: -span * Y_PADDING_RATIO,
            y_max: span * (1.0 + Y_PADDING_RATIO),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Output figure dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl FigureSize {
    pub fn width_pt(&self) -> f64 {
        self.width_in * POINTS_PER_INCH
    }

    pub fn height_pt(&self) -> f64 {
        self.height_in * POINTS_PER_INCH
    }

    /// Whole figure in points, origin at the top-left corner.
    pub fn to_rect(&self) -> Rect {
        Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(self.width_pt() as f32, self.height_pt() as f32),
        )
    }

    pub fn to_pixels(&self, dpi: f32) -> (u32, u32) {
        let dpi = dpi as f64;
        (
            (self.width_in * dpi).round().max(1.0) as u32,
            (self.height_in * dpi).round().max(1.0) as u32,
        )
    }
}

/// Heuristic for deriving the figure height from the total stack thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizingRule {
    /// Compact figure for the interactive form: 0.5 in per unit, 4 to 8 in.
    Interactive,
    /// Tall figure for the static preset: 2 in per unit, 6 to 24 in.
    Legacy,
}

impl SizingRule {
    fn parameters(&self) -> (f64, f64, f64) {
        match self {
            SizingRule::Interactive => (0.5, 4.0, 8.0),
            SizingRule::Legacy => (2.0, 6.0, 24.0),
        }
    }

    pub fn figure_size(&self, total_thickness: f64) -> FigureSize {
        let (scale, min_height, max_height) = self.parameters();
        let scaled = total_thickness * scale;
        let height_in = if scaled.is_finite() {
            scaled.clamp(min_height, max_height)
        } else {
            max_height
        };

        FigureSize {
            width_in: FIGURE_WIDTH_IN,
            height_in,
        }
    }
}

/// Maps data coordinates onto figure coordinates in points, origin at the
/// top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct PlotMapping {
    pub figure: FigureSize,
    pub bounds: DataBounds,
}

impl PlotMapping {
    pub fn new(figure: FigureSize, bounds: DataBounds) -> Self {
        Self { figure, bounds }
    }

    pub fn plot_top(&self) -> f64 {
        self.figure.height_pt() * FIGURE_MARGIN_RATIO
    }

    pub fn plot_height(&self) -> f64 {
        self.figure.height_pt() * (1.0 - 2.0 * FIGURE_MARGIN_RATIO)
    }

    pub fn x_to_figure(&self, x: f64) -> f64 {
        (x - self.bounds.x_min) / self.bounds.width() * self.figure.width_pt()
    }

    pub fn y_to_figure(&self, y: f64) -> f64 {
        self.plot_top() + (self.bounds.y_max - y) / self.bounds.height() * self.plot_height()
    }

    pub fn length_to_figure(&self, height: f64) -> f64 {
        height / self.bounds.height() * self.plot_height()
    }

    pub fn point_to_figure(&self, x: f64, y: f64) -> Pos2 {
        Pos2::new(self.x_to_figure(x) as f32, self.y_to_figure(y) as f32)
    }

    /// Layer rectangle in figure points. Negative heights are normalized so
    /// the rectangle always spans the bar's two edges.
    pub fn rect_to_figure(&self, rect: &LayerRect) -> Rect {
        Rect::from_min_max(
            self.point_to_figure(rect.x_min, rect.y_top.max(rect.y_bottom)),
            self.point_to_figure(rect.x_max, rect.y_top.min(rect.y_bottom)),
        )
    }

    /// Title anchor, centred in the top margin.
    pub fn title_anchor(&self) -> Pos2 {
        Pos2::new(
            (self.figure.width_pt() * 0.5) as f32,
            (self.plot_top() * 0.5) as f32,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset: Vec2,
    pub viewport_size: Vec2,
}

impl ViewTransform {
    pub fn new(viewport_size: Vec2) -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            viewport_size,
        }
    }

    pub fn world_to_screen(&self, world_pos: Pos2) -> Pos2 {
        Pos2::new(
            world_pos.x * self.scale + self.offset.x + self.viewport_size.x * 0.5,
            world_pos.y * self.scale + self.offset.y + self.viewport_size.y * 0.5,
        )
    }

    pub fn screen_to_world(&self, screen_pos: Pos2) -> Pos2 {
        Pos2::new(
            (screen_pos.x - self.offset.x - self.viewport_size.x * 0.5) / self.scale,
            (screen_pos.y - self.offset.y - self.viewport_size.y * 0.5) / self.scale,
        )
    }

    pub fn world_rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_two_pos(self.world_to_screen(rect.min), self.world_to_screen(rect.max))
    }

    pub fn zoom(&mut self, zoom_factor: f32, zoom_center: Pos2) {
        let old_scale = self.scale;
        self.scale = (self.scale * zoom_factor).max(0.01);

        let scale_ratio = self.scale / old_scale;
        let center = Vec2::new(
            zoom_center.x - self.viewport_size.x * 0.5,
            zoom_center.y - self.viewport_size.y * 0.5,
        );

        // Keep the world point under the zoom centre fixed on screen.
        self.offset = self.offset * scale_ratio + center * (1.0 - scale_ratio);
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn fit_bounds(&mut self, bounds: Rect, margin: f32) {
        let bounds_size = bounds.size();
        let available_size = self.viewport_size - Vec2::splat(margin * 2.0);

        let scale_x = available_size.x / bounds_size.x.max(f32::EPSILON);
        let scale_y = available_size.y / bounds_size.y.max(f32::EPSILON);
        self.scale = scale_x.min(scale_y).max(0.01);

        let bounds_center = bounds.center();
        self.offset = Vec2::new(
            -bounds_center.x * self.scale,
            -bounds_center.y * self.scale,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_layer_bar() {
        let rect = LayerRect::bar(1.0, 2.0);

        assert_eq!(rect.x_min, -0.25);
        assert_eq!(rect.x_max, 0.25);
        assert_eq!(rect.y_bottom, 1.0);
        assert_eq!(rect.y_top, 3.0);
        assert_eq!(rect.width(), BAR_WIDTH);
        assert_eq!(rect.height(), 2.0);
        assert_eq!(rect.center_y(), 2.0);
    }

    #[test]
    fn test_zero_height_bar() {
        let rect = LayerRect::bar(4.0, 0.0);
        assert_eq!(rect.height(), 0.0);
        assert_eq!(rect.center_y(), 4.0);

        let figure = SizingRule::Interactive.figure_size(8.0);
        let mapping = PlotMapping::new(figure, DataBounds::for_total_thickness(8.0));
        let mapped = mapping.rect_to_figure(&rect);
        assert_eq!(mapped.height(), 0.0);
        assert_relative_eq!(mapped.min.y, mapping.y_to_figure(4.0) as f32, epsilon = 1e-4);
    }

    #[test]
    fn test_label_beside_bar() {
        let rect = LayerRect::bar(1.0, 2.0);
        let label = LabelPlacement::beside("2".to_string(), &rect);

        assert_eq!(label.x, LABEL_X);
        assert_eq!(label.y, 2.0);
        assert_eq!(label.h_align, HorizontalAlign::Left);
        assert_eq!(label.v_align, VerticalAlign::Center);
        assert_eq!(label.egui_align(), egui::Align2::LEFT_CENTER);
    }

    #[test]
    fn test_data_bounds_padding() {
        let bounds = DataBounds::for_total_thickness(10.0);

        assert_eq!(bounds.x_min, -1.0);
        assert_eq!(bounds.x_max, 2.0);
        assert_relative_eq!(bounds.y_min, -0.5, epsilon = 1e-12);
        assert_relative_eq!(bounds.y_max, 10.5, epsilon = 1e-12);
    }

    #[test]
    fn test_data_bounds_degenerate_total() {
        let bounds = DataBounds::for_total_thickness(0.0);
        assert!(bounds.height() > 0.0);

        let negative = DataBounds::for_total_thickness(-3.0);
        assert!(negative.height() > 0.0);
    }

    #[test]
    fn test_interactive_sizing_clamps() {
        let rule = SizingRule::Interactive;

        assert_eq!(rule.figure_size(0.001).height_in, 4.0);
        assert_eq!(rule.figure_size(12.0).height_in, 6.0);
        assert_eq!(rule.figure_size(1000.0).height_in, 8.0);
        assert_eq!(rule.figure_size(1000.0).width_in, FIGURE_WIDTH_IN);
    }

    #[test]
    fn test_legacy_sizing_clamps() {
        let rule = SizingRule::Legacy;

        assert_eq!(rule.figure_size(0.4).height_in, 6.0);
        assert_eq!(rule.figure_size(5.0).height_in, 10.0);
        assert_eq!(rule.figure_size(100.0).height_in, 24.0);
    }

    #[test]
    fn test_figure_pixels() {
        let figure = FigureSize {
            width_in: 3.0,
            height_in: 4.0,
        };
        assert_eq!(figure.to_pixels(300.0), (900, 1200));
        assert_eq!(figure.width_pt(), 216.0);
        assert_eq!(figure.height_pt(), 288.0);
        assert_eq!(figure.to_rect(), Rect::from_min_size(Pos2::ZERO, Vec2::new(216.0, 288.0)));
    }

    #[test]
    fn test_plot_mapping() {
        let figure = FigureSize {
            width_in: 3.0,
            height_in: 4.0,
        };
        let bounds = DataBounds::for_total_thickness(10.0);
        let mapping = PlotMapping::new(figure, bounds);

        assert_relative_eq!(mapping.x_to_figure(-1.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(mapping.x_to_figure(2.0), 216.0, epsilon = 1e-9);
        assert_relative_eq!(mapping.y_to_figure(10.5), 14.4, epsilon = 1e-9);
        assert_relative_eq!(mapping.y_to_figure(-0.5), 273.6, epsilon = 1e-9);
        assert_relative_eq!(mapping.length_to_figure(11.0), 259.2, epsilon = 1e-9);

        let title = mapping.title_anchor();
        assert_relative_eq!(title.x, 108.0, epsilon = 1e-4);
        assert_relative_eq!(title.y, 7.2, epsilon = 1e-4);
    }

    #[test]
    fn test_rect_to_figure_matches_axis_mapping() {
        let figure = FigureSize {
            width_in: 3.0,
            height_in: 4.0,
        };
        let mapping = PlotMapping::new(figure, DataBounds::for_total_thickness(10.0));

        let rect = mapping.rect_to_figure(&LayerRect::bar(2.0, 3.0));
        assert_relative_eq!(rect.min.x as f64, mapping.x_to_figure(-0.25), epsilon = 1e-4);
        assert_relative_eq!(rect.max.x as f64, mapping.x_to_figure(0.25), epsilon = 1e-4);
        assert_relative_eq!(rect.min.y as f64, mapping.y_to_figure(5.0), epsilon = 1e-4);
        assert_relative_eq!(rect.height() as f64, mapping.length_to_figure(3.0), epsilon = 1e-4);

        // A downward bar covers the same span as its upward mirror.
        let downward = mapping.rect_to_figure(&LayerRect::bar(5.0, -3.0));
        assert_relative_eq!(downward.min.y, rect.min.y, epsilon = 1e-4);
        assert_relative_eq!(downward.max.y, rect.max.y, epsilon = 1e-4);
    }

    #[test]
    fn test_view_transform_round_trip() {
        let mut transform = ViewTransform::new(Vec2::new(800.0, 600.0));
        transform.zoom(2.0, Pos2::new(400.0, 300.0));
        transform.pan(Vec2::new(10.0, -5.0));

        let world = Pos2::new(0.25, -1.5);
        let back = transform.screen_to_world(transform.world_to_screen(world));
        assert_relative_eq!(back.x, world.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, world.y, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_keeps_center_fixed() {
        let mut transform = ViewTransform::new(Vec2::new(800.0, 600.0));
        let center = Pos2::new(500.0, 200.0);
        let world_before = transform.screen_to_world(center);

        transform.zoom(1.5, center);

        let world_after = transform.screen_to_world(center);
        assert_relative_eq!(world_before.x, world_after.x, epsilon = 1e-4);
        assert_relative_eq!(world_before.y, world_after.y, epsilon = 1e-4);
    }

    #[test]
    fn test_fit_bounds() {
        let mut transform = ViewTransform::new(Vec2::new(800.0, 600.0));
        let bounds = SizingRule::Interactive.figure_size(1.0).to_rect();

        transform.fit_bounds(bounds, 20.0);

        let screen = transform.world_rect_to_screen(bounds);
        assert!(screen.min.x >= -1e-3 && screen.max.x <= 800.0 + 1e-3);
        assert!(screen.min.y >= -1e-3 && screen.max.y <= 600.0 + 1e-3);
        assert_relative_eq!(screen.center().x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(screen.center().y, 300.0, epsilon = 1e-3);
    }
}
