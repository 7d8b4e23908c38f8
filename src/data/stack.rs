// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::data::layer::{ColorClass, Layer};
use serde::{Deserialize, Serialize};

/// Ordered layer composition of a board, index 0 at the bottom.
///
/// Offsets are computed once on construction; a stackup is never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stackup {
    layers: Vec<Layer>,
    bottom_offsets: Vec<f64>,
    total_thickness: f64,
}

impl Stackup {
    /// Build a stackup from thickness values in order.
    pub fn from_thicknesses(thicknesses: &[f64]) -> Result<Self, StackupError> {
        Self::from_values(thicknesses, 1.0)
    }

    /// Build a stackup whose geometry is scaled by `unit_factor`, keeping the
    /// raw values for display.
    pub fn from_values(values: &[f64], unit_factor: f64) -> Result<Self, StackupError> {
        if values.is_empty() {
            return Err(StackupError::EmptyInput);
        }

        let layers: Vec<Layer> = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if unit_factor == 1.0 {
                    Layer::new(index, value)
                } else {
                    Layer::with_unit_factor(index, value, unit_factor)
                }
            })
            .collect();

        let mut bottom_offsets = Vec::with_capacity(layers.len());
        let mut current: f64 = 0.0;
        for layer in &layers {
            bottom_offsets.push(current);
            current += layer.thickness;
            if !current.is_finite() {
                return Err(StackupError::ThicknessOverflow {
                    position: layer.index() + 1,
                });
            }
        }

        Ok(Self {
            layers,
            bottom_offsets,
            total_thickness: current,
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get_layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn get_layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn bottom_offsets(&self) -> &[f64] {
        &self.bottom_offsets
    }

    pub fn bottom_offset(&self, index: usize) -> Option<f64> {
        self.bottom_offsets.get(index).copied()
    }

    pub fn get_total_thickness(&self) -> f64 {
        self.total_thickness
    }

    pub fn is_end_layer(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.layers.len()
    }

    pub fn get_copper_count(&self) -> usize {
        self.layers.iter().filter(|layer| layer.is_copper()).count()
    }

    pub fn get_insulator_count(&self) -> usize {
        self.layers.iter().filter(|layer| layer.is_insulator()).count()
    }

    /// Layer with the given index and offset pairs, bottom first.
    pub fn iter_with_offsets(&self) -> impl Iterator<Item = (&Layer, f64)> + '_ {
        self.layers.iter().zip(self.bottom_offsets.iter().copied())
    }

    pub fn get_summary(&self) -> StackupSummary {
        let thinnest = self
            .layers
            .iter()
            .map(|layer| layer.thickness)
            .fold(f64::INFINITY, f64::min);
        let thickest = self
            .layers
            .iter()
            .map(|layer| layer.thickness)
            .fold(f64::NEG_INFINITY, f64::max);

        StackupSummary {
            total_layers: self.layers.len(),
            copper_layers: self.get_copper_count(),
            insulator_layers: self.get_insulator_count(),
            total_thickness: self.total_thickness,
            thinnest_layer: thinnest,
            thickest_layer: thickest,
        }
    }

    pub fn color_classes(&self) -> Vec<ColorClass> {
        self.layers.iter().map(Layer::color_class).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackupSummary {
    pub total_layers: usize,
    pub copper_layers: usize,
    pub insulator_layers: usize,
    pub total_thickness: f64,
    pub thinnest_layer: f64,
    pub thickest_layer: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StackupError {
    #[error("No layers to render: enter at least one thickness value")]
    EmptyInput,

    #[error("Total thickness is too large to draw (overflows at position {position})")]
    ThicknessOverflow { position: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stackup_offsets() {
        let stackup = Stackup::from_thicknesses(&[1.0, 2.0, 3.0]).unwrap();

        assert_eq!(stackup.get_layer_count(), 3);
        assert_eq!(stackup.bottom_offsets(), &[0.0, 1.0, 3.0]);
        assert_eq!(stackup.get_total_thickness(), 6.0);
        assert_eq!(stackup.bottom_offset(2), Some(3.0));
        assert_eq!(stackup.bottom_offset(3), None);
    }

    #[test]
    fn test_empty_stackup_rejected() {
        let result = Stackup::from_thicknesses(&[]);
        assert_eq!(result, Err(StackupError::EmptyInput));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let result = Stackup::from_thicknesses(&[1.0, 1e308, 1e308]);
        assert_eq!(result, Err(StackupError::ThicknessOverflow { position: 3 }));

        // Each value is finite, but scaling pushes the first one out of range.
        let scaled = Stackup::from_values(&[1e308, 1.0], 10.0);
        assert_eq!(scaled, Err(StackupError::ThicknessOverflow { position: 1 }));

        let large = Stackup::from_thicknesses(&[1e307, 1e307]).unwrap();
        assert!(large.get_total_thickness().is_finite());
    }

    #[test]
    fn test_zero_thickness_layer() {
        let stackup = Stackup::from_thicknesses(&[1.0, 0.0, 2.0]).unwrap();

        assert_eq!(stackup.bottom_offsets(), &[0.0, 1.0, 1.0]);
        assert_eq!(stackup.get_total_thickness(), 3.0);
    }

    #[test]
    fn test_unit_factor_applies_to_geometry() {
        let stackup = Stackup::from_values(&[0.4, 1.4, 12.6, 1.4, 0.4], 0.0254).unwrap();

        assert_relative_eq!(stackup.get_total_thickness(), 16.2 * 0.0254, epsilon = 1e-12);
        assert_relative_eq!(stackup.bottom_offsets()[1], 0.4 * 0.0254, epsilon = 1e-12);
        assert_eq!(stackup.layers()[2].display_value, 12.6);
    }

    #[test]
    fn test_end_layers() {
        let stackup = Stackup::from_thicknesses(&[1.0, 2.0, 3.0]).unwrap();
        assert!(stackup.is_end_layer(0));
        assert!(!stackup.is_end_layer(1));
        assert!(stackup.is_end_layer(2));

        let single = Stackup::from_thicknesses(&[5.0]).unwrap();
        assert!(single.is_end_layer(0));
    }

    #[test]
    fn test_summary() {
        let stackup = Stackup::from_thicknesses(&[0.01, 0.0175, 0.196, 0.0175, 0.01]).unwrap();
        let summary = stackup.get_summary();

        assert_eq!(summary.total_layers, 5);
        assert_eq!(summary.insulator_layers, 3);
        assert_eq!(summary.copper_layers, 2);
        assert_relative_eq!(summary.total_thickness, 0.251, epsilon = 1e-12);
        assert_eq!(summary.thinnest_layer, 0.01);
        assert_eq!(summary.thickest_layer, 0.196);
    }

    #[test]
    fn test_color_classes() {
        let stackup = Stackup::from_thicknesses(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(
            stackup.color_classes(),
            vec![
                ColorClass::Insulator,
                ColorClass::Copper,
                ColorClass::Insulator,
                ColorClass::Copper
            ]
        );
    }
}
