// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use serde::{Deserialize, Serialize};

/// Visual material class of a layer, alternating by position in the stackup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorClass {
    Insulator,
    Copper,
}

impl ColorClass {
    /// Even indices are insulators, odd indices are copper.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            ColorClass::Insulator
        } else {
            ColorClass::Copper
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorClass::Insulator => "insulator",
            ColorClass::Copper => "copper",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    index: usize,
    /// Thickness in geometry units, after any unit conversion.
    pub thickness: f64,
    /// Magnitude shown in the label, before any unit conversion.
    pub display_value: f64,
}

impl Layer {
    pub fn new(index: usize, thickness: f64) -> Self {
        Self {
            index,
            thickness,
            display_value: thickness,
        }
    }

    /// Build a layer whose geometry is `raw_value * unit_factor` while the
    /// label keeps showing `raw_value`.
    pub fn with_unit_factor(index: usize, raw_value: f64, unit_factor: f64) -> Self {
        Self {
            index,
            thickness: raw_value * unit_factor,
            display_value: raw_value,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn color_class(&self) -> ColorClass {
        ColorClass::for_index(self.index)
    }

    pub fn is_copper(&self) -> bool {
        self.color_class() == ColorClass::Copper
    }

    pub fn is_insulator(&self) -> bool {
        self.color_class() == ColorClass::Insulator
    }

    /// Label text: the display value, followed by a space and the suffix when
    /// the suffix is non-empty.
    pub fn label_text(&self, unit_suffix: &str) -> String {
        format_label(self.display_value, unit_suffix)
    }
}

pub fn format_label(value: f64, unit_suffix: &str) -> String {
    if unit_suffix.is_empty() {
        format!("{value}")
    } else {
        format!("{value} {unit_suffix}")
    }
}
