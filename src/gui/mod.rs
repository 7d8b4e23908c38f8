// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

pub mod download;
pub mod input_panel;
pub mod main_window;
pub mod stack_viewer;
pub mod toolbar;

pub use download::*;
pub use input_panel::*;
pub use main_window::*;
pub use stack_viewer::*;
pub use toolbar::*;
