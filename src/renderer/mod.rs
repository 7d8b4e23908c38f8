// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

pub mod colors;
pub mod export;
pub mod geometry;
pub mod stack_renderer;

pub use colors::*;
pub use export::*;
pub use geometry::*;
pub use stack_renderer::*;
