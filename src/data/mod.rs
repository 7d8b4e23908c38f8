// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

pub mod layer;
pub mod stack;

pub use layer::*;
pub use stack::*;
