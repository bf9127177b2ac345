// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node registries for common host graph kinds.

pub mod shader;
pub mod geometry;
