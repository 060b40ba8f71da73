//! Presentation layer
//!
//! This module turns the control state into pixels:
//! - Canvas abstraction and its ratatui buffer implementation
//! - Colors and unit conversion
//! - Configuration (palette, keybindings)
//! - Widgets

pub mod buffer_canvas;
pub mod canvas;
pub mod color;
pub mod config;
pub mod units;
pub mod widgets;
