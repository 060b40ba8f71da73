//! UI configuration
//!
//! This module contains configuration for UI appearance and behavior.

pub mod keybindings;
pub mod palette;

// Re-export for convenience
pub use keybindings::KeyBindings;
pub use palette::Palette;
