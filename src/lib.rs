//! # segtui - segmented control for the terminal
//!
//! A horizontal row of mutually exclusive, equally sized segments with a
//! sliding selection indicator, rendered with Ratatui.
//!
//! ## Layers
//!
//! - [`model`]: the control itself. Segments, selection, indicator
//!   animation, touch handling and selection listeners. Pure state, no I/O.
//! - [`presentation`]: drawing through the [`presentation::canvas::Canvas`]
//!   abstraction, the ratatui widget, palette and keybindings.
//! - [`infrastructure`]: terminal, CLI and configuration loading.
//! - [`app`]: the demo host wiring everything together.
//!
//! ## Example Usage
//!
//! ```rust
//! use segtui::{SegmentedControl, model::segmented_control::Size};
//!
//! let mut control = SegmentedControl::with_segments(["URL", "Video ID"], 0).unwrap();
//! let _listener = control.subscribe(|index| println!("selected {index}"));
//!
//! control.layout(Size::new(400.0, 48.0));
//! control.set_selected_index(1, false).unwrap();
//!
//! assert_eq!(control.selected_index(), 1);
//! assert_eq!(control.indicator_position(), Some(200.0));
//! ```

pub mod action;
pub mod app;
pub mod error;
pub mod infrastructure;
pub mod model;
pub mod presentation;
pub mod utils;

pub use error::SegmentError;
pub use model::segmented_control::SegmentedControl;
pub use presentation::widgets::segmented_control::SegmentedControlWidget;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
