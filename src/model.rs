//! Toolkit-independent state of the segmented control
//!
//! Nothing in here knows about terminals: sizes and positions are plain
//! `f32` pixels and time arrives as elapsed [`std::time::Duration`]s.

pub mod animation;
pub mod listener;
pub mod segmented_control;
pub mod touch;
