//! Reusable UI widgets

pub mod segmented_control;
