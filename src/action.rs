use crossterm::event::MouseEvent;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Error(String),
    /// Jump between the first and the last segment with animation.
    ToggleAnimated,
    /// Jump between the first and the last segment without animation.
    ToggleSnap,
    SelectNext,
    SelectPrevious,
    SelectionChanged(usize),
    Mouse(MouseEvent),
}
