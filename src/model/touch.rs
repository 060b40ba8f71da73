//! Touch input delivered to the control
//!
//! Coordinates are local to the control, in device pixels, with the origin at
//! its top-left corner.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One touch gesture step. `pointers` holds every contact currently down,
/// the primary one first.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub pointers: Vec<Point>,
}

impl TouchEvent {
    pub fn new(action: TouchAction, pointers: Vec<Point>) -> Self {
        Self { action, pointers }
    }

    /// Single-contact release at `(x, y)`.
    pub fn up(x: f32, y: f32) -> Self {
        Self::new(TouchAction::Up, vec![Point::new(x, y)])
    }

    /// Single-contact press at `(x, y)`.
    pub fn down(x: f32, y: f32) -> Self {
        Self::new(TouchAction::Down, vec![Point::new(x, y)])
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn primary(&self) -> Option<Point> {
        self.pointers.first().copied()
    }
}
