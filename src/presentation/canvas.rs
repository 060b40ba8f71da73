//! Drawing surface abstraction
//!
//! Widgets paint through [`Canvas`] so the same painting code drives a
//! terminal buffer or a recording used for assertions.

use super::color::Argb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// How a shape or a run of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Argb,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub text_size: f32,
}

impl Paint {
    pub fn fill(color: Argb) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            text_size: 0.0,
        }
    }

    pub fn stroke(color: Argb, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
            text_size: 0.0,
        }
    }

    pub fn text(color: Argb, size: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            text_size: size,
        }
    }
}

/// Axis-aligned rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

pub trait Canvas {
    fn draw_round_rect(&mut self, rect: RectF, radius: f32, paint: &Paint);

    /// Draw `text` with its left edge at `x` and its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint);

    /// Rendered width of `text`.
    fn measure_text(&self, text: &str, paint: &Paint) -> f32;

    /// Height of the glyph bounds of `text`, used to center it vertically.
    fn text_height(&self, text: &str, paint: &Paint) -> f32;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    RoundRect {
        rect: RectF,
        radius: f32,
        paint: Paint,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        paint: Paint,
    },
}

/// Canvas that records every operation. Glyphs are treated as fixed-width
/// boxes of `char_width` by `glyph_height` times the text size.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
    pub char_width: f32,
    pub glyph_height: f32,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            char_width: 0.5,
            glyph_height: 0.7,
        }
    }

    pub fn texts(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .collect()
    }

    pub fn round_rects(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::RoundRect { .. }))
            .collect()
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_round_rect(&mut self, rect: RectF, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::RoundRect {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            x,
            y,
            paint: *paint,
        });
    }

    fn measure_text(&self, text: &str, paint: &Paint) -> f32 {
        text.chars().count() as f32 * self.char_width * paint.text_size
    }

    fn text_height(&self, _text: &str, paint: &Paint) -> f32 {
        self.glyph_height * paint.text_size
    }
}
