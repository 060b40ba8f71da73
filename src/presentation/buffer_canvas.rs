//! [`Canvas`] over a ratatui [`Buffer`]
//!
//! One cell is one pixel. Stroked rounded rectangles become rounded borders,
//! fills paint cell backgrounds and text sits on the row right above its
//! baseline. Translucent colors are blended over the current cell
//! background, or over the configured background for cells without one.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Widget};
use unicode_width::UnicodeWidthStr;

use super::{
    canvas::{Canvas, Paint, PaintStyle, RectF},
    color::Argb,
};

pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    background: Argb,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, background: Argb) -> Self {
        let area = area.intersection(buf.area);
        Self {
            buf,
            area,
            background,
        }
    }

    fn cell_background(&self, x: u16, y: u16) -> Argb {
        self.buf
            .cell((x, y))
            .and_then(|cell| Argb::from_color(cell.bg))
            .unwrap_or(self.background)
    }

    /// Cell rectangle covering `rect` (outward rounding), clipped to the area.
    fn covering_cells(&self, rect: RectF) -> Rect {
        self.to_cells(
            rect.left.floor(),
            rect.top.floor(),
            rect.right.ceil(),
            rect.bottom.ceil(),
        )
    }

    /// Cell rectangle whose centers lie inside `rect`, clipped to the area.
    fn nearest_cells(&self, rect: RectF) -> Rect {
        self.to_cells(
            rect.left.round(),
            rect.top.round(),
            rect.right.round(),
            rect.bottom.round(),
        )
    }

    fn to_cells(&self, left: f32, top: f32, right: f32, bottom: f32) -> Rect {
        let clamp_x = |v: f32| v.clamp(0.0, f32::from(self.area.width)) as u16;
        let clamp_y = |v: f32| v.clamp(0.0, f32::from(self.area.height)) as u16;
        let (x0, x1) = (clamp_x(left), clamp_x(right));
        let (y0, y1) = (clamp_y(top), clamp_y(bottom));
        Rect::new(
            self.area.x + x0,
            self.area.y + y0,
            x1.saturating_sub(x0),
            y1.saturating_sub(y0),
        )
    }
}

impl Canvas for BufferCanvas<'_> {
    fn draw_round_rect(&mut self, rect: RectF, radius: f32, paint: &Paint) {
        match paint.style {
            PaintStyle::Stroke => {
                let cells = self.covering_cells(rect);
                if cells.is_empty() {
                    return;
                }
                let color = paint.color.over(self.background).to_color();
                let border_type = if radius > 0.0 {
                    BorderType::Rounded
                } else {
                    BorderType::Plain
                };
                Block::bordered()
                    .border_type(border_type)
                    .border_style(Style::default().fg(color))
                    .render(cells, self.buf);
            }
            PaintStyle::Fill => {
                let cells = self.nearest_cells(rect);
                for y in cells.top()..cells.bottom() {
                    for x in cells.left()..cells.right() {
                        let color = paint.color.over(self.cell_background(x, y)).to_color();
                        if let Some(cell) = self.buf.cell_mut((x, y)) {
                            cell.set_bg(color);
                        }
                    }
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        // The glyph row is the one whose bottom edge is the baseline.
        let row = y.ceil() - 1.0;
        if row < 0.0 || row >= f32::from(self.area.height) {
            return;
        }
        let row = self.area.y + row as u16;
        let mut column = x.round() as i32;
        for (offset, ch) in text.char_indices() {
            let symbol = &text[offset..offset + ch.len_utf8()];
            let width = symbol.width() as i32;
            if column >= 0 && column + width <= i32::from(self.area.width) {
                let cell_x = self.area.x + column as u16;
                let fg = paint.color.over(self.cell_background(cell_x, row)).to_color();
                self.buf
                    .set_stringn(cell_x, row, symbol, width as usize, Style::default().fg(fg));
            }
            column += width;
        }
    }

    fn measure_text(&self, text: &str, _paint: &Paint) -> f32 {
        text.width() as f32
    }

    fn text_height(&self, _text: &str, _paint: &Paint) -> f32 {
        1.0
    }
}
