use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::StatefulWidget;

use crate::model::{
    segmented_control::{Message, SegmentedControl, Size},
    touch::{Point, TouchAction, TouchEvent},
};
use crate::presentation::{
    buffer_canvas::BufferCanvas,
    canvas::{Canvas, Paint, RectF},
    config::Palette,
    units::{DisplayMetrics, UnitConverter},
};

pub const CORNER_RADIUS_DP: f32 = 24.0;
pub const FONT_SIZE_SP: f32 = 16.0;
pub const BORDER_WIDTH_DP: f32 = 1.0;

/// Paints a [`SegmentedControl`] on any [`Canvas`].
pub struct SegmentedControlView<'a, U: UnitConverter> {
    palette: &'a Palette,
    units: &'a U,
}

impl<'a, U: UnitConverter> SegmentedControlView<'a, U> {
    pub fn new(palette: &'a Palette, units: &'a U) -> Self {
        Self { palette, units }
    }

    /// One render pass: border, indicator, then labels. Draws nothing for an
    /// unconfigured control.
    pub fn draw<C: Canvas>(&self, control: &mut SegmentedControl, canvas: &mut C) {
        if !control.is_configured() {
            return;
        }
        let Size { width, height } = control.size();
        let radius = self.units.dp(CORNER_RADIUS_DP) as f32;

        let border_width = self.units.dp(BORDER_WIDTH_DP) as f32;
        let inset = border_width / 2.0;
        canvas.draw_round_rect(
            RectF::new(inset, inset, width - inset, height - inset),
            radius,
            &Paint::stroke(self.palette.border, border_width),
        );

        let segment_width = width / control.segment_count() as f32;
        let start = control.resolve_indicator_position().unwrap_or_default();
        canvas.draw_round_rect(
            RectF::new(start, 0.0, start + segment_width, height),
            radius,
            &Paint::fill(self.palette.indicator),
        );

        self.draw_labels(control, canvas, segment_width, height);
    }

    fn draw_labels<C: Canvas>(
        &self,
        control: &SegmentedControl,
        canvas: &mut C,
        segment_width: f32,
        height: f32,
    ) {
        let text_size = self.units.sp(FONT_SIZE_SP) as f32;
        let selected = Paint::text(self.palette.selected_text, text_size);
        let unselected = Paint::text(self.palette.unselected_text, text_size);

        let labels = control.segments();
        let widths: Vec<f32> = labels
            .iter()
            .map(|label| canvas.measure_text(label, &unselected))
            .collect();
        // Every label shares the baseline derived from the first glyph.
        let first_glyph = labels
            .first()
            .and_then(|label| label.chars().next())
            .map(String::from)
            .unwrap_or_default();
        let baseline = (height + canvas.text_height(&first_glyph, &unselected)) / 2.0;

        for (index, (label, label_width)) in labels.iter().zip(widths).enumerate() {
            let paint = if index == control.selected_index() {
                &selected
            } else {
                &unselected
            };
            let center = (index as f32 + 0.5) * segment_width;
            canvas.draw_text(label, center - label_width / 2.0, baseline, paint);
        }
    }
}

/// Terminal rendering of the control, one cell per pixel.
#[derive(Debug, Clone, Copy)]
pub struct SegmentedControlWidget<'a> {
    palette: &'a Palette,
}

impl<'a> SegmentedControlWidget<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }
}

impl StatefulWidget for SegmentedControlWidget<'_> {
    type State = SegmentedControl;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.update(Message::Layout(Size::new(
            f32::from(area.width),
            f32::from(area.height),
        )));
        let metrics = DisplayMetrics::identity();
        let view = SegmentedControlView::new(self.palette, &metrics);
        let mut canvas = BufferCanvas::new(buf, area, self.palette.background);
        view.draw(state, &mut canvas);
    }
}

/// Translate a left-button mouse event into a touch local to `area`, using
/// the center of the hit cell.
pub fn touch_from_mouse(mouse: &MouseEvent, area: Rect) -> Option<TouchEvent> {
    let action = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => TouchAction::Down,
        MouseEventKind::Drag(MouseButton::Left) => TouchAction::Move,
        MouseEventKind::Up(MouseButton::Left) => TouchAction::Up,
        _ => return None,
    };
    let x = f32::from(mouse.column) - f32::from(area.x) + 0.5;
    let y = f32::from(mouse.row) - f32::from(area.y) + 0.5;
    Some(TouchEvent::new(action, vec![Point::new(x, y)]))
}
