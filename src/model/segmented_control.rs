use std::time::Duration;

use tracing::debug;

use crate::error::SegmentError;

use super::{
    animation::{IndicatorAnimation, ANIMATION_DURATION},
    listener::{ListenerHandle, SelectionListeners},
    touch::{TouchAction, TouchEvent},
};

pub const MIN_SEGMENTS: usize = 2;

/// Laid-out size of the control in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Observable lifecycle of a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlState {
    /// No segments assigned yet. Renders blank and ignores touches.
    Unconfigured,
    Idle {
        selected_index: usize,
        indicator_position: Option<f32>,
    },
    Animating {
        selected_index: usize,
        from: f32,
        to: f32,
        elapsed: Duration,
    },
}

/// Host-driven input. See [`SegmentedControl::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Layout(Size),
    Touch(TouchEvent),
    Tick { elapsed: Duration },
    Detached,
}

/// State of a segmented control: the labels, the selection, the indicator
/// offset and its animation, and the selection observers.
#[derive(Debug, Default)]
pub struct SegmentedControl {
    segments: Vec<String>,
    selected_index: usize,
    // None until resolved from the selected index.
    indicator_position: Option<f32>,
    animation: Option<IndicatorAnimation>,
    size: Size,
    listeners: SelectionListeners,
    redraw_requested: bool,
}

impl SegmentedControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a control that already holds `labels`.
    pub fn with_segments<I, S>(labels: I, initial_index: usize) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut control = Self::new();
        control.set_segments(labels, initial_index)?;
        Ok(control)
    }

    /// Replace the segment set and select `initial_index`.
    ///
    /// Does not notify listeners. Any running animation is dropped and the
    /// indicator is recomputed from the new selection.
    pub fn set_segments<I, S>(&mut self, labels: I, initial_index: usize) -> Result<(), SegmentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() < MIN_SEGMENTS {
            return Err(SegmentError::TooFewSegments {
                count: labels.len(),
            });
        }
        if let Some(index) = labels.iter().position(|label| label.trim().is_empty()) {
            return Err(SegmentError::EmptyLabel { index });
        }
        if initial_index >= labels.len() {
            return Err(SegmentError::IndexOutOfRange {
                index: initial_index,
                count: labels.len(),
            });
        }

        debug!(count = labels.len(), initial_index, "segments replaced");
        self.segments = labels;
        self.selected_index = initial_index;
        self.indicator_position = None;
        self.animation = None;
        self.request_redraw();
        Ok(())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_configured(&self) -> bool {
        self.segments.len() >= MIN_SEGMENTS
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.segments.get(self.selected_index).map(String::as_str)
    }

    /// Single-slot observer: replaces every registered observer. `None`
    /// clears the slot.
    pub fn set_selection_change_listener<F>(&self, listener: Option<F>) -> Option<ListenerHandle>
    where
        F: FnMut(usize) + 'static,
    {
        self.listeners.replace(listener)
    }

    /// Register an additional observer.
    pub fn subscribe<F>(&self, listener: F) -> ListenerHandle
    where
        F: FnMut(usize) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn listeners(&self) -> &SelectionListeners {
        &self.listeners
    }

    /// Select `index`, sliding the indicator when `animate` is set and
    /// snapping it otherwise. Listeners are notified only when the
    /// selection actually changes.
    pub fn set_selected_index(&mut self, index: usize, animate: bool) -> Result<(), SegmentError> {
        if index >= self.segments.len() {
            return Err(SegmentError::IndexOutOfRange {
                index,
                count: self.segments.len(),
            });
        }
        if index != self.selected_index {
            self.select(index, animate);
        }
        Ok(())
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Deliver the bounds assigned by the host layout. A width change drops
    /// the animation and lets the indicator follow the new geometry.
    pub fn layout(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        if size.width != self.size.width {
            self.indicator_position = None;
            self.animation = None;
        }
        self.size = size;
        self.request_redraw();
    }

    /// Width of one segment, or `None` when unconfigured.
    pub fn segment_width(&self) -> Option<f32> {
        if !self.is_configured() {
            return None;
        }
        Some(self.size.width / self.segments.len() as f32)
    }

    /// Indicator offset when no animation runs for `index`.
    pub fn resting_position(&self, index: usize) -> f32 {
        self.segment_width()
            .map(|width| index as f32 * width)
            .unwrap_or_default()
    }

    /// Current left edge of the indicator, resolving the unset state to the
    /// resting position of the selection.
    pub fn indicator_position(&self) -> Option<f32> {
        if !self.is_configured() {
            return None;
        }
        Some(
            self.indicator_position
                .unwrap_or_else(|| self.resting_position(self.selected_index)),
        )
    }

    /// Like [`Self::indicator_position`], but stores the resolved value.
    pub fn resolve_indicator_position(&mut self) -> Option<f32> {
        let position = self.indicator_position()?;
        self.indicator_position = Some(position);
        Some(position)
    }

    /// Segment under the horizontal offset `x`, if any.
    pub fn segment_at(&self, x: f32) -> Option<usize> {
        let width = self.segment_width()?;
        if width <= 0.0 || !x.is_finite() {
            return None;
        }
        let index = (x / width).floor();
        if index < 0.0 || index >= self.segments.len() as f32 {
            return None;
        }
        Some(index as usize)
    }

    /// Resolve a touch gesture. The control always consumes the event.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        if !self.is_configured() || event.pointer_count() > 1 {
            return true;
        }
        if event.action != TouchAction::Up {
            return true;
        }
        let Some(point) = event.primary() else {
            return true;
        };
        if point.y < 0.0 || point.y > self.size.height {
            return true;
        }
        if let Some(index) = self.segment_at(point.x) {
            if index != self.selected_index {
                self.select(index, true);
            }
        }
        true
    }

    /// Advance the running animation. Returns `true` when a frame was
    /// produced.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let position = animation.advance(elapsed);
        if animation.is_finished() {
            self.animation = None;
        }
        self.indicator_position = Some(position);
        self.request_redraw();
        true
    }

    /// Teardown: the control left the display. Cancels the animation where
    /// it stands.
    pub fn detach(&mut self) {
        if self.animation.take().is_some() {
            debug!("animation cancelled on detach");
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&IndicatorAnimation> {
        self.animation.as_ref()
    }

    pub fn state(&self) -> ControlState {
        if !self.is_configured() {
            return ControlState::Unconfigured;
        }
        match &self.animation {
            Some(animation) => ControlState::Animating {
                selected_index: self.selected_index,
                from: animation.from(),
                to: animation.to(),
                elapsed: animation.elapsed(),
            },
            None => ControlState::Idle {
                selected_index: self.selected_index,
                indicator_position: self.indicator_position,
            },
        }
    }

    /// Dispatch a host message. Returns `true` when the size changed, the
    /// touch was consumed, a frame was produced, or a running animation was
    /// cancelled.
    pub fn update(&mut self, message: Message) -> bool {
        match message {
            Message::Layout(size) => {
                let changed = size != self.size;
                self.layout(size);
                changed
            }
            Message::Touch(event) => self.handle_touch(&event),
            Message::Tick { elapsed } => self.tick(elapsed),
            Message::Detached => {
                let cancelled = self.is_animating();
                self.detach();
                cancelled
            }
        }
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Return and clear the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn select(&mut self, index: usize, animate: bool) {
        // Captured before the selection moves, possibly mid-flight.
        let start = self
            .indicator_position()
            .unwrap_or_else(|| self.resting_position(self.selected_index));
        let target = self.resting_position(index);

        self.selected_index = index;
        debug!(index, animate, "selection changed");
        self.listeners.notify(index);

        if animate {
            self.animation = Some(IndicatorAnimation::new(start, target, ANIMATION_DURATION));
            self.indicator_position = Some(start);
        } else {
            self.animation = None;
            self.indicator_position = Some(target);
        }
        self.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use crate::model::touch::Point;

    const TITLES: [&str; 4] = ["URL", "Video ID", "Channel ID", "Test ID"];

    #[fixture]
    fn control() -> SegmentedControl {
        let mut control =
            SegmentedControl::with_segments(TITLES, 2).expect("valid segments");
        control.layout(Size::new(400.0, 48.0));
        control
    }

    fn record(control: &SegmentedControl) -> Rc<RefCell<Vec<usize>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        control.subscribe(move |index| sink.borrow_mut().push(index));
        calls
    }

    fn finish_animation(control: &mut SegmentedControl) {
        while control.tick(Duration::from_millis(16)) {}
    }

    #[test]
    fn test_new_is_unconfigured() {
        let control = SegmentedControl::new();
        assert_eq!(control.state(), ControlState::Unconfigured);
        assert_eq!(control.indicator_position(), None);
        assert_eq!(control.segment_width(), None);
    }

    #[rstest]
    #[case(vec!["a", "b"], 0)]
    #[case(vec!["a", "b", "c"], 2)]
    #[case(TITLES.to_vec(), 1)]
    fn test_set_segments_selects_initial_index(#[case] labels: Vec<&str>, #[case] initial: usize) {
        let mut control = SegmentedControl::new();
        control
            .set_segments(labels.clone(), initial)
            .expect("valid segments");
        assert_eq!(control.selected_index(), initial);
        assert_eq!(control.segment_count(), labels.len());
    }

    #[rstest]
    #[case(vec![], SegmentError::TooFewSegments { count: 0 })]
    #[case(vec!["only"], SegmentError::TooFewSegments { count: 1 })]
    #[case(vec!["a", ""], SegmentError::EmptyLabel { index: 1 })]
    #[case(vec!["  ", "b"], SegmentError::EmptyLabel { index: 0 })]
    fn test_set_segments_rejects_invalid_labels(
        mut control: SegmentedControl,
        #[case] labels: Vec<&str>,
        #[case] expected: SegmentError,
    ) {
        let before = control.segments().to_vec();
        let error = control
            .set_segments(labels, 0)
            .expect_err("should be rejected");
        assert_eq!(error, expected);
        assert!(error.is_invalid_argument());
        assert_eq!(control.segments(), before.as_slice());
        assert_eq!(control.selected_index(), 2);
    }

    #[rstest]
    fn test_set_segments_rejects_initial_index_out_of_range(mut control: SegmentedControl) {
        let error = control
            .set_segments(["a", "b"], 2)
            .expect_err("should be rejected");
        assert_eq!(error, SegmentError::IndexOutOfRange { index: 2, count: 2 });
        assert_eq!(control.segment_count(), 4);
    }

    #[rstest]
    fn test_set_segments_does_not_notify(mut control: SegmentedControl) {
        let calls = record(&control);
        control
            .set_segments(["a", "b", "c"], 1)
            .expect("valid segments");
        assert!(calls.borrow().is_empty());
    }

    #[rstest]
    fn test_set_segments_resets_animation_and_indicator(mut control: SegmentedControl) {
        control.handle_touch(&TouchEvent::up(350.0, 10.0));
        control.tick(Duration::from_millis(100));
        assert!(control.is_animating());

        control.set_segments(["a", "b"], 1).expect("valid segments");

        assert!(!control.is_animating());
        assert_eq!(control.indicator_position(), Some(200.0));
        assert!(control.take_redraw_request());
    }

    #[rstest]
    fn test_resting_indicator_position(control: SegmentedControl) {
        assert_eq!(control.segment_width(), Some(100.0));
        assert_eq!(control.indicator_position(), Some(200.0));
    }

    #[rstest]
    #[case(0.0, Some(0))]
    #[case(99.9, Some(0))]
    #[case(100.0, Some(1))]
    #[case(250.0, Some(2))]
    #[case(399.9, Some(3))]
    #[case(400.0, None)]
    #[case(-0.5, None)]
    #[case(f32::NAN, None)]
    fn test_segment_at(control: SegmentedControl, #[case] x: f32, #[case] expected: Option<usize>) {
        assert_eq!(control.segment_at(x), expected);
    }

    #[rstest]
    fn test_touch_other_segment_notifies_and_animates(mut control: SegmentedControl) {
        let calls = record(&control);

        assert!(control.handle_touch(&TouchEvent::up(350.0, 24.0)));

        assert_eq!(control.selected_index(), 3);
        assert_eq!(*calls.borrow(), vec![3]);
        assert_eq!(
            control.state(),
            ControlState::Animating {
                selected_index: 3,
                from: 200.0,
                to: 300.0,
                elapsed: Duration::ZERO,
            }
        );

        finish_animation(&mut control);
        assert_eq!(control.indicator_position(), Some(300.0));
        assert!(!control.is_animating());
    }

    #[rstest]
    fn test_touch_selected_segment_is_noop(mut control: SegmentedControl) {
        let calls = record(&control);
        control.handle_touch(&TouchEvent::up(350.0, 24.0));
        finish_animation(&mut control);

        assert!(control.handle_touch(&TouchEvent::up(350.0, 24.0)));

        assert_eq!(*calls.borrow(), vec![3]);
        assert!(!control.is_animating());
    }

    #[rstest]
    #[case(TouchEvent::down(50.0, 24.0))]
    #[case(TouchEvent::new(TouchAction::Move, vec![Point::new(50.0, 24.0)]))]
    #[case(TouchEvent::new(TouchAction::Cancel, vec![Point::new(50.0, 24.0)]))]
    #[case(TouchEvent::new(
        TouchAction::Up,
        vec![Point::new(50.0, 24.0), Point::new(150.0, 24.0)]
    ))]
    #[case(TouchEvent::up(50.0, -1.0))]
    #[case(TouchEvent::up(50.0, 48.5))]
    #[case(TouchEvent::up(400.0, 24.0))]
    #[case(TouchEvent::new(TouchAction::Up, vec![]))]
    fn test_ignored_touches_are_consumed(mut control: SegmentedControl, #[case] event: TouchEvent) {
        let calls = record(&control);
        assert!(control.handle_touch(&event));
        assert_eq!(control.selected_index(), 2);
        assert!(calls.borrow().is_empty());
        assert!(!control.is_animating());
    }

    #[rstest]
    #[case(TouchEvent::up(50.0, 0.0))]
    #[case(TouchEvent::up(50.0, 48.0))]
    fn test_touch_on_vertical_edges_selects(
        mut control: SegmentedControl,
        #[case] event: TouchEvent,
    ) {
        let calls = record(&control);
        assert!(control.handle_touch(&event));
        assert_eq!(control.selected_index(), 0);
        assert_eq!(*calls.borrow(), vec![0]);
        assert!(control.is_animating());
    }

    #[test]
    fn test_touch_on_unconfigured_control() {
        let mut control = SegmentedControl::new();
        control.layout(Size::new(400.0, 48.0));
        assert!(control.handle_touch(&TouchEvent::up(10.0, 10.0)));
        assert_eq!(control.state(), ControlState::Unconfigured);
    }

    #[rstest]
    fn test_second_animation_starts_where_first_stopped(mut control: SegmentedControl) {
        control.handle_touch(&TouchEvent::up(350.0, 24.0));
        control.tick(Duration::from_millis(150));
        let reached = control.indicator_position().expect("configured");
        assert!((reached - 250.0).abs() < 1e-3, "got {reached}");

        control.handle_touch(&TouchEvent::up(50.0, 24.0));

        let animation = control.animation().expect("animating");
        assert_eq!(animation.from(), reached);
        assert_eq!(animation.to(), 0.0);
        assert_eq!(animation.elapsed(), Duration::ZERO);
        assert_eq!(control.indicator_position(), Some(reached));

        finish_animation(&mut control);
        assert_eq!(control.indicator_position(), Some(0.0));
    }

    #[rstest]
    fn test_tick_without_animation(mut control: SegmentedControl) {
        control.take_redraw_request();
        assert!(!control.tick(Duration::from_millis(16)));
        assert!(!control.take_redraw_request());
    }

    #[rstest]
    fn test_animation_frames_request_redraw_without_notifying(mut control: SegmentedControl) {
        let calls = record(&control);
        control.handle_touch(&TouchEvent::up(350.0, 24.0));
        control.take_redraw_request();

        assert!(control.tick(Duration::from_millis(16)));
        assert!(control.take_redraw_request());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[rstest]
    fn test_set_selected_index_without_animation(mut control: SegmentedControl) {
        control
            .set_selected_index(3, false)
            .expect("index in range");
        let calls = record(&control);

        control
            .set_selected_index(0, false)
            .expect("index in range");

        assert_eq!(*calls.borrow(), vec![0]);
        assert_eq!(control.indicator_position(), Some(0.0));
        assert!(!control.is_animating());
        assert!(!control.tick(Duration::from_millis(16)));
    }

    #[rstest]
    fn test_set_selected_index_with_animation(mut control: SegmentedControl) {
        let calls = record(&control);
        control.set_selected_index(0, true).expect("index in range");

        assert_eq!(*calls.borrow(), vec![0]);
        assert!(control.is_animating());
        finish_animation(&mut control);
        assert_eq!(control.indicator_position(), Some(0.0));
    }

    #[rstest]
    fn test_set_selected_index_same_index_is_noop(mut control: SegmentedControl) {
        let calls = record(&control);
        control.set_selected_index(2, true).expect("index in range");
        assert!(calls.borrow().is_empty());
        assert!(!control.is_animating());
    }

    #[rstest]
    fn test_set_selected_index_out_of_range(mut control: SegmentedControl) {
        let error = control
            .set_selected_index(4, true)
            .expect_err("should be rejected");
        assert_eq!(error, SegmentError::IndexOutOfRange { index: 4, count: 4 });
        assert_eq!(control.selected_index(), 2);
    }

    #[rstest]
    fn test_snap_cancels_running_animation(mut control: SegmentedControl) {
        control.handle_touch(&TouchEvent::up(350.0, 24.0));
        control.tick(Duration::from_millis(50));

        control.set_selected_index(1, false).expect("index in range");

        assert!(!control.is_animating());
        assert_eq!(control.indicator_position(), Some(100.0));
    }

    #[rstest]
    fn test_detach_cancels_animation(mut control: SegmentedControl) {
        control.handle_touch(&TouchEvent::up(350.0, 24.0));
        control.tick(Duration::from_millis(150));
        let reached = control.indicator_position();

        control.update(Message::Detached);

        assert!(!control.is_animating());
        assert_eq!(control.indicator_position(), reached);
        assert!(!control.tick(Duration::from_millis(16)));
    }

    #[rstest]
    fn test_update_reports_effect(mut control: SegmentedControl) {
        assert!(!control.update(Message::Layout(Size::new(400.0, 48.0))));
        assert!(control.update(Message::Layout(Size::new(400.0, 40.0))));
        assert!(!control.update(Message::Tick {
            elapsed: Duration::from_millis(16),
        }));
        assert!(!control.update(Message::Detached));

        assert!(control.update(Message::Touch(TouchEvent::up(50.0, 20.0))));
        assert!(control.update(Message::Tick {
            elapsed: Duration::from_millis(16),
        }));
        assert!(control.update(Message::Detached));
        assert!(!control.is_animating());
    }

    #[rstest]
    fn test_width_change_recomputes_indicator(mut control: SegmentedControl) {
        control.set_selected_index(3, false).expect("index in range");
        control.layout(Size::new(800.0, 48.0));
        assert_eq!(control.indicator_position(), Some(600.0));
    }

    #[rstest]
    fn test_height_change_keeps_indicator(mut control: SegmentedControl) {
        control.handle_touch(&TouchEvent::up(350.0, 24.0));
        control.layout(Size::new(400.0, 64.0));
        assert!(control.is_animating());
    }

    #[rstest]
    fn test_replaced_listener_is_not_called(mut control: SegmentedControl) {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&first);
        control.set_selection_change_listener(Some(move |i| sink.borrow_mut().push(i)));
        let sink = Rc::clone(&second);
        control.set_selection_change_listener(Some(move |i| sink.borrow_mut().push(i)));

        control.handle_touch(&TouchEvent::up(10.0, 10.0));

        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), vec![0]);
    }

    #[rstest]
    fn test_cleared_listener(mut control: SegmentedControl) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        control.set_selection_change_listener(Some(move |i| sink.borrow_mut().push(i)));
        control.set_selection_change_listener(None::<fn(usize)>);

        control.handle_touch(&TouchEvent::up(10.0, 10.0));

        assert!(calls.borrow().is_empty());
        assert!(control.listeners().is_empty());
    }

    #[rstest]
    fn test_resolve_indicator_position_stores_value(mut control: SegmentedControl) {
        assert_eq!(control.resolve_indicator_position(), Some(200.0));
        assert_eq!(
            control.state(),
            ControlState::Idle {
                selected_index: 2,
                indicator_position: Some(200.0),
            }
        );
    }
}
