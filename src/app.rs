//! Demo host for the segmented control
//!
//! Shows the control, the title of the current selection and two actions
//! toggling between the first and the last segment, one animated and one
//! snapping. Terminal events become [`Action`]s on a channel; the selection
//! listener feeds the same channel.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, StatefulWidget};
use tokio::sync::mpsc;

use crate::{
    action::Action,
    infrastructure::{config::Config, tui},
    model::{
        listener::ListenerHandle,
        segmented_control::{Message, SegmentedControl},
    },
    presentation::widgets::segmented_control::{touch_from_mouse, SegmentedControlWidget},
};

const CONTROL_HEIGHT: u16 = 3;
const MAX_CONTROL_WIDTH: u16 = 64;

pub struct App {
    pub config: Config,
    pub control: SegmentedControl,
    pub selected_title: String,
    pub should_quit: bool,
    control_area: Rect,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    needs_render: bool,
    last_frame: Option<Instant>,
    listener: Option<ListenerHandle>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let control =
            SegmentedControl::with_segments(config.segments.clone(), config.initial_index)?;
        let selected_title = control.selected_label().unwrap_or_default().to_owned();

        let tx = action_tx.clone();
        let listener = control.subscribe(move |index| {
            if let Err(e) = tx.send(Action::SelectionChanged(index)) {
                log::error!("Failed to forward selection change: {e}");
            }
        });

        Ok(Self {
            config,
            control,
            selected_title,
            should_quit: false,
            control_area: Rect::default(),
            action_tx,
            action_rx,
            needs_render: true,
            last_frame: None,
            listener: Some(listener),
        })
    }

    pub fn control_area(&self) -> Rect {
        self.control_area
    }

    pub async fn run<T>(&mut self, tui: &mut T) -> Result<()>
    where
        T: tui::TuiLike + ?Sized,
    {
        tui.enter()?;
        self.render(tui)?;

        while let Some(event) = tui.next().await {
            self.handle_event(event)?;
            self.process_actions(tui)?;
            if self.should_quit {
                break;
            }
        }

        self.control.update(Message::Detached);
        if let Some(listener) = self.listener.take() {
            listener.detach();
        }
        tui.exit()?;
        Ok(())
    }

    /// Translate a terminal event into actions.
    pub fn handle_event(&mut self, event: tui::Event) -> Result<()> {
        match event {
            tui::Event::Tick => self.action_tx.send(Action::Tick)?,
            tui::Event::Render => self.action_tx.send(Action::Render)?,
            tui::Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
            tui::Event::Mouse(mouse) => self.action_tx.send(Action::Mouse(mouse))?,
            tui::Event::Key(key) => {
                if let Some(action) = self.config.keybindings.action_for(&key) {
                    log::info!("Got action: {action:?}");
                    self.action_tx.send(action.clone())?;
                }
            }
            tui::Event::Error => self
                .action_tx
                .send(Action::Error(String::from("terminal event error")))?,
            tui::Event::Init | tui::Event::Closed => {}
        }
        Ok(())
    }

    pub fn process_actions<T>(&mut self, tui: &mut T) -> Result<()>
    where
        T: tui::TuiLike + ?Sized,
    {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                log::debug!("{action:?}");
            }
            match action {
                Action::Render => {
                    let now = Instant::now();
                    let elapsed = self
                        .last_frame
                        .map(|last| now.duration_since(last))
                        .unwrap_or_default();
                    self.last_frame = Some(now);
                    self.advance(elapsed);
                    if self.needs_render {
                        self.render(tui)?;
                    }
                }
                Action::Resize(w, h) => {
                    tui.resize(Rect::new(0, 0, w, h))?;
                    self.render(tui)?;
                }
                action => self.update(action)?,
            }
        }
        Ok(())
    }

    /// Apply a non-rendering action to the app state.
    pub fn update(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleAnimated => self.toggle(true)?,
            Action::ToggleSnap => self.toggle(false)?,
            Action::SelectNext => {
                let count = self.control.segment_count();
                let next = (self.control.selected_index() + 1) % count;
                self.control.set_selected_index(next, true)?;
            }
            Action::SelectPrevious => {
                let count = self.control.segment_count();
                let previous = (self.control.selected_index() + count - 1) % count;
                self.control.set_selected_index(previous, true)?;
            }
            Action::SelectionChanged(index) => {
                if let Some(title) = self.control.segments().get(index) {
                    self.selected_title.clone_from(title);
                    self.needs_render = true;
                }
            }
            Action::Mouse(mouse) => {
                if let Some(touch) = touch_from_mouse(&mouse, self.control_area) {
                    self.control.update(Message::Touch(touch));
                }
            }
            Action::Error(e) => log::error!("{e}"),
            Action::Tick | Action::Render | Action::Resize(..) => {}
        }
        if self.control.take_redraw_request() {
            self.needs_render = true;
        }
        Ok(())
    }

    /// Feed the frame clock to the control.
    pub fn advance(&mut self, elapsed: Duration) {
        self.control.update(Message::Tick { elapsed });
        if self.control.take_redraw_request() {
            self.needs_render = true;
        }
    }

    fn toggle(&mut self, animate: bool) -> Result<()> {
        let last = self.control.segment_count().saturating_sub(1);
        let target = if self.control.selected_index() == 0 {
            last
        } else {
            0
        };
        self.control.set_selected_index(target, animate)?;
        Ok(())
    }

    pub fn render<T>(&mut self, tui: &mut T) -> Result<()>
    where
        T: tui::TuiLike + ?Sized,
    {
        let mut control_area = self.control_area;
        tui.draw(&mut |f: &mut tui::Frame<'_>| {
            control_area = self.draw(f);
        })?;
        self.control_area = control_area;
        // The layout pass may itself have requested a redraw.
        self.control.take_redraw_request();
        self.needs_render = false;
        Ok(())
    }

    fn draw(&mut self, f: &mut tui::Frame<'_>) -> Rect {
        let area = f.area();
        let [_, title_area, _, control_row, _, label_area, _, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(CONTROL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let control_width = control_row.width.min(MAX_CONTROL_WIDTH);
        let [control_area] = Layout::horizontal([Constraint::Length(control_width)])
            .flex(Flex::Center)
            .areas(control_row);

        f.render_widget(
            Paragraph::new("Segmented control".bold()).centered(),
            title_area,
        );
        SegmentedControlWidget::new(&self.config.palette).render(
            control_area,
            f.buffer_mut(),
            &mut self.control,
        );
        f.render_widget(
            Paragraph::new(self.selected_title.as_str()).centered(),
            label_area,
        );
        f.render_widget(
            Paragraph::new("click a segment · a: toggle animated · s: toggle snap · q: quit".dim())
                .centered(),
            hint_area,
        );
        control_area
    }
}
