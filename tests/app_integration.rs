use std::time::Duration;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;

use segtui::{
    app::App,
    infrastructure::{
        config::Config,
        tui::{test::TestTui, Event},
    },
};

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty()))
}

fn app_with(segments: &[&str], initial_index: usize) -> App {
    let defaults = Config::default_config().expect("embedded config is valid");
    let config = Config {
        segments: segments.iter().map(|s| s.to_string()).collect(),
        initial_index,
        ..Default::default()
    }
    .merge_defaults(defaults);
    App::new(config).expect("valid segments")
}

#[tokio::test]
async fn test_click_then_quit() {
    let mut app = app_with(&["One", "Two", "Three"], 0);
    let mut tui = TestTui::new(60, 12).expect("failed to create TestTui");
    app.render(&mut tui).expect("rendered");
    let area = app.control_area();

    // Third segment, middle row.
    let click = MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        column: area.x + area.width - 2,
        row: area.y + 1,
        modifiers: KeyModifiers::NONE,
    };
    tui.enqueue_event(Event::Mouse(click));
    tui.enqueue_event(Event::Render);
    tui.enqueue_event(key('q'));

    app.run(&mut tui).await.expect("run succeeds");

    assert!(app.should_quit);
    assert_eq!(app.control.selected_index(), 2);
    assert_eq!(app.selected_title, "Three");
    assert!(tui.lines()[7].contains("Three"));
}

#[tokio::test]
async fn test_ctrl_c_quits() {
    let mut app = app_with(&["One", "Two"], 1);
    let mut tui = TestTui::with_events(
        40,
        12,
        [
            Event::Init,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            key('s'),
        ],
    )
    .expect("failed to create TestTui");

    app.run(&mut tui).await.expect("run succeeds");

    assert!(app.should_quit);
    // Events after quitting are not processed.
    assert_eq!(app.control.selected_index(), 1);
}

#[tokio::test]
async fn test_animated_toggle_settles_on_render_frames() {
    let mut app = app_with(&["A", "B", "C", "D"], 3);
    let mut tui = TestTui::new(80, 12).expect("failed to create TestTui");
    app.render(&mut tui).expect("rendered");

    app.handle_event(key('a')).expect("handled");
    app.process_actions(&mut tui).expect("processed");
    assert!(app.control.is_animating());
    assert_eq!(app.selected_title, "A");

    while app.control.is_animating() {
        app.advance(Duration::from_millis(50));
    }
    app.render(&mut tui).expect("rendered");

    assert_eq!(app.control.indicator_position(), Some(0.0));
}

#[tokio::test]
async fn test_resize_relayouts_control() {
    let mut app = app_with(&["One", "Two"], 1);
    let mut tui = TestTui::with_events(40, 12, [Event::Resize(20, 12)])
        .expect("failed to create TestTui");

    app.run(&mut tui).await.expect("run succeeds");

    assert_eq!(app.control_area().width, 20);
    assert_eq!(app.control.indicator_position(), Some(10.0));
}
