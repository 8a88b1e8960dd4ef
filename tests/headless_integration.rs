use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use typetastic::app::{App, AppState, Flow};
use typetastic::config::Config;
use typetastic::language::Corpus;
use typetastic::runtime::{
    AppEvent, ManualTickScheduler, Runner, TestEventSource, ThreadTickScheduler, TickScheduler,
};
use typetastic::{SessionState, TestDuration};

// Headless integration: the app driven through Runner/TestEventSource, no TTY.

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn app_with_prompt(prompt: &str, duration: TestDuration) -> (App, ManualTickScheduler) {
    let scheduler = ManualTickScheduler::new();
    let settings = Config {
        duration,
        ..Config::default()
    };
    let app = App::new(
        settings,
        Some(prompt.to_string()),
        Corpus::english().unwrap(),
        Box::new(scheduler.clone()),
    );
    (app, scheduler)
}

/// Apply every queued event; returns false once the app asked to quit.
fn drain(runner: &Runner<TestEventSource>, app: &mut App) -> bool {
    while let Some(event) = runner.step() {
        if app.handle_event(event) == Flow::Quit {
            return false;
        }
    }
    true
}

#[test]
fn headless_fifteen_second_session() {
    let (mut app, scheduler) = app_with_prompt("the cat sat", TestDuration::Fifteen);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    for c in "the cat sam".chars() {
        tx.send(key(c)).unwrap();
    }
    assert!(drain(&runner, &mut app));
    assert_eq!(app.snapshot.session_state, SessionState::Running);
    assert_eq!(app.snapshot.input.total_mistakes, 1);

    let live = scheduler.live();
    assert_eq!(live.len(), 1);
    for _ in 0..15 {
        tx.send(AppEvent::Tick(live[0].id())).unwrap();
    }
    assert!(drain(&runner, &mut app));

    assert_eq!(app.state, AppState::Results);
    assert_eq!(app.snapshot.session_state, SessionState::Finished);
    assert_eq!(app.snapshot.clock.remaining_secs, 0);
    assert_eq!(app.snapshot.clock.elapsed_secs, 15);
    // 2 completed words in 15 seconds
    assert_eq!(app.snapshot.score.wpm, 8);
    // 1 mistake over 11 typed chars
    assert_eq!(app.snapshot.score.accuracy, 91);
    assert!(scheduler.live().is_empty());
    assert_eq!(app.test.history().points().len(), 15);
}

#[test]
fn headless_reset_ignores_queued_ticks() {
    let (mut app, scheduler) = app_with_prompt("hello world", TestDuration::Thirty);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    tx.send(key('h')).unwrap();
    assert!(drain(&runner, &mut app));
    let old = scheduler.live()[0].id();

    // A tick already in flight when the user starts a new test.
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)))
        .unwrap();
    tx.send(AppEvent::Tick(old)).unwrap();
    assert!(drain(&runner, &mut app));

    assert_eq!(app.snapshot.session_state, SessionState::Idle);
    assert_eq!(app.snapshot.clock.elapsed_secs, 0);
    assert_eq!(app.snapshot.clock.remaining_secs, 30);
    assert_eq!(app.snapshot.input.typed_text, "");
    assert!(scheduler.live().is_empty());
}

#[test]
fn headless_escape_quits() {
    let (mut app, _) = app_with_prompt("hi", TestDuration::Fifteen);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    tx.send(key('h')).unwrap();
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();
    tx.send(key('i')).unwrap();

    assert!(!drain(&runner, &mut app));
    assert_eq!(app.snapshot.input.typed_text, "h");
}

#[test]
fn thread_scheduler_delivers_ticks_until_cancelled() {
    let (tx, rx) = mpsc::channel();
    let mut scheduler = ThreadTickScheduler::new(tx);
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(500));

    let handle = scheduler.schedule(Duration::from_millis(5));
    assert_eq!(runner.step(), Some(AppEvent::Tick(handle.id())));
    assert!(handle.cancel());

    // A tick sent just before cancelling may still be queued, nothing after it.
    let mut late = 0;
    while runner.step().is_some() {
        late += 1;
        assert!(late <= 2, "ticks kept arriving after cancel");
    }
}
