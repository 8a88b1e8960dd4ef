use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::language::Corpus;
use crate::runtime::{AppEvent, TickScheduler};
use crate::session::TestDuration;
use crate::typing_test::{Snapshot, TypingTest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal host state: the running test plus the latest snapshot to draw.
#[derive(Debug)]
pub struct App {
    pub test: TypingTest,
    pub state: AppState,
    pub settings: Config,
    pub snapshot: Snapshot,
}

impl App {
    pub fn new(
        settings: Config,
        custom_prompt: Option<String>,
        corpus: &'static Corpus,
        scheduler: Box<dyn TickScheduler>,
    ) -> Self {
        let test = TypingTest::start_session(
            settings.session_config(custom_prompt),
            corpus,
            scheduler,
        );
        let snapshot = test.snapshot();
        Self {
            test,
            state: AppState::Typing,
            settings,
            snapshot,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Tick(id) => {
                if let Some(snapshot) = self.test.on_tick(id) {
                    self.apply(snapshot);
                }
                Flow::Continue
            }
            AppEvent::Resize => Flow::Continue,
            AppEvent::Key(key) => self.handle_key(key),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('n') if ctrl => self.toggle_numbers(),
            KeyCode::Char('p') if ctrl => self.toggle_punctuation(),
            KeyCode::Tab => self.new_test(),
            KeyCode::Up => self.set_duration(self.settings.duration.next()),
            KeyCode::Down => self.set_duration(self.settings.duration.prev()),
            KeyCode::Backspace if self.state == AppState::Typing => {
                let snapshot = self.test.backspace();
                self.apply(snapshot);
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                match self.state {
                    AppState::Typing => {
                        let snapshot = self.test.submit_keystroke(c);
                        self.apply(snapshot);
                    }
                    AppState::Results => {
                        if matches!(c, 'r' | 'n') {
                            self.new_test();
                        }
                    }
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn new_test(&mut self) {
        let snapshot = self.test.reset_session();
        self.apply(snapshot);
    }

    fn set_duration(&mut self, duration: TestDuration) {
        self.settings.duration = duration;
        let snapshot = self.test.change_duration(duration);
        self.apply(snapshot);
    }

    fn toggle_numbers(&mut self) {
        self.settings.include_numbers = !self.settings.include_numbers;
        self.update_options();
    }

    fn toggle_punctuation(&mut self) {
        self.settings.include_punctuation = !self.settings.include_punctuation;
        self.update_options();
    }

    /// New options regenerate the text only before the countdown starts;
    /// otherwise they wait for the next test.
    fn update_options(&mut self) {
        let snapshot = self.test.set_options(self.settings.options());
        if self.test.has_started() {
            self.apply(snapshot);
        } else {
            self.new_test();
        }
    }

    fn apply(&mut self, snapshot: Snapshot) {
        self.state = if self.test.has_finished() {
            AppState::Results
        } else {
            AppState::Typing
        };
        self.snapshot = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ManualTickScheduler;
    use crate::session::SessionState;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn app(prompt: &str, duration: TestDuration) -> (App, ManualTickScheduler) {
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

    fn tick_live(app: &mut App, scheduler: &ManualTickScheduler) {
        let id = scheduler.live()[0].id();
        app.handle_event(AppEvent::Tick(id));
    }

    #[test]
    fn test_typing_updates_snapshot() {
        let (mut app, _) = app("hi there", TestDuration::Fifteen);
        app.handle_event(key(KeyCode::Char('h')));
        app.handle_event(key(KeyCode::Char('x')));

        assert_eq!(app.snapshot.input.typed_text, "hx");
        assert_eq!(app.snapshot.input.total_mistakes, 1);
        assert_eq!(app.snapshot.session_state, SessionState::Running);
        assert_eq!(app.state, AppState::Typing);
    }

    #[test]
    fn test_backspace_key() {
        let (mut app, _) = app("hi", TestDuration::Fifteen);
        app.handle_event(key(KeyCode::Char('x')));
        app.handle_event(key(KeyCode::Backspace));
        assert_eq!(app.snapshot.input.typed_text, "");
        assert_eq!(app.snapshot.input.total_mistakes, 1);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = app("hi", TestDuration::Fifteen);
        assert_eq!(app.handle_event(key(KeyCode::Esc)), Flow::Quit);
        assert_eq!(app.handle_event(ctrl('c')), Flow::Quit);
        assert_eq!(app.handle_event(AppEvent::Resize), Flow::Continue);
    }

    #[test]
    fn test_ticks_move_to_results() {
        let (mut app, scheduler) = app("hi", TestDuration::Fifteen);
        app.handle_event(key(KeyCode::Char('h')));
        for _ in 0..15 {
            tick_live(&mut app, &scheduler);
        }
        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.snapshot.clock.remaining_secs, 0);

        // Typing is disabled, 'r' starts over.
        app.handle_event(key(KeyCode::Char('i')));
        assert_eq!(app.snapshot.input.typed_text, "h");
        app.handle_event(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Typing);
        assert_eq!(app.snapshot.session_state, SessionState::Idle);
        assert_eq!(app.snapshot.input.typed_text, "");
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let (mut app, scheduler) = app("hi", TestDuration::Fifteen);
        app.handle_event(key(KeyCode::Char('h')));
        let old = scheduler.live()[0].id();
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(AppEvent::Tick(old));
        assert_eq!(app.snapshot.clock.elapsed_secs, 0);
        assert_eq!(app.snapshot.session_state, SessionState::Idle);
    }

    #[test]
    fn test_duration_keys() {
        let (mut app, _) = app("hi", TestDuration::Thirty);
        app.handle_event(key(KeyCode::Up));
        assert_eq!(app.settings.duration, TestDuration::Sixty);
        assert_eq!(app.snapshot.clock.remaining_secs, 60);
        app.handle_event(key(KeyCode::Down));
        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.settings.duration, TestDuration::Fifteen);
        assert_eq!(app.test.session().duration, TestDuration::Fifteen);
    }

    #[test]
    fn test_option_toggles_regenerate() {
        let scheduler = ManualTickScheduler::new();
        let mut app = App::new(
            Config::default(),
            None,
            Corpus::english().unwrap(),
            Box::new(scheduler),
        );
        app.handle_event(ctrl('n'));
        assert!(app.settings.include_numbers);
        assert!(app.test.session().options.include_numbers);

        app.handle_event(ctrl('p'));
        assert!(app.settings.include_punctuation);
        assert!(app.test.session().options.include_punctuation);
    }

    #[test]
    fn test_option_toggle_during_test_waits_for_next_test() {
        let (mut app, scheduler) = app("the cat sat", TestDuration::Thirty);
        for c in "the ".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(ctrl('n'));

        assert!(app.settings.include_numbers);
        assert_eq!(app.snapshot.session_state, SessionState::Running);
        assert_eq!(app.snapshot.input.typed_text, "the ");
        assert_eq!(scheduler.live().len(), 1);
        assert!(!app.test.session().options.include_numbers);
        assert!(app.test.pending_options().include_numbers);

        app.handle_event(key(KeyCode::Tab));
        assert!(app.test.session().options.include_numbers);
        assert_eq!(app.snapshot.session_state, SessionState::Idle);
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let (mut app, _) = app("hi", TestDuration::Fifteen);
        app.handle_event(ctrl('x'));
        assert_eq!(app.snapshot.input.typed_text, "");
    }
}
