// Library surface for the binary, headless drivers and integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod language;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod time_series;
pub mod ui;
pub mod view;
pub mod word_generator;

pub use error::{Error, Result};
pub use session::{Session, SessionConfig, SessionState, TestDuration, TextOptions};
pub use typing_test::{Snapshot, TypingTest};
