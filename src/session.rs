use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Number of words generated for a fresh session.
pub const DEFAULT_WORD_COUNT: usize = 250;

/// Generator flags chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOptions {
    pub include_numbers: bool,
    pub include_punctuation: bool,
}

/// The fixed set of countdown lengths a test can run for.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum TestDuration {
    #[strum(serialize = "15s")]
    #[serde(rename = "15")]
    Fifteen,
    #[default]
    #[strum(serialize = "30s")]
    #[serde(rename = "30")]
    Thirty,
    #[strum(serialize = "60s")]
    #[serde(rename = "60")]
    Sixty,
}

impl TestDuration {
    pub const ALL: [TestDuration; 3] = [Self::Fifteen, Self::Thirty, Self::Sixty];

    pub fn secs(self) -> u32 {
        match self {
            Self::Fifteen => 15,
            Self::Thirty => 30,
            Self::Sixty => 60,
        }
    }

    /// Next longer duration, wrapping around to the shortest.
    pub fn next(self) -> Self {
        match self {
            Self::Fifteen => Self::Thirty,
            Self::Thirty => Self::Sixty,
            Self::Sixty => Self::Fifteen,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Fifteen => Self::Sixty,
            Self::Thirty => Self::Fifteen,
            Self::Sixty => Self::Thirty,
        }
    }
}

impl TryFrom<u32> for TestDuration {
    type Error = Error;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.secs() == secs)
            .ok_or(Error::InvalidDuration(secs))
    }
}

/// Lifecycle of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Finished,
}

/// Everything needed to (re)create a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub number_of_words: usize,
    pub duration: TestDuration,
    pub options: TextOptions,
    /// Fixed text used instead of generated words.
    pub custom_prompt: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            number_of_words: DEFAULT_WORD_COUNT,
            duration: TestDuration::default(),
            options: TextOptions::default(),
            custom_prompt: None,
        }
    }
}

/// One test: the text to type and the settings it was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub target_text: String,
    pub options: TextOptions,
    pub duration: TestDuration,
    pub state: SessionState,
}

impl Session {
    pub fn new(target_text: String, options: TextOptions, duration: TestDuration) -> Self {
        Self {
            target_text,
            options,
            duration,
            state: SessionState::Idle,
        }
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration.secs()
    }

    /// Target length in chars, the upper bound on typed input.
    pub fn target_len(&self) -> usize {
        self.target_text.chars().count()
    }
}
