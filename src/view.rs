//! Display projection of (target text, typed text).
//!
//! Pure: nothing here touches session state, so it can be recomputed after
//! every keystroke. Char classification is positional over the whole text,
//! the same index in typed and target, regardless of word boundaries.

use crate::input::Outcome;
use itertools::Itertools;

/// One target char and what was typed at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedChar {
    pub expected: char,
    /// `None` when the typed text is shorter than this position.
    pub typed: Option<char>,
    pub outcome: Outcome,
}

impl ProjectedChar {
    fn at(expected: char, typed: Option<char>) -> Self {
        let outcome = if typed == Some(expected) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        Self {
            expected,
            typed,
            outcome,
        }
    }
}

/// A target word the cursor has moved past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordView {
    pub chars: Vec<ProjectedChar>,
    /// The separator after the word, absent at the very end of the target.
    pub separator: Option<ProjectedChar>,
    /// Whitespace typed after this word beyond a single separator.
    pub extra_spaces: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderModel {
    pub completed: Vec<WordView>,
    /// Typed prefix of the current target word.
    pub current_typed: Vec<ProjectedChar>,
    /// Rest of the current target word.
    pub current_untyped: String,
    /// Chars typed past the end of the current target word.
    pub overflow: String,
    /// Target words after the current one, space joined.
    pub remaining: String,
    pub current_word_index: usize,
    /// Total whitespace typed beyond single separators.
    pub extra_spaces: usize,
}

impl RenderModel {
    /// Display cells before the cursor, counting extra-space markers.
    pub fn cursor_column(&self) -> usize {
        let completed: usize = self
            .completed
            .iter()
            .map(|w| w.chars.len() + usize::from(w.separator.is_some()) + w.extra_spaces)
            .sum();
        completed + self.current_typed.len() + self.overflow.chars().count()
    }
}

/// Char offset and text of each whitespace separated word.
fn word_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    for (char_idx, (byte_idx, c)) in text.char_indices().enumerate() {
        match (c.is_whitespace(), start) {
            (true, Some((char_start, byte_start))) => {
                spans.push((char_start, &text[byte_start..byte_idx]));
                start = None;
            }
            (false, None) => start = Some((char_idx, byte_idx)),
            _ => {}
        }
    }
    if let Some((char_start, byte_start)) = start {
        spans.push((char_start, &text[byte_start..]));
    }
    spans
}

/// Lengths of whitespace runs in order, including a leading run.
fn whitespace_runs(text: &str) -> Vec<usize> {
    let chunks = text.chars().chunk_by(|c| c.is_whitespace());
    let runs = chunks
        .into_iter()
        .filter(|(is_ws, _)| *is_ws)
        .map(|(_, run)| run.count())
        .collect();
    runs
}

pub fn project(target: &str, typed: &str) -> RenderModel {
    let target_chars: Vec<char> = target.chars().collect();
    let typed_chars: Vec<char> = typed.chars().collect();
    let target_words = word_spans(target);
    let runs = whitespace_runs(typed);

    // One word boundary per whitespace run typed so far.
    let current_word_index = runs.len();
    let user_current_word = if typed.ends_with(char::is_whitespace) {
        ""
    } else {
        typed
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default()
    };

    let classify = |idx: usize, expected: char| ProjectedChar::at(expected, typed_chars.get(idx).copied());

    let completed = target_words
        .iter()
        .take(current_word_index)
        .enumerate()
        .map(|(i, (start, word))| {
            let chars = word
                .chars()
                .enumerate()
                .map(|(j, expected)| classify(start + j, expected))
                .collect::<Vec<_>>();
            let sep_idx = start + chars.len();
            let separator = target_chars
                .get(sep_idx)
                .map(|expected| classify(sep_idx, *expected));
            WordView {
                chars,
                separator,
                extra_spaces: runs.get(i).map_or(0, |n| n.saturating_sub(1)),
            }
        })
        .collect();

    let (word_start, word) = target_words
        .get(current_word_index)
        .copied()
        .unwrap_or((target_chars.len(), ""));
    let word_len = word.chars().count();
    let typed_len = user_current_word.chars().count();

    let current_typed = word
        .chars()
        .take(typed_len)
        .enumerate()
        .map(|(j, expected)| classify(word_start + j, expected))
        .collect();
    let current_untyped = word.chars().skip(typed_len).collect();
    let overflow = user_current_word.chars().skip(word_len).collect();
    let remaining = target_words
        .iter()
        .skip(current_word_index + 1)
        .map(|(_, w)| *w)
        .join(" ");

    RenderModel {
        completed,
        current_typed,
        current_untyped,
        overflow,
        remaining,
        current_word_index,
        extra_spaces: runs.iter().map(|n| n.saturating_sub(1)).sum(),
    }
}
