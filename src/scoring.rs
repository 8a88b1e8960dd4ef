use crate::clock::ClockState;
use crate::input::InputState;

/// Live score shown during and after a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSnapshot {
    pub wpm: u32,
    /// Percent in `0..=100`.
    pub accuracy: u8,
}

impl Default for ScoreSnapshot {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
        }
    }
}

impl ScoreSnapshot {
    /// Recompute both values from scratch.
    pub fn compute(target: &str, input: &InputState, clock: &ClockState) -> Self {
        let completed = completed_words(&input.typed_text, target);
        Self {
            wpm: wpm(completed, clock.elapsed_secs),
            accuracy: accuracy(input.total_mistakes, input.typed_len()),
        }
    }
}

/// Leading words of `typed` that exactly match `target`, stopping at the first mismatch.
pub fn completed_words(typed: &str, target: &str) -> usize {
    typed
        .split_whitespace()
        .zip(target.split_whitespace())
        .take_while(|(typed_word, target_word)| typed_word == target_word)
        .count()
}

/// `floor(completed / (elapsed_secs / 60))`, or 0 before the first second has elapsed.
pub fn wpm(completed_words: usize, elapsed_secs: u32) -> u32 {
    if elapsed_secs == 0 {
        return 0;
    }
    let per_minute = completed_words as u64 * 60 / u64::from(elapsed_secs);
    u32::try_from(per_minute).unwrap_or(u32::MAX)
}

/// `round((1 - mistakes / typed_len) * 100)` clamped to `0..=100`; 100 when nothing was typed.
pub fn accuracy(total_mistakes: usize, typed_len: usize) -> u8 {
    if typed_len == 0 {
        return 100;
    }
    let ratio = 1.0 - total_mistakes as f64 / typed_len as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}
