//! Keystroke tracking against the target text.
//!
//! Only the newly appended character is checked. A mistake, once counted, stays
//! counted: fixing it later with backspace does not lower `total_mistakes`.

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Result of feeding one keystroke or input delta.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// A new char was appended and classified.
    Accepted(Outcome),
    /// The buffer changed without a new char to classify (deletion, same length).
    Updated,
    /// Dropped: the buffer is already as long as the target.
    Rejected,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub typed_text: String,
    pub total_mistakes: usize,
    pub last_typed_len: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed length in chars.
    pub fn typed_len(&self) -> usize {
        self.typed_text.chars().count()
    }

    /// Append `c` if the buffer is shorter than `target`.
    pub fn apply_keystroke(&mut self, target: &str, c: char) -> Keystroke {
        let mut next = String::with_capacity(self.typed_text.len() + c.len_utf8());
        next.push_str(&self.typed_text);
        next.push(c);
        self.apply_delta(target, &next)
    }

    /// Replace the buffer with `new_typed`, the whole current contents of the input.
    ///
    /// Values longer than `target` are rejected. When the value grew past
    /// `last_typed_len` its final char is compared with the target char at the
    /// same index.
    pub fn apply_delta(&mut self, target: &str, new_typed: &str) -> Keystroke {
        let new_len = new_typed.chars().count();
        if new_len > target.chars().count() {
            return Keystroke::Rejected;
        }

        let mut result = Keystroke::Updated;
        if new_len > self.last_typed_len {
            let idx = new_len - 1;
            let typed = new_typed.chars().last();
            let expected = target.chars().nth(idx);
            let outcome = if typed.is_some() && typed == expected {
                Outcome::Correct
            } else {
                self.total_mistakes += 1;
                Outcome::Incorrect
            };
            result = Keystroke::Accepted(outcome);
        }

        self.typed_text.clear();
        self.typed_text.push_str(new_typed);
        self.last_typed_len = new_len;
        result
    }

    /// Drop the last typed char. Returns false when there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        if self.typed_text.pop().is_none() {
            return false;
        }
        self.last_typed_len = self.typed_len();
        true
    }

    pub fn reset(&mut self) {
        self.typed_text.clear();
        self.total_mistakes = 0;
        self.last_typed_len = 0;
    }
}
