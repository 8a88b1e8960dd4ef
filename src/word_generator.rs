use crate::language::Corpus;
use crate::session::TextOptions;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

/// Chance that a position becomes a number when numbers are enabled.
pub const NUMBER_PROBABILITY: f64 = 0.1;
/// Chance that a word gets a trailing punctuation mark when punctuation is enabled.
pub const PUNCTUATION_PROBABILITY: f64 = 0.125;
/// Upper bound (inclusive) of generated numbers; the lower bound is 1.
pub const MAX_NUMBER: u32 = 1000;

/// Configuration for word generation
#[derive(Debug, Clone, PartialEq)]
pub struct WordGenConfig {
    pub number_of_words: usize,
    pub options: TextOptions,
    pub custom_prompt: Option<String>,
}

/// Handles all prompt generation logic
pub struct WordGenerator<'a> {
    corpus: &'a Corpus,
    config: WordGenConfig,
}

impl<'a> WordGenerator<'a> {
    pub fn new(corpus: &'a Corpus, config: WordGenConfig) -> Self {
        Self { corpus, config }
    }

    pub fn config(&self) -> &WordGenConfig {
        &self.config
    }

    pub fn set_options(&mut self, options: TextOptions) {
        self.config.options = options;
    }

    /// Generate a complete prompt based on the configuration
    pub fn generate_prompt(&self) -> String {
        self.generate_prompt_with(&mut rand::thread_rng())
    }

    pub fn generate_prompt_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        if let Some(prompt) = self.config.custom_prompt.as_deref() {
            let normalized = prompt.split_whitespace().join(" ");
            if !normalized.is_empty() {
                return normalized;
            }
        }
        generate_with(
            rng,
            self.corpus,
            self.config.number_of_words,
            self.config.options,
        )
    }
}

/// `word_count` space separated tokens drawn from `corpus`, using the thread rng.
pub fn generate(corpus: &Corpus, word_count: usize, options: TextOptions) -> String {
    generate_with(&mut rand::thread_rng(), corpus, word_count, options)
}

/// Numbers never follow numbers and punctuated words never follow punctuated words.
/// A position that becomes a number is never punctuated.
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    corpus: &Corpus,
    word_count: usize,
    options: TextOptions,
) -> String {
    let mut tokens = Vec::with_capacity(word_count);
    let mut last_was_number = false;
    let mut last_had_punctuation = false;

    for _ in 0..word_count {
        if options.include_numbers && !last_was_number && rng.gen_bool(NUMBER_PROBABILITY) {
            tokens.push(rng.gen_range(1..=MAX_NUMBER).to_string());
            last_was_number = true;
            last_had_punctuation = false;
            continue;
        }

        let mut word = corpus.words.choose(rng).cloned().unwrap_or_default();

        if options.include_punctuation
            && !last_had_punctuation
            && rng.gen_bool(PUNCTUATION_PROBABILITY)
        {
            if let Some(mark) = corpus.punctuation.choose(rng) {
                word.push(*mark);
            }
            last_had_punctuation = true;
        } else {
            last_had_punctuation = false;
        }

        tokens.push(word);
        last_was_number = false;
    }

    tokens.join(" ")
}
