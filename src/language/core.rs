use crate::error::{Error, Result};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::sync::OnceLock;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

static ENGLISH: OnceLock<Corpus> = OnceLock::new();

/// Word list plus the punctuation marks the generator may append to words.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Corpus {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
    pub punctuation: Vec<char>,
}

impl Corpus {
    /// Parse an embedded corpus by file stem, e.g. `"english"`.
    pub fn load(file_name: &str) -> Result<Self> {
        read_corpus_from_file(&format!("{file_name}.json"))
    }

    /// The built-in English corpus, parsed on first use and shared for the process lifetime.
    pub fn english() -> Result<&'static Corpus> {
        if let Some(corpus) = ENGLISH.get() {
            return Ok(corpus);
        }
        let corpus = Self::load("english")?;
        Ok(ENGLISH.get_or_init(|| corpus))
    }
}

fn read_corpus_from_file(file_name: &str) -> Result<Corpus> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| Error::corpus(file_name, "file not embedded"))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| Error::corpus(file_name, "file is not valid utf-8"))?;

    let corpus: Corpus = from_str(file_as_str)?;
    if corpus.words.is_empty() {
        return Err(Error::corpus(file_name, "word list is empty"));
    }

    Ok(corpus)
}
