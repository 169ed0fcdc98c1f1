//! In-memory dictionary source for tests and offline demos

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::dictionary::Dictionary;
use crate::error::{Result, WordError};
use crate::model::{Definition, Meaning};
use crate::source::{DictionarySource, Entry, Phonetic};

/// Mock source: a fixed dictionary plus canned lookup entries
#[derive(Default)]
pub struct MockSource {
    dictionary: Option<Dictionary>,
    entries: HashMap<String, Vec<Entry>>,
    failing: HashSet<String>,
    lookups: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve this dictionary from `fetch_dictionary`
    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Register a word with one meaning per part of speech
    pub fn with_word(self, word: &str, parts_of_speech: &[&str]) -> Self {
        let entry = Entry {
            word: word.to_string(),
            phonetic: Some(format!("/{word}/")),
            phonetics: vec![Phonetic {
                text: None,
                audio: Some(format!("https://audio.test/{word}.mp3")),
            }],
            meanings: parts_of_speech
                .iter()
                .map(|pos| Meaning {
                    part_of_speech: pos.to_string(),
                    definitions: vec![Definition {
                        definition: format!("{word} as a {pos}"),
                    }],
                })
                .collect(),
        };
        self.with_entries(word, vec![entry])
    }

    pub fn with_entries(mut self, word: &str, entries: Vec<Entry>) -> Self {
        self.entries.insert(word.to_string(), entries);
        self
    }

    /// Make lookups of `word` fail with a transport error
    pub fn failing(mut self, word: &str) -> Self {
        self.failing.insert(word.to_string());
        self
    }

    /// Number of `lookup` calls served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DictionarySource for MockSource {
    async fn fetch_dictionary(&self) -> Result<Dictionary> {
        self.dictionary
            .clone()
            .ok_or_else(|| WordError::bulk_fetch("no dictionary configured"))
    }

    async fn lookup(&self, word: &str) -> Result<Vec<Entry>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(word) {
            return Err(WordError::detail_fetch(word, "connection reset"));
        }
        Ok(self.entries.get(word).cloned().unwrap_or_default())
    }
}
