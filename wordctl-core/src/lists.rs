//! Favorites and access history services
//!
//! Both wrap a [`WordStore`] and keep an in-memory copy of the current
//! user's list. Membership is by word text. Storage failures are logged and
//! swallowed: a failed read leaves the list empty, a failed write keeps the
//! in-memory change so the session stays consistent.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::model::Word;
use crate::store::{favorites_key, history_key, WordStore};

/// A user's favorite words
pub struct Favorites {
    store: Arc<dyn WordStore>,
    words: Vec<Word>,
}

impl Favorites {
    pub fn new(store: Arc<dyn WordStore>) -> Self {
        Self {
            store,
            words: Vec::new(),
        }
    }

    /// Replace the in-memory list with the stored one for `user_id`
    pub async fn load(&mut self, user_id: &str) {
        self.words = load_list(self.store.as_ref(), &favorites_key(user_id)).await;
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn is_favorite(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.same_word(word))
    }

    /// Add the word if absent, remove it if present, then persist.
    ///
    /// Returns whether the word is a favorite afterwards.
    pub async fn toggle(&mut self, word: Word, user_id: &str) -> bool {
        let now_favorite = if self.is_favorite(&word.word) {
            self.words.retain(|w| !w.same_word(&word.word));
            false
        } else {
            self.words.push(word);
            true
        };
        save_list(self.store.as_ref(), &favorites_key(user_id), &self.words).await;
        now_favorite
    }
}

/// Words a user has opened, in first-access order
pub struct History {
    store: Arc<dyn WordStore>,
    words: Vec<Word>,
}

impl History {
    pub fn new(store: Arc<dyn WordStore>) -> Self {
        Self {
            store,
            words: Vec::new(),
        }
    }

    pub async fn load(&mut self, user_id: &str) {
        self.words = load_list(self.store.as_ref(), &history_key(user_id)).await;
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn is_accessed(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.same_word(word))
    }

    /// Record an access. Already-accessed words are left where they are.
    ///
    /// Returns true when the word was newly added.
    pub async fn add(&mut self, word: Word, user_id: &str) -> bool {
        if self.is_accessed(&word.word) {
            return false;
        }
        self.words.push(word);
        save_list(self.store.as_ref(), &history_key(user_id), &self.words).await;
        true
    }
}

async fn load_list(store: &dyn WordStore, key: &str) -> Vec<Word> {
    match store.load(key).await {
        Ok(Some(words)) => {
            debug!(key, count = words.len(), "loaded list");
            words
        }
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(key, error = %err, "failed to load list from storage");
            Vec::new()
        }
    }
}

async fn save_list(store: &dyn WordStore, key: &str, words: &[Word]) {
    if let Err(err) = store.save(key, words).await {
        warn!(key, error = %err, "failed to save list to storage");
    }
}
