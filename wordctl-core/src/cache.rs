//! Session-scoped memoization of word lookups
//!
//! Entries are write-once and never evicted. The cache lives as long as the
//! view that owns it; a new view starts with an empty cache.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{Result, WordError};
use crate::model::WordDetail;
use crate::source::{DictionarySource, Entry};

/// Word text to fetched detail
#[derive(Debug, Clone, Default)]
pub struct WordCache {
    entries: HashMap<String, WordDetail>,
}

impl WordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> Option<&WordDetail> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Insert a detail unless the word is already cached.
    ///
    /// Returns the detail that is cached for `word` afterwards.
    pub fn put(&mut self, word: impl Into<String>, detail: WordDetail) -> &WordDetail {
        self.entries.entry(word.into()).or_insert(detail)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Local id for the next inserted detail
    pub fn next_id(&self) -> u64 {
        self.entries.len() as u64 + 1
    }

    /// Return the cached detail, or fetch it from `source` and cache it.
    ///
    /// Zero results yields `DetailNotFound`; transport and parse failures
    /// yield `DetailFetchFailed`. Neither touches the cache.
    pub async fn lookup_or_fetch(
        &mut self,
        source: &dyn DictionarySource,
        word: &str,
    ) -> Result<WordDetail> {
        if let Some(detail) = self.get(word) {
            debug!(word, "cache hit");
            return Ok(detail.clone());
        }

        let entries = fetch_entries(source, word).await?;
        Ok(self.insert_first(word, entries)?.clone())
    }

    /// Cache the first lookup result for `word`
    ///
    /// Split out so the view can run the network call on a spawned task and
    /// apply the result later on its own thread.
    pub fn insert_first(
        &mut self,
        word: &str,
        entries: Vec<Entry>,
    ) -> Result<&WordDetail> {
        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| WordError::not_found(word))?;
        let detail = entry.into_detail(self.next_id());
        info!(word, id = detail.id, "cached word details");
        Ok(self.put(word, detail))
    }
}

/// Perform the network half of a lookup, mapping any error to a fetch failure
pub async fn fetch_entries(
    source: &dyn DictionarySource,
    word: &str,
) -> Result<Vec<Entry>> {
    match source.lookup(word).await {
        Ok(entries) => Ok(entries),
        Err(err @ WordError::DetailFetchFailed { .. }) => Err(err),
        Err(err) => Err(WordError::detail_fetch(word, err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSource;

    #[tokio::test]
    async fn second_lookup_is_a_cache_hit() {
        let source = MockSource::new().with_word("hello", &["exclamation", "noun"]);
        let mut cache = WordCache::new();

        let first = cache.lookup_or_fetch(&source, "hello").await.unwrap();
        let second = cache.lookup_or_fetch(&source, "hello").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.id, 1);
        assert_eq!(source.lookups(), 1);
        assert_eq!(cache.get("hello"), Some(&first));
    }

    #[tokio::test]
    async fn unknown_word_is_not_cached() {
        let source = MockSource::new();
        let mut cache = WordCache::new();

        let err = cache.lookup_or_fetch(&source, "xyzzy123").await.unwrap_err();

        assert!(matches!(err, WordError::DetailNotFound { .. }));
        assert!(cache.get("xyzzy123").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn failure_keeps_existing_entries() {
        let source = MockSource::new()
            .with_word("cat", &["noun"])
            .failing("dog");
        let mut cache = WordCache::new();

        let cat = cache.lookup_or_fetch(&source, "cat").await.unwrap();
        let err = cache.lookup_or_fetch(&source, "dog").await.unwrap_err();

        assert!(matches!(err, WordError::DetailFetchFailed { .. }));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("cat"), Some(&cat));
    }

    #[test]
    fn put_is_write_once() {
        let mut cache = WordCache::new();
        let detail = |id| WordDetail {
            id,
            word: "owl".into(),
            phonetic: String::new(),
            meanings: vec![],
            audio: String::new(),
        };
        cache.put("owl", detail(1));
        let kept = cache.put("owl", detail(9));
        assert_eq!(kept.id, 1);
        assert_eq!(cache.next_id(), 2);
    }
}
