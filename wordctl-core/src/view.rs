//! List/detail view state
//!
//! The view owns the paginator, the word cache and the meaning cursor. It
//! never performs I/O itself: selecting a word returns a [`LookupRequest`]
//! that the shell runs on a task (see [`run_lookup`]) and feeds back through
//! [`WordListView::apply_lookup`]. Every request carries the generation of
//! the view that issued it, so completions that arrive after the view was
//! replaced are dropped.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::cache::{fetch_entries, WordCache};
use crate::cursor::MeaningCursor;
use crate::dictionary::Dictionary;
use crate::error::{Result, WordError};
use crate::model::{Meaning, Word, WordDetail, WordStub};
use crate::paginator::Paginator;
use crate::source::{DictionarySource, Entry};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Which list the view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    Dictionary,
    Favorites,
    History,
}

impl ListSource {
    /// Fixed lists are shown whole and never paginate
    pub fn is_fixed(&self) -> bool {
        !matches!(self, ListSource::Dictionary)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListSource::Dictionary => "Words",
            ListSource::Favorites => "Favorites",
            ListSource::History => "History",
        }
    }
}

/// One-shot user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new("Error", "Word details not found.")
    }

    pub fn fetch_failed() -> Self {
        Self::new(
            "Error",
            "Could not fetch word details. Please try again later.",
        )
    }

    pub fn dictionary_failed() -> Self {
        Self::new(
            "Error",
            "An error occurred while loading the word dictionary.",
        )
    }

    pub fn no_audio() -> Self {
        Self::new(
            "Audio not available",
            "No pronunciation audio found for this word.",
        )
    }

    /// Notice for a failed lookup
    pub fn for_error(err: &WordError) -> Self {
        match err {
            WordError::DetailNotFound { .. } => Self::not_found(),
            WordError::BulkFetchFailed { .. } => Self::dictionary_failed(),
            _ => Self::fetch_failed(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Inputs a view is built from; priority is favorites > history > dictionary
#[derive(Debug, Clone, Default)]
pub struct ViewInputs {
    pub dictionary: Option<Arc<Dictionary>>,
    pub favorites: Option<Vec<Word>>,
    pub history: Option<Vec<Word>>,
    pub page_size: Option<usize>,
}

impl ViewInputs {
    pub fn dictionary(dictionary: Arc<Dictionary>) -> Self {
        Self {
            dictionary: Some(dictionary),
            ..Self::default()
        }
    }

    pub fn favorites(words: Vec<Word>) -> Self {
        Self {
            favorites: Some(words),
            ..Self::default()
        }
    }

    pub fn history(words: Vec<Word>) -> Self {
        Self {
            history: Some(words),
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Lookup the shell should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub word: String,
}

/// Completed lookup, ready to be applied to the view
#[derive(Debug)]
pub struct LookupOutcome {
    pub generation: u64,
    pub word: String,
    pub result: Result<Vec<Entry>>,
}

/// Run the network half of a lookup request
pub async fn run_lookup(source: Arc<dyn DictionarySource>, request: LookupRequest) -> LookupOutcome {
    let result = fetch_entries(source.as_ref(), &request.word).await;
    LookupOutcome {
        generation: request.generation,
        word: request.word,
        result,
    }
}

/// The open detail panel
#[derive(Debug, Clone)]
pub struct DetailPanel {
    word: Word,
    detail: Option<WordDetail>,
    cursor: MeaningCursor,
    loading: bool,
    failed: bool,
}

impl DetailPanel {
    fn open(word: Word) -> Self {
        let cursor = MeaningCursor::new(word.meanings().len());
        Self {
            word,
            detail: None,
            cursor,
            loading: false,
            failed: false,
        }
    }

    fn enrich(&mut self, detail: WordDetail) {
        self.cursor.reset(detail.meanings.len());
        self.detail = Some(detail);
        self.loading = false;
        self.failed = false;
    }

    /// Word text as selected in the list
    pub fn word(&self) -> &str {
        &self.word.word
    }

    pub fn detail(&self) -> Option<&WordDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True when enrichment failed and only stub data is shown
    pub fn lookup_failed(&self) -> bool {
        self.failed
    }

    pub fn phonetic(&self) -> Option<&str> {
        match &self.detail {
            Some(detail) => detail.phonetic(),
            None => self.word.phonetic(),
        }
    }

    pub fn audio_url(&self) -> Option<&str> {
        match &self.detail {
            Some(detail) => detail.audio_url(),
            None => self.word.audio_url(),
        }
    }

    /// Audio URL to play, or the notice to show instead
    pub fn play_audio(&self) -> std::result::Result<&str, Notice> {
        self.audio_url().ok_or_else(Notice::no_audio)
    }

    pub fn meanings(&self) -> &[Meaning] {
        match &self.detail {
            Some(detail) => &detail.meanings,
            None => self.word.meanings(),
        }
    }

    pub fn current_meaning(&self) -> Option<&Meaning> {
        self.cursor.current(self.meanings())
    }

    pub fn cursor(&self) -> &MeaningCursor {
        &self.cursor
    }

    pub fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor.has_previous()
    }

    /// Record to persist in favorites/history: the detail once known
    pub fn to_word(&self) -> Word {
        match &self.detail {
            Some(detail) => Word::from(detail.clone()),
            None => self.word.clone(),
        }
    }
}

/// Scrollable word list plus detail panel
#[derive(Debug)]
pub struct WordListView {
    generation: u64,
    source: ListSource,
    dictionary: Option<Arc<Dictionary>>,
    paginator: Paginator,
    fixed: Vec<Word>,
    cache: WordCache,
    pending: HashSet<String>,
    panel: Option<DetailPanel>,
    notices: VecDeque<Notice>,
}

impl WordListView {
    /// Build a view, picking the list source by input priority.
    ///
    /// A dictionary view loads its first page immediately.
    pub fn new(inputs: ViewInputs) -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        let paginator = inputs
            .page_size
            .map(Paginator::new)
            .unwrap_or_default();

        let (source, fixed) = if let Some(favorites) = inputs.favorites {
            (ListSource::Favorites, favorites)
        } else if let Some(history) = inputs.history {
            (ListSource::History, history)
        } else {
            (ListSource::Dictionary, Vec::new())
        };

        let mut view = Self {
            generation,
            source,
            dictionary: inputs.dictionary,
            paginator,
            fixed,
            cache: WordCache::new(),
            pending: HashSet::new(),
            panel: None,
            notices: VecDeque::new(),
        };
        if view.source == ListSource::Dictionary {
            view.load_more();
        }
        debug!(generation, source = ?view.source, "view created");
        view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> ListSource {
        self.source
    }

    pub fn cache(&self) -> &WordCache {
        &self.cache
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Rows currently in the list, in display order
    pub fn rows(&self) -> Vec<WordStub> {
        match self.source {
            ListSource::Dictionary => self.paginator.words().cloned().collect(),
            _ => self.fixed.iter().map(Word::stub).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self.source {
            ListSource::Dictionary => self.paginator.len(),
            _ => self.fixed.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The view scrolled near the end of the loaded rows.
    ///
    /// Loads the next dictionary page unless a load is in flight, the list
    /// is fixed, or the dictionary is exhausted. Returns rows appended.
    pub fn on_end_reached(&mut self) -> usize {
        if self.source.is_fixed() {
            return 0;
        }
        self.load_more()
    }

    fn load_more(&mut self) -> usize {
        match &self.dictionary {
            Some(dictionary) => self.paginator.load_next(dictionary),
            None => 0,
        }
    }

    /// Open the detail panel for the row at `index`.
    ///
    /// Cached words are shown fully at once. Otherwise the panel shows stub
    /// data and a lookup request is returned, unless one for the same word
    /// is already pending.
    pub fn select(&mut self, index: usize) -> Option<LookupRequest> {
        let word = match self.source {
            ListSource::Dictionary => self.paginator.words().nth(index).cloned().map(Word::from),
            _ => self.fixed.get(index).cloned(),
        }?;
        self.select_word(word)
    }

    /// Open the detail panel for an arbitrary word
    pub fn select_word(&mut self, word: Word) -> Option<LookupRequest> {
        let text = word.word.clone();
        let mut panel = DetailPanel::open(word);

        if let Some(detail) = self.cache.get(&text) {
            debug!(word = %text, "cache hit");
            panel.enrich(detail.clone());
            self.panel = Some(panel);
            return None;
        }

        panel.loading = true;
        self.panel = Some(panel);

        if !self.pending.insert(text.clone()) {
            debug!(word = %text, "lookup already pending");
            return None;
        }
        Some(LookupRequest {
            generation: self.generation,
            word: text,
        })
    }

    /// Apply a completed lookup.
    ///
    /// Outcomes from another view generation are ignored and `false` is
    /// returned. Failures leave the panel open with stub data and queue a
    /// notice if the panel still shows that word.
    pub fn apply_lookup(&mut self, outcome: LookupOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                word = %outcome.word,
                stale = outcome.generation,
                current = self.generation,
                "dropping lookup for a previous view"
            );
            return false;
        }
        self.pending.remove(&outcome.word);

        let result = outcome
            .result
            .and_then(|entries| self.cache.insert_first(&outcome.word, entries).cloned());

        let showing = self
            .panel
            .as_ref()
            .is_some_and(|panel| panel.word() == outcome.word);

        match result {
            Ok(detail) => {
                if showing {
                    if let Some(panel) = self.panel.as_mut() {
                        panel.enrich(detail);
                    }
                }
            }
            Err(err) => {
                debug!(word = %outcome.word, error = %err, "lookup failed");
                if showing {
                    if let Some(panel) = self.panel.as_mut() {
                        panel.loading = false;
                        panel.failed = true;
                    }
                    self.notices.push_back(Notice::for_error(&err));
                }
            }
        }
        true
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        self.panel.as_ref()
    }

    pub fn next_meaning(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.cursor.next();
        }
    }

    pub fn previous_meaning(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.cursor.previous();
        }
    }

    /// Close the panel, clearing the selection and the cursor
    pub fn close(&mut self) {
        self.panel = None;
    }

    /// Next pending notice, removed from the queue
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn is_pending(&self, word: &str) -> bool {
        self.pending.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSource;

    fn dictionary(n: usize) -> Arc<Dictionary> {
        Arc::new(Dictionary::from_words((0..n).map(|i| format!("word{i}"))))
    }

    async fn resolve(view: &mut WordListView, source: &Arc<MockSource>, request: LookupRequest) {
        let source: Arc<dyn DictionarySource> = source.clone();
        let outcome = run_lookup(source, request).await;
        assert!(view.apply_lookup(outcome));
    }

    #[test]
    fn favorites_take_priority() {
        let inputs = ViewInputs {
            dictionary: Some(dictionary(5)),
            favorites: Some(vec![Word::from(WordStub::new(1, "fav"))]),
            history: Some(vec![Word::from(WordStub::new(1, "hist"))]),
            page_size: None,
        };
        let view = WordListView::new(inputs);
        assert_eq!(view.source(), ListSource::Favorites);
        assert_eq!(view.rows(), vec![WordStub::new(1, "fav")]);
    }

    #[test]
    fn history_beats_dictionary() {
        let inputs = ViewInputs {
            dictionary: Some(dictionary(5)),
            history: Some(vec![Word::from(WordStub::new(3, "hist"))]),
            ..ViewInputs::default()
        };
        assert_eq!(WordListView::new(inputs).source(), ListSource::History);
    }

    #[test]
    fn dictionary_view_pages_on_end_reached() {
        let mut view = WordListView::new(ViewInputs::dictionary(dictionary(45)));
        assert_eq!(view.len(), 20);
        assert_eq!(view.on_end_reached(), 20);
        assert_eq!(view.on_end_reached(), 5);
        assert_eq!(view.on_end_reached(), 0);

        let ids: Vec<u64> = view.rows().iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=45).collect::<Vec<_>>());
    }

    #[test]
    fn fixed_lists_never_paginate() {
        let words = vec![Word::from(WordStub::new(9, "kept"))];
        let mut view = WordListView::new(ViewInputs::history(words));
        assert_eq!(view.on_end_reached(), 0);
        assert_eq!(view.len(), 1);
    }

    #[tokio::test]
    async fn select_fetches_then_caches() {
        let source = Arc::new(MockSource::new().with_word("word0", &["noun", "verb"]));
        let mut view = WordListView::new(ViewInputs::dictionary(dictionary(3)));

        let request = view.select(0).expect("first selection needs a lookup");
        assert!(view.panel().unwrap().is_loading());
        assert_eq!(view.panel().unwrap().word(), "word0");
        resolve(&mut view, &source, request).await;

        let panel = view.panel().unwrap();
        assert_eq!(panel.meanings().len(), 2);
        assert_eq!(panel.current_meaning().unwrap().part_of_speech, "noun");

        view.close();
        assert!(view.panel().is_none());
        assert!(view.select(0).is_none(), "second selection is a cache hit");
        assert_eq!(source.lookups(), 1);
        assert_eq!(view.panel().unwrap().meanings().len(), 2);
    }

    #[tokio::test]
    async fn selecting_new_word_resets_cursor() {
        let source = Arc::new(
            MockSource::new()
                .with_word("word0", &["noun", "verb", "adjective"])
                .with_word("word1", &["noun", "verb"]),
        );
        let mut view = WordListView::new(ViewInputs::dictionary(dictionary(3)));

        let request = view.select(0).unwrap();
        resolve(&mut view, &source, request).await;
        view.next_meaning();
        view.next_meaning();
        assert_eq!(view.panel().unwrap().cursor().index(), 2);

        let request = view.select(1).unwrap();
        assert_eq!(view.panel().unwrap().cursor().index(), 0);
        resolve(&mut view, &source, request).await;
        assert_eq!(view.panel().unwrap().cursor().index(), 0);
        assert!(view.panel().unwrap().has_next());
    }

    #[tokio::test]
    async fn not_found_keeps_panel_and_cache_unchanged() {
        let source = Arc::new(MockSource::new());
        let dict = Arc::new(Dictionary::from_words(["xyzzy123"]));
        let mut view = WordListView::new(ViewInputs::dictionary(dict));

        let request = view.select(0).unwrap();
        resolve(&mut view, &source, request).await;

        assert_eq!(view.take_notice(), Some(Notice::not_found()));
        assert_eq!(view.take_notice(), None);
        assert!(view.cache().get("xyzzy123").is_none());
        let panel = view.panel().expect("panel stays open");
        assert!(panel.lookup_failed());
        assert_eq!(panel.word(), "xyzzy123");
        assert!(panel.current_meaning().is_none());
        assert!(!panel.has_next() && !panel.has_previous());
    }

    #[tokio::test]
    async fn transport_failure_raises_fetch_notice() {
        let source = Arc::new(MockSource::new().failing("word0"));
        let mut view = WordListView::new(ViewInputs::dictionary(dictionary(1)));

        let request = view.select(0).unwrap();
        resolve(&mut view, &source, request).await;

        assert_eq!(view.take_notice(), Some(Notice::fetch_failed()));
        assert!(view.cache().is_empty());
        assert!(!view.is_pending("word0"));
    }

    #[test]
    fn duplicate_selection_is_not_refetched_while_pending() {
        let mut view = WordListView::new(ViewInputs::dictionary(dictionary(2)));
        assert!(view.select(0).is_some());
        assert!(view.select(0).is_none());
        assert!(view.is_pending("word0"));
    }

    #[test]
    fn stale_generation_is_dropped() {
        let mut old = WordListView::new(ViewInputs::dictionary(dictionary(2)));
        let request = old.select(0).unwrap();
        let mut new = WordListView::new(ViewInputs::dictionary(dictionary(2)));
        new.select(0);

        let applied = new.apply_lookup(LookupOutcome {
            generation: request.generation,
            word: request.word,
            result: Ok(vec![]),
        });
        assert!(!applied);
        assert!(new.take_notice().is_none());
        assert!(new.panel().unwrap().is_loading());
    }

    #[tokio::test]
    async fn late_result_for_other_word_is_cached_silently() {
        let source = Arc::new(
            MockSource::new()
                .with_word("word0", &["noun"])
                .with_word("word1", &["verb"]),
        );
        let mut view = WordListView::new(ViewInputs::dictionary(dictionary(2)));

        let first = view.select(0).unwrap();
        let second = view.select(1).unwrap();
        resolve(&mut view, &source, first).await;

        assert_eq!(view.panel().unwrap().word(), "word1");
        assert!(view.panel().unwrap().detail().is_none());
        assert!(view.cache().contains("word0"));

        resolve(&mut view, &source, second).await;
        assert_eq!(
            view.panel().unwrap().current_meaning().unwrap().part_of_speech,
            "verb"
        );
    }

    #[test]
    fn missing_audio_yields_notice() {
        let mut view = WordListView::new(ViewInputs::favorites(vec![Word::from(
            WordStub::new(1, "quiet"),
        )]));
        view.select(0);
        let err = view.panel().unwrap().play_audio().unwrap_err();
        assert_eq!(err, Notice::no_audio());
    }

    #[test]
    fn stored_favorite_shows_saved_meanings_before_lookup() {
        let saved = Word::from(WordDetail {
            id: 4,
            word: "tree".into(),
            phonetic: "/triː/".into(),
            meanings: vec![
                Meaning {
                    part_of_speech: "noun".into(),
                    definitions: vec![],
                },
                Meaning {
                    part_of_speech: "verb".into(),
                    definitions: vec![],
                },
            ],
            audio: String::new(),
        });
        let mut view = WordListView::new(ViewInputs::favorites(vec![saved]));

        assert!(view.select(0).is_some());
        let panel = view.panel().unwrap();
        assert_eq!(panel.meanings().len(), 2);
        assert!(panel.has_next());
        assert_eq!(panel.phonetic(), Some("/triː/"));
    }
}
