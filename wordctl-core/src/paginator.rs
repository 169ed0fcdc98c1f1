//! Client-side pagination over the in-memory dictionary

use std::collections::BTreeMap;

use tracing::debug;

use crate::dictionary::Dictionary;
use crate::model::WordStub;

/// Default words per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page position (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    /// Page number is clamped to a minimum of 1, size to a minimum of 1
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// Index of the first word on this page
    pub fn start(&self) -> usize {
        (self.number - 1).saturating_mul(self.size)
    }

    /// One past the last index on this page
    pub fn end(&self) -> usize {
        self.start().saturating_add(self.size)
    }
}

/// Slice one page out of the dictionary key order.
///
/// Stub ids are the 1-based global position of the word, so ids never
/// collide across pages. A page starting past the end is empty.
pub fn load_page(dictionary: &Dictionary, page_number: usize, page_size: usize) -> Vec<WordStub> {
    let page = Page::new(page_number, page_size);
    let words = dictionary.words();
    let start = page.start();
    if start >= words.len() {
        return Vec::new();
    }
    let end = page.end().min(words.len());

    words[start..end]
        .iter()
        .enumerate()
        .map(|(pos, word)| WordStub::new((start + pos + 1) as u64, word.clone()))
        .collect()
}

/// Append-only accumulation of dictionary pages
///
/// Pages are stored by page number, so a page that completes late still
/// lands at its own id range, and a page is never appended twice.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    pages: BTreeMap<usize, Vec<WordStub>>,
    in_flight: Option<usize>,
    exhausted: bool,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            pages: BTreeMap::new(),
            in_flight: None,
            exhausted: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Next page number to request
    pub fn next_page(&self) -> usize {
        self.pages.keys().next_back().map_or(1, |last| last + 1)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True once a short or empty page came back
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Reserve the next page for loading.
    ///
    /// Returns `None` while another page is in flight or after the end of
    /// the dictionary was reached.
    pub fn begin(&mut self) -> Option<usize> {
        if self.in_flight.is_some() || self.exhausted {
            return None;
        }
        let page = self.next_page();
        self.in_flight = Some(page);
        Some(page)
    }

    /// Store a loaded page and release the in-flight slot
    pub fn complete(&mut self, page: usize, stubs: Vec<WordStub>) {
        if self.in_flight == Some(page) {
            self.in_flight = None;
        }
        if self.pages.contains_key(&page) {
            debug!(page, "ignoring duplicate page");
            return;
        }
        if stubs.len() < self.page_size {
            self.exhausted = true;
        }
        if stubs.is_empty() {
            return;
        }
        debug!(page, count = stubs.len(), "page loaded");
        self.pages.insert(page, stubs);
    }

    /// Load the next page synchronously from an in-memory dictionary.
    ///
    /// Returns the number of stubs appended.
    pub fn load_next(&mut self, dictionary: &Dictionary) -> usize {
        match self.begin() {
            Some(page) => {
                let stubs = load_page(dictionary, page, self.page_size);
                let count = stubs.len();
                self.complete(page, stubs);
                count
            }
            None => 0,
        }
    }

    /// All loaded stubs in id order
    pub fn words(&self) -> impl Iterator<Item = &WordStub> {
        self.pages.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(n: usize) -> Dictionary {
        Dictionary::from_words((0..n).map(|i| format!("w{i:03}")))
    }

    fn ids(stubs: &[WordStub]) -> Vec<u64> {
        stubs.iter().map(|s| s.id).collect()
    }

    #[test]
    fn forty_five_words_in_pages_of_twenty() {
        let dict = dictionary(45);

        assert_eq!(ids(&load_page(&dict, 1, 20)), (1..=20).collect::<Vec<_>>());
        assert_eq!(ids(&load_page(&dict, 2, 20)), (21..=40).collect::<Vec<_>>());
        assert_eq!(ids(&load_page(&dict, 3, 20)), (41..=45).collect::<Vec<_>>());
        assert!(load_page(&dict, 4, 20).is_empty());
    }

    #[test]
    fn stubs_follow_dictionary_order() {
        let dict = Dictionary::from_words(["b", "a", "c"]);
        let page = load_page(&dict, 1, 2);
        assert_eq!(page, vec![WordStub::new(1, "b"), WordStub::new(2, "a")]);
    }

    #[test]
    fn page_zero_is_treated_as_first_page() {
        let dict = dictionary(5);
        assert_eq!(load_page(&dict, 0, 2), load_page(&dict, 1, 2));
    }

    #[test]
    fn paginator_appends_and_stops_at_end() {
        let dict = dictionary(45);
        let mut paginator = Paginator::new(20);

        assert_eq!(paginator.load_next(&dict), 20);
        assert_eq!(paginator.load_next(&dict), 20);
        assert_eq!(paginator.load_next(&dict), 5);
        assert!(paginator.is_exhausted());
        assert_eq!(paginator.load_next(&dict), 0);

        let all: Vec<u64> = paginator.words().map(|s| s.id).collect();
        assert_eq!(all, (1..=45).collect::<Vec<_>>());
    }

    #[test]
    fn only_one_page_in_flight() {
        let mut paginator = Paginator::new(20);
        assert_eq!(paginator.begin(), Some(1));
        assert_eq!(paginator.begin(), None);
        paginator.complete(1, load_page(&dictionary(45), 1, 20));
        assert_eq!(paginator.begin(), Some(2));
    }

    #[test]
    fn duplicate_page_is_not_appended_twice() {
        let dict = dictionary(45);
        let mut paginator = Paginator::new(20);
        let page = paginator.begin().unwrap();
        paginator.complete(page, load_page(&dict, page, 20));
        paginator.complete(page, load_page(&dict, page, 20));
        assert_eq!(paginator.len(), 20);
        assert_eq!(paginator.next_page(), 2);
    }
}
