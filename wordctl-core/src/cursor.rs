//! Which meaning of the selected word is on screen

/// Bounded index into a word's meanings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeaningCursor {
    index: usize,
    count: usize,
}

impl MeaningCursor {
    /// Cursor at the first of `count` meanings
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    /// Start over for a newly selected word
    pub fn reset(&mut self, count: usize) {
        *self = Self::new(count);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.index += 1;
        }
    }

    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.count
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// The meaning under the cursor, or `None` for a word without meanings
    pub fn current<'a, T>(&self, meanings: &'a [T]) -> Option<&'a T> {
        meanings.get(self.index)
    }
}
