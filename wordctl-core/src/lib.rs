pub mod cache;
pub mod config;
pub mod cursor;
pub mod dictionary;
pub mod error;
pub mod lists;
pub mod model;
pub mod paginator;
pub mod session;
pub mod source;
pub mod store;
pub mod testing;
pub mod view;

pub use cache::WordCache;
pub use config::WordctlConfig;
pub use cursor::MeaningCursor;
pub use dictionary::Dictionary;
pub use error::{Result, WordError};
pub use lists::{Favorites, History};
pub use model::{Definition, Meaning, Word, WordDetail, WordStub};
pub use paginator::{load_page, Paginator, DEFAULT_PAGE_SIZE};
pub use session::Session;
pub use source::{DictionarySource, Entry, HttpSource};
pub use store::{FileStore, MemoryStore, WordStore};
pub use view::{
    run_lookup, DetailPanel, ListSource, LookupOutcome, LookupRequest, Notice, ViewInputs,
    WordListView,
};
