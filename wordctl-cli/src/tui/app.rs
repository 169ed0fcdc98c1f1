//! Application state for the TUI

use std::sync::Arc;

use tracing::{debug, warn};
use wordctl_core::{
    Dictionary, Favorites, History, LookupOutcome, LookupRequest, Notice, Result, Session,
    ViewInputs, WordListView, WordStore,
};

/// Rows from the end of the loaded list at which the next page is requested
pub const LOAD_MORE_THRESHOLD: usize = 5;

/// Main area tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Words,
    Favorites,
    History,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Words, Tab::Favorites, Tab::History];

    pub fn index(&self) -> usize {
        match self {
            Tab::Words => 0,
            Tab::Favorites => 1,
            Tab::History => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Words => "1:Words",
            Tab::Favorites => "2:Favorites",
            Tab::History => "3:History",
        }
    }
}

/// Progress of the bulk dictionary download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryState {
    Loading,
    Ready,
    Failed,
}

/// Results posted back to the loop by spawned tasks
#[derive(Debug)]
pub enum AppEvent {
    DictionaryLoaded(Result<Dictionary>),
    Lookup(LookupOutcome),
}

/// A view plus its list selection
#[derive(Debug)]
pub struct Pane {
    pub view: WordListView,
    pub selected: usize,
}

impl Pane {
    fn new(view: WordListView) -> Self {
        Self { view, selected: 0 }
    }
}

/// Main application state
pub struct App {
    pub tab: Tab,
    /// Dictionary pane, kept across tab switches
    pub words: Option<Pane>,
    /// Favorites or history snapshot, rebuilt on every switch
    pub saved: Option<Pane>,
    pub favorites: Favorites,
    pub history: History,
    pub session: Session,
    pub page_size: usize,
    pub dictionary_state: DictionaryState,
    pub status_message: Option<String>,
    pub notice: Option<Notice>,
}

impl App {
    pub fn new(session: Session, store: Arc<dyn WordStore>, page_size: usize) -> Self {
        Self {
            tab: Tab::Words,
            words: None,
            saved: None,
            favorites: Favorites::new(store.clone()),
            history: History::new(store),
            session,
            page_size,
            dictionary_state: DictionaryState::Loading,
            status_message: None,
            notice: None,
        }
    }

    /// Load the signed-in user's favorites and history
    pub async fn load_lists(&mut self) {
        if let Some(user) = self.session.user_id() {
            self.favorites.load(user).await;
            self.history.load(user).await;
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn show_notice(&mut self, notice: Notice) {
        debug!(%notice, "notice");
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.pull_notice();
    }

    /// Surface the next queued view notice if nothing is showing
    fn pull_notice(&mut self) {
        if self.notice.is_some() {
            return;
        }
        let next = self
            .words
            .as_mut()
            .and_then(|pane| pane.view.take_notice())
            .or_else(|| self.saved.as_mut().and_then(|pane| pane.view.take_notice()));
        self.notice = next;
    }

    /// Apply an event posted by a spawned task
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DictionaryLoaded(Ok(dictionary)) => {
                let count = dictionary.len();
                let inputs =
                    ViewInputs::dictionary(Arc::new(dictionary)).with_page_size(self.page_size);
                self.words = Some(Pane::new(WordListView::new(inputs)));
                self.dictionary_state = DictionaryState::Ready;
                self.set_status(format!("{count} words"));
            }
            AppEvent::DictionaryLoaded(Err(err)) => {
                warn!(error = %err, "dictionary load failed");
                self.dictionary_state = DictionaryState::Failed;
                self.show_notice(Notice::dictionary_failed());
            }
            AppEvent::Lookup(outcome) => {
                let applied = match self.words.as_mut() {
                    Some(pane) if pane.view.generation() == outcome.generation => {
                        pane.view.apply_lookup(outcome)
                    }
                    _ => match self.saved.as_mut() {
                        Some(pane) => pane.view.apply_lookup(outcome),
                        None => false,
                    },
                };
                if applied {
                    self.pull_notice();
                }
            }
        }
    }

    /// Switch tabs; favorites/history are re-read from memory each time
    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.saved = match tab {
            Tab::Words => None,
            _ if !self.session.is_logged_in() => None,
            Tab::Favorites => Some(Pane::new(WordListView::new(ViewInputs::favorites(
                self.favorites.words().to_vec(),
            )))),
            Tab::History => Some(Pane::new(WordListView::new(ViewInputs::history(
                self.history.words().to_vec(),
            )))),
        };
    }

    pub fn active_pane(&self) -> Option<&Pane> {
        match self.tab {
            Tab::Words => self.words.as_ref(),
            _ => self.saved.as_ref(),
        }
    }

    pub fn active_pane_mut(&mut self) -> Option<&mut Pane> {
        match self.tab {
            Tab::Words => self.words.as_mut(),
            _ => self.saved.as_mut(),
        }
    }

    /// Placeholder for an empty list on the current tab
    pub fn empty_message(&self) -> &'static str {
        match self.tab {
            Tab::Words => match self.dictionary_state {
                DictionaryState::Loading => "Loading words...",
                DictionaryState::Ready => "No words",
                DictionaryState::Failed => "Word list unavailable (r: retry)",
            },
            Tab::Favorites if !self.session.is_logged_in() => {
                "You need to be logged in to view your favorites."
            }
            Tab::History if !self.session.is_logged_in() => {
                "You need to be logged in to view your history."
            }
            Tab::Favorites => "You haven't added any favorites yet.",
            Tab::History => "You haven't accessed any words yet.",
        }
    }

    pub fn select_next(&mut self) {
        if let Some(pane) = self.active_pane_mut() {
            if pane.selected + 1 < pane.view.len() {
                pane.selected += 1;
            }
            if pane.selected + LOAD_MORE_THRESHOLD >= pane.view.len() {
                pane.view.on_end_reached();
            }
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(pane) = self.active_pane_mut() {
            pane.selected = pane.selected.saturating_sub(1);
        }
    }

    /// Open the detail panel for the selected row
    pub fn open_selected(&mut self) -> Option<LookupRequest> {
        let pane = self.active_pane_mut()?;
        pane.view.select(pane.selected)
    }

    pub fn close_panel(&mut self) {
        if let Some(pane) = self.active_pane_mut() {
            pane.view.close();
        }
    }

    pub fn panel_open(&self) -> bool {
        self.active_pane()
            .is_some_and(|pane| pane.view.panel().is_some())
    }

    pub fn next_meaning(&mut self) {
        if let Some(pane) = self.active_pane_mut() {
            pane.view.next_meaning();
        }
    }

    pub fn previous_meaning(&mut self) {
        if let Some(pane) = self.active_pane_mut() {
            pane.view.previous_meaning();
        }
    }

    /// Show the audio URL of the open word, or the missing-audio notice
    pub fn play_audio(&mut self) {
        let result = self
            .active_pane()
            .and_then(|pane| pane.view.panel())
            .map(|panel| panel.play_audio().map(str::to_string));
        match result {
            Some(Ok(url)) => self.set_status(format!("♪ {url}")),
            Some(Err(notice)) => self.show_notice(notice),
            None => {}
        }
    }

    /// Record the open word in history
    pub async fn record_history(&mut self) {
        let Some(user) = self.session.user_id().map(str::to_string) else {
            return;
        };
        let word = self
            .active_pane()
            .and_then(|pane| pane.view.panel())
            .map(|panel| panel.to_word());
        if let Some(word) = word {
            self.history.add(word, &user).await;
        }
    }

    /// Toggle the open word in favorites
    pub async fn toggle_favorite(&mut self) {
        let Some(user) = self.session.user_id().map(str::to_string) else {
            self.show_notice(Notice::new(
                "Login required",
                "You need to be logged in to manage your favorites.",
            ));
            return;
        };
        let word = self
            .active_pane()
            .and_then(|pane| pane.view.panel())
            .map(|panel| panel.to_word());
        if let Some(word) = word {
            let text = word.word.clone();
            if self.favorites.toggle(word, &user).await {
                self.set_status(format!("★ Added '{text}' to favorites"));
            } else {
                self.set_status(format!("Removed '{text}' from favorites"));
            }
            if self.tab == Tab::Favorites {
                self.switch_tab(Tab::Favorites);
            }
        }
    }

    /// Whether the word is in the user's favorites
    pub fn is_favorite(&self, word: &str) -> bool {
        self.favorites.is_favorite(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordctl_core::testing::MockSource;
    use wordctl_core::{DictionarySource, MemoryStore, Word, WordStub};

    fn dictionary(n: usize) -> Dictionary {
        Dictionary::from_words((0..n).map(|i| format!("w{i}")))
    }

    fn app(user: Option<&str>) -> App {
        let session = user.map(Session::for_user).unwrap_or_default();
        App::new(session, Arc::new(MemoryStore::new()), 10)
    }

    #[test]
    fn scrolling_near_end_loads_next_page() {
        let mut app = app(None);
        app.handle_event(AppEvent::DictionaryLoaded(Ok(dictionary(25))));
        assert_eq!(app.words.as_ref().unwrap().view.len(), 10);

        for _ in 0..5 {
            app.select_next();
        }
        assert_eq!(app.words.as_ref().unwrap().view.len(), 20);
        assert_eq!(app.words.as_ref().unwrap().selected, 5);
    }

    #[test]
    fn failed_dictionary_raises_notice() {
        let mut app = app(None);
        app.handle_event(AppEvent::DictionaryLoaded(Err(
            wordctl_core::WordError::bulk_fetch("offline"),
        )));
        assert_eq!(app.dictionary_state, DictionaryState::Failed);
        assert_eq!(app.notice, Some(Notice::dictionary_failed()));
        assert_eq!(app.empty_message(), "Word list unavailable (r: retry)");
    }

    #[tokio::test]
    async fn bulk_fetch_failure_then_retry_from_source() {
        let mut app = app(None);
        assert_eq!(app.dictionary_state, DictionaryState::Loading);
        assert_eq!(app.empty_message(), "Loading words...");

        let result = MockSource::new().fetch_dictionary().await;
        app.handle_event(AppEvent::DictionaryLoaded(result));
        assert_eq!(app.dictionary_state, DictionaryState::Failed);
        assert_eq!(app.notice, Some(Notice::dictionary_failed()));
        assert!(app.words.is_none());

        app.dismiss_notice();
        app.dictionary_state = DictionaryState::Loading;
        let source = MockSource::new().with_dictionary(dictionary(12));
        let result = source.fetch_dictionary().await;
        app.handle_event(AppEvent::DictionaryLoaded(result));

        assert_eq!(app.dictionary_state, DictionaryState::Ready);
        assert!(app.notice.is_none());
        assert_eq!(app.status_message.as_deref(), Some("12 words"));
        let pane = app.words.as_ref().unwrap();
        assert_eq!(pane.view.len(), 10);
        assert_eq!(pane.view.rows()[0], WordStub::new(1, "w0"));
    }

    #[test]
    fn saved_tabs_need_login() {
        let mut app = app(None);
        app.switch_tab(Tab::Favorites);
        assert!(app.active_pane().is_none());
        assert_eq!(
            app.empty_message(),
            "You need to be logged in to view your favorites."
        );
    }

    #[tokio::test]
    async fn favorite_toggle_shows_up_on_favorites_tab() {
        let mut app = app(Some("u1"));
        app.handle_event(AppEvent::DictionaryLoaded(Ok(dictionary(3))));
        assert!(app.open_selected().is_some());
        app.toggle_favorite().await;
        assert!(app.is_favorite("w0"));

        app.switch_tab(Tab::Favorites);
        let pane = app.active_pane().unwrap();
        assert_eq!(pane.view.rows(), vec![WordStub::new(1, "w0")]);
    }

    #[tokio::test]
    async fn unfavoriting_on_favorites_tab_refreshes_list() {
        let mut app = app(Some("u1"));
        app.handle_event(AppEvent::DictionaryLoaded(Ok(dictionary(3))));
        app.open_selected();
        app.toggle_favorite().await;

        app.switch_tab(Tab::Favorites);
        assert_eq!(app.active_pane().unwrap().view.len(), 1);
        assert!(app.open_selected().is_some());
        app.toggle_favorite().await;

        assert!(!app.is_favorite("w0"));
        let pane = app.active_pane().unwrap();
        assert!(pane.view.is_empty());
        assert!(pane.view.panel().is_none());
        assert_eq!(app.empty_message(), "You haven't added any favorites yet.");
    }

    #[tokio::test]
    async fn opening_word_records_history_once() {
        let mut app = app(Some("u1"));
        app.handle_event(AppEvent::DictionaryLoaded(Ok(dictionary(3))));
        app.open_selected();
        app.record_history().await;
        app.close_panel();
        app.open_selected();
        app.record_history().await;

        assert_eq!(app.history.words(), &[Word::from(WordStub::new(1, "w0"))]);
        app.switch_tab(Tab::History);
        assert_eq!(app.active_pane().unwrap().view.len(), 1);
    }

    #[test]
    fn play_audio_without_url_shows_notice() {
        let mut app = app(None);
        app.handle_event(AppEvent::DictionaryLoaded(Ok(dictionary(1))));
        app.open_selected();
        app.play_audio();
        assert_eq!(app.notice, Some(Notice::no_audio()));
    }
}
