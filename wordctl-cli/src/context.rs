//! Collaborators shared by every command

use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use tracing::debug;
use wordctl_core::{
    DictionarySource, FileStore, HttpSource, Session, WordStore, WordctlConfig,
};

/// Resolved configuration plus the source, store and session built from it
pub struct Context {
    pub config: WordctlConfig,
    pub session: Session,
    pub source: Arc<dyn DictionarySource>,
    pub store: Arc<dyn WordStore>,
}

impl Context {
    /// Load config files and build collaborators.
    ///
    /// `user` (from `--user` / `WORDCTL_USER`) wins over `[session] user`.
    pub fn load(user: Option<String>) -> Result<Self> {
        let config = WordctlConfig::load();
        Self::from_config(config, user)
    }

    pub fn from_config(config: WordctlConfig, user: Option<String>) -> Result<Self> {
        let session = user
            .or_else(|| config.session.user.clone())
            .map(Session::for_user)
            .unwrap_or_default();

        let source = HttpSource::from_config(&config.api)
            .context("Failed to build HTTP client for the dictionary API")?;
        let store = FileStore::new(config.data_dir());
        debug!(
            data_dir = %store.dir().display(),
            logged_in = session.is_logged_in(),
            "context ready"
        );

        Ok(Self {
            config,
            session,
            source: Arc::new(source),
            store: Arc::new(store),
        })
    }

    /// Current user id, or a login hint naming what needed it
    pub fn require_user(&self, action: &str) -> Result<&str> {
        self.session.require_user().map_err(|_| {
            anyhow!(
                "You need to be logged in to {action}.\n\nPass --user <id> or set WORDCTL_USER."
            )
        })
    }
}
