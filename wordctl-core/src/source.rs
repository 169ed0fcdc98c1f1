//! Dictionary source: bulk word list and per-word lookup
//!
//! Direct REST integration with two public endpoints:
//! - the dwyl english-words JSON object (fetched once per view)
//! - dictionaryapi.dev entries (one request per word)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::ApiConfig;
use crate::dictionary::Dictionary;
use crate::error::{Result, WordError};
use crate::model::{Meaning, WordDetail};

/// Default bulk word list URL
pub const DEFAULT_DICTIONARY_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/refs/heads/master/words_dictionary.json";

/// Default per-word entries endpoint (word is appended)
pub const DEFAULT_ENTRIES_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// One element of the per-word lookup response
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

impl Entry {
    /// First phonetic entry that carries a non-empty audio URL
    pub fn first_audio(&self) -> Option<&str> {
        self.phonetics
            .iter()
            .filter_map(|p| p.audio.as_deref())
            .find(|audio| !audio.is_empty())
    }

    /// Convert into a detail record with the given local id
    pub fn into_detail(self, id: u64) -> WordDetail {
        let audio = self.first_audio().unwrap_or_default().to_string();
        WordDetail {
            id,
            word: self.word,
            phonetic: self.phonetic.unwrap_or_default(),
            meanings: self.meanings,
            audio,
        }
    }
}

/// Anything that can supply the word list and per-word entries
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Fetch the complete word list
    async fn fetch_dictionary(&self) -> Result<Dictionary>;

    /// Look up a single word. An empty vec means the word is unknown.
    async fn lookup(&self, word: &str) -> Result<Vec<Entry>>;
}

/// HTTP implementation backed by reqwest
pub struct HttpSource {
    client: Client,
    dictionary_url: String,
    entries_url: String,
}

impl HttpSource {
    pub fn new(dictionary_url: impl Into<String>, entries_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), dictionary_url, entries_url)
    }

    pub fn with_client(
        client: Client,
        dictionary_url: impl Into<String>,
        entries_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            dictionary_url: dictionary_url.into(),
            entries_url: entries_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a source from the `[api]` config section
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(concat!("wordctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WordError::config("[api]", e.to_string()))?;
        Ok(Self::with_client(
            client,
            &api.dictionary_url,
            &api.entries_url,
        ))
    }

    /// URL for a single word lookup (lowercased, percent-encoded)
    pub fn entry_url(&self, word: &str) -> String {
        let word = word.trim().to_lowercase();
        format!("{}/{}", self.entries_url, urlencoding::encode(&word))
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_DICTIONARY_URL, DEFAULT_ENTRIES_URL)
    }
}

#[async_trait]
impl DictionarySource for HttpSource {
    #[instrument(skip(self), fields(url = %self.dictionary_url))]
    async fn fetch_dictionary(&self) -> Result<Dictionary> {
        let response = self
            .client
            .get(&self.dictionary_url)
            .send()
            .await
            .map_err(|e| WordError::bulk_fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WordError::bulk_fetch(format!(
                "server returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WordError::bulk_fetch(e.to_string()))?;
        let dictionary =
            Dictionary::from_json(&body).map_err(|e| WordError::bulk_fetch(e.to_string()))?;

        info!(words = dictionary.len(), "word dictionary loaded");
        Ok(dictionary)
    }

    #[instrument(skip(self))]
    async fn lookup(&self, word: &str) -> Result<Vec<Entry>> {
        let url = self.entry_url(word);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WordError::detail_fetch(word, e.to_string()))?;

        let status = response.status();
        // The API answers unknown words with 404 and a "No Definitions Found" object
        if status == StatusCode::NOT_FOUND {
            debug!(word, "no definitions found");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let truncated: String = error_text.chars().take(200).collect();
            return Err(WordError::detail_fetch(
                word,
                format!("server returned {status}: {truncated}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WordError::detail_fetch(word, e.to_string()))?;
        parse_entries(word, &body)
    }
}

/// Parse a lookup response body
pub fn parse_entries(word: &str, body: &str) -> Result<Vec<Entry>> {
    serde_json::from_str(body).map_err(|e| WordError::detail_fetch(word, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = r#"[
        {
            "word": "hello",
            "phonetic": "həˈləʊ",
            "phonetics": [
                {"text": "həˈləʊ", "audio": ""},
                {"text": "hɛˈləʊ", "audio": "https://example.test/hello-uk.mp3"}
            ],
            "meanings": [
                {"partOfSpeech": "exclamation", "definitions": [{"definition": "used as a greeting", "example": "hello there"}]},
                {"partOfSpeech": "noun", "definitions": [{"definition": "an utterance of hello"}]}
            ]
        },
        {"word": "hello", "meanings": []}
    ]"#;

    #[test]
    fn parses_first_entry_into_detail() {
        let mut entries = parse_entries("hello", HELLO).unwrap();
        assert_eq!(entries.len(), 2);

        let detail = entries.remove(0).into_detail(1);
        assert_eq!(detail.word, "hello");
        assert_eq!(detail.phonetic, "həˈləʊ");
        assert_eq!(detail.audio, "https://example.test/hello-uk.mp3");
        assert_eq!(detail.meanings.len(), 2);
        assert_eq!(detail.meanings[0].part_of_speech, "exclamation");
        assert_eq!(detail.meanings[0].definitions[0].definition, "used as a greeting");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let mut entries = parse_entries("bare", r#"[{"word":"bare"}]"#).unwrap();
        let detail = entries.remove(0).into_detail(4);
        assert_eq!(detail.id, 4);
        assert_eq!(detail.phonetic, "");
        assert_eq!(detail.audio, "");
        assert!(detail.meanings.is_empty());
    }

    #[test]
    fn malformed_body_is_a_fetch_failure() {
        let err = parse_entries("hello", "<html>").unwrap_err();
        assert!(matches!(err, WordError::DetailFetchFailed { .. }));

        let err = parse_entries("hello", r#"{"title":"No Definitions Found"}"#).unwrap_err();
        assert!(matches!(err, WordError::DetailFetchFailed { .. }));
    }

    #[test]
    fn entry_url_lowercases_and_encodes() {
        let source = HttpSource::new("http://localhost/dict.json", "http://localhost/entries/en/");
        assert_eq!(source.entry_url("Hello"), "http://localhost/entries/en/hello");
        assert_eq!(
            source.entry_url("ice cream"),
            "http://localhost/entries/en/ice%20cream"
        );
    }
}
