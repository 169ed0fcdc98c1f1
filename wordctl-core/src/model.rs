//! Word records shared by the list, the detail panel and the stores

use serde::{Deserialize, Serialize};

/// One definition line of a meaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
}

/// One part-of-speech sense of a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

/// Minimal list-row representation, created when a page is sliced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStub {
    pub id: u64,
    pub word: String,
}

impl WordStub {
    pub fn new(id: u64, word: impl Into<String>) -> Self {
        Self {
            id,
            word: word.into(),
        }
    }
}

/// Fully enriched record built from the first lookup result
///
/// `phonetic` and `audio` are empty strings when the remote entry had none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetail {
    pub id: u64,
    pub word: String,
    pub phonetic: String,
    pub meanings: Vec<Meaning>,
    pub audio: String,
}

impl WordDetail {
    /// Audio URL, if the entry carried one
    pub fn audio_url(&self) -> Option<&str> {
        non_empty(&self.audio)
    }

    pub fn phonetic(&self) -> Option<&str> {
        non_empty(&self.phonetic)
    }
}

/// Persisted and listed word record
///
/// Favorites and history hold these. The optional fields are only present
/// when the word was enriched before it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: u64,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meanings: Option<Vec<Meaning>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

impl Word {
    /// Same word text, regardless of id or enrichment
    pub fn same_word(&self, other: &str) -> bool {
        self.word == other
    }

    pub fn stub(&self) -> WordStub {
        WordStub::new(self.id, self.word.clone())
    }

    pub fn meanings(&self) -> &[Meaning] {
        self.meanings.as_deref().unwrap_or(&[])
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.audio.as_deref().and_then(non_empty)
    }

    pub fn phonetic(&self) -> Option<&str> {
        self.phonetic.as_deref().and_then(non_empty)
    }
}

impl From<WordStub> for Word {
    fn from(stub: WordStub) -> Self {
        Self {
            id: stub.id,
            word: stub.word,
            phonetic: None,
            meanings: None,
            audio: None,
        }
    }
}

impl From<WordDetail> for Word {
    fn from(detail: WordDetail) -> Self {
        Self {
            id: detail.id,
            word: detail.word,
            phonetic: Some(detail.phonetic),
            meanings: Some(detail.meanings),
            audio: Some(detail.audio),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_word_uses_camel_case() {
        let word = Word::from(WordDetail {
            id: 1,
            word: "hello".into(),
            phonetic: "/həˈləʊ/".into(),
            meanings: vec![Meaning {
                part_of_speech: "noun".into(),
                definitions: vec![Definition {
                    definition: "a greeting".into(),
                }],
            }],
            audio: String::new(),
        });

        let json = serde_json::to_string(&word).unwrap();
        assert!(json.contains("\"partOfSpeech\":\"noun\""));
        assert_eq!(word.audio_url(), None);
        assert_eq!(word.phonetic(), Some("/həˈləʊ/"));
    }

    #[test]
    fn stub_word_round_trips_without_optional_fields() {
        let json = r#"{"id":3,"word":"aback"}"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.stub(), WordStub::new(3, "aback"));
        assert!(word.meanings().is_empty());
        assert_eq!(serde_json::to_string(&word).unwrap(), json);
    }
}
