//! The bulk word list
//!
//! The remote list is a single JSON object mapping every known word to a
//! number. Key order in that object is the pagination order, so the
//! dictionary is deserialized with a map visitor that keeps insertion order
//! instead of going through a hash map. The numbers are checked but not kept.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Ordered, read-only word list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Build from words in order; a repeated word keeps its first position
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| seen.insert(word.clone()))
            .collect();
        Self { words }
    }

    /// Parse the bulk JSON payload
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in pagination order
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl<'de> Deserialize<'de> for Dictionary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DictionaryVisitor;

        impl<'de> Visitor<'de> for DictionaryVisitor {
            type Value = Dictionary;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object mapping words to numbers")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut words = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((word, _)) = access.next_entry::<String, f64>()? {
                    words.push(word);
                }
                Ok(Dictionary::from_words(words))
            }
        }

        deserializer.deserialize_map(DictionaryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_json_key_order() {
        let dict = Dictionary::from_json(r#"{"zebra":1,"apple":1,"mango":1}"#).unwrap();
        assert_eq!(dict.words(), ["zebra", "apple", "mango"]);
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn repeated_key_keeps_first_position() {
        let dict = Dictionary::from_json(r#"{"a":1,"b":1,"a":7}"#).unwrap();
        assert_eq!(dict.words(), ["a", "b"]);
    }

    #[test]
    fn rejects_non_object_payload() {
        assert!(Dictionary::from_json(r#"["a","b"]"#).is_err());
        assert!(Dictionary::from_json(r#"{"a":"one"}"#).is_err());
    }

    #[test]
    fn empty_object_is_empty_dictionary() {
        let dict = Dictionary::from_json("{}").unwrap();
        assert!(dict.is_empty());
        assert_eq!(dict.len(), 0);
    }
}
