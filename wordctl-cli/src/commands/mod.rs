//! Command implementations for the wordctl CLI

pub mod define;
pub mod favorites;
pub mod history;
pub mod list;

use anyhow::Result;
use clap::ValueEnum;
use wordctl_core::Word;

pub use define::run_define;
pub use favorites::run_favorites;
pub use history::run_history;
pub use list::run_list;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

/// One list row: right-aligned id, word, phonetic when known
pub fn format_row(id: u64, word: &str, phonetic: Option<&str>) -> String {
    match phonetic {
        Some(phonetic) => format!("{id:>6}  {word}  {phonetic}"),
        None => format!("{id:>6}  {word}"),
    }
}

/// Print a saved word list, or `empty` when there is nothing to show
pub fn print_words(words: &[Word], format: OutputFormat, empty: &str) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(words)?),
        OutputFormat::Text if words.is_empty() => println!("{empty}"),
        OutputFormat::Text => {
            for word in words {
                println!("{}", format_row(word.id, &word.word, word.phonetic()));
            }
        }
    }
    Ok(())
}
