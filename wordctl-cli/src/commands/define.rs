use anyhow::Result;
use clap::Parser;
use tracing::{info, instrument};
use wordctl_core::{History, Notice, Word, WordCache, WordDetail};

use super::OutputFormat;
use crate::context::Context;
use crate::ui;

#[derive(Parser, Debug)]
pub struct DefineArgs {
    /// Word to look up
    pub word: String,

    /// Show every meaning instead of only the first
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Look up a word and record it in the user's history
#[instrument(skip_all, fields(word = %args.word))]
pub async fn run_define(args: DefineArgs, ctx: &Context) -> Result<()> {
    let word = args.word.trim();
    let mut cache = WordCache::new();

    let detail = ui::with_spinner_async(
        format!("Looking up '{word}'..."),
        |detail: &WordDetail| format!("Found {} meaning(s)", detail.meanings.len()),
        |err| Notice::for_error(err).message,
        cache.lookup_or_fetch(ctx.source.as_ref(), word),
    )
    .await
    .map_err(|err| {
        let message = Notice::for_error(&err).message;
        anyhow::Error::new(err).context(message)
    })?;

    if let Some(user) = ctx.session.user_id() {
        let mut history = History::new(ctx.store.clone());
        history.load(user).await;
        if history.add(Word::from(detail.clone()), user).await {
            info!(word = %detail.word, "added to history");
        }
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
        OutputFormat::Text => print!("{}", render_detail(&detail, args.all)),
    }
    Ok(())
}

/// Plain-text detail view
pub fn render_detail(detail: &WordDetail, all: bool) -> String {
    let mut out = String::new();
    match detail.phonetic() {
        Some(phonetic) => out.push_str(&format!("{}  {}\n", detail.word, phonetic)),
        None => out.push_str(&format!("{}\n", detail.word)),
    }
    if let Some(audio) = detail.audio_url() {
        out.push_str(&format!("audio: {audio}\n"));
    }

    let count = detail.meanings.len();
    let shown = if all { count } else { count.min(1) };
    for (i, meaning) in detail.meanings.iter().take(shown).enumerate() {
        out.push_str(&format!(
            "\n[{}/{}] {}\n",
            i + 1,
            count,
            meaning.part_of_speech
        ));
        for (n, definition) in meaning.definitions.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", n + 1, definition.definition));
        }
    }
    if shown < count {
        out.push_str(&format!(
            "\n({} more meaning(s), use --all to show them)\n",
            count - shown
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordctl_core::{Definition, Meaning};

    fn detail() -> WordDetail {
        WordDetail {
            id: 1,
            word: "run".into(),
            phonetic: "/rʌn/".into(),
            meanings: vec![
                Meaning {
                    part_of_speech: "verb".into(),
                    definitions: vec![Definition {
                        definition: "Move swiftly on foot.".into(),
                    }],
                },
                Meaning {
                    part_of_speech: "noun".into(),
                    definitions: vec![],
                },
            ],
            audio: String::new(),
        }
    }

    #[test]
    fn first_meaning_only_by_default() {
        let text = render_detail(&detail(), false);
        assert!(text.starts_with("run  /rʌn/\n"));
        assert!(text.contains("[1/2] verb"));
        assert!(text.contains("1. Move swiftly on foot."));
        assert!(!text.contains("[2/2] noun"));
        assert!(text.contains("1 more meaning(s)"));
        assert!(!text.contains("audio:"));
    }

    #[test]
    fn all_meanings_on_request() {
        let text = render_detail(&detail(), true);
        assert!(text.contains("[2/2] noun"));
        assert!(!text.contains("more meaning"));
    }
}
