use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::instrument;
use wordctl_core::{load_page, Notice};

use super::{format_row, OutputFormat};
use crate::context::Context;
use crate::ui;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Page number to show (1-based)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Words per page (default: [list] page_size, 20)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Print one page of the bulk dictionary
#[instrument(skip_all, fields(page = args.page))]
pub async fn run_list(args: ListArgs, ctx: &Context) -> Result<()> {
    let page_size = args
        .page_size
        .map(|size| size as usize)
        .unwrap_or_else(|| ctx.config.page_size());

    let dictionary = ui::with_spinner_async(
        "Fetching word dictionary...",
        |dict| format!("Loaded {} words", dict.len()),
        |_| Notice::dictionary_failed().message,
        ctx.source.fetch_dictionary(),
    )
    .await
    .context("Failed to load the word dictionary")?;

    let stubs = load_page(&dictionary, args.page as usize, page_size);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stubs)?),
        OutputFormat::Text if stubs.is_empty() => {
            println!(
                "Page {} is past the end of the dictionary ({} words).",
                args.page,
                dictionary.len()
            );
        }
        OutputFormat::Text => {
            for stub in &stubs {
                println!("{}", format_row(stub.id, &stub.word, None));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wordctl_core::testing::MockSource;
    use wordctl_core::{Dictionary, MemoryStore, Session, WordError, WordctlConfig};

    fn context(source: MockSource) -> Context {
        Context {
            config: WordctlConfig::default(),
            session: Session::anonymous(),
            source: Arc::new(source),
            store: Arc::new(MemoryStore::new()),
        }
    }

    fn args(page: u64) -> ListArgs {
        ListArgs {
            page,
            page_size: Some(2),
            format: OutputFormat::Json,
        }
    }

    #[tokio::test]
    async fn bulk_failure_surfaces_as_error() {
        let ctx = context(MockSource::new());
        let err = run_list(args(1), &ctx).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load the word dictionary"));
        assert!(matches!(
            err.downcast_ref::<WordError>(),
            Some(WordError::BulkFetchFailed { .. })
        ));
    }

    #[tokio::test]
    async fn pages_past_the_end_are_not_an_error() {
        let dictionary = Dictionary::from_words(["alpha", "beta", "gamma"]);
        let ctx = context(MockSource::new().with_dictionary(dictionary));
        run_list(args(2), &ctx).await.unwrap();
        run_list(args(9), &ctx).await.unwrap();
    }
}
