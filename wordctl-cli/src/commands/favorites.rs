use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use wordctl_core::{Favorites, Notice, Word, WordCache};

use super::{print_words, OutputFormat};
use crate::context::Context;
use crate::ui;

pub const EMPTY_FAVORITES: &str = "You haven't added any favorites yet.";

#[derive(Parser, Debug)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommands,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommands {
    /// List favorite words
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Add a word to favorites, or remove it if already there
    Toggle {
        /// Word to toggle
        word: String,
    },
    /// Report whether a word is a favorite
    Check {
        /// Word to check
        word: String,
    },
}

pub async fn run_favorites(args: FavoritesArgs, ctx: &Context) -> Result<()> {
    let user = ctx.require_user("view your favorites")?;
    let mut favorites = Favorites::new(ctx.store.clone());
    favorites.load(user).await;

    match args.command {
        FavoritesCommands::List { format } => {
            print_words(favorites.words(), format, EMPTY_FAVORITES)
        }
        FavoritesCommands::Toggle { word } => run_toggle(ctx, &mut favorites, user, &word).await,
        FavoritesCommands::Check { word } => {
            if favorites.is_favorite(&word) {
                println!("★ '{word}' is a favorite");
            } else {
                println!("'{word}' is not a favorite");
            }
            Ok(())
        }
    }
}

/// Removing needs no lookup; adding stores the enriched record
#[instrument(skip(ctx, favorites, user))]
async fn run_toggle(
    ctx: &Context,
    favorites: &mut Favorites,
    user: &str,
    word: &str,
) -> Result<()> {
    let record = match favorites.words().iter().find(|w| w.same_word(word)) {
        Some(existing) => existing.clone(),
        None => {
            let mut cache = WordCache::new();
            let detail = ui::with_spinner_async(
                format!("Looking up '{word}'..."),
                |_| "Found".to_string(),
                |err| Notice::for_error(err).message,
                cache.lookup_or_fetch(ctx.source.as_ref(), word),
            )
            .await
            .with_context(|| format!("Cannot add '{word}' to favorites"))?;
            Word::from(detail)
        }
    };

    if favorites.toggle(record, user).await {
        println!("★ Added '{word}' to favorites");
    } else {
        println!("Removed '{word}' from favorites");
    }
    Ok(())
}
