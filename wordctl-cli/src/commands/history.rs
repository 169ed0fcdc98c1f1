use anyhow::Result;
use clap::{Parser, Subcommand};
use wordctl_core::History;

use super::{print_words, OutputFormat};
use crate::context::Context;

pub const EMPTY_HISTORY: &str = "You haven't accessed any words yet.";

#[derive(Parser, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List accessed words in first-access order
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

pub async fn run_history(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let user = ctx.require_user("view your history")?;
    let mut history = History::new(ctx.store.clone());
    history.load(user).await;

    match args.command {
        HistoryCommands::List { format } => print_words(history.words(), format, EMPTY_HISTORY),
    }
}
