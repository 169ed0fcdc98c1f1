//! wordctl CLI - browse an English word list and look up definitions
//!
//! Entry point for the `wordctl` binary:
//! - Terminal browser with paging, detail panel, favorites and history (`browse`)
//! - One-shot dictionary pages and lookups (`list`, `define`)
//! - Per-user favorites and history (`favorites`, `history`)
//! - Config file management (`config`)

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

mod commands;
mod config;
mod context;
mod tracing_setup;
mod tui;
mod ui;

use context::Context;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "wordctl",
    author,
    version,
    about = "Browse an English word list and look up definitions",
    long_about = "Page through a large English word list, open words for phonetics, \
                  meanings and pronunciation audio, and keep per-user favorites and history."
)]
struct Cli {
    /// User id for favorites and history
    #[arg(long, global = true, env = "WORDCTL_USER")]
    user: Option<String>,

    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces to an OTLP endpoint (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the terminal word browser
    Browse(BrowseArgs),
    /// Print a page of the word list
    List(commands::list::ListArgs),
    /// Look up a word's phonetics and meanings
    Define(commands::define::DefineArgs),
    /// Manage favorite words (list, toggle, check)
    Favorites(commands::favorites::FavoritesArgs),
    /// Show accessed words
    History(commands::history::HistoryArgs),
    /// Manage wordctl configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct BrowseArgs {
    /// Start on the favorites tab
    #[arg(long, conflicts_with = "history")]
    favorites: bool,

    /// Start on the history tab
    #[arg(long)]
    history: bool,
}

impl BrowseArgs {
    fn tab(&self) -> tui::Tab {
        if self.favorites {
            tui::Tab::Favorites
        } else if self.history {
            tui::Tab::History
        } else {
            tui::Tab::Words
        }
    }
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    wordctl_core::config::load_dotenv();
    let cli = Cli::parse();

    // The browser owns the screen, so it logs to a file
    let log_file = match cli.command {
        Commands::Browse(_) => {
            wordctl_core::config::config_dir().map(|dir| dir.join("wordctl.log"))
        }
        _ => None,
    };
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
        log_file,
    })
    .ok();

    ui::init_quiet_mode(cli.quiet);
    debug!(command = ?cli.command, "starting");

    let result = run(cli).await;
    tracing_setup::shutdown_otel();
    result
}

async fn run(cli: Cli) -> Result<()> {
    let user = cli.user;
    match cli.command {
        Commands::Browse(args) => tui::run(Context::load(user)?, args.tab()).await,
        Commands::List(args) => commands::run_list(args, &Context::load(user)?).await,
        Commands::Define(args) => commands::run_define(args, &Context::load(user)?).await,
        Commands::Favorites(args) => commands::run_favorites(args, &Context::load(user)?).await,
        Commands::History(args) => commands::run_history(args, &Context::load(user)?).await,
        Commands::Config(args) => config::run_config(args),
        Commands::Completions(args) => run_completions(args),
    }
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
