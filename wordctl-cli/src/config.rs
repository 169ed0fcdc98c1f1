use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use wordctl_core::config::{config_path, LOCAL_CONFIG_FILE};
use wordctl_core::WordctlConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with the built-in defaults
    Init(InitArgs),
    /// Print the effective config (global + local + defaults)
    Show,
    /// Show config file paths
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = WordctlConfig::default().to_toml()?;
    std::fs::write(&config_path, content)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Set [session] user to keep favorites and history");
    println!("  3. Run: wordctl config show");

    Ok(())
}

fn run_show() -> Result<()> {
    let config = WordctlConfig::load();
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_path() -> Result<()> {
    let global = config_path();
    let status = if global.exists() { "" } else { " (not created)" };
    println!("global: {}{}", global.display(), status);
    println!("local:  ./{}", LOCAL_CONFIG_FILE);
    Ok(())
}
