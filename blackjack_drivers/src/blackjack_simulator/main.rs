mod simulation;

use std::path::PathBuf;

use anyhow::{bail, Context};
use blackjack_drivers::parse_config_from_file;
use clap::Parser;
use tracing::Level;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Writes every seat's bankroll series to this file as YAML
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Logs more, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let mut args = CommandLineArgs::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if args.config == DEFAULT_CONFIG_PATH {
        let home_dir = home::home_dir().context("Cannot find home directory")?;
        let config_file_path = home_dir.join(".blackjack.yml");
        if !config_file_path.exists() {
            bail!("Config file {} does not exist", config_file_path.display());
        }
        if config_file_path.is_dir() {
            bail!("This should be a path rather than a directory");
        }
        args.config = config_file_path.to_string_lossy().into_owned();
    }
    let args = args;

    let config = parse_config_from_file(&args.config)?;
    simulation::run_campaign(&config, args.output.as_deref())
}
