//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Twenty questions on a decision tree that learns from its wrong guesses
#[derive(Parser, Debug)]
#[command(name = "twentyq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/twentyq/twentyq.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu: play, print, save, load (default command)
    Play {
        /// Tree store to load at start; also the default for save/load
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        tree: Option<PathBuf>,
    },

    /// Show a stored tree
    Print {
        /// Tree store
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Validate a stored tree and show its size
    Check {
        /// Tree store
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Write a fresh single-answer tree store
    Init {
        /// Tree store to create
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Seed answer (default: seed_answer from config)
        #[arg(short, long)]
        seed: Option<String>,
        /// Overwrite an existing store
        #[arg(short, long)]
        force: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show global config path
    Path,
}
