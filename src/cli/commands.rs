//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::StoreService;
use crate::application::{ApplicationError, Session};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, repl};
use crate::config::{global_config_path, Settings};
use crate::domain::{DecisionTree, ToTreeString};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{RealFileSystem, StdinLines, StdoutSink};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => cmd_play(cli, None),
        Some(Commands::Play { tree }) => cmd_play(cli, tree.as_deref()),
        Some(Commands::Print { file }) => cmd_print(file),
        Some(Commands::Check { file }) => cmd_check(file),
        Some(Commands::Init { file, seed, force }) => cmd_init(cli, file, seed.as_deref(), *force),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn store() -> StoreService {
    StoreService::new(Arc::new(RealFileSystem))
}

#[instrument(skip(cli))]
fn cmd_play(cli: &Cli, tree: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let mut session = open_session(&settings, tree, Arc::new(RealFileSystem))?;
    repl::run(
        &mut session,
        &mut StdinLines::default(),
        &mut StdoutSink::default(),
    )?;
    Ok(())
}

/// Session for `play`: loads `tree`, or else the configured store.
///
/// A missing configured store is not an error; the session then starts
/// from the seed answer.
#[instrument(skip(settings, fs))]
pub fn open_session(
    settings: &Settings,
    tree: Option<&Path>,
    fs: Arc<dyn FileSystem>,
) -> CliResult<Session> {
    let mut session = Session::new(settings, fs);
    if tree.is_none() && session.store_path().is_none() {
        return Ok(session);
    }
    match session.load(tree) {
        Ok(path) => debug!("playing with tree from {}", path.display()),
        Err(ApplicationError::StoreNotFound(path)) if tree.is_none() => {
            output::warning(&format!(
                "tree store {} not found, starting with '{}'",
                path.display(),
                settings.seed_answer
            ));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(session)
}

#[instrument]
fn cmd_print(file: &Path) -> CliResult<()> {
    let tree = store().load(file)?;
    output::info(tree.to_tree_string().trim_end());
    Ok(())
}

#[instrument]
fn cmd_check(file: &Path) -> CliResult<()> {
    let tree = store().load(file)?;
    output::success(&format!("valid tree store: {}", file.display()));
    output::detail(&format!("nodes:     {}", tree.len()));
    output::detail(&format!("questions: {}", tree.question_count()));
    output::detail(&format!("answers:   {}", tree.len() - tree.question_count()));
    output::detail(&format!("depth:     {}", tree.depth()));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_init(cli: &Cli, file: &Path, seed: Option<&str>, force: bool) -> CliResult<()> {
    if file.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} already exists, use --force to overwrite",
            file.display()
        )));
    }
    let seed = match seed {
        Some(s) => s.trim().to_string(),
        None => Settings::load(cli.config.as_deref())?.seed_answer,
    };
    if seed.is_empty() {
        return Err(CliError::InvalidArgs("seed answer must not be empty".into()));
    }
    store().save(&DecisionTree::new(seed), file)?;
    output::action("Created", &file.display());
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::header("# merged settings");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}
