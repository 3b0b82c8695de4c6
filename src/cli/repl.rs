//! Interactive menu around a game session

use std::io;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::application::services::Outcome;
use crate::application::{ApplicationResult, Session};
use crate::infrastructure::traits::{LineSource, TextSink};

pub const MENU: &str = "play, print tree, save, load, or quit? [p/t/s/l/q]";
pub const GOODBYE: &str = "goodbye";

/// Menu entries, selected by the first letter of the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    PrintTree,
    Save,
    Load,
    Quit,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim_start().chars().next()?.to_ascii_lowercase() {
            'p' => Some(MenuChoice::Play),
            't' => Some(MenuChoice::PrintTree),
            's' => Some(MenuChoice::Save),
            'l' => Some(MenuChoice::Load),
            'q' => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Run the menu until the player quits or input ends.
///
/// Save and load failures are reported and the menu continues; the live
/// tree is only replaced by a successful load.
#[instrument(level = "debug", skip_all)]
pub fn run(
    session: &mut Session,
    input: &mut dyn LineSource,
    output: &mut dyn TextSink,
) -> ApplicationResult<()> {
    loop {
        output.write_line(MENU)?;
        let line = match input.next_line() {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                output.write_line(GOODBYE)?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(choice) = MenuChoice::parse(&line) else {
            if !line.trim().is_empty() {
                output.write_line(&format!("unknown choice {:?}", line.trim()))?;
            }
            continue;
        };
        debug!("menu: {:?}", choice);

        match choice {
            MenuChoice::Quit => {
                output.write_line(GOODBYE)?;
                return Ok(());
            }
            MenuChoice::PrintTree => output.write_line(session.render().trim_end())?,
            MenuChoice::Save => {
                let path = ask_path(session, input, output, "enter filename to save in:")?;
                match session.save(path.as_deref()) {
                    Ok(p) => output.write_line(&format!("saved tree to {}", p.display()))?,
                    Err(e) => output.write_line(&format!("error saving: {}", e))?,
                }
            }
            MenuChoice::Load => {
                let path = ask_path(session, input, output, "enter filename to load from:")?;
                match session.load(path.as_deref()) {
                    Ok(p) => output.write_line(&format!("loaded tree from {}", p.display()))?,
                    Err(e) => output.write_line(&format!("error loading file: {}", e))?,
                }
            }
            MenuChoice::Play => {
                if let Outcome::Learned { answer, .. } = session.play(input, output)? {
                    output.write_line(&format!("I'll remember {}.", answer))?;
                }
            }
        }
        output.write_line("")?;
    }
}

/// Ask for a file name; a blank reply means the session default.
fn ask_path(
    session: &Session,
    input: &mut dyn LineSource,
    output: &mut dyn TextSink,
    prompt: &str,
) -> ApplicationResult<Option<PathBuf>> {
    match session.store_path() {
        Some(default) => output.write_line(&format!("{} [{}]", prompt, default.display()))?,
        None => output.write_line(prompt)?,
    }
    let reply = input.next_line()?;
    let reply = reply.trim();
    Ok((!reply.is_empty()).then(|| PathBuf::from(reply)))
}
