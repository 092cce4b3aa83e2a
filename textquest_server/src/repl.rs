//! Interactive terminal front end.
//!
//! Runs a single local quest. Unlike the HTTP routes, the terminal asks for the opening
//! prompt up front instead of spending the player's first line on it.

mod input;

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use textquest_engine::quest::FAREWELL;
use textquest_engine::{QuestError, TEXTQUEST_VERSION};
use textwrap::{Options, fill, termwidth};

use crate::app::App;
use crate::style::GameStyle;

use input::{InputEvent, Terminal};

pub const LOCAL_PLAYER: &str = "local";

fn wrap_options() -> Options<'static> {
    Options::new(termwidth().min(100))
}

fn print_reply(text: &str) {
    for paragraph in text.lines().filter(|line| !line.trim().is_empty()) {
        println!("{}", fill(paragraph, wrap_options()).description_style());
    }
}

/// Play one quest at the terminal until the player exits or closes input.
///
/// # Errors
/// - if the quest cannot be started or its worker disappears
pub fn run_repl(app: &App) -> Result<()> {
    let quest = app.start_quest(LOCAL_PLAYER).context("while starting the local quest")?;
    println!("{:^60}", "TEXT QUEST".title_style());
    println!("{}\n", format!("v{TEXTQUEST_VERSION}").dimmed());
    print_reply(&quest.start().context("while fetching the opening prompt")?);

    let mut input = Terminal::open();
    let prompt = "\n> ".prompt_style().to_string();
    loop {
        let line = match input.read_line(&prompt) {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof) => "exit".to_string(),
            Ok(InputEvent::Interrupted) => {
                println!("{}", "Command canceled.".italic());
                continue;
            },
            Err(err) => {
                println!("{}", format!("Failed to read input: {err}").error_style());
                break;
            },
        };
        if line.trim().is_empty() {
            continue;
        }

        match quest.submit_command(&line) {
            Ok(reply) if reply == FAREWELL => {
                println!("{}", reply.farewell_style());
                break;
            },
            Ok(reply) => print_reply(&reply),
            Err(QuestError::Stopped) => break,
            Err(err) => return Err(err).context("quest ended unexpectedly"),
        }
    }
    quest.stop();
    info!("local quest finished");
    println!("thanks for playing!");
    Ok(())
}
