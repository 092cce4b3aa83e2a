//! Line input for the terminal front end.
//!
//! A terminal gets a rustyline editor that completes verbs and keeps history between runs.
//! Piped input is read straight from stdin.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use textquest_engine::command::known_verbs;

pub enum InputEvent {
    Line(String),
    Eof,
    /// Ctrl-C at the prompt.
    Interrupted,
}

impl InputEvent {
    fn from_readline(result: rustyline::Result<String>) -> io::Result<Self> {
        match result {
            Ok(line) => Ok(Self::Line(line)),
            Err(ReadlineError::Eof) => Ok(Self::Eof),
            Err(ReadlineError::Interrupted) => Ok(Self::Interrupted),
            Err(ReadlineError::Io(err)) => Err(err),
            Err(other) => Err(io::Error::other(other)),
        }
    }
}

lazy_static! {
    /// Verbs offered for completion, single letter shortcuts left out.
    static ref VERBS: Vec<&'static str> = {
        let mut verbs: Vec<&'static str> = known_verbs()
            .chain(["open", "close", "unlock", "lock", "push"])
            .filter(|verb| verb.len() > 1)
            .collect();
        verbs.sort_unstable();
        verbs.dedup();
        verbs
    };
}

/// Completes the first word of the line against [`VERBS`].
struct VerbCompleter;

impl Completer for VerbCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(verb_candidates(&line[..pos]))
    }
}

impl Hinter for VerbCompleter {
    type Hint = String;
}

impl Highlighter for VerbCompleter {}

impl Validator for VerbCompleter {}

impl Helper for VerbCompleter {}

/// Where the word under the cursor starts, and the verbs it could become. Once the
/// player has moved past the first word there is nothing to offer.
fn verb_candidates(before_cursor: &str) -> (usize, Vec<Pair>) {
    let word = before_cursor.trim_start();
    let start = before_cursor.len() - word.len();
    if word.is_empty() || word.contains(char::is_whitespace) {
        return (start, Vec::new());
    }
    let word = word.to_lowercase();
    let pairs = VERBS
        .iter()
        .filter(|verb| verb.starts_with(&word))
        .map(|verb| Pair {
            display: (*verb).to_string(),
            replacement: (*verb).to_string(),
        })
        .collect();
    (start, pairs)
}

fn history_in(base: &Path) -> PathBuf {
    base.join("textquest").join("history.txt")
}

/// Reads player lines, with line editing when attached to a terminal.
pub struct Terminal {
    editor: Option<Editor<VerbCompleter, DefaultHistory>>,
    history: Option<PathBuf>,
}

impl Terminal {
    pub fn open() -> Self {
        if !io::stdin().is_terminal() {
            debug!("stdin is not a terminal; reading plain lines");
            return Self {
                editor: None,
                history: None,
            };
        }
        let mut editor = match Editor::<VerbCompleter, DefaultHistory>::new() {
            Ok(editor) => editor,
            Err(err) => {
                warn!("line editing unavailable ({err}); reading plain lines");
                return Self {
                    editor: None,
                    history: None,
                };
            },
        };
        editor.set_helper(Some(VerbCompleter));

        let history = dirs::data_dir().or_else(dirs::data_local_dir).map(|base| history_in(&base));
        if let Some(path) = &history {
            match editor.load_history(path) {
                Ok(()) => debug!("loaded history from {}", path.display()),
                Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {},
                Err(err) => warn!("could not load history from {}: {err}", path.display()),
            }
        }
        Self {
            editor: Some(editor),
            history,
        }
    }

    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let Some(editor) = self.editor.as_mut() else {
            return read_plain(&mut io::stdin().lock(), prompt);
        };
        let event = InputEvent::from_readline(editor.readline(prompt))?;
        if let InputEvent::Line(line) = &event {
            if !line.trim().is_empty() {
                editor.add_history_entry(line.as_str()).map_err(io::Error::other)?;
            }
        }
        Ok(event)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let (Some(editor), Some(path)) = (self.editor.as_mut(), self.history.as_ref()) else {
            return;
        };
        let saved = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .map_err(ReadlineError::Io)
            .and_then(|()| editor.save_history(path));
        if let Err(err) = saved {
            warn!("could not save history to {}: {err}", path.display());
        }
    }
}

fn read_plain(reader: &mut impl BufRead, prompt: &str) -> io::Result<InputEvent> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    line.truncate(line.trim_end_matches(['\r', '\n']).len());
    Ok(InputEvent::Line(line))
}
