//! Command module
//!
//! Reduces one line of player input to a structured [`Command`].
//!
//! It drops filler words, keeps at most a two-word noun
//! phrase (qualifier + noun) per object position, and understands a single "with" clause
//! naming the tool the player acts with. Anything after "and" is ignored.
use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Words that never become tokens.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "to", "around", "through", "over", "beside", "on", "in", "into", "at", "is", "my", "up",
];

/// Verb classes: the canonical verb followed by every synonym that maps onto it.
const VERB_CLASSES: &[(&str, &[&str])] = &[
    (
        "go",
        &["go", "run", "walk", "travel", "head", "venture", "approach", "climb", "enter"],
    ),
    ("look", &["look", "examine", "inspect", "observe", "view", "l"]),
    ("take", &["take", "get", "grab", "pick", "collect", "acquire"]),
    ("use", &["use", "utilize", "employ", "apply"]),
    ("say", &["say", "speak", "shout", "yell", "whisper", "utter"]),
    ("exit", &["exit", "quit", "bye"]),
    ("inventory", &["inventory", "inv", "i"]),
    ("help", &["help", "manual"]),
];

lazy_static! {
    static ref CANONICAL_VERBS: HashMap<&'static str, &'static str> = VERB_CLASSES
        .iter()
        .flat_map(|(canonical, synonyms)| synonyms.iter().map(move |synonym| (*synonym, *canonical)))
        .collect();
}

/// The structured result of parsing one line of player input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// The line as the player typed it.
    pub sentence: String,
    /// First significant word, exactly as typed (lowercased).
    pub raw_action: String,
    /// `raw_action` mapped onto its verb class, or passed through unchanged.
    pub action: String,
    pub object: String,
    /// Qualifier for `object`, e.g. "blue" in "blue door".
    pub identifier: String,
    /// The tool named after "with".
    pub action_object: String,
    pub action_identifier: String,
}

impl Command {
    /// Qualifier and noun joined, e.g. "blue door". Empty if neither is set.
    pub fn described_object(&self) -> String {
        join_phrase(&self.identifier, &self.object)
    }

    /// Qualifier and noun of the tool, e.g. "blue key".
    pub fn described_tool(&self) -> String {
        join_phrase(&self.action_identifier, &self.action_object)
    }

    /// True if the action is one of the given verbs.
    pub fn is_any(&self, verbs: &[&str]) -> bool {
        verbs.contains(&self.action.as_str())
    }
}

fn join_phrase(qualifier: &str, noun: &str) -> String {
    format!("{qualifier} {noun}").trim().to_string()
}

/// Map a verb onto its canonical class, or return it unchanged.
pub fn canonical_verb(verb: &str) -> &str {
    CANONICAL_VERBS.get(verb).copied().unwrap_or(verb)
}

/// Every verb the parser knows, canonical forms and synonyms alike.
pub fn known_verbs() -> impl Iterator<Item = &'static str> {
    VERB_CLASSES.iter().flat_map(|(_, synonyms)| synonyms.iter().copied())
}

/// Noun phrase being filled while scanning.
#[derive(Debug, Default)]
struct Phrase {
    noun: String,
    qualifier: String,
    words: usize,
}

impl Phrase {
    /// Returns false once the phrase is full and the word was not used.
    fn push(&mut self, word: &str) -> bool {
        match self.words {
            0 => self.noun = word.to_string(),
            // second noun word demotes the first to a qualifier
            1 => self.qualifier = std::mem::replace(&mut self.noun, word.to_string()),
            _ => return false,
        }
        self.words += 1;
        true
    }
}

/// Parses an input line into a [`Command`]. Never fails; empty input gives an empty command.
pub fn parse_command(sentence: &str) -> Command {
    let trimmed = sentence.trim().trim_end_matches(['.', '?', '!']);
    let words = trimmed
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()));

    let mut raw_action = String::new();
    let mut primary = Phrase::default();
    let mut tool: Option<Phrase> = None;

    for word in words {
        if word == "and" {
            break;
        }
        if word == "with" {
            if tool.is_some() {
                break;
            }
            tool = Some(Phrase::default());
            continue;
        }
        if raw_action.is_empty() {
            raw_action = word;
            continue;
        }
        match tool.as_mut() {
            Some(phrase) => {
                // a full tool phrase ends the sentence
                if !phrase.push(&word) || phrase.words == 2 {
                    break;
                }
            },
            None => {
                primary.push(&word);
            },
        }
    }

    let tool = tool.unwrap_or_default();
    Command {
        sentence: sentence.to_string(),
        action: canonical_verb(&raw_action).to_string(),
        raw_action,
        object: primary.noun,
        identifier: primary.qualifier,
        action_object: tool.noun,
        action_identifier: tool.qualifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_verb_has_no_object() {
        let cmd = parse_command("open");
        assert_eq!(cmd.action, "open");
        assert!(cmd.object.is_empty());
        assert!(cmd.identifier.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_command() {
        let cmd = parse_command("");
        assert_eq!(cmd, Command::default());
        let cmd = parse_command("   ?! ");
        assert!(cmd.raw_action.is_empty());
        assert!(cmd.action.is_empty());
    }

    #[test]
    fn articles_are_dropped() {
        let cmd = parse_command("open the door");
        assert_eq!(cmd.action, "open");
        assert_eq!(cmd.object, "door");
        assert!(cmd.identifier.is_empty());
    }

    #[test]
    fn second_noun_word_becomes_object() {
        let cmd = parse_command("open the blue door");
        assert_eq!(cmd.object, "door");
        assert_eq!(cmd.identifier, "blue");
        assert_eq!(cmd.described_object(), "blue door");
    }

    #[test]
    fn noun_phrase_is_truncated_after_two_words() {
        let cmd = parse_command("open the big blue door");
        assert_eq!(cmd.identifier, "big");
        assert_eq!(cmd.object, "blue");
    }

    #[test]
    fn every_synonym_maps_to_its_class() {
        for (canonical, synonyms) in VERB_CLASSES {
            for synonym in *synonyms {
                let cmd = parse_command(&format!("{synonym} thing"));
                assert_eq!(cmd.action, *canonical, "synonym {synonym}");
                assert_eq!(cmd.raw_action, *synonym);
            }
        }
    }

    #[test]
    fn travel_north_goes() {
        let cmd = parse_command("travel north");
        assert_eq!(cmd.raw_action, "travel");
        assert_eq!(cmd.action, "go");
        assert_eq!(cmd.object, "north");
    }

    #[test]
    fn unknown_verbs_pass_through() {
        let cmd = parse_command("Mellon");
        assert_eq!(cmd.action, "mellon");
        let cmd = parse_command("kick the blue door!");
        assert_eq!(cmd.action, "kick");
        assert_eq!(cmd.described_object(), "blue door");
    }

    #[test]
    fn with_clause_names_the_tool() {
        let cmd = parse_command("unlock the red lock with the blue key");
        assert_eq!(cmd.action, "unlock");
        assert_eq!(cmd.object, "lock");
        assert_eq!(cmd.identifier, "red");
        assert_eq!(cmd.action_object, "key");
        assert_eq!(cmd.action_identifier, "blue");
        assert_eq!(cmd.described_tool(), "blue key");
    }

    #[test]
    fn with_clause_single_words() {
        let cmd = parse_command("unlock door with key");
        assert_eq!(cmd.object, "door");
        assert_eq!(cmd.action_object, "key");
        assert!(cmd.action_identifier.is_empty());
    }

    #[test]
    fn with_and_no_target() {
        let cmd = parse_command("unlock with the blue key");
        assert!(cmd.object.is_empty());
        assert_eq!(cmd.described_tool(), "blue key");
    }

    #[test]
    fn scanning_stops_after_full_tool_phrase() {
        let cmd = parse_command("unlock the door with the blue key please now");
        assert_eq!(cmd.described_tool(), "blue key");
        assert_eq!(cmd.object, "door");
    }

    #[test]
    fn and_ends_the_command() {
        let cmd = parse_command("go north and take the key");
        assert_eq!(cmd.action, "go");
        assert_eq!(cmd.object, "north");
        assert!(cmd.identifier.is_empty());
    }

    #[test]
    fn terminal_punctuation_is_stripped() {
        assert_eq!(parse_command("look around.").object, "");
        assert_eq!(parse_command("go east?").object, "east");
        assert_eq!(parse_command("say mellon!!").object, "mellon");
    }

    #[test]
    fn email_survives_as_raw_action() {
        let cmd = parse_command("player@example.com");
        assert_eq!(cmd.raw_action, "player@example.com");
        assert_eq!(cmd.action, "player@example.com");
    }

    #[test]
    fn look_around_has_empty_object() {
        let cmd = parse_command("look around");
        assert_eq!(cmd.action, "look");
        assert!(cmd.object.is_empty());
    }

    #[test]
    fn parsing_is_deterministic() {
        let line = "Unlock the RED door with the blue key.";
        assert_eq!(parse_command(line), parse_command(line));
        assert_eq!(parse_command(line).sentence, line);
    }
}
