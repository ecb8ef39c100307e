//! User interaction - alerts, confirmations and prompts
//!
//! Mutators that need an answer from the user (a confirmation before a
//! destructive action, an amount typed into a prompt) receive an
//! `Interaction` explicitly instead of reaching for global dialogs.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Blocking dialogs offered by the view layer
pub trait Interaction {
    /// Show a message that needs no answer
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for free text; `None` when the user cancels
    fn prompt(&mut self, message: &str) -> Option<String>;
}

/// Dialogs on a terminal: messages on stderr, answers from stdin
pub struct ConsoleInteraction {
    assume_yes: bool,
}

impl ConsoleInteraction {
    /// `assume_yes` answers every confirmation with yes without asking
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Interaction for ConsoleInteraction {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", message);
        let _ = std::io::stderr().flush();
        matches!(
            self.read_line().map(|s| s.trim().to_ascii_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        eprint!("{} ", message);
        let _ = std::io::stderr().flush();
        self.read_line()
    }
}

/// Pre-recorded answers, for tests and non-interactive runs
///
/// Confirmations and prompts are answered from separate queues; an
/// exhausted queue answers "no" / cancel. Every message shown is recorded.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    confirms: VecDeque<bool>,
    answers: VecDeque<Option<String>>,
    pub alerts: Vec<String>,
    pub asked: Vec<String>,
}

impl ScriptedInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next confirmation
    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    /// Queue the answer to the next prompt
    pub fn answer(mut self, text: impl Into<String>) -> Self {
        self.answers.push_back(Some(text.into()));
        self
    }

    /// Queue a cancelled prompt
    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }
}

impl Interaction for ScriptedInteraction {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut ui = ScriptedInteraction::new()
            .confirm_with(true)
            .answer("12")
            .cancel();

        assert!(ui.confirm("Delete?"));
        assert!(!ui.confirm("Again?"));
        assert_eq!(ui.prompt("Amount").as_deref(), Some("12"));
        assert_eq!(ui.prompt("Amount"), None);
        assert_eq!(ui.prompt("Amount"), None);

        ui.alert("done");
        assert_eq!(ui.alerts, vec!["done"]);
        assert_eq!(ui.asked.len(), 5);
    }

    #[test]
    fn test_console_assume_yes() {
        let mut ui = ConsoleInteraction::new(true);
        assert!(ui.confirm("Delete this SIM?"));
    }
}
