//! Operator dialogs
//!
//! Text prompts and yes/no confirmations go through [`UserPrompt`] so the
//! station can run against a terminal or a scripted test double.

use crate::terminal::{LineEditor, LineRead};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

pub trait UserPrompt: Send {
    /// Ask for a line of text; `None` means the operator cancelled
    fn ask_text(&mut self, message: &str) -> Option<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt on the interactive terminal
///
/// Esc or Ctrl-C cancels a question.
pub struct TerminalPrompt {
    editor: LineEditor,
    output: Box<dyn Write + Send>,
}

impl TerminalPrompt {
    pub fn stdio() -> Self {
        Self {
            editor: LineEditor::default(),
            output: Box::new(io::stdout()),
        }
    }

    fn read_answer(&mut self, message: &str) -> Option<String> {
        match self.editor.read_line(&format!("{} ", message), &mut self.output) {
            Ok(LineRead::Line(answer)) => Some(answer),
            Ok(LineRead::Cancelled | LineRead::Closed) => None,
            Err(e) => {
                warn!(error = %e, "Prompt input failed");
                None
            }
        }
    }
}

/// Whether an answer to a yes/no question means yes
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl UserPrompt for TerminalPrompt {
    fn ask_text(&mut self, message: &str) -> Option<String> {
        self.read_answer(message)
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.read_answer(&format!("{} [y/N]", message))
            .is_some_and(|a| is_yes(&a))
    }
}

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<Option<String>>,
    confirmations: VecDeque<bool>,
    asked: Vec<String>,
}

/// Prompt that replays queued answers and records every question
///
/// Clones share the script. Unscripted text prompts cancel and unscripted
/// confirmations decline.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    script: Arc<Mutex<Script>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, text: impl Into<String>) -> Self {
        self.with_script(|s| s.answers.push_back(Some(text.into())));
        self
    }

    pub fn cancel(self) -> Self {
        self.with_script(|s| s.answers.push_back(None));
        self
    }

    pub fn confirm_with(self, yes: bool) -> Self {
        self.with_script(|s| s.confirmations.push_back(yes));
        self
    }

    /// Every message shown so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.with_script(|s| s.asked.clone())
    }

    fn with_script<T>(&self, f: impl FnOnce(&mut Script) -> T) -> T {
        // a panic elsewhere cannot leave the script half-written
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut script)
    }
}

impl UserPrompt for ScriptedPrompt {
    fn ask_text(&mut self, message: &str) -> Option<String> {
        self.with_script(|s| {
            s.asked.push(message.to_string());
            s.answers.pop_front().flatten()
        })
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.with_script(|s| {
            s.asked.push(message.to_string());
            s.confirmations.pop_front().unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        for answer in ["y", "Y", " yes ", "YES"] {
            assert!(is_yes(answer), "{:?}", answer);
        }
        for answer in ["", "n", "no", "yep", "1"] {
            assert!(!is_yes(answer), "{:?}", answer);
        }
    }

    #[test]
    fn test_scripted_prompt() {
        let prompt = ScriptedPrompt::new().answer("Razer").cancel().confirm_with(true);
        let mut p = prompt.clone();

        assert_eq!(p.ask_text("first").as_deref(), Some("Razer"));
        assert_eq!(p.ask_text("second"), None);
        assert_eq!(p.ask_text("third"), None);
        assert!(p.confirm("sure?"));
        assert!(!p.confirm("again?"));

        assert_eq!(prompt.asked(), ["first", "second", "third", "sure?", "again?"]);
    }

    #[test]
    fn test_scripted_prompt_survives_poisoning() {
        let prompt = ScriptedPrompt::new().answer("Makati").confirm_with(true);
        let script = prompt.script.clone();
        let _ = std::thread::spawn(move || {
            let _guard = script.lock().unwrap();
            panic!("poison the script");
        })
        .join();
        assert!(prompt.script.is_poisoned());

        let mut p = prompt.clone();
        assert_eq!(p.ask_text("Enter new branches:").as_deref(), Some("Makati"));
        assert!(p.confirm("Remove?"));
        assert_eq!(prompt.asked(), ["Enter new branches:", "Remove?"]);
    }
}
