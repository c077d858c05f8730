//! Terminal line editing
//!
//! Lines are edited in raw mode with [`tui_input::Input`], so arrows, Home/End
//! and word deletion work, and Up/Down walk through earlier commands.

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, Write};
use tracing::warn;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

/// Result of reading one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    Line(String),
    /// Esc or Ctrl-C
    Cancelled,
    /// Ctrl-D on an empty line
    Closed,
}

/// Where the command loop gets its lines from
pub trait LineSource {
    /// Next line, or `None` once input is closed
    fn next_line(&mut self, prompt: &str) -> Option<String>;
}

impl<I: Iterator<Item = String>> LineSource for I {
    fn next_line(&mut self, _prompt: &str) -> Option<String> {
        self.next()
    }
}

/// Leaves raw mode when dropped
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(error = %e, "Failed to leave raw mode");
        }
    }
}

#[derive(Debug, Default)]
pub struct LineEditor {
    input: Input,
    history: Vec<String>,
    /// Index into `history` while recalling; `None` on a fresh line
    recall: Option<usize>,
    keep_history: bool,
}

impl LineEditor {
    /// Editor that remembers submitted lines
    pub fn with_history() -> Self {
        Self {
            keep_history: true,
            ..Self::default()
        }
    }

    /// Text currently being edited
    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Apply one key; `None` while the line is still being edited
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<LineRead> {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter => {
                let line = self.input.value().to_string();
                self.finish();
                if self.keep_history
                    && !line.trim().is_empty()
                    && self.history.last() != Some(&line)
                {
                    self.history.push(line.clone());
                }
                Some(LineRead::Line(line))
            }
            KeyCode::Esc => {
                self.finish();
                Some(LineRead::Cancelled)
            }
            KeyCode::Char('c') if ctrl => {
                self.finish();
                Some(LineRead::Cancelled)
            }
            KeyCode::Char('d') if ctrl && self.input.value().is_empty() => {
                self.finish();
                Some(LineRead::Closed)
            }
            KeyCode::Up => {
                self.recall_older();
                None
            }
            KeyCode::Down => {
                self.recall_newer();
                None
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                None
            }
        }
    }

    fn finish(&mut self) {
        self.input.reset();
        self.recall = None;
    }

    fn recall_older(&mut self) {
        let idx = match self.recall {
            None if self.history.is_empty() => return,
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.recall = Some(idx);
        self.input = Input::new(self.history[idx].clone());
    }

    fn recall_newer(&mut self) {
        match self.recall {
            Some(i) if i + 1 < self.history.len() => {
                self.recall = Some(i + 1);
                self.input = Input::new(self.history[i + 1].clone());
            }
            Some(_) => {
                self.recall = None;
                self.input.reset();
            }
            None => {}
        }
    }

    fn redraw(&self, prompt: &str, out: &mut impl Write) -> io::Result<()> {
        let column = prompt.chars().count() + self.input.visual_cursor();
        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(prompt),
            Print(self.input.value()),
            MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)),
        )?;
        out.flush()
    }

    /// Read one line from the terminal, echoing to `out`
    pub fn read_line(&mut self, prompt: &str, out: &mut impl Write) -> io::Result<LineRead> {
        let _raw = RawMode::enable()?;
        self.redraw(prompt, out)?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match self.handle_key(key) {
                None => self.redraw(prompt, out)?,
                Some(read) => {
                    execute!(out, Print("\r\n"))?;
                    return Ok(read);
                }
            }
        }
    }
}

/// Command lines typed at the terminal
pub struct TerminalLines {
    editor: LineEditor,
    output: io::Stdout,
}

impl TerminalLines {
    pub fn stdio() -> Self {
        Self {
            editor: LineEditor::with_history(),
            output: io::stdout(),
        }
    }
}

impl LineSource for TerminalLines {
    fn next_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.read_line(prompt, &mut self.output) {
            Ok(LineRead::Line(line)) => Some(line),
            // an abandoned line is an empty command
            Ok(LineRead::Cancelled) => Some(String::new()),
            Ok(LineRead::Closed) => None,
            Err(e) => {
                warn!(error = %e, "Terminal input failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(editor: &mut LineEditor, text: &str) {
        for c in text.chars() {
            assert_eq!(editor.handle_key(key(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn test_edit_and_submit() {
        let mut editor = LineEditor::default();
        type_text(&mut editor, "Cebu");
        editor.handle_key(key(KeyCode::Left));
        editor.handle_key(key(KeyCode::Left));
        type_text(&mut editor, "x");
        editor.handle_key(key(KeyCode::End));
        editor.handle_key(key(KeyCode::Backspace));
        assert_eq!(editor.value(), "Cexb");

        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            Some(LineRead::Line("Cexb".into()))
        );
        assert_eq!(editor.value(), "");
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_cancel_and_close() {
        let mut editor = LineEditor::default();
        type_text(&mut editor, "Ram");
        assert_eq!(editor.handle_key(ctrl('d')), None);
        assert_eq!(editor.handle_key(key(KeyCode::Esc)), Some(LineRead::Cancelled));
        assert_eq!(editor.value(), "");

        type_text(&mut editor, "x");
        assert_eq!(editor.handle_key(ctrl('c')), Some(LineRead::Cancelled));
        assert_eq!(editor.handle_key(ctrl('d')), Some(LineRead::Closed));
    }

    #[test]
    fn test_history_recall() {
        let mut editor = LineEditor::with_history();
        for line in ["branch Cebu", "type Ram", "type Ram", "   "] {
            type_text(&mut editor, line);
            editor.handle_key(key(KeyCode::Enter));
        }
        assert_eq!(editor.history(), ["branch Cebu", "type Ram"]);

        editor.handle_key(key(KeyCode::Up));
        assert_eq!(editor.value(), "type Ram");
        editor.handle_key(key(KeyCode::Up));
        editor.handle_key(key(KeyCode::Up));
        assert_eq!(editor.value(), "branch Cebu");
        editor.handle_key(key(KeyCode::Down));
        assert_eq!(editor.value(), "type Ram");
        editor.handle_key(key(KeyCode::Down));
        assert_eq!(editor.value(), "");
    }

    #[test]
    fn test_iterator_is_a_line_source() {
        let mut lines = vec!["list".to_string()].into_iter();
        assert_eq!(lines.next_line("> ").as_deref(), Some("list"));
        assert_eq!(lines.next_line("> "), None);
    }
}
