//! Session state machine: which screen is showing and what is being edited.
//!
//! ```text
//!   Calendar --select_date(d)--> Editor(d)
//!   Editor(d) --save-->          Calendar   (yields the record to store)
//!   Editor(d) --back-->          Calendar   (buffer discarded)
//!   Calendar <--toggle_mode-->   QuickCalculator
//! ```
//!
//! Only one editor can be open. Mode changes are refused while editing.

use std::fmt;

use crate::date_key::DateKey;
use crate::error::SessionError;
use crate::record::{DailyRecord, SalaryInputs};

/// Top-level mode when no day is being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Log,
    Quick,
}

/// What the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Calendar,
    Editor(DateKey),
    QuickCalculator,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Calendar => f.write_str("calendar"),
            Screen::Editor(date) => write!(f, "editor ({date})"),
            Screen::QuickCalculator => f.write_str("quick calculator"),
        }
    }
}

/// An open single-day editor and its unsaved buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    pub date: DateKey,
    pub buffer: SalaryInputs,
}

impl Editor {
    /// Live total for the current buffer.
    #[must_use]
    pub fn preview_total(&self) -> i64 {
        self.buffer.total()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    mode: Mode,
    editor: Option<Editor>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        match (&self.editor, self.mode) {
            (Some(editor), _) => Screen::Editor(editor.date),
            (None, Mode::Log) => Screen::Calendar,
            (None, Mode::Quick) => Screen::QuickCalculator,
        }
    }

    /// Open the editor for `date` with `seed` as its buffer.
    ///
    /// # Errors
    ///
    /// Refused unless the calendar is showing.
    pub fn select_date(&mut self, date: DateKey, seed: SalaryInputs) -> Result<(), SessionError> {
        self.require(Screen::Calendar, "select a date")?;
        tracing::debug!(%date, "opening editor");
        self.editor = Some(Editor { date, buffer: seed });
        Ok(())
    }

    /// Mutable access to the open editor's buffer.
    ///
    /// # Errors
    ///
    /// Refused when no editor is open.
    pub fn buffer_mut(&mut self) -> Result<&mut SalaryInputs, SessionError> {
        let screen = self.screen();
        self.editor
            .as_mut()
            .map(|e| &mut e.buffer)
            .ok_or(SessionError::InvalidTransition {
                action: "edit",
                screen,
            })
    }

    /// Close the editor and hand back the record built from its buffer.
    ///
    /// # Errors
    ///
    /// Refused when no editor is open.
    pub fn save(&mut self) -> Result<(DateKey, DailyRecord), SessionError> {
        let screen = self.screen();
        let editor = self.editor.take().ok_or(SessionError::InvalidTransition {
            action: "save",
            screen,
        })?;
        Ok((editor.date, DailyRecord::from_inputs(editor.buffer)))
    }

    /// Close the editor without saving.
    ///
    /// # Errors
    ///
    /// Refused when no editor is open.
    pub fn back(&mut self) -> Result<(), SessionError> {
        let screen = self.screen();
        match self.editor.take() {
            Some(editor) => {
                tracing::debug!(date = %editor.date, "discarding editor buffer");
                Ok(())
            }
            None => Err(SessionError::InvalidTransition {
                action: "go back",
                screen,
            }),
        }
    }

    /// # Errors
    ///
    /// Refused while an editor is open.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), SessionError> {
        if self.editor.is_some() {
            return Err(SessionError::InvalidTransition {
                action: "switch mode",
                screen: self.screen(),
            });
        }
        self.mode = mode;
        Ok(())
    }

    /// # Errors
    ///
    /// Refused while an editor is open.
    pub fn toggle_mode(&mut self) -> Result<Mode, SessionError> {
        let next = match self.mode {
            Mode::Log => Mode::Quick,
            Mode::Quick => Mode::Log,
        };
        self.set_mode(next)?;
        Ok(next)
    }

    fn require(&self, expected: Screen, action: &'static str) -> Result<(), SessionError> {
        let screen = self.screen();
        if screen == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition { action, screen })
        }
    }
}
