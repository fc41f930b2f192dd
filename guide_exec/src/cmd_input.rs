//! # Console command input
//!
//! Line-oriented console input for mode and drive tokens. Reading is the foreground loop's only
//! suspension point outside of goal pursuit: the session blocks here awaiting the next token
//! while the obstacle monitor keeps updating in the background.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::warn;
use rustyline::{error::ReadlineError, DefaultEditor};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Console input source for the guide manager.
pub struct CmdInput {
    editor: DefaultEditor,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum CmdInputError {
    #[error("Could not initialise the console editor: {0}")]
    InitError(ReadlineError),

    #[error("Console read error: {0}")]
    ReadError(ReadlineError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CmdInput {
    /// Create a new console input source.
    pub fn new() -> Result<Self, CmdInputError> {
        let editor = DefaultEditor::new().map_err(CmdInputError::InitError)?;

        Ok(Self { editor })
    }

    /// Read one line from the console.
    ///
    /// `None` indicates the input has closed: end of input (Ctrl-D) or an interrupt (Ctrl-C).
    /// Interrupts outside of a mode switch are treated as process termination.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CmdInputError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(CmdInputError::ReadError(e)),
        }
    }

    /// Read the next command token: the first non-whitespace character of the next non-empty
    /// line.
    pub fn read_token(&mut self, prompt: &str) -> Result<Option<char>, CmdInputError> {
        loop {
            match self.read_line(prompt)? {
                Some(line) => {
                    if let Some(token) = line.trim().chars().next() {
                        return Ok(Some(token));
                    }
                    // Empty line, prompt again
                }
                None => return Ok(None),
            }
        }
    }

    /// Read a coordinate value, re-prompting until the line parses as a number.
    pub fn read_f64(&mut self, prompt: &str) -> Result<Option<f64>, CmdInputError> {
        loop {
            match self.read_line(prompt)? {
                Some(line) => match line.trim().parse::<f64>() {
                    Ok(value) => return Ok(Some(value)),
                    Err(_) => warn!("\"{}\" is not a number", line.trim()),
                },
                None => return Ok(None),
            }
        }
    }
}
