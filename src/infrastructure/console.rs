//! Line-oriented console used by the interactive menus.
//!
//! Generic over reader and writer so menus can be driven from memory.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::domain::{AppError, Result};

/// Prompt/response console over any buffered input and output.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn line(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").map_err(|e| AppError::io("Failed to write to console", e))
    }

    /// Print a prompt and read the answer, trimmed.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")
            .and_then(|()| self.output.flush())
            .map_err(|e| AppError::io("Failed to write to console", e))?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| AppError::io("Failed to read from console", e))?;

        if read == 0 {
            // Keep the transcript readable when input ends mid-prompt.
            writeln!(self.output).map_err(|e| AppError::io("Failed to write to console", e))?;
            return Ok(None);
        }

        Ok(Some(answer.trim().to_string()))
    }

    /// Release the writer, for inspecting captured output.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
