//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Colored console messages
//! - This module - Interactive prompts and user input handling

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

pub use formatter::{account_summary, display_error, display_status, display_success};

/// Source of interactive answers.
pub trait Prompt {
    /// Show `prompt` and return the answer without its line terminator.
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers from standard input.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input on stdin").into());
        }

        Ok(strip_line_ending(&input).to_string())
    }
}

/// Answers from a fixed list, read back like typed lines; records the prompts
/// it was shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompt {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        let answer = self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })?;
        Ok(strip_line_ending(&answer).to_string())
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
