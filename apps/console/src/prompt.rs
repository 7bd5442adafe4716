//! # Prompts
//!
//! Line-oriented input over any `BufRead`/`Write` pair.
//!
//! ## Numeric Replies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ask_number / ask_amount                              │
//! │                                                                         │
//! │  "12"     ──► Reply::Value(12)                                         │
//! │  "-4"     ──► "Input must be a positive number."  ──► Reply::Negative  │
//! │  ""       ──► Reply::Blank       (only the *_or_keep variants)         │
//! │  "twelve" ──► "Invalid input. Please enter a valid number."            │
//! │               ──► ask again                                            │
//! │  <EOF>    ──► Err(ConsoleError::EndOfInput)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers decide what `Negative` and `Blank` mean: most flows abort on
//! `Negative`, the update flow keeps the current value for both.

use std::fmt::Display;
use std::io::{BufRead, Write};

use stockroom_core::validation::{parse_amount, parse_whole_number, ValidationResult};
use stockroom_core::Money;

use crate::error::{ConsoleError, ConsoleResult};

/// Outcome of a numeric prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<T> {
    /// A well-formed, non-negative value.
    Value(T),
    /// A well-formed value below zero.
    Negative,
    /// Nothing typed (only when blank replies are allowed).
    Blank,
}

impl<T> Reply<T> {
    /// Returns the value, or `current` for `Negative` and `Blank`.
    pub fn or_keep(self, current: T) -> T {
        match self {
            Reply::Value(value) => value,
            Reply::Negative | Reply::Blank => current,
        }
    }
}

/// Reads replies from `input` and writes prompts and messages to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Direct access to the output, for tables.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl Display) -> ConsoleResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Shows `prompt` and reads one line with the line ending removed.
    pub fn ask_line(&mut self, prompt: &str) -> ConsoleResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }

        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Asks for a whole number; blank replies re-prompt.
    pub fn ask_number(&mut self, prompt: &str) -> ConsoleResult<Reply<i64>> {
        self.ask_parsed(prompt, false, |s| parse_whole_number("number", s), |n| *n < 0)
    }

    /// Asks for a whole number; a blank reply yields `Reply::Blank`.
    pub fn ask_number_or_keep(&mut self, prompt: &str) -> ConsoleResult<Reply<i64>> {
        self.ask_parsed(prompt, true, |s| parse_whole_number("number", s), |n| *n < 0)
    }

    /// Asks for a money amount; blank replies re-prompt.
    pub fn ask_amount(&mut self, prompt: &str) -> ConsoleResult<Reply<Money>> {
        self.ask_parsed(prompt, false, |s| parse_amount("price", s), Money::is_negative)
    }

    /// Asks for a money amount; a blank reply yields `Reply::Blank`.
    pub fn ask_amount_or_keep(&mut self, prompt: &str) -> ConsoleResult<Reply<Money>> {
        self.ask_parsed(prompt, true, |s| parse_amount("price", s), Money::is_negative)
    }

    fn ask_parsed<T>(
        &mut self,
        prompt: &str,
        allow_blank: bool,
        parse: impl Fn(&str) -> ValidationResult<T>,
        is_negative: impl Fn(&T) -> bool,
    ) -> ConsoleResult<Reply<T>> {
        loop {
            let line = self.ask_line(prompt)?;

            if allow_blank && line.trim().is_empty() {
                return Ok(Reply::Blank);
            }

            match parse(&line) {
                Ok(value) if is_negative(&value) => {
                    self.say("Input must be a positive number.")?;
                    return Ok(Reply::Negative);
                }
                Ok(value) => return Ok(Reply::Value(value)),
                Err(_) => self.say("Invalid input. Please enter a valid number.")?,
            }
        }
    }
}
