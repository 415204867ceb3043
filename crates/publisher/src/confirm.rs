//! User confirmation gate.
//!
//! Every catalog mutation is gated behind a yes/no prompt. The gate is a
//! trait so automation can substitute [`AssumeYes`]; a decline is a value
//! the caller handles, never a process exit.

use std::io::{self, BufRead, Write};

/// Interactive decision points during an upload.
pub trait Confirm: Send + Sync {
    /// Ask a yes/no question.
    fn confirm(&self, message: &str) -> io::Result<bool>;

    /// Ask for a free-form value. `None` means the gate cannot prompt
    /// (non-interactive policy) and the caller must treat the value as
    /// unavailable.
    fn prompt_value(&self, message: &str) -> io::Result<Option<String>>;
}

/// Prompt on stdin, re-asking until the answer is recognizable.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        loop {
            print!("{} (y/n) ", message);
            io::stdout().flush()?;

            let mut answer = String::new();
            stdin.lock().read_line(&mut answer)?;

            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Unrecognized answer, please use y, yes, n or no"),
            }
        }
    }

    fn prompt_value(&self, message: &str) -> io::Result<Option<String>> {
        print!("{}: ", message);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;

        let trimmed = answer.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Non-interactive policy: every creation is approved, no value prompts.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> io::Result<bool> {
        Ok(true)
    }

    fn prompt_value(&self, _message: &str) -> io::Result<Option<String>> {
        Ok(None)
    }
}
