use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{AppError, AppResult};

/// Operator decision after an interrupt was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptDecision {
    Continue,
    Abort,
}

/// Interactive input source for prompts and menu selections.
///
/// Generic over the reader so tests can drive prompts from a `Cursor`
/// exactly like an operator would from stdin. EOF and interrupts surface
/// as `AppError::Eof` / `AppError::Interrupted` and are handled at the
/// loop boundary.
pub struct Console<R: BufRead> {
    input: R,
    interrupted: Arc<AtomicBool>,
}

impl Console<io::StdinLock<'static>> {
    pub fn stdin(interrupted: Arc<AtomicBool>) -> Self {
        Console {
            input: io::stdin().lock(),
            interrupted,
        }
    }
}

impl<R: BufRead> Console<R> {
    pub fn new(input: R, interrupted: Arc<AtomicBool>) -> Self {
        Console { input, interrupted }
    }

    /// True when an interrupt arrived since the last check; clears the flag.
    pub fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }

    fn read_trimmed(&mut self, prompt: &str) -> AppResult<String> {
        print!("{prompt}");
        io::stdout().flush().ok();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(AppError::Eof),
            Ok(_) => {
                if self.take_interrupt() {
                    return Err(AppError::Interrupted);
                }
                Ok(line.trim().to_string())
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(AppError::Interrupted),
            Err(e) => Err(e.into()),
        }
    }

    /// General prompt with optional default.
    pub fn ask(&mut self, prompt: &str, default: &str) -> AppResult<String> {
        let shown = if default.is_empty() {
            format!("{prompt}: ")
        } else {
            format!("{prompt} [{default}]: ")
        };
        let resp = self.read_trimmed(&shown)?;
        Ok(if resp.is_empty() {
            default.to_string()
        } else {
            resp
        })
    }

    /// Prompt for an integer with default fallback on invalid input.
    pub fn ask_int(&mut self, prompt: &str, default: i64) -> AppResult<i64> {
        let resp = self.read_trimmed(&format!("{prompt} (default={default}): "))?;
        if resp.is_empty() {
            return Ok(default);
        }
        match resp.parse::<i64>() {
            Ok(n) => Ok(n),
            Err(_) => {
                println!("Invalid integer '{resp}', using {default}.");
                Ok(default)
            }
        }
    }

    /// Prompt for a single-char flag within an allowed set.
    pub fn ask_flag(&mut self, prompt: &str, allowed: &[char], default: char) -> AppResult<char> {
        let choices: String = allowed
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("|");
        loop {
            let resp = self
                .read_trimmed(&format!("{prompt} [{choices}, default={default}]: "))?
                .to_lowercase();
            let c = resp.chars().next().unwrap_or(default);
            if resp.chars().count() <= 1 && allowed.contains(&c) {
                return Ok(c);
            }
            println!("Please enter one of [{choices}].");
        }
    }

    /// Prompt for a CSV of numeric ids. Non-numeric tokens are dropped.
    pub fn ask_ids(&mut self, prompt: &str) -> AppResult<Vec<u64>> {
        let raw = self.read_trimmed(&format!("{prompt}: "))?;
        Ok(ids_from_csv(&raw))
    }

    /// Prompt for a CSV of ids kept as raw strings (unlisted/fanbox ids).
    pub fn ask_ids_str(&mut self, prompt: &str) -> AppResult<Vec<String>> {
        let raw = self.read_trimmed(&format!("{prompt}: "))?;
        Ok(str_ids_from_csv(&raw))
    }

    /// Read one menu selection line.
    pub fn read_selection(&mut self) -> AppResult<String> {
        self.read_trimmed("Input: ")
    }

    /// Ask the operator whether to continue after an interrupt.
    pub fn confirm_interrupt(&mut self) -> AppResult<InterruptDecision> {
        match self.ask_flag("Interrupted. Continue?", &['y', 'n'], 'y')? {
            'y' => Ok(InterruptDecision::Continue),
            _ => Ok(InterruptDecision::Abort),
        }
    }
}

/// Split a comma/space separated list into numeric ids, dropping anything
/// that does not parse.
pub fn ids_from_csv(raw: &str) -> Vec<u64> {
    raw.split([',', ' ', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<u64>().ok())
        .collect()
}

/// Same splitting, but keep the tokens as strings.
pub fn str_ids_from_csv(raw: &str) -> Vec<String> {
    raw.split([',', ' ', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
