use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Severity-tagged output. Every component prints through these so each
/// error line carries its tag and the subject it concerns.
pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}[INFO]{} {}", FG_BLUE, BOLD, RESET, msg);
}

pub fn warn<T: fmt::Display>(msg: T) {
    println!("{}{}[WARN]{} {}", FG_YELLOW, BOLD, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}[ERROR]{} {}", FG_RED, BOLD, RESET, msg);
}
