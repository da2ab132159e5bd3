//! Colored one-line status messages for the user.
//! Diagnostics go through `tracing`; these are for outcomes.

use crate::utils::colors::{BLUE, BOLD, GREEN, RED, RESET, YELLOW};
use std::fmt::Display;

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => (BLUE, "ℹ️"),
            Level::Success => (GREEN, "✅"),
            Level::Warning => (YELLOW, "⚠️"),
            Level::Error => (RED, "❌"),
        }
    }
}

fn line(level: Level, msg: impl Display) -> String {
    let (color, icon) = level.style();
    format!("{color}{BOLD}{icon}{RESET} {msg}")
}

pub fn info<T: Display>(msg: T) {
    println!("{}", line(Level::Info, msg));
}

pub fn success<T: Display>(msg: T) {
    println!("{}", line(Level::Success, msg));
}

/// Refused or partial outcomes that are not failures (exit status stays 0).
pub fn warning<T: Display>(msg: T) {
    println!("{}", line(Level::Warning, msg));
}

pub fn error<T: Display>(msg: T) {
    eprintln!("{}", line(Level::Error, msg));
}

/// `No <what> found.` for an empty listing.
pub fn empty_list(what: &str) {
    info(format!("No {what} found."));
}

/// Section title printed above a listing.
pub fn header<T: Display>(msg: T) {
    println!("{BLUE}{BOLD}{msg}{RESET}");
}
