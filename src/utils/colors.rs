//! ANSI color helper utilities for terminal output.
use crate::models::task_state::TaskState;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Complete → green, pending → yellow.
pub fn color_for_state(state: TaskState) -> &'static str {
    if state.is_complete() { GREEN } else { YELLOW }
}

pub fn colorize_state(state: TaskState) -> String {
    format!("{}{}{}", color_for_state(state), state.to_db_str(), RESET)
}
