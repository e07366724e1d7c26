// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! `[OK]` / `[ERR]` status lines.

use console::style;

const ARROW: &str = "->";

/// `[OK] action -> target (note)`; target and note are optional.
pub fn format_success(action: &str, target: Option<&str>, note: Option<&str>) -> String {
    let mut line = format!("[OK] {}", action);
    if let Some(target) = target.filter(|t| !t.is_empty()) {
        line.push_str(&format!(" {} {}", ARROW, target));
    }
    if let Some(note) = note.filter(|n| !n.is_empty()) {
        line.push_str(&format!(" ({})", note));
    }
    line
}

/// `[ERR] action -> target`; target is optional.
pub fn format_error(action: &str, target: Option<&str>) -> String {
    match target.filter(|t| !t.is_empty()) {
        Some(target) => format!("[ERR] {} {} {}", action, ARROW, target),
        None => format!("[ERR] {}", action),
    }
}

/// Print a success line to stdout.
pub fn show_success(action: &str, target: Option<&str>, note: Option<&str>) {
    println!("{}", style(format_success(action, target, note)).green());
}

/// Print an error line, then the raw message, to stderr.
pub fn show_error(action: &str, target: Option<&str>, message: &str) {
    eprintln!("{}", style(format_error(action, target)).red().for_stderr());
    if !message.is_empty() {
        eprintln!("{}", style(message).red().for_stderr());
    }
}
