// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message preview box.

use crate::config::UiConfig;
use console::measure_text_width;

/// Columns kept free between the box and the terminal edge.
const TERMINAL_MARGIN: usize = 4;

/// Wrap width for a terminal `term_width` columns wide.
pub fn box_width(term_width: usize, ui: &UiConfig) -> usize {
    term_width
        .saturating_sub(TERMINAL_MARGIN)
        .clamp(ui.box_min_width, ui.box_max_width)
}

/// Render `message` inside an ASCII box sized for the terminal.
///
/// Lines are word-wrapped to the box width and blank lines are kept, so the
/// header/body separation survives.
pub fn boxed_lines(message: &str, term_width: usize, ui: &UiConfig) -> Vec<String> {
    let width = box_width(term_width, ui).max(1);
    let mut lines: Vec<String> = message
        .trim_end_matches('\n')
        .split('\n')
        .flat_map(|line| wrap_line(line.trim_end(), width))
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }

    let inner = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0);
    let pad = " ".repeat(ui.box_padding);
    let border = format!("+{}+", "-".repeat(inner + ui.box_padding * 2));

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(border.clone());
    for line in &lines {
        let fill = " ".repeat(inner - measure_text_width(line));
        out.push(format!("|{}{}{}{}|", pad, line, fill, pad));
    }
    out.push(border);
    out
}

/// Greedy word wrap; words longer than `width` are split.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in line.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let word_width = measure_text_width(&word);
            let needed = if current.is_empty() { word_width } else { current_width + 1 + word_width };

            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&word);
                current_width = needed;
                break;
            }

            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
                current_width = 0;
                continue;
            }

            // A single word wider than the box.
            let head: String = word.chars().take(width).collect();
            let tail: String = word.chars().skip(width).collect();
            wrapped.push(head);
            word = tail;
            if word.is_empty() {
                break;
            }
        }
    }

    if !current.is_empty() || wrapped.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui() -> UiConfig {
        UiConfig::default()
    }

    #[test]
    fn test_box_width_is_clamped() {
        assert_eq!(box_width(80, &ui()), 76);
        assert_eq!(box_width(5, &ui()), 10);
        assert_eq!(box_width(400, &ui()), 110);
    }

    #[test]
    fn test_box_shape() {
        let lines = boxed_lines("feat(api): add endpoint\n", 80, &ui());
        assert_eq!(
            lines,
            vec![
                "+-------------------------+".to_string(),
                "| feat(api): add endpoint |".to_string(),
                "+-------------------------+".to_string(),
            ]
        );
    }

    #[test]
    fn test_blank_line_between_header_and_body_is_kept() {
        let lines = boxed_lines("fix: x\n\nbody text\n", 80, &ui());
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "|           |");
        assert_eq!(lines[3], "| body text |");
    }

    #[test]
    fn test_long_lines_wrap_to_terminal() {
        let message = "word ".repeat(40);
        let lines = boxed_lines(&message, 30, &ui());
        for line in &lines {
            assert!(line.chars().count() <= 30, "{:?} is too wide", line);
        }
        assert!(lines.len() > 3);
    }

    #[test]
    fn test_overlong_word_is_split() {
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("", 4), vec![""]);
    }
}
