/// Closing delimiter of a reasoning section emitted by thinking models
const THINK_CLOSE: &str = "</think>";

fn is_marker(c: char) -> bool {
    matches!(c, '*' | '-' | '#' | ' ')
}

/// Remove reasoning sections and leading bullet/heading markers.
///
/// Only the text after the last `</think>` is kept. Lines made only of
/// markers are dropped, other lines lose their leading markers, and blank
/// lines survive as paragraph breaks.
pub fn strip_markers(raw: &str) -> String {
    let text = match raw.rfind(THINK_CLOSE) {
        Some(idx) => raw[idx + THINK_CLOSE.len()..].trim(),
        None => raw,
    };

    let lines: Vec<&str> = text
        .split('\n')
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                Some("")
            } else if line.chars().all(is_marker) {
                None
            } else {
                Some(line.trim_start_matches(is_marker))
            }
        })
        .collect();

    lines.join("\n").trim().to_string()
}
