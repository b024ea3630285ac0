//! Splitting of formatted replies into bounded message segments.
//!
//! The splitter walks an immutable input with a cursor and yields borrowed
//! slices. Fenced code blocks are atomic; prose is cut at the best boundary
//! that keeps each piece within `max_length` characters.

use super::FENCE;

/// Default segment length limit, in characters
pub const DEFAULT_MAX_LENGTH: usize = 4096;

/// Split `text` into owned segments. See [`Segments`].
pub fn split_segments(text: &str, max_length: usize) -> Vec<String> {
    Segments::new(text, max_length).map(str::to_string).collect()
}

/// Single-pass iterator over the segments of a reply.
///
/// Text before, between and after fenced blocks is treated as prose and split
/// by length. Each complete fenced block (delimiters included) is yielded
/// whole, whatever its size. An opening fence without a closing one turns the
/// whole remaining text into a single final segment. Empty segments are never
/// yielded.
///
/// Prose that fits within `max_length` is yielded verbatim. Longer prose,
/// including prose between fences, is cut into pieces trimmed at every cut,
/// so it loses its leading whitespace and the whitespace around each cut.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
    max_length: usize,
    prose: Option<ProseSplit<'a>>,
    block: Option<&'a str>,
}

impl<'a> Segments<'a> {
    pub fn new(text: &'a str, max_length: usize) -> Self {
        Self {
            rest: text,
            max_length: max_length.max(1),
            prose: None,
            block: None,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(prose) = self.prose.as_mut() {
                if let Some(segment) = prose.next() {
                    return Some(segment);
                }
                self.prose = None;
            }

            if let Some(block) = self.block.take() {
                return Some(block);
            }

            if self.rest.is_empty() {
                return None;
            }

            let rest = self.rest;
            let Some(open) = rest.find(FENCE) else {
                self.rest = "";
                self.prose = Some(ProseSplit::new(rest, self.max_length));
                continue;
            };

            let body_start = open + FENCE.len();
            let Some(close) = rest[body_start..].find(FENCE) else {
                // unterminated fence
                self.rest = "";
                return Some(rest);
            };

            let end = body_start + close + FENCE.len();
            self.block = Some(&rest[open..end]);
            self.rest = &rest[end..];
            if open > 0 {
                self.prose = Some(ProseSplit::new(&rest[..open], self.max_length));
            }
        }
    }
}

/// Length-bounded splitting of prose without fences
#[derive(Debug, Clone)]
struct ProseSplit<'a> {
    rest: &'a str,
    max_length: usize,
}

impl<'a> ProseSplit<'a> {
    fn new(text: &'a str, max_length: usize) -> Self {
        Self {
            rest: text,
            max_length,
        }
    }
}

impl<'a> Iterator for ProseSplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if self.rest.is_empty() {
                return None;
            }

            // Byte offset just past the first `max_length` chars, if the text is longer
            let Some(limit) = self.rest.char_indices().nth(self.max_length).map(|(i, _)| i) else {
                let last = self.rest;
                self.rest = "";
                return Some(last);
            };

            let cut = split_point(&self.rest[..limit]).unwrap_or(limit);
            let head = self.rest[..cut].trim();
            self.rest = self.rest[cut..].trim_start();

            if !head.is_empty() {
                return Some(head);
            }
        }
    }
}

/// Preferred cut inside `window`: after the last paragraph break, then the
/// last line break, then the last space.
fn split_point(window: &str) -> Option<usize> {
    window
        .rfind("\n\n")
        .map(|i| i + 2)
        .or_else(|| window.rfind('\n').map(|i| i + 1))
        .or_else(|| window.rfind(' ').map(|i| i + 1))
}
