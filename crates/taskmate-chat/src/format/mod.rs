//! Post-processing of raw model completions.
//!
//! A reply goes through three stages: marker stripping, code fencing and
//! segment splitting. Every stage is a pure function over `&str`.

pub mod code;
pub mod fence;
pub mod markers;
pub mod split;

pub use code::{detect_language, looks_like_code};
pub use fence::wrap_code;
pub use markers::strip_markers;
pub use split::{split_segments, Segments, DEFAULT_MAX_LENGTH};

/// Triple-backtick code fence delimiter
pub const FENCE: &str = "```";

/// A completion after all formatting stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedReply {
    /// Cleaned and fenced text, before splitting
    pub text: String,
    /// Ordered, render-ready message segments
    pub segments: Vec<String>,
}

/// Run a raw completion through the full pipeline
pub fn format_reply(raw: &str, max_length: usize) -> FormattedReply {
    let cleaned = strip_markers(raw);
    let text = wrap_code(&cleaned);
    let segments = split_segments(&text, max_length);
    FormattedReply { text, segments }
}
