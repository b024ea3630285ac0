use super::code::{detect_language, looks_like_code};
use super::FENCE;

/// Fallback tag for code whose language could not be guessed
const GENERIC_LANGUAGE: &str = "text";

/// Wrap unfenced code in a tagged code fence.
///
/// Text that already contains a fence, or that does not look like code, is
/// returned unchanged. That makes the wrapper idempotent.
pub fn wrap_code(text: &str) -> String {
    if text.contains(FENCE) || !looks_like_code(text) {
        return text.to_string();
    }

    let lang = detect_language(text).unwrap_or(GENERIC_LANGUAGE);
    format!("{FENCE}{lang}\n{text}\n{FENCE}")
}
