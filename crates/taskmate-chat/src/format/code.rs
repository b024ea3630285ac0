//! Keyword heuristics for spotting unfenced source code.
//!
//! These are deliberately cheap substring checks, not parsers. False
//! positives and negatives are expected.

/// Line prefixes that mark a multi-line block as code
const CODE_LINE_PREFIXES: &[&str] = &[
    "public ",
    "private ",
    "def ",
    "function ",
    "class ",
    "import ",
    "#include",
];

/// Language signatures, checked in order. The first language with any
/// matching signature wins, so the order is part of the behavior.
const LANGUAGE_SIGNATURES: &[(&str, &[&str])] = &[
    ("java", &["public class", "import java.", "System.out.println", "@Override"]),
    ("python", &["import ", "def ", "print(", "lambda ", "if __name__"]),
    ("javascript", &["function ", "const ", "let ", "console.log", "=>"]),
    ("c++", &["#include", "using namespace", "std::", "cout <<"]),
    ("html", &["<!DOCTYPE", "<html>", "<div>", "<script"]),
    ("css", &["{", "}", "font-", "color:", "background:"]),
    ("sql", &["SELECT", "FROM", "WHERE", "JOIN"]),
    ("bash", &["#!/bin/bash", "#!/bin/sh", "chmod +x"]),
    ("dart", &["import ", "void main", "class ", "final ", "const "]),
];

/// Decide whether an unfenced block of text is source code
pub fn looks_like_code(text: &str) -> bool {
    if text.split('\n').count() > 3 {
        let has_code_line = text.split('\n').any(|line| {
            let line = line.trim();
            CODE_LINE_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
        });
        if has_code_line {
            return true;
        }
    }

    (text.contains(';') && text.contains('{') && text.contains('}'))
        || text.starts_with("#!/")
        || text.contains("def ")
        || text.contains("class ")
}

/// Guess a fence language tag, `None` when no signature matches
pub fn detect_language(text: &str) -> Option<&'static str> {
    LANGUAGE_SIGNATURES
        .iter()
        .find(|(_, signatures)| signatures.iter().any(|sig| text.contains(sig)))
        .map(|(lang, _)| *lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_makes_code() {
        assert!(looks_like_code("def f():\n    pass\n\nreturn 1"));
    }

    #[test]
    fn test_prose_is_not_code() {
        assert!(!looks_like_code("hello world"));
        assert!(!looks_like_code("Plan your day:\nwake up\nwork\nrest"));
    }

    #[test]
    fn test_keyword_line_needs_more_than_three_lines() {
        // "import " alone on a short text is not enough
        assert!(!looks_like_code("import this\nand that"));
        assert!(looks_like_code("a\nb\nc\n  import os"));
    }

    #[test]
    fn test_braces_and_semicolon() {
        assert!(looks_like_code("int main() { return 0; }"));
        assert!(!looks_like_code("{ just braces }"));
    }

    #[test]
    fn test_shebang() {
        assert!(looks_like_code("#!/usr/bin/env node"));
    }

    #[test]
    fn test_first_matching_language_wins() {
        assert_eq!(detect_language("import os\ndef f(): pass"), Some("python"));
        // dart also matches "import " but python comes first
        assert_eq!(detect_language("import 'package:x';\nvoid main() {}"), Some("python"));
        assert_eq!(
            detect_language("public class A { @Override void f() {} }"),
            Some("java")
        );
    }

    #[test]
    fn test_language_table() {
        assert_eq!(detect_language("const x = () => 1"), Some("javascript"));
        assert_eq!(detect_language("#include <vector>"), Some("c++"));
        assert_eq!(detect_language("<div>hi</div>"), Some("html"));
        assert_eq!(detect_language("body { color: red }"), Some("css"));
        assert_eq!(detect_language("SELECT a FROM t"), Some("sql"));
        assert_eq!(detect_language("#!/bin/bash\necho hi"), Some("bash"));
        assert_eq!(detect_language("void main() => run();"), Some("javascript"));
        assert_eq!(detect_language("final x = 1"), Some("dart"));
    }

    #[test]
    fn test_no_language() {
        assert_eq!(detect_language("just words"), None);
    }
}
