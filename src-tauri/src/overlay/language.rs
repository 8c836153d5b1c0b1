//! Best-effort language guess for untagged code blocks.
//!
//! Keyword presence only, checked in a fixed order; the first family that
//! matches wins. This is not a parser and will misclassify mixed snippets.
//!
//! | order | language     | triggers                                               |
//! |-------|--------------|--------------------------------------------------------|
//! | 1     | `java`       | `public`/`private`/`protected` + `class`/`static`/...  |
//! | 2     | `javascript` | `function`, `const x`, `let x`, `var x`, `console.log` |
//! | 3     | `python`     | line starting with `def f(`, `class X`, `import x`, `from x import` |
//! | -     | `plaintext`  | nothing matched                                        |

use regex::Regex;
use std::sync::LazyLock;

pub const PLAIN_TEXT: &str = "plaintext";

static LANGUAGE_CHECKS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"\b(public|private|protected)\s+(class|interface|enum|static|final|abstract|void)\b")
                .unwrap(),
            "java",
        ),
        (
            Regex::new(r"\bfunction\b|\b(const|let|var)\s+[A-Za-z_$][\w$]*|\bconsole\.log\b").unwrap(),
            "javascript",
        ),
        (
            Regex::new(r"(?m)^\s*(def\s+\w+\s*\(|class\s+\w+|import\s+\w+|from\s+[\w.]+\s+import\b)")
                .unwrap(),
            "python",
        ),
    ]
});

/// Guesses the language of `code`, or [`PLAIN_TEXT`] when no trigger matches.
pub fn infer_language(code: &str) -> &'static str {
    LANGUAGE_CHECKS
        .iter()
        .find(|(pattern, _)| pattern.is_match(code))
        .map_or(PLAIN_TEXT, |(_, language)| language)
}
