//! Model output split into plain paragraphs and fenced code blocks.

use super::language::infer_language;
use serde::Serialize;

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Segment {
    /// Non-blank lines of prose, in order.
    Text { lines: Vec<String> },
    /// A fenced block. `inferred` is set when the language came from
    /// keyword scanning rather than the fence tag.
    Code {
        language: String,
        inferred: bool,
        code: String,
    },
}

impl Segment {
    pub fn text<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Segment::Text {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered segments of one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichText {
    segments: Vec<Segment>,
}

impl RichText {
    /// Splits `text` on triple-backtick fences.
    ///
    /// A fence opens a code block whose first line may carry a language tag;
    /// the next fence closes it. An unclosed fence runs to the end of the
    /// text. Text outside fences becomes [`Segment::Text`]: the segment is
    /// trimmed at its boundaries and blank lines are dropped; every other
    /// line is kept as written, trailing spaces included.
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some(open) = rest.find(FENCE) {
            push_plain(&mut segments, &rest[..open]);

            let after_open = &rest[open + FENCE.len()..];
            let (block, remainder) = match after_open.find(FENCE) {
                Some(close) => (&after_open[..close], &after_open[close + FENCE.len()..]),
                None => (after_open, ""),
            };
            segments.push(code_segment(block));
            rest = remainder;
        }
        push_plain(&mut segments, rest);

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    let lines: Vec<String> = text
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect();

    if !lines.is_empty() {
        segments.push(Segment::Text { lines });
    }
}

fn code_segment(block: &str) -> Segment {
    let (tag, body) = match block.split_once('\n') {
        Some((first, body)) if is_language_tag(first.trim()) => (Some(first.trim()), body),
        Some((first, body)) if first.trim().is_empty() => (None, body),
        _ => (None, block.trim_start()),
    };
    let code = body.trim_end().to_string();

    match tag {
        Some(tag) => Segment::Code {
            language: tag.to_ascii_lowercase(),
            inferred: false,
            code,
        },
        None => Segment::Code {
            language: infer_language(&code).to_string(),
            inferred: true,
            code,
        },
    }
}

/// A fence tag is a single short token such as `rust`, `c++`, `objective-c`.
fn is_language_tag(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.len() <= 32
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '_' | '.'))
}
