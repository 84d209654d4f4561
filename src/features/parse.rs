//! Task command parsing.
//!
//! A command message starts with a user mention and may hold several
//! mentions, each followed by the task for that user:
//!
//! ```text
//! <@U1> Take out the trash. <@U2> Do the dishes.
//! ```

use crate::core::models::{Command, NotACommand};

const MENTION_START: char = '<';
const MENTION_END: char = '>';
const MENTION_SIGIL: char = '@';

/// Byte offsets of one `<@...>` mention, both delimiters inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MentionSpan {
    open: usize,
    close: usize,
}

/// Split a message into per-user commands.
///
/// Returns `NotACommand` when the text does not start with a user mention or
/// when any `<`/`>` pair is malformed; no partial result is produced.
///
/// # Errors
///
/// `NotACommand` as described above. It is an expected outcome, not a fault.
pub fn parse(text: &str) -> Result<Vec<Command>, NotACommand> {
    if !text.starts_with("<@") {
        return Err(NotACommand);
    }

    let spans = scan_spans(text)?;
    let mut commands = Vec::with_capacity(spans.len());
    for (i, span) in spans.iter().enumerate() {
        let target = mention_id(&text[span.open + 1..span.close]).ok_or(NotACommand)?;
        let task_end = spans.get(i + 1).map_or(text.len(), |next| next.open);
        commands.push(Command::new(target, task_text(&text[span.close + 1..task_end])));
    }

    Ok(commands)
}

/// Single pass over the text collecting mention spans.
fn scan_spans(text: &str) -> Result<Vec<MentionSpan>, NotACommand> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match ch {
            MENTION_START => {
                if open.is_some() {
                    return Err(NotACommand);
                }
                match chars.peek() {
                    Some(&(_, MENTION_SIGIL)) => open = Some(i),
                    _ => return Err(NotACommand),
                }
            }
            MENTION_END => {
                let start = open.take().ok_or(NotACommand)?;
                spans.push(MentionSpan {
                    open: start,
                    close: i,
                });
            }
            _ => {}
        }
    }

    if open.is_some() {
        return Err(NotACommand);
    }
    Ok(spans)
}

/// `@U123` or `@U123|name` -> `U123`.
fn mention_id(inner: &str) -> Option<&str> {
    let id = inner.strip_prefix(MENTION_SIGIL)?;
    let id = id.split_once('|').map_or(id, |(id, _label)| id).trim();
    (!id.is_empty()).then_some(id)
}

fn task_text(raw: &str) -> String {
    raw.strip_prefix(' ').unwrap_or(raw).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_recorded_in_order() {
        let spans = scan_spans("<@A> x <@B> y").unwrap();
        assert_eq!(
            spans,
            vec![
                MentionSpan { open: 0, close: 3 },
                MentionSpan { open: 7, close: 10 }
            ]
        );
    }

    #[test]
    fn stray_close_is_malformed() {
        assert_eq!(scan_spans("<@A> 2 > 1"), Err(NotACommand));
    }

    #[test]
    fn nested_open_is_malformed() {
        assert_eq!(scan_spans("<@A <@B>>"), Err(NotACommand));
    }

    #[test]
    fn mention_label_is_dropped() {
        assert_eq!(mention_id("@U1|will"), Some("U1"));
        assert_eq!(mention_id("@U1"), Some("U1"));
        assert_eq!(mention_id("@"), None);
        assert_eq!(mention_id("#C1"), None);
    }

    #[test]
    fn only_one_leading_space_is_stripped() {
        assert_eq!(task_text("  indented"), " indented");
        assert_eq!(task_text(" do it.  "), "do it.");
        assert_eq!(task_text(""), "");
    }
}
