//! Annotation text pipeline: audit-line rendering and stripping.
//!
//! Stored annotation text is the user-supplied base plus machine-generated
//! audit lines: at most one leading `[Modified by: …]` line (non-privileged
//! writers only) and exactly one trailing `Last updated: …` line. Audit
//! lines are regenerated from a clean base on every write, never carried
//! over, so round-tripping previously rendered text back through a write is
//! idempotent and duplicates never accumulate.

use chrono::{DateTime, Local};

use crate::models::Actor;

/// Prefix of the trailing timestamp audit line.
pub const LAST_UPDATED_PREFIX: &str = "Last updated:";

/// Prefix of the leading modified-by audit line.
pub const MODIFIED_BY_PREFIX: &str = "[Modified by:";

/// Timestamp format used in the modified-by line.
const MODIFIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Timestamp format used in the last-updated line.
const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M %Z";

/// Strip the trailing `Last updated:` line, if present.
pub fn strip_timestamp(value: &str) -> String {
    let txt = value.trim_end();
    let mut lines: Vec<&str> = txt.lines().collect();
    if matches!(lines.last(), Some(last) if last.starts_with(LAST_UPDATED_PREFIX)) {
        lines.pop();
    }
    lines.join("\n").trim_end_matches('\n').to_string()
}

/// Strip every `[Modified by: …]` line.
pub fn strip_modification_metadata(value: &str) -> String {
    let txt = value.trim_end();
    let filtered: Vec<&str> = txt
        .lines()
        .filter(|line| !line.trim_start().starts_with(MODIFIED_BY_PREFIX))
        .collect();
    filtered.join("\n").trim_end_matches('\n').to_string()
}

/// Reduce text to its clean base: no timestamp line, no modified-by lines.
///
/// Applied defensively to caller-supplied text before rendering, so callers
/// that round-trip previously stored text never stack audit lines.
pub fn normalize_base(value: &str) -> String {
    strip_modification_metadata(&strip_timestamp(value))
}

/// Render the stored form of an annotation from caller-supplied text.
///
/// The base is re-derived via [`normalize_base`]; a single modified-by line
/// is prepended for non-privileged actors; exactly one last-updated line is
/// appended. The result always ends with a single trailing newline.
pub fn render_stored_text(raw_text: &str, actor: &Actor, now: DateTime<Local>) -> String {
    let mut base = normalize_base(raw_text);

    if !actor.privileged {
        let modification_line = format!(
            "[Modified by: {} at {}]",
            actor.name,
            now.format(MODIFIED_AT_FORMAT)
        );
        base = if base.is_empty() {
            modification_line
        } else {
            format!("{}\n{}", modification_line, base)
        };
    }

    let mut lines: Vec<String> = if base.is_empty() {
        Vec::new()
    } else {
        base.lines().map(str::to_string).collect()
    };
    lines.push(format!(
        "{} {}",
        LAST_UPDATED_PREFIX,
        now.format(LAST_UPDATED_FORMAT)
    ));

    lines.join("\n") + "\n"
}

/// Stored text as presented in an edit box: the trailing timestamp line is
/// hidden, the modified-by line (if any) remains visible as content.
pub fn content_for_editing(stored_text: &str) -> String {
    strip_timestamp(stored_text)
}

/// Stored text with both audit line kinds removed, for pure-content
/// consumers such as preview or search.
pub fn content_plain(stored_text: &str) -> String {
    normalize_base(stored_text)
}

/// Count content lines for validation: CRLF-normalized, trailing empty
/// lines ignored.
pub fn count_content_lines(value: &str) -> usize {
    let normalized = value.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<&str> = normalized.split('\n').collect();
    while matches!(lines.last(), Some(&"")) {
        lines.pop();
    }
    lines.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Actor {
        Actor::user("alice")
    }

    fn admin() -> Actor {
        Actor::privileged("admin")
    }

    #[test]
    fn test_strip_timestamp_removes_trailing_line() {
        let stored = "hello\nworld\nLast updated: 2026-01-05 10:30 +00:00\n";
        assert_eq!(strip_timestamp(stored), "hello\nworld");
    }

    #[test]
    fn test_strip_timestamp_noop_without_line() {
        assert_eq!(strip_timestamp("hello\nworld\n"), "hello\nworld");
    }

    #[test]
    fn test_strip_timestamp_only_removes_last_line() {
        // A timestamp-looking line in the middle is user content.
        let stored = "Last updated: yesterday, allegedly\nbody";
        assert_eq!(strip_timestamp(stored), stored);
    }

    #[test]
    fn test_strip_modification_metadata() {
        let stored = "[Modified by: alice at 2026-01-05 10:30:00 +00:00]\nbody\n";
        assert_eq!(strip_modification_metadata(stored), "body");
    }

    #[test]
    fn test_strip_modification_metadata_indented() {
        let stored = "  [Modified by: alice at x]\nbody";
        assert_eq!(strip_modification_metadata(stored), "body");
    }

    #[test]
    fn test_render_non_privileged_adds_both_audit_lines() {
        let stored = render_stored_text("my note", &alice(), Local::now());
        let lines: Vec<&str> = stored.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[Modified by: alice at "));
        assert!(lines[0].ends_with(']'));
        assert_eq!(lines[1], "my note");
        assert!(lines[2].starts_with(LAST_UPDATED_PREFIX));
        assert!(stored.ends_with('\n'));
        assert!(!stored.ends_with("\n\n"));
    }

    #[test]
    fn test_render_privileged_omits_modified_by() {
        let stored = render_stored_text("my note", &admin(), Local::now());
        let lines: Vec<&str> = stored.trim_end().lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "my note");
        assert!(lines[1].starts_with(LAST_UPDATED_PREFIX));
    }

    #[test]
    fn test_render_twice_never_stacks_audit_lines() {
        let now = Local::now();
        let first = render_stored_text("my note", &alice(), now);
        // Caller round-trips the rendered text straight back in.
        let second = render_stored_text(&first, &alice(), now);

        let modified_count = second
            .lines()
            .filter(|l| l.starts_with(MODIFIED_BY_PREFIX))
            .count();
        let updated_count = second
            .lines()
            .filter(|l| l.starts_with(LAST_UPDATED_PREFIX))
            .count();
        assert_eq!(modified_count, 1);
        assert_eq!(updated_count, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_empty_base_non_privileged() {
        let stored = render_stored_text("", &alice(), Local::now());
        let lines: Vec<&str> = stored.trim_end().lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(MODIFIED_BY_PREFIX));
        assert!(lines[1].starts_with(LAST_UPDATED_PREFIX));
    }

    #[test]
    fn test_render_empty_base_privileged_is_timestamp_only() {
        let stored = render_stored_text("", &admin(), Local::now());
        let lines: Vec<&str> = stored.trim_end().lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(LAST_UPDATED_PREFIX));
    }

    #[test]
    fn test_content_for_editing_keeps_modified_by() {
        let stored = render_stored_text("body", &alice(), Local::now());
        let editable = content_for_editing(&stored);
        assert!(editable.starts_with(MODIFIED_BY_PREFIX));
        assert!(editable.contains("body"));
        assert!(!editable.contains(LAST_UPDATED_PREFIX));
    }

    #[test]
    fn test_content_plain_strips_everything_generated() {
        let stored = render_stored_text("body\nsecond", &alice(), Local::now());
        assert_eq!(content_plain(&stored), "body\nsecond");
    }

    #[test]
    fn test_count_content_lines_normalizes_crlf() {
        assert_eq!(count_content_lines("a\r\nb\r\nc"), 3);
        assert_eq!(count_content_lines("a\rb"), 2);
    }

    #[test]
    fn test_count_content_lines_ignores_trailing_blanks() {
        assert_eq!(count_content_lines("a\nb\n\n\n"), 2);
        assert_eq!(count_content_lines(""), 0);
        assert_eq!(count_content_lines("\n\n"), 0);
    }
}
