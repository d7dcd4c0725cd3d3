//! Normalizes parsed-PDF markdown into a single line of plain prose.
//!
//! The upstream parser emits markdown: headings, emphasis, tables and hard
//! line breaks. None of that helps an extractive QA model, and table pipes
//! in particular break sentence detection, so everything is flattened here.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `| --- | :---: |` style table rule rows.
static RE_TABLE_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\|?(?:\s*:?-{3,}:?\s*\|)+\s*:?-*:?\s*$").unwrap());
/// Heading hashes and blockquote markers at line start.
static RE_LINE_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*(?:#{1,6}|>+)\s+").unwrap());
/// A delimiter pair around non-blank text, bounded by non-word characters or
/// line edges. Opening and closing runs are compared in [`strip_emphasis`].
static RE_EMPHASIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(^|[^\w])(\*{1,3}|_{1,3}|~~|`)(\S(?:.*?\S)?)(\*{1,3}|_{1,3}|~~|`)([^\w]|$)")
        .unwrap()
});
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip markdown markup and collapse whitespace runs into single spaces.
pub fn clean_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let s = RE_TABLE_RULE.replace_all(raw, " ");
    let s = RE_LINE_MARKERS.replace_all(&s, "");
    let s = strip_emphasis(&s);
    let s = s.replace('|', " ");
    RE_WHITESPACE.replace_all(&s, " ").trim().to_string()
}

/// Unwrap `**bold**`, `_italic_`, `~~struck~~` and `` `code` `` spans. Lone
/// `*` and intra-word `_` (as in `3 * 4` or `user_id`) are left alone.
///
/// Neighbouring spans share a boundary character, so a single pass can skip
/// one. Every effective pass removes delimiters, so the loop terminates.
fn strip_emphasis(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = RE_EMPHASIS
            .replace_all(&current, |caps: &Captures| {
                if caps[2] == caps[4] {
                    format!("{}{}{}", &caps[1], &caps[3], &caps[5])
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current
}
