//! Default meta description derivation.
//!
//! The admin preview and the structured data builder both show the
//! description a page gets when no override is stored; both call
//! [`derive`] so the two can never disagree.

use crate::utils::html::{collapse_whitespace, strip_tags, unescape};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Maximum length of a derived description, in characters.
pub const DESCRIPTION_LIMIT: usize = 160;

/// Appended when the text is cut.
pub const ELLIPSIS: &str = "...";

/// `[name]`, `[name attr="x"]`, `[name/]`
static SHORTCODE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z][\w-]*)(?:\s[^\[\]]*)?/?\]").expect("valid shortcode pattern")
});

/// `[/name]`, with the brackets of an escaped `[[/name]]` if present
static SHORTCODE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[?\[/[A-Za-z][\w-]*\]\]?").expect("valid shortcode pattern"));

/// Derive a plain-text description from raw body markup.
///
/// Strips markup, decodes entities, then strips shortcodes, collapses
/// whitespace and trims. Text
/// longer than [`DESCRIPTION_LIMIT`] characters is cut so that the result,
/// ellipsis included, is exactly that long.
pub fn derive(raw: &str) -> String {
    let text = strip_tags(raw);
    let text = unescape(&text);
    let text = strip_shortcodes(&text);
    truncate(collapse_whitespace(&text))
}

/// Remove shortcode directives.
///
/// An enclosing pair is removed together with its content; a lone opening
/// or closing tag is removed on its own. A tag written with doubled
/// brackets, `[[name]]`, is an escaped literal and is kept as `[name]`.
pub fn strip_shortcodes(s: &str) -> Cow<'_, str> {
    if !s.contains('[') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(caps) = SHORTCODE_OPEN.captures(rest) {
        let Some(tag) = caps.get(0) else { break };
        let after = &rest[tag.end()..];

        if rest[..tag.start()].ends_with('[') && after.starts_with(']') {
            out.push_str(&rest[..tag.start() - 1]);
            out.push_str(tag.as_str());
            rest = &after[1..];
            continue;
        }
        out.push_str(&rest[..tag.start()]);

        let closing = format!("[/{}]", &caps[1]);
        rest = match after.find(&closing) {
            Some(pos) if !tag.as_str().ends_with("/]") => &after[pos + closing.len()..],
            _ => after,
        };
    }
    out.push_str(rest);

    let out = SHORTCODE_CLOSE.replace_all(&out, |caps: &regex::Captures<'_>| {
        let tag = &caps[0];
        match (tag.starts_with("[["), tag.ends_with("]]")) {
            (true, true) => tag[1..tag.len() - 1].to_owned(),
            (true, false) => "[".to_owned(),
            (false, true) => "]".to_owned(),
            (false, false) => String::new(),
        }
    });
    Cow::Owned(out.into_owned())
}

fn truncate(text: String) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text;
    }
    let keep = DESCRIPTION_LIMIT - ELLIPSIS.len();
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(derive(""), "");
        assert_eq!(derive("   \n  "), "");
        assert_eq!(derive("<p></p>"), "");
    }

    #[test]
    fn test_markup_and_shortcodes_removed() {
        let body = "<p>Hello <b>world</b>! [shortcode]ignored[/shortcode] Extra text...";
        assert_eq!(derive(body), "Hello world! Extra text...");
    }

    #[test]
    fn test_short_text_unchanged() {
        let body = "  A plain sentence that fits.  ";
        assert_eq!(derive(body), "A plain sentence that fits.");
    }

    #[test]
    fn test_exact_limit_not_truncated() {
        let body = "a".repeat(DESCRIPTION_LIMIT);
        assert_eq!(derive(&body), body);
    }

    #[test]
    fn test_long_text_truncated() {
        let body = format!("<p>{}</p>", "word ".repeat(100));
        let derived = derive(&body);
        assert_eq!(derived.chars().count(), DESCRIPTION_LIMIT);
        assert!(derived.ends_with(ELLIPSIS));
        assert!(derived.starts_with("word word"));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let body = "é".repeat(200);
        let derived = derive(&body);
        assert_eq!(derived.chars().count(), DESCRIPTION_LIMIT);
        assert_eq!(derived, format!("{}...", "é".repeat(157)));
    }

    #[test]
    fn test_self_closing_and_attributed_shortcodes() {
        assert_eq!(
            strip_shortcodes("a [gallery ids=\"1,2\"] b [br/] c"),
            "a  b  c"
        );
    }

    #[test]
    fn test_unmatched_closing_shortcode() {
        assert_eq!(strip_shortcodes("text[/caption] more"), "text more");
    }

    #[test]
    fn test_brackets_that_are_not_shortcodes() {
        assert_eq!(strip_shortcodes("see [1] and [ x ]"), "see [1] and [ x ]");
    }

    #[test]
    fn test_escaped_shortcodes_kept_literal() {
        assert_eq!(strip_shortcodes("Use [[gallery]] to embed"), "Use [gallery] to embed");
        assert_eq!(
            strip_shortcodes("[[caption]]x[[/caption]] [b]y[/b]"),
            "[caption]x[/caption] "
        );
        assert_eq!(strip_shortcodes("a [[/note] b"), "a [ b");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(
            derive("<p>Fish &amp; chips&nbsp;today</p>"),
            "Fish & chips today"
        );
    }

    #[test]
    fn test_entities_count_as_one_character() {
        let derived = derive(&"&amp;".repeat(40));
        assert_eq!(derived, "&".repeat(40));

        let derived = derive(&"&amp;".repeat(200));
        assert_eq!(derived, format!("{}...", "&".repeat(157)));
    }

    #[test]
    fn test_script_content_is_not_description() {
        assert_eq!(derive("<script>var x = 1;</script><p>Body</p>"), "Body");
    }
}
