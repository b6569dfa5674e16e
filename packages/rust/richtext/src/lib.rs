//! Rich-text to plain-text cleanup for search indexing.
//!
//! Element values from the CMS carry HTML markup, `&nbsp;` entities and line
//! breaks. The search index wants a single line of plain text, so values are
//! run through a small cleanup pipeline before they are joined into a
//! content block.

mod cleanup;

use tracing::{instrument, trace};

/// Strip markup from a rich-text value.
///
/// Removes tag-shaped runs, turns `&nbsp;` into a space and replaces each
/// newline with a space. Other entities are left as they are.
#[instrument(level = "trace", skip_all, fields(len = html.len()))]
pub fn strip_markup(html: &str) -> String {
    let cleaned = cleanup::run_pipeline(html);
    trace!(cleaned_len = cleaned.len(), "rich text cleaned");
    cleaned
}

/// Remove the first literal `"` from `text`, leaving any later quotes.
pub fn strip_first_quote(text: &str) -> String {
    text.replacen('"', "", 1)
}

/// Join per-element contributions with a single space, then drop the first quote.
///
/// Empty contributions still take part in the join, so items with many
/// non-text elements produce runs of spaces.
pub fn join_contents<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    strip_first_quote(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_markup_leaves_no_tags_entities_or_newlines() {
        let result = strip_markup("<h2>Fees</h2>\n<p>Low&nbsp;cost</p>");
        assert_eq!(result, "Fees Low cost");
        assert!(!result.contains('<'));
        assert!(!result.contains("&nbsp;"));
        assert!(!result.contains('\n'));
    }

    #[test]
    fn strip_markup_keeps_other_entities() {
        assert_eq!(strip_markup("<p>R&amp;D</p>"), "R&amp;D");
    }

    #[test]
    fn strip_first_quote_removes_only_one() {
        assert_eq!(strip_first_quote(r#"say "hi" now"#), r#"say hi" now"#);
        assert_eq!(strip_first_quote("no quotes"), "no quotes");
    }

    #[test]
    fn join_contents_keeps_empty_contributions() {
        let parts = ["Title", "", "Body"];
        assert_eq!(join_contents(&parts), "Title  Body");
    }

    #[test]
    fn join_contents_strips_first_quote_across_parts() {
        let parts = vec![String::from("\"Alpha"), String::from("Beta\"")];
        assert_eq!(join_contents(&parts), "Alpha Beta\"");
    }

    #[test]
    fn join_contents_of_nothing_is_empty() {
        let parts: [&str; 0] = [];
        assert_eq!(join_contents(&parts), "");
    }
}
