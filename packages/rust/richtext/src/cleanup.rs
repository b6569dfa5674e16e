//! Markup cleanup pipeline for rich-text element values.
//!
//! Each pass is a function `&str -> String` applied in sequence. The order
//! matters: tags go first so that entities and line breaks left between
//! them are flattened afterwards.

use std::sync::LazyLock;

use regex::Regex;

/// Run the full cleanup pipeline on a rich-text value.
pub(crate) fn run_pipeline(html: &str) -> String {
    let mut result = strip_tags(html);

    result = replace_nbsp(&result);
    result = flatten_newlines(&result);

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Strip tags
// ---------------------------------------------------------------------------

/// Remove every `<...>`-shaped run, including an unterminated trailing `<...`.
fn strip_tags(html: &str) -> String {
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("valid regex"));

    TAG_RE.replace_all(html, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: Non-breaking spaces
// ---------------------------------------------------------------------------

/// Replace literal `&nbsp;` entities with a single space.
fn replace_nbsp(text: &str) -> String {
    text.replace("&nbsp;", " ")
}

// ---------------------------------------------------------------------------
// Pass 3: Newlines
// ---------------------------------------------------------------------------

/// Replace each `\n` with a single space. Runs of newlines are not collapsed.
fn flatten_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_removes_open_close_and_self_closing() {
        let input = r#"<p class="lead">Hello <br/>there</p>"#;
        assert_eq!(strip_tags(input), "Hello there");
    }

    #[test]
    fn strip_tags_removes_unterminated_tail() {
        assert_eq!(strip_tags("price <b>low</b> <span"), "price low ");
    }

    #[test]
    fn strip_tags_removes_embedded_object_markers() {
        let input = r#"<p>Intro</p><object type="application/kenticocloud" data-type="item" data-codename="faq"></object>"#;
        assert_eq!(strip_tags(input), "Intro");
    }

    #[test]
    fn replace_nbsp_only_touches_the_entity() {
        assert_eq!(replace_nbsp("a&nbsp;b&amp;c"), "a b&amp;c");
    }

    #[test]
    fn flatten_newlines_keeps_one_space_per_newline() {
        assert_eq!(flatten_newlines("a\n\nb"), "a  b");
    }

    #[test]
    fn full_pipeline_cleans_rich_text() {
        let input = "<p>Hello&nbsp;World</p>\n<b>!</b>";
        assert_eq!(run_pipeline(input), "Hello World !");
    }

    #[test]
    fn entity_split_by_tags_is_replaced_after_stripping() {
        // Tags are removed before entities are replaced.
        assert_eq!(run_pipeline("&nb<i></i>sp;"), " ");
    }
}
