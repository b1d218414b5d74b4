//! Detail overlay helpers: external URL derivation for a post.
//!
//! The URL is a best-effort convenience built from the entry's file name and title;
//! it is never checked against the target site.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Entry;
use crate::utils::sanitize;

/// Host that serves the original posts
pub const POST_HOST: &str = "netflixtechblog.medium.com";

/// Maximum slug length in characters
pub const MAX_SLUG_LEN: usize = 60;

/// Shown in place of an empty snippet
pub const SNIPPET_PLACEHOLDER: &str = "Explore this architectural insight from Netflix Engineering...";

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("slug pattern is valid"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("hyphen pattern is valid"));

/// Identifier prefix of the path's file name, up to its first `_`.
///
/// Returns an empty string when the file name has no `_`.
pub fn post_id(path: &str) -> &str {
    let filename = path.rsplit('/').next().unwrap_or("");
    match filename.find('_') {
        Some(idx) => &filename[..idx],
        None => "",
    }
}

/// Lowercase, punctuation-free, hyphen-separated form of a title
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lower, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.chars().take(MAX_SLUG_LEN).collect()
}

/// Snippet for display, or the placeholder when it is blank
pub fn display_snippet(entry: &Entry) -> String {
    let snippet = sanitize(&entry.snippet);
    if snippet.is_empty() { SNIPPET_PLACEHOLDER.to_string() } else { snippet }
}

/// External reference URL for an entry
pub fn post_url(entry: &Entry) -> String {
    format!("https://{}/{}-{}", POST_HOST, slugify(&entry.title), post_id(&entry.path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, title: &str) -> Entry {
        Entry {
            path: path.to_string(),
            title: title.to_string(),
            date: None,
            layers: vec![],
            snippet: String::new(),
        }
    }

    #[test]
    fn test_post_id() {
        assert_eq!(post_id("/outputs/posts/12345_Scaling.md"), "12345");
        assert_eq!(post_id("a1b2c3_Title_With_Underscores.md"), "a1b2c3");
        assert_eq!(post_id("/outputs/posts/no-underscore.md"), "");
        assert_eq!(post_id(""), "");
    }

    #[test]
    fn test_post_id_ignores_underscores_in_directories() {
        assert_eq!(post_id("/my_posts/777_x.md"), "777");
        assert_eq!(post_id("/my_posts/plain.md"), "");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Scaling: The Next Chapter!"), "scaling-the-next-chapter");
    }

    #[test]
    fn test_slugify_collapses_whitespace_and_hyphens() {
        assert_eq!(slugify("  Zuul 2 -- the   journey  "), "-zuul-2-the-journey-");
        assert_eq!(slugify("A - B"), "a-b");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Métrics"), "caf-mtrics");
    }

    #[test]
    fn test_slugify_truncates() {
        let title = "word ".repeat(30);
        let slug = slugify(&title);
        assert_eq!(slug.len(), MAX_SLUG_LEN);
        assert!(slug.starts_with("word-word-"));
    }

    #[test]
    fn test_post_url() {
        let e = entry("/outputs/posts/12345_Scaling.md", "Scaling: The Next Chapter!");
        assert_eq!(post_url(&e), "https://netflixtechblog.medium.com/scaling-the-next-chapter-12345");
    }

    #[test]
    fn test_display_snippet_placeholder() {
        let mut e = entry("/p/1_x.md", "X");
        assert_eq!(display_snippet(&e), SNIPPET_PLACEHOLDER);

        e.snippet = "  Line one\nline two ".to_string();
        assert_eq!(display_snippet(&e), "Line one line two");
    }

    #[test]
    fn test_post_url_without_id() {
        let e = entry("/outputs/posts/Scaling.md", "Scaling");
        assert_eq!(post_url(&e), "https://netflixtechblog.medium.com/scaling-");
    }
}
