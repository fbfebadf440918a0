//! Language tag resolution for code blocks.
//!
//! Markdown and MDX parsers attach a class name such as `language-python` to
//! every fenced code block that carries an info string. The highlighter needs a
//! bare language identifier, so this module extracts the tag from the class
//! name and falls back to [`DEFAULT_LANGUAGE`] when there is nothing usable.

use regex::Regex;
use std::sync::LazyLock;

/// Language used when a code block carries no recognizable hint.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Prefix the upstream parser puts in front of the info string word.
pub const CLASS_PREFIX: &str = "language-";

/// Class name substituted for an absent token before searching.
pub const DEFAULT_CLASS_NAME: &str = "language-javascript";

// ASCII word characters only; `\w` in the regex crate is Unicode-aware.
static LANGUAGE_CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"language-([A-Za-z0-9_]+)").unwrap());

/// Resolve the language identifier for a code block's class name.
///
/// The search is unanchored and the first `language-<word>` occurrence wins.
/// An absent or empty token is treated as [`DEFAULT_CLASS_NAME`]. The result is
/// never empty.
///
/// ```
/// use codelang_lib::language::resolve_language;
///
/// assert_eq!(resolve_language(Some("language-python")), "python");
/// assert_eq!(resolve_language(Some("foo language-rust bar")), "rust");
/// assert_eq!(resolve_language(Some("language-")), "javascript");
/// assert_eq!(resolve_language(None), "javascript");
/// ```
pub fn resolve_language(class_name: Option<&str>) -> String {
    let token = class_name.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_CLASS_NAME);

    match LANGUAGE_CLASS_REGEX.captures(token).and_then(|caps| caps.get(1)) {
        Some(tag) => tag.as_str().to_string(),
        None => {
            log::debug!("No language hint in class name {token:?}, using {DEFAULT_LANGUAGE}");
            DEFAULT_LANGUAGE.to_string()
        }
    }
}

/// Build the class name an MDX parser would attach to a fenced block.
///
/// Only the first whitespace-delimited word of the info string is used, so
/// `rust ignore` becomes `language-rust`. Returns `None` for an empty info
/// string.
pub fn class_name_for_info(info: &str) -> Option<String> {
    info.split_whitespace().next().map(|word| format!("{CLASS_PREFIX}{word}"))
}
