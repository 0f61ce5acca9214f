//! Default crumb label formatting
//!
//! Fragments with no explicit name are turned into labels by replacing
//! slug separators with spaces and title-casing the result.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters treated as word separators inside a slug
    static ref SLUG_SEPARATOR_REGEX: Regex =
        Regex::new(r"[-_+]").expect("Invalid regex pattern");
}

/// Replace each `-`, `_` and `+` with a space
pub fn spacify(fragment: &str) -> String {
    SLUG_SEPARATOR_REGEX.replace_all(fragment, " ").into_owned()
}

/// Upper-case the first letter of each whitespace-delimited word and
/// lower-case the rest. Whitespace is kept as-is.
///
/// Punctuation does not start a new word: `"foo.bar"` becomes `"Foo.bar"`.
pub fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if ch.is_whitespace() {
            output.push(ch);
            at_word_start = true;
        } else if at_word_start {
            output.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            output.extend(ch.to_lowercase());
        }
    }

    output
}

/// Label used for a fragment when nothing else names it
pub fn default_label(fragment: &str) -> String {
    title_case(&spacify(fragment))
}
