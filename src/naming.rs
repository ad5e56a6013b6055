//! Human-readable labels derived from file names.
//!
//! Used when a template asks for `alt="auto"` or `title="auto"`:
//! - `logo.jpg` → "Logo"
//! - `logo-auto-attributes.jpg` → "Logo Auto Attributes"
//! - `images/HERO-banner.png` → "Hero Banner"
//!
//! Dashes become spaces, then every word is title-cased: a letter following
//! a non-letter is upper-cased and any other letter lower-cased. Digits and
//! punctuation count as word boundaries, so `2nd-floor` → "2Nd Floor".

use std::path::Path;

/// Label for the file at `path`: its stem, dashes to spaces, title-cased.
pub fn auto_label(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_case(&stem.replace('-', " "))
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
