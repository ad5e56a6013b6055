//! `<picture>` markup that prefers the WebP sibling when one exists.
//!
//! Called per render with the original asset's static path and the caller's
//! attributes. Given `src="images/logo.jpg"` and a `logo.webp` next to it in
//! one of the static directories:
//!
//! ```html
//! <picture>
//!   <source srcset="/static/images/logo.webp" type="image/webp">
//!   <img src="/static/images/logo.jpg" alt="Logo" class="img-fluid">
//! </picture>
//! ```
//!
//! Without the sibling the `<source>` is omitted and browsers load the
//! original through the `<img>`.
//!
//! ## Attributes
//!
//! - `src` is required; without it the helper returns
//!   [`MISSING_SRC_PLACEHOLDER`] instead of failing the render.
//! - `alt` / `title` set to `"auto"` are replaced by a label derived from the
//!   file name (see [`naming::auto_label`](crate::naming::auto_label)).
//! - Every other attribute is emitted verbatim, in the order given. Values
//!   are HTML-escaped; names are not.
//!
//! ## Static files
//!
//! URL resolution and the existence probe go through [`StaticResolver`], so
//! the helper works with whatever static-file layout the host uses.
//! [`StaticDirs`] is the stock implementation: a URL prefix plus an ordered
//! list of directories to search.
//!
//! The result is a [`maud::Markup`], already escaped, so it can be embedded
//! directly in a maud template with `(optimized_image(&dirs, attrs))`.

use crate::config::StaticConfig;
use crate::imaging::{WEBP_EXTENSION, WEBP_MIME};
use crate::naming;
use maud::{Markup, PreEscaped, html};
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Returned in place of markup when `src` is missing.
pub const MISSING_SRC_PLACEHOLDER: &str = r#"<!-- optimized_image tag missing "src" attribute -->"#;

/// Value of `alt` / `title` that asks for a label derived from the file name.
pub const AUTO: &str = "auto";

// ============================================================================
// Attributes
// ============================================================================

/// Insertion-ordered HTML attributes.
///
/// Setting an existing name replaces its value in place, keeping its
/// position; new names are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

// ============================================================================
// Static file resolution
// ============================================================================

/// How the host maps static paths to URLs and files.
pub trait StaticResolver {
    /// Public URL for a static path such as `images/logo.jpg`.
    fn url(&self, path: &str) -> String;

    /// First file on disk matching the static path, if any.
    fn find(&self, path: &str) -> Option<PathBuf>;
}

/// URL prefix plus ordered search directories.
#[derive(Debug, Clone)]
pub struct StaticDirs {
    pub url: String,
    pub dirs: Vec<PathBuf>,
}

impl StaticDirs {
    pub fn new(url: impl Into<String>, dirs: Vec<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dirs,
        }
    }

    pub fn from_config(config: &StaticConfig) -> Self {
        Self::new(config.url.clone(), config.dirs.clone())
    }
}

/// Static paths are always `/`-separated, whatever the host OS produced.
fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Sub-delimiters a static URL leaves unescaped.
const URL_KEEP: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%2A", "*"),
    ("%28", "("),
    ("%29", ")"),
    ("%27", "'"),
];

/// Percent-encode one path segment, keeping `!*()'` literal.
fn encode_segment(segment: &str) -> String {
    let mut encoded = urlencoding::encode(segment).into_owned();
    for (escaped, literal) in URL_KEEP {
        encoded = encoded.replace(escaped, literal);
    }
    encoded
}

/// A relative path that cannot climb out of the directory it is joined to.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl StaticResolver for StaticDirs {
    fn url(&self, path: &str) -> String {
        let normalized = normalize_separators(path);
        let encoded = normalized
            .trim_start_matches('/')
            .split('/')
            .map(encode_segment)
            .collect::<Vec<_>>()
            .join("/");
        if self.url.ends_with('/') {
            format!("{}{}", self.url, encoded)
        } else {
            format!("{}/{}", self.url, encoded)
        }
    }

    fn find(&self, path: &str) -> Option<PathBuf> {
        let normalized = normalize_separators(path);
        let relative = Path::new(normalized.trim_start_matches('/'));
        if relative.as_os_str().is_empty() || !is_contained(relative) {
            return None;
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(relative))
            .find(|candidate| candidate.exists())
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Static path of the compressed sibling: extension swapped for `.webp`.
pub fn compressed_path(src: &str) -> String {
    let normalized = normalize_separators(src);
    normalize_separators(
        &Path::new(&normalized)
            .with_extension(WEBP_EXTENSION)
            .to_string_lossy(),
    )
}

/// Serialize `<img>` with every attribute in order.
fn render_img(attrs: &Attributes) -> Markup {
    let mut out = String::from("<img");
    for (name, value) in attrs.iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html! { (value) }.into_string());
        out.push('"');
    }
    out.push('>');
    PreEscaped(out)
}

/// Render a `<picture>` for `attrs`, preferring the WebP sibling of `src`.
pub fn optimized_image(resolver: &impl StaticResolver, mut attrs: Attributes) -> Markup {
    let Some(src) = attrs
        .get("src")
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
    else {
        warn!("optimized_image called without a src attribute");
        return PreEscaped(MISSING_SRC_PLACEHOLDER.to_string());
    };

    attrs.set("src", resolver.url(&src));

    let webp_path = compressed_path(&src);
    let webp_url = resolver.find(&webp_path).map(|_| resolver.url(&webp_path));

    if attrs.get("alt") == Some(AUTO) || attrs.get("title") == Some(AUTO) {
        let label = naming::auto_label(Path::new(&normalize_separators(&src)));
        for key in ["alt", "title"] {
            if attrs.get(key) == Some(AUTO) {
                attrs.set(key, label.clone());
            }
        }
    }

    html! {
        picture {
            @if let Some(srcset) = &webp_url {
                source srcset=(srcset) type=(WEBP_MIME);
            }
            (render_img(&attrs))
        }
    }
}
