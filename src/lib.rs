//! # Picture Optimizer
//!
//! Serve WebP where browsers take it, the original everywhere else.
//! Two halves share one naming rule, `name.ext` → `name.webp` beside it:
//!
//! ```text
//! optimize-images        static/images/logo.jpg  →  static/images/logo.webp
//! optimized_image(..)    <picture><source srcset=".../logo.webp"><img src=".../logo.jpg">
//! ```
//!
//! The batch side walks a static images folder and writes WebP siblings. The
//! render side emits a `<picture>` that lists the sibling only if it exists on
//! disk, so a folder that was never optimized still renders correctly.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `optimizer.toml` loading: stock defaults, merge, validation |
//! | [`scan`] | Recursive walk and per-file classification (eligible, excluded, ...) |
//! | [`optimize`] | Batch convert with the size check, and bulk delete |
//! | [`imaging`] | `ImageBackend` trait and the pure-Rust decode + WebP encode backend |
//! | [`markup`] | `<picture>` rendering with Maud, static URL and file resolution |
//! | [`naming`] | Labels from file names for `alt="auto"` / `title="auto"` |
//! | [`output`] | CLI output formatting for both operations |
//!
//! # Design Decisions
//!
//! ## Only Keep Smaller Files
//!
//! WebP is not always smaller: a tiny or already well-compressed PNG can grow.
//! After each encode the sibling is compared with its source and deleted unless
//! strictly smaller. Whatever `.webp` sits on disk is therefore always a win,
//! and the renderer can trust mere existence.
//!
//! ## Walk, Then Write
//!
//! The full file list is collected before the first encode. Siblings written
//! during a run are never picked up by the same run, and a source that already
//! ends in `.webp` is skipped instead of being encoded onto itself. Two
//! sources that would share one sibling (`logo.jpg`, `logo.png`) are both
//! skipped.
//!
//! ## Existence, Not Freshness
//!
//! The renderer checks only that the sibling exists. A source edited after the
//! last run keeps serving the stale WebP until the optimizer runs again.
//!
//! ## Explicit Settings
//!
//! There are no globals: [`config::load_settings`] returns a
//! [`config::Settings`] that the caller passes to [`optimize::optimize`] and
//! turns into a [`markup::StaticDirs`] for rendering.

pub mod config;
pub mod imaging;
pub mod markup;
pub mod naming;
pub mod optimize;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
