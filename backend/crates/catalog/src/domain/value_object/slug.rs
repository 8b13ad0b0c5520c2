//! Product Slug
//!
//! URL-safe identifier derived from the product name: NFKD decomposed,
//! combining marks dropped, ASCII alphanumerics lowercased, every other run
//! of characters collapsed into a single `-`.

use std::fmt;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Used when a name has no ASCII alphanumerics at all
const FALLBACK_SLUG: &str = "product";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Slug(String);

impl Slug {
    /// Base slug for a product name, before collision resolution
    pub fn from_name(name: &str) -> Self {
        let slug = slugify(name);
        if slug.is_empty() {
            Self(FALLBACK_SLUG.to_string())
        } else {
            Self(slug)
        }
    }

    /// `base-n`, used for the n-th product sharing a base slug
    pub fn with_suffix(&self, n: u32) -> Self {
        Self(format!("{}-{}", self.0, n))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut separator = false;

    for c in input.nfkd() {
        if c.is_ascii_alphanumeric() {
            if separator && !out.is_empty() {
                out.push('-');
            }
            separator = false;
            out.push(c.to_ascii_lowercase());
        } else if !is_combining_mark(c) {
            separator = true;
        }
    }
    out
}
