//! Path normalization and pattern matching.
//!
//! # Design Decisions
//! - Every path, compiled or inbound, goes through the same `normalize`
//! - Route paths are regular expressions; literal paths are valid patterns
//! - Matching is anchored at both ends (full match only)

use std::fmt;

use regex::Regex;

/// Collapses every run of consecutive `/` into a single `/`.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

/// Removes the deployment context prefix from an absolute request path.
///
/// Paths outside the context are returned unchanged.
pub fn strip_context<'a>(path: &'a str, context_path: &str) -> &'a str {
    if context_path.is_empty() {
        return path;
    }
    match path.strip_prefix(context_path) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// A compiled route path.
#[derive(Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
}

impl RoutePattern {
    /// Compiles `path` as a fully anchored pattern.
    pub fn compile(path: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", path))?;
        Ok(Self {
            source: path.to_string(),
            regex,
        })
    }

    /// Returns true if the whole of `path` matches.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoutePattern").field(&self.source).finish()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
