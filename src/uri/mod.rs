//
//  fecru-client
//  uri/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # URI Builder
//!
//! This module provides [`UriBuilder`], the path and query composition type
//! used by every endpoint method in the crate. A builder is created per
//! logical resource path, extended with chained segment and parameter calls,
//! and consumed exactly once by a transport verb operation that renders it
//! to the final request URL.
//!
//! ## Rendering Rules
//!
//! - Path segments render in insertion order, each percent-encoded.
//! - Segments containing embedded slashes are split and flattened, so
//!   `add_segment("a/b")` and `add_segment("a").add_segment("b")` render
//!   identically. Empty fragments (leading, trailing, or doubled slashes)
//!   are dropped before encoding.
//! - Query keys render in first-insertion order; values for one key render
//!   in their own insertion order.
//! - A key may render repeated (`t=git&t=svn`) or joined (`t=git,svn`)
//!   depending on how it was added; both modes are per-key.
//!
//! ## Example
//!
//! ```rust
//! use fecru_client::uri::UriBuilder;
//!
//! let url = UriBuilder::new("https://fecru.example.com")
//!     .add_segment("rest-service/repositories-v1")
//!     .add_segment("my repo")
//!     .set_parameter("expand", "details")
//!     .render();
//!
//! assert_eq!(
//!     url,
//!     "https://fecru.example.com/rest-service/repositories-v1/my%20repo?expand=details"
//! );
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left verbatim when encoding a path segment or query component.
///
/// This matches the unreserved set of `encodeURIComponent`, which is what the
/// remote FeCru endpoints were built against: alphanumerics plus
/// `- _ . ~ ! * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How the values of one query key are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderMode {
    /// One `key=value` pair per value: `t=git&t=svn`.
    Repeat,
    /// A single pair with comma-collapsed values: `t=git,svn`.
    ///
    /// Some FeCru endpoints only understand the collapsed form, so join
    /// semantics are opt-in per key.
    Join,
}

/// One query key with its ordered values.
#[derive(Debug, Clone)]
struct Parameter {
    key: String,
    values: Vec<String>,
    mode: RenderMode,
}

/// A value for one entry in a parameter map.
///
/// Used with [`UriBuilder::set_parameters`] to express the shape of a remote
/// query-parameter object: a key maps to either a single value or an ordered
/// list of values. Absent keys are expressed with `Option::None` on the entry
/// and are skipped entirely (absence, not empty string).
///
/// # Example
///
/// ```rust
/// use fecru_client::uri::{QueryValue, UriBuilder};
///
/// let url = UriBuilder::new("https://fecru.example.com")
///     .add_segment("changesets")
///     .set_parameters([
///         ("path", Some(QueryValue::from("src/main.rs"))),
///         ("committer", None),
///         ("types", Some(QueryValue::from(vec!["git".to_string(), "svn".to_string()]))),
///     ])
///     .render();
///
/// assert!(url.ends_with("?path=src%2Fmain.rs&types=git&types=svn"));
/// ```
#[derive(Debug, Clone)]
pub enum QueryValue {
    /// A single value for the key.
    Single(String),
    /// An ordered list of values for the key.
    ///
    /// An empty list is a no-op: the key does not render at all.
    Many(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// Composable request-URI builder.
///
/// `UriBuilder` holds an immutable base (host plus optional web context),
/// an ordered list of pre-encoding path segments, and an ordered multi-value
/// query-parameter map. All composition methods move `self` and return it,
/// so a builder is assembled in a single chained expression and consumed by
/// [`render`](Self::render).
///
/// Building never fails: encoding happens at render time and every input
/// string has a defined rendering. A malformed base is a caller contract
/// violation and is caught earlier, when the connector validates its
/// configuration.
///
/// # Example
///
/// ```rust
/// use fecru_client::uri::UriBuilder;
///
/// let url = UriBuilder::new("https://fecru.example.com")
///     .add_segment("rest-service/reviews-v1")
///     .add_segment("CR-1")
///     .add_segment("complete")
///     .set_parameter("ignoreWarnings", "true")
///     .render();
///
/// assert_eq!(
///     url,
///     "https://fecru.example.com/rest-service/reviews-v1/CR-1/complete?ignoreWarnings=true"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct UriBuilder {
    base: String,
    segments: Vec<String>,
    parameters: Vec<Parameter>,
}

impl UriBuilder {
    /// Creates a builder rooted at `base`.
    ///
    /// # Parameters
    ///
    /// * `base` - The scheme, host, optional port, and optional web-context
    ///   prefix, without a trailing slash (e.g. `https://fecru.example.com`
    ///   or `https://example.com:8060/context`).
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            segments: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Appends one or more path segments.
    ///
    /// The text is split on `/`, empty fragments are discarded, and the
    /// remaining fragments are appended in order. Splitting makes the call
    /// idempotent with respect to leading and trailing slashes:
    /// `add_segment("/a/b/")` yields the same two segments as
    /// `add_segment("a").add_segment("b")`.
    ///
    /// Fragments are stored raw and percent-encoded at render time, so a
    /// repository named `my repo` renders as `my%20repo`.
    pub fn add_segment(mut self, text: &str) -> Self {
        for fragment in text.split('/').filter(|f| !f.is_empty()) {
            self.segments.push(fragment.to_string());
        }
        self
    }

    /// Appends one value to the given query key.
    ///
    /// Repeated calls for the same key append to its value list; they never
    /// overwrite. The key renders one `key=value` pair per value unless it
    /// was introduced via [`set_parameters_joined`](Self::set_parameters_joined).
    pub fn set_parameter(mut self, key: &str, value: impl Into<String>) -> Self {
        self.push_value(key, value.into(), RenderMode::Repeat);
        self
    }

    /// Appends one value to the given query key, or does nothing.
    ///
    /// `None` is a no-op: the key is absent from the rendered URI, which is
    /// distinct from rendering it with an empty value.
    pub fn set_parameter_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.set_parameter(key, value),
            None => self,
        }
    }

    /// Appends every value in `values` to the given query key.
    ///
    /// An empty slice is a no-op. The key renders one `key=value` pair per
    /// value, preserving slice order: `set_parameters_from_array("t",
    /// &["git", "svn"])` renders `t=git&t=svn`.
    pub fn set_parameters_from_array<S: AsRef<str>>(mut self, key: &str, values: &[S]) -> Self {
        for value in values {
            self.push_value(key, value.as_ref().to_string(), RenderMode::Repeat);
        }
        self
    }

    /// Appends every value in `values` to the given query key with join
    /// rendering.
    ///
    /// The key renders as a single comma-collapsed pair:
    /// `set_parameters_joined("t", &["git", "svn"])` renders `t=git,svn`.
    /// Values are individually percent-encoded; the joining commas are not.
    /// An empty slice is a no-op.
    pub fn set_parameters_joined<S: AsRef<str>>(mut self, key: &str, values: &[S]) -> Self {
        for value in values {
            self.push_value(key, value.as_ref().to_string(), RenderMode::Join);
        }
        self
    }

    /// Applies a whole parameter map at once.
    ///
    /// Each entry is `(key, Option<QueryValue>)`. Entries whose value is
    /// `None` are skipped entirely. [`QueryValue::Single`] forwards to
    /// [`set_parameter`](Self::set_parameter); [`QueryValue::Many`] forwards
    /// to [`set_parameters_from_array`](Self::set_parameters_from_array),
    /// so an empty list is also a no-op.
    pub fn set_parameters<K, I>(mut self, entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Option<QueryValue>)>,
    {
        for (key, value) in entries {
            self = match value {
                Some(QueryValue::Single(value)) => self.set_parameter(key.as_ref(), value),
                Some(QueryValue::Many(values)) => {
                    self.set_parameters_from_array(key.as_ref(), &values)
                }
                None => self,
            };
        }
        self
    }

    /// Renders the final URL and consumes the builder.
    ///
    /// Produces `base` + `/` + encoded segments joined by `/`, then, if any
    /// parameters were added, `?` + the encoded `key=value` pairs joined by
    /// `&`. Keys render in first-insertion order and the values of one key
    /// in their insertion order, so a given builder always renders the same
    /// string.
    pub fn render(self) -> String {
        let mut out = self.base;

        for segment in &self.segments {
            out.push('/');
            out.push_str(&encode(segment));
        }

        if !self.parameters.is_empty() {
            out.push('?');
            let mut first = true;
            for parameter in &self.parameters {
                let key = encode(&parameter.key);
                match parameter.mode {
                    RenderMode::Repeat => {
                        for value in &parameter.values {
                            if !first {
                                out.push('&');
                            }
                            first = false;
                            out.push_str(&key);
                            out.push('=');
                            out.push_str(&encode(value));
                        }
                    }
                    RenderMode::Join => {
                        if !first {
                            out.push('&');
                        }
                        first = false;
                        out.push_str(&key);
                        out.push('=');
                        let joined: Vec<String> =
                            parameter.values.iter().map(|v| encode(v)).collect();
                        out.push_str(&joined.join(","));
                    }
                }
            }
        }

        out
    }

    fn push_value(&mut self, key: &str, value: String, mode: RenderMode) {
        match self.parameters.iter_mut().find(|p| p.key == key) {
            Some(parameter) => parameter.values.push(value),
            None => self.parameters.push(Parameter {
                key: key.to_string(),
                values: vec![value],
                mode,
            }),
        }
    }
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://fecru.example.com";

    #[test]
    fn test_slash_segments_flatten() {
        let composite = UriBuilder::new(BASE).add_segment("a/b").add_segment("c");
        let split = UriBuilder::new(BASE)
            .add_segment("a")
            .add_segment("b")
            .add_segment("c");
        assert_eq!(composite.render(), split.render());
    }

    #[test]
    fn test_leading_and_trailing_slashes_dropped() {
        let url = UriBuilder::new(BASE).add_segment("/a/b/").render();
        assert_eq!(url, "https://fecru.example.com/a/b");
    }

    #[test]
    fn test_segments_percent_encoded() {
        let url = UriBuilder::new(BASE).add_segment("my repo").render();
        assert_eq!(url, "https://fecru.example.com/my%20repo");
    }

    #[test]
    fn test_parameter_absence_is_not_empty_string() {
        let url = UriBuilder::new(BASE)
            .add_segment("r")
            .set_parameters([("a", None), ("b", Some(QueryValue::from("x")))])
            .render();
        assert_eq!(url, "https://fecru.example.com/r?b=x");
    }

    #[test]
    fn test_empty_array_renders_nothing() {
        let url = UriBuilder::new(BASE)
            .add_segment("r")
            .set_parameters([("a", Some(QueryValue::Many(Vec::new())))])
            .render();
        assert_eq!(url, "https://fecru.example.com/r");
    }

    #[test]
    fn test_multi_value_parameters_preserve_order() {
        let url = UriBuilder::new(BASE)
            .add_segment("r")
            .set_parameters_from_array("t", &["git", "svn"])
            .render();
        assert_eq!(url, "https://fecru.example.com/r?t=git&t=svn");
    }

    #[test]
    fn test_joined_parameters_collapse_with_commas() {
        let url = UriBuilder::new(BASE)
            .add_segment("r")
            .set_parameters_joined("t", &["git", "svn"])
            .render();
        assert_eq!(url, "https://fecru.example.com/r?t=git,svn");
    }

    #[test]
    fn test_set_parameter_appends_instead_of_overwriting() {
        let url = UriBuilder::new(BASE)
            .add_segment("r")
            .set_parameter("t", "git")
            .set_parameter("t", "svn")
            .render();
        assert_eq!(url, "https://fecru.example.com/r?t=git&t=svn");
    }

    #[test]
    fn test_keys_render_in_first_insertion_order() {
        let url = UriBuilder::new(BASE)
            .add_segment("r")
            .set_parameter("z", "1")
            .set_parameter("a", "2")
            .set_parameter("z", "3")
            .render();
        assert_eq!(url, "https://fecru.example.com/r?z=1&z=3&a=2");
    }

    #[test]
    fn test_query_values_percent_encoded() {
        let url = UriBuilder::new(BASE)
            .add_segment("r")
            .set_parameter("path", "src/main.rs")
            .render();
        assert_eq!(url, "https://fecru.example.com/r?path=src%2Fmain.rs");
    }

    #[test]
    fn test_optional_parameter_none_is_noop() {
        let url = UriBuilder::new(BASE)
            .add_segment("r")
            .set_parameter_opt("limit", None::<String>)
            .set_parameter_opt("start", Some("25"))
            .render();
        assert_eq!(url, "https://fecru.example.com/r?start=25");
    }
}
