//! Data models for URL breadcrumbs
//!
//! This module defines the core data structures used throughout the resolver,
//! including the request overrides, the rendering context and the resolved
//! crumb trail handed to the rendering layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Href and fragment shared by the root crumb
pub const ROOT_PATH: &str = "/";

/// A single entry in a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    /// Path prefix up to and including this fragment
    pub href: String,

    /// Raw path fragment this crumb represents
    pub fragment: String,

    /// Display text
    pub label: String,
}

impl Crumb {
    /// Create a new crumb
    pub fn new(href: impl Into<String>, fragment: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            fragment: fragment.into(),
            label: label.into(),
        }
    }

    /// Create the root crumb with the given home name
    pub fn root(home_name: impl Into<String>) -> Self {
        Self::new(ROOT_PATH, ROOT_PATH, home_name)
    }

    /// Check if this is the root crumb
    pub fn is_root(&self) -> bool {
        self.href == ROOT_PATH
    }
}

/// Resolved breadcrumb trail: the data contract for the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrumbTrail {
    /// Crumbs from root to current page
    pub crumbs: Vec<Crumb>,

    /// Delimiter rendered between crumbs, passed through unescaped
    pub delimiter: String,
}

impl CrumbTrail {
    /// The root crumb, always first
    pub fn root(&self) -> Option<&Crumb> {
        self.crumbs.first()
    }

    /// The last crumb, rendered without a link
    pub fn current(&self) -> Option<&Crumb> {
        self.crumbs.last()
    }

    /// All crumbs except the last one
    pub fn ancestors(&self) -> &[Crumb] {
        match self.crumbs.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// Display labels in trail order
    pub fn labels(&self) -> Vec<&str> {
        self.crumbs.iter().map(|c| c.label.as_str()).collect()
    }

    /// Number of crumbs in the trail
    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    /// Check if the trail has no crumbs
    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }
}

/// The parts of an incoming request the resolver looks at
///
/// `crumb` forces the label of the last fragment only. `crumbs` forces the
/// label of any fragment used as a key; a `None` label suppresses the crumb.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrumbRequest {
    /// Request URL path
    pub path: String,

    /// Label override for the current page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crumb: Option<String>,

    /// Label overrides keyed by raw fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crumbs: Option<BTreeMap<String, Option<String>>>,
}

impl CrumbRequest {
    /// Create a request for the given path with no overrides
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the current page label (builder pattern)
    pub fn with_crumb(mut self, label: impl Into<String>) -> Self {
        self.crumb = Some(label.into());
        self
    }

    /// Replace the fragment override map (builder pattern)
    pub fn with_crumbs(mut self, crumbs: BTreeMap<String, Option<String>>) -> Self {
        self.crumbs = Some(crumbs);
        self
    }

    /// Add a single fragment label override (builder pattern)
    pub fn with_crumb_override(mut self, fragment: impl Into<String>, label: impl Into<String>) -> Self {
        self.crumbs
            .get_or_insert_with(BTreeMap::new)
            .insert(fragment.into(), Some(label.into()));
        self
    }

    /// Hide the crumb for a fragment (builder pattern)
    pub fn suppress(mut self, fragment: impl Into<String>) -> Self {
        self.crumbs
            .get_or_insert_with(BTreeMap::new)
            .insert(fragment.into(), None);
        self
    }

    /// Look up a fragment override.
    ///
    /// The outer `Option` tells whether the fragment is a key at all, the
    /// inner one carries the (possibly suppressed) label.
    pub fn crumb_override(&self, fragment: &str) -> Option<Option<&str>> {
        self.crumbs
            .as_ref()
            .and_then(|map| map.get(fragment))
            .map(|label| label.as_deref())
    }
}

/// Opaque key-value lookup standing in for the template rendering context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: Map<String, Value>,
}

impl RenderContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a raw value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a value only if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Merge another context on top of this one
    pub fn extend(&mut self, other: RenderContext) {
        self.values.extend(other.values);
    }
}

impl From<Map<String, Value>> for RenderContext {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Trails produced for several request paths at once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailReport {
    /// One entry per requested path, in input order
    pub trails: Vec<PathTrail>,

    /// Report metadata
    pub metadata: ReportMetadata,
}

/// A resolved trail together with the path it was resolved from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathTrail {
    /// Request path
    pub path: String,

    /// Resolved trail
    #[serde(flatten)]
    pub trail: CrumbTrail,
}

/// Metadata about a batch resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Number of request paths resolved
    pub path_count: usize,

    /// Duration of the batch in milliseconds
    pub duration_ms: u64,

    /// ISO timestamp of the batch
    pub generated_at: String,

    /// Tool version
    pub tool_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trail() -> CrumbTrail {
        CrumbTrail {
            crumbs: vec![
                Crumb::root("Home"),
                Crumb::new("/docs", "docs", "Docs"),
                Crumb::new("/docs/intro", "intro", "Intro"),
            ],
            delimiter: "&raquo;".to_string(),
        }
    }

    #[test]
    fn test_trail_accessors() {
        let trail = sample_trail();
        assert!(trail.root().unwrap().is_root());
        assert_eq!(trail.current().unwrap().label, "Intro");
        assert_eq!(trail.ancestors().len(), 2);
        assert_eq!(trail.labels(), vec!["Home", "Docs", "Intro"]);
    }

    #[test]
    fn test_request_overrides() {
        let request = CrumbRequest::new("/a/b")
            .with_crumb_override("a", "Alpha")
            .suppress("b");

        assert_eq!(request.crumb_override("a"), Some(Some("Alpha")));
        assert_eq!(request.crumb_override("b"), Some(None));
        assert_eq!(request.crumb_override("c"), None);
        assert!(request.crumb.is_none());
    }

    #[test]
    fn test_request_deserialize_with_null_label() {
        let request: CrumbRequest =
            serde_json::from_str(r#"{"path": "/a/b", "crumbs": {"a": null, "b": "Bee"}}"#)
                .unwrap();

        assert_eq!(request.crumb_override("a"), Some(None));
        assert_eq!(request.crumb_override("b"), Some(Some("Bee")));
    }

    #[test]
    fn test_context_lookup() {
        let context = RenderContext::new()
            .with("crumb_home_name", "Start")
            .with("count", 3);

        assert_eq!(context.get_str("crumb_home_name"), Some("Start"));
        assert_eq!(context.get_str("count"), None);
        assert!(context.contains_key("count"));
    }

    #[test]
    fn test_context_extend_overrides_existing_keys() {
        let mut context = RenderContext::new()
            .with("crumb_home_name", "From File")
            .with("page", "kept");
        context.extend(RenderContext::new().with("crumb_home_name", "From Flag"));

        assert_eq!(context.get_str("crumb_home_name"), Some("From Flag"));
        assert_eq!(context.get_str("page"), Some("kept"));
    }
}
