//! Naming functions for crumb labels
//!
//! A naming function gets the rendering context, the request, the raw path
//! fragment and whether the fragment is the current page, and returns:
//!
//! - `Ok(None)` when it has no opinion about the label
//! - `Ok(Some(""))` when the fragment should not appear in the trail
//! - `Ok(Some(label))` to name the crumb
//! - `Err(_)` when it failed; the resolver logs this and moves on
//!
//! Functions are looked up by name in a [`NamingRegistry`] and arranged into
//! an ordered [`NamingFunctions`] chain once at start-up.

use crate::config::Settings;
use crate::models::{CrumbRequest, RenderContext};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Naming function errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("Naming function failed: {0}")]
    Failed(String),

    #[error("Naming function {name} is unavailable")]
    Unavailable { name: String },

    #[error("Invalid context value for '{key}': {reason}")]
    InvalidContext { key: String, reason: String },
}

/// Result of a single naming function invocation
pub type NamingResult = Result<Option<String>, NamingError>;

/// A pluggable crumb naming function
pub trait NamingFunction: Send + Sync {
    /// Identifier used in log messages
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Compute the label for a path fragment
    fn name_crumb(
        &self,
        context: &RenderContext,
        request: &CrumbRequest,
        fragment: &str,
        is_current_page: bool,
    ) -> NamingResult;
}

impl<F> NamingFunction for F
where
    F: Fn(&RenderContext, &CrumbRequest, &str, bool) -> NamingResult + Send + Sync,
{
    fn name_crumb(
        &self,
        context: &RenderContext,
        request: &CrumbRequest,
        fragment: &str,
        is_current_page: bool,
    ) -> NamingResult {
        self(context, request, fragment, is_current_page)
    }
}

/// A closure with an explicit identifier
pub struct NamedFn<F> {
    id: String,
    f: F,
}

impl<F> NamingFunction for NamedFn<F>
where
    F: Fn(&RenderContext, &CrumbRequest, &str, bool) -> NamingResult + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn name_crumb(
        &self,
        context: &RenderContext,
        request: &CrumbRequest,
        fragment: &str,
        is_current_page: bool,
    ) -> NamingResult {
        (self.f)(context, request, fragment, is_current_page)
    }
}

/// Wrap a closure as a naming function with the given identifier
pub fn naming_fn<F>(id: impl Into<String>, f: F) -> NamedFn<F>
where
    F: Fn(&RenderContext, &CrumbRequest, &str, bool) -> NamingResult + Send + Sync,
{
    NamedFn { id: id.into(), f }
}

/// Names the current page after the title of the page object in the context.
///
/// Looks for an object under `page` with a string `title`. Ancestor
/// fragments are left alone.
#[derive(Debug, Clone, Default)]
pub struct PageTitle;

impl PageTitle {
    /// Registry name of this function
    pub const NAME: &'static str = "page_title";

    /// Context key holding the page object
    pub const CONTEXT_KEY: &'static str = "page";
}

impl NamingFunction for PageTitle {
    fn id(&self) -> &str {
        Self::NAME
    }

    fn name_crumb(
        &self,
        context: &RenderContext,
        _request: &CrumbRequest,
        _fragment: &str,
        is_current_page: bool,
    ) -> NamingResult {
        if !is_current_page {
            return Ok(None);
        }

        let Some(Value::Object(page)) = context.get(Self::CONTEXT_KEY) else {
            return Ok(None);
        };

        match page.get("title") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(title)) => Ok(Some(title.clone())),
            Some(other) => Err(NamingError::InvalidContext {
                key: format!("{}.title", Self::CONTEXT_KEY),
                reason: format!("expected a string, found {}", json_type_name(other)),
            }),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The naming function setting as seen by the resolver
#[derive(Clone, Default)]
pub enum NamingFunctions {
    /// No naming functions configured
    #[default]
    Absent,

    /// A setting exists but is not a list of functions
    Invalid { description: String },

    /// Functions to try in order
    Chain(Vec<Arc<dyn NamingFunction>>),
}

impl NamingFunctions {
    /// Build a chain from functions, tried in the given order
    pub fn chain<I>(functions: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn NamingFunction>>,
    {
        NamingFunctions::Chain(functions.into_iter().collect())
    }

    /// Append a function to the chain, turning an absent setting into a chain
    pub fn push(&mut self, function: Arc<dyn NamingFunction>) {
        match self {
            NamingFunctions::Chain(functions) => functions.push(function),
            NamingFunctions::Absent => *self = NamingFunctions::Chain(vec![function]),
            NamingFunctions::Invalid { description } => {
                warn!(
                    "Not adding naming function {} to invalid setting: {}",
                    function.id(),
                    description
                );
            }
        }
    }

    /// Identifiers of the functions in the chain
    pub fn ids(&self) -> Vec<&str> {
        match self {
            NamingFunctions::Chain(functions) => functions.iter().map(|f| f.id()).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Debug for NamingFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingFunctions::Absent => f.write_str("Absent"),
            NamingFunctions::Invalid { description } => f
                .debug_struct("Invalid")
                .field("description", description)
                .finish(),
            NamingFunctions::Chain(_) => f.debug_tuple("Chain").field(&self.ids()).finish(),
        }
    }
}

/// Table of named functions available to settings files
#[derive(Clone, Default)]
pub struct NamingRegistry {
    functions: BTreeMap<String, Arc<dyn NamingFunction>>,
}

impl NamingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in functions
    pub fn with_builtins() -> Self {
        Self::new().with(PageTitle::NAME, Arc::new(PageTitle))
    }

    /// Register a function (builder pattern)
    pub fn with(mut self, name: impl Into<String>, function: Arc<dyn NamingFunction>) -> Self {
        self.register(name, function);
        self
    }

    /// Register a function, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, function: Arc<dyn NamingFunction>) {
        self.functions.insert(name.into(), function);
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn NamingFunction>> {
        self.functions.get(name).cloned()
    }

    /// Look up a function by name, failing for unregistered names
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn NamingFunction>, NamingError> {
        self.get(name).ok_or_else(|| NamingError::Unavailable {
            name: name.to_string(),
        })
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    /// Turn the `naming_functions` setting into a chain.
    ///
    /// Entries that are not strings or name no registered function are
    /// skipped with a warning; the rest keep their order.
    pub fn build(&self, settings: &Settings) -> NamingFunctions {
        let Some(value) = settings.naming_functions.as_ref() else {
            return NamingFunctions::Absent;
        };

        let Some(entries) = value.as_array() else {
            return NamingFunctions::Invalid {
                description: format!(
                    "naming_functions must be a list of function names, found {}: {}",
                    value.type_str(),
                    value
                ),
            };
        };

        let mut functions = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(name) = entry.as_str() else {
                warn!(
                    "Skipping naming function entry {}: expected a function name, found {}",
                    entry,
                    entry.type_str()
                );
                continue;
            };

            match self.lookup(name) {
                Ok(function) => functions.push(function),
                Err(e) => warn!(
                    "Skipping naming function entry: {} (registered: {})",
                    e,
                    self.names().join(", ")
                ),
            }
        }

        NamingFunctions::Chain(functions)
    }
}

impl fmt::Debug for NamingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamingRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
