//! url_breadcrumbs_core - Core library for URL breadcrumbs
//!
//! This crate derives a breadcrumb trail from the path of a request URL.
//! Each path fragment becomes a crumb whose label comes from, in order:
//!
//! - **Request overrides**: a label for the current page, or labels keyed by
//!   fragment (a `None` label hides the crumb).
//! - **Naming functions**: pluggable functions tried in order until one
//!   returns a label. Failing functions are logged and skipped.
//! - **Default formatting**: `-`, `_` and `+` become spaces and the result is
//!   title-cased.
//!
//! The trail always starts with a root crumb for `/`, named `"Home"` unless
//! the rendering context says otherwise.
//!
//! # Example
//!
//! ```rust
//! use url_breadcrumbs_core::{BreadcrumbResolver, CrumbRequest, RenderContext};
//!
//! let resolver = BreadcrumbResolver::default();
//! let request = CrumbRequest::new("/some-kind/of_url/path").with_crumb("Details");
//! let trail = resolver.resolve_request(&request, &RenderContext::new());
//!
//! assert_eq!(trail.labels(), vec!["Home", "Some Kind", "Of Url", "Details"]);
//! assert_eq!(trail.delimiter, "&raquo;");
//! ```

pub mod config;
pub mod format;
pub mod models;
pub mod naming;
pub mod output;
pub mod resolver;

// Re-exports for convenience
pub use config::{load_context, ConfigError, CrumbConfig, Settings};
pub use format::default_label;
pub use models::{Crumb, CrumbRequest, CrumbTrail, PathTrail, RenderContext, TrailReport};
pub use naming::{
    naming_fn, NamingError, NamingFunction, NamingFunctions, NamingRegistry, NamingResult,
    PageTitle,
};
pub use output::{format_report, format_trail, FormatError, OutputFormat};
pub use resolver::{resolve, segments, BreadcrumbResolver};
