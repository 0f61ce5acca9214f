//! Breadcrumb resolver module
//!
//! This module turns a request path into a crumb trail. Each fragment is
//! named by the first of these that yields a label:
//!
//! 1. the request's current-page override (last fragment only)
//! 2. the request's fragment override map
//! 3. the configured naming functions, in order
//! 4. the title-cased fragment
//!
//! Fragments whose label ends up empty are left out of the trail.

use crate::config::{CrumbConfig, Settings};
use crate::format::default_label;
use crate::models::{
    Crumb, CrumbRequest, CrumbTrail, PathTrail, RenderContext, ReportMetadata, TrailReport,
};
use crate::naming::{NamingFunctions, NamingRegistry};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, warn};

/// Split a request path into its non-empty fragments
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Resolve the crumb trail for a request path.
///
/// Never fails: naming functions that error are logged and treated as
/// having no opinion.
pub fn resolve(
    request_path: &str,
    context: &RenderContext,
    request: &CrumbRequest,
    config: &CrumbConfig,
    naming: &NamingFunctions,
) -> CrumbTrail {
    let fragments = segments(request_path);

    if let NamingFunctions::Invalid { description } = naming {
        warn!(
            "Naming functions setting is invalid and will be ignored: {}",
            description
        );
    }

    let mut crumbs = Vec::with_capacity(fragments.len() + 1);
    crumbs.push(Crumb::root(config.home_name.clone()));

    let mut href = String::with_capacity(request_path.len());
    for (i, fragment) in fragments.iter().enumerate() {
        let is_current_page = i + 1 == fragments.len();
        href.push('/');
        href.push_str(fragment);

        let label = name_fragment(context, request, naming, fragment, is_current_page);
        match label {
            Some(label) if !label.is_empty() => {
                crumbs.push(Crumb::new(href.clone(), *fragment, label));
            }
            _ => debug!("Skipping crumb for fragment '{}'", fragment),
        }
    }

    CrumbTrail {
        crumbs,
        delimiter: config.delimiter.clone(),
    }
}

/// Pick the label for one fragment; `None` means the crumb is suppressed
fn name_fragment(
    context: &RenderContext,
    request: &CrumbRequest,
    naming: &NamingFunctions,
    fragment: &str,
    is_current_page: bool,
) -> Option<String> {
    if is_current_page {
        if let Some(ref crumb) = request.crumb {
            return Some(crumb.clone());
        }
    }

    if let Some(label) = request.crumb_override(fragment) {
        return label.map(str::to_string);
    }

    if let Some(label) = call_naming_functions(context, request, naming, fragment, is_current_page)
    {
        return Some(label);
    }

    Some(default_label(fragment))
}

/// First non-`None` label from the chain, skipping functions that fail
fn call_naming_functions(
    context: &RenderContext,
    request: &CrumbRequest,
    naming: &NamingFunctions,
    fragment: &str,
    is_current_page: bool,
) -> Option<String> {
    let NamingFunctions::Chain(functions) = naming else {
        return None;
    };

    for function in functions {
        match function.name_crumb(context, request, fragment, is_current_page) {
            Ok(Some(label)) => {
                debug!("Naming function {} named '{}'", function.id(), fragment);
                return Some(label);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    "Crumb naming function {} failed for fragment '{}': {}",
                    function.id(),
                    fragment,
                    e
                );
            }
        }
    }

    None
}

/// Resolver holding the application-wide defaults and naming functions
#[derive(Debug, Clone, Default)]
pub struct BreadcrumbResolver {
    defaults: CrumbConfig,
    naming: NamingFunctions,
}

impl BreadcrumbResolver {
    /// Create a resolver with default config and the given naming functions
    pub fn new(naming: NamingFunctions) -> Self {
        Self {
            defaults: CrumbConfig::default(),
            naming,
        }
    }

    /// Create a resolver from settings, looking functions up in the registry
    pub fn from_settings(settings: &Settings, registry: &NamingRegistry) -> Self {
        Self {
            defaults: settings.crumb_config(),
            naming: registry.build(settings),
        }
    }

    /// Set the defaults used when the context has no overrides (builder pattern)
    pub fn with_defaults(mut self, defaults: CrumbConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// The configured naming functions
    pub fn naming(&self) -> &NamingFunctions {
        &self.naming
    }

    /// Config in effect for the given context
    pub fn config_for(&self, context: &RenderContext) -> CrumbConfig {
        self.defaults.clone().overlay(context)
    }

    /// Resolve the trail for a request's own path
    pub fn resolve_request(&self, request: &CrumbRequest, context: &RenderContext) -> CrumbTrail {
        let config = self.config_for(context);
        resolve(&request.path, context, request, &config, &self.naming)
    }

    /// Resolve several independent requests, keeping input order
    pub fn resolve_batch(&self, requests: &[CrumbRequest], context: &RenderContext) -> TrailReport {
        let start = Instant::now();

        let trails: Vec<PathTrail> = requests
            .par_iter()
            .map(|request| PathTrail {
                path: request.path.clone(),
                trail: self.resolve_request(request, context),
            })
            .collect();

        let metadata = ReportMetadata {
            path_count: trails.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        TrailReport { trails, metadata }
    }
}
