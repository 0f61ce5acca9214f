//! url-breadcrumbs CLI
//!
//! Resolves breadcrumb trails for request URL paths and prints them as JSON,
//! YAML, ANSI colored text or plain text.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use url_breadcrumbs_core::config::{DELIMITER_KEY, HOME_NAME_KEY};
use url_breadcrumbs_core::{
    format_report, format_trail, load_context, BreadcrumbResolver, CrumbRequest, NamingRegistry,
    OutputFormat, RenderContext, Settings,
};

/// Breadcrumb trails for request URL paths
#[derive(Parser)]
#[command(name = "url-breadcrumbs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Breadcrumb trails derived from request URL paths")]
#[command(long_about = r#"
url-breadcrumbs: breadcrumb trails for request URL paths

Each path fragment becomes a crumb. Labels come from the --crumb / --crumbs
overrides, then from the naming functions listed in the settings file, and
finally from the title-cased fragment ("of_url" becomes "Of Url").

Examples:
  url-breadcrumbs /some-kind/of_url/path                 # JSON trail
  url-breadcrumbs /docs/intro --format text              # Home &raquo; Docs &raquo; Intro
  url-breadcrumbs /docs/intro --crumb "Getting Started"  # rename current page
  url-breadcrumbs /a/b --crumbs a=Alpha --suppress b     # rename / hide fragments
  url-breadcrumbs /a /b/c --format ansi                  # several trails
  url-breadcrumbs --paths-file paths.txt --settings breadcrumbs.toml
"#)]
pub struct Args {
    /// Request paths to resolve
    pub paths: Vec<String>,

    /// File with one request path per line
    #[arg(long)]
    pub paths_file: Option<PathBuf>,

    /// Settings file (TOML) listing naming functions and defaults
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Rendering context file (JSON object)
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Label of the root crumb
    #[arg(long)]
    pub home_name: Option<String>,

    /// Delimiter between crumbs (written verbatim)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Label for the current page
    #[arg(long)]
    pub crumb: Option<String>,

    /// Label override for a fragment, as FRAGMENT=LABEL (repeatable)
    #[arg(long, value_parser = parse_crumb_override, action = clap::ArgAction::Append)]
    pub crumbs: Vec<(String, String)>,

    /// Fragment to leave out of the trail (repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub suppress: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Auto)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    /// ANSI on a terminal, JSON otherwise
    Auto,
    Json,
    Yaml,
    Ansi,
    Text,
}

impl OutputFormatArg {
    fn resolve(&self, to_terminal: bool) -> OutputFormat {
        match self {
            OutputFormatArg::Auto if to_terminal => OutputFormat::Ansi,
            OutputFormatArg::Auto => OutputFormat::Json,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Text => OutputFormat::Text,
        }
    }
}

fn parse_crumb_override(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((fragment, label)) if !fragment.is_empty() => {
            Ok((fragment.to_string(), label.to_string()))
        }
        _ => Err(format!("expected FRAGMENT=LABEL, got '{}'", value)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let resolver = build_resolver(&args)?;
    let context = build_context(&args)?;
    let paths = collect_paths(&args)?;

    let to_terminal = args.output.is_none() && atty::is(atty::Stream::Stdout);
    let format = args.format.resolve(to_terminal);
    debug!("Resolving {} path(s) as {:?}", paths.len(), format);

    let output = if paths.len() == 1 && args.paths_file.is_none() {
        let request = build_request(&paths[0], &args);
        let trail = resolver.resolve_request(&request, &context);
        format_trail(&trail, format)?
    } else {
        let requests: Vec<CrumbRequest> = paths.iter().map(|p| build_request(p, &args)).collect();
        let report = resolver.resolve_batch(&requests, &context);
        format_report(&report, format)?
    };

    write_output(&output, args.output.as_ref())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

/// Resolver built once from the settings file, if any
fn build_resolver(args: &Args) -> Result<BreadcrumbResolver> {
    let settings = match args.settings {
        Some(ref path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let registry = NamingRegistry::with_builtins();
    Ok(BreadcrumbResolver::from_settings(&settings, &registry))
}

/// Context file overlaid with the command-line home name and delimiter
fn build_context(args: &Args) -> Result<RenderContext> {
    let mut context = match args.context {
        Some(ref path) => load_context(path)
            .with_context(|| format!("Failed to load context from {}", path.display()))?,
        None => RenderContext::new(),
    };

    let mut overrides = RenderContext::new();
    if let Some(ref home_name) = args.home_name {
        overrides.insert(HOME_NAME_KEY, home_name.as_str());
    }
    if let Some(ref delimiter) = args.delimiter {
        overrides.insert(DELIMITER_KEY, delimiter.as_str());
    }
    context.extend(overrides);

    Ok(context)
}

fn collect_paths(args: &Args) -> Result<Vec<String>> {
    let mut paths = args.paths.clone();

    if let Some(ref file) = args.paths_file {
        let source = fs::read_to_string(file)
            .with_context(|| format!("Failed to read paths from {}", file.display()))?;
        paths.extend(
            source
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    if paths.is_empty() {
        anyhow::bail!("No request paths given (pass paths as arguments or use --paths-file)");
    }

    Ok(paths)
}

fn build_request(path: &str, args: &Args) -> CrumbRequest {
    let mut request = CrumbRequest::new(path);

    if let Some(ref crumb) = args.crumb {
        request = request.with_crumb(crumb.clone());
    }

    if !args.crumbs.is_empty() || !args.suppress.is_empty() {
        let mut overrides: BTreeMap<String, Option<String>> = args
            .crumbs
            .iter()
            .map(|(fragment, label)| (fragment.clone(), Some(label.clone())))
            .collect();
        for fragment in &args.suppress {
            overrides.insert(fragment.clone(), None);
        }
        request = request.with_crumbs(overrides);
    }

    request
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}
