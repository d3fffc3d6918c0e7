//! # URL Resolution
//!
//! Hrefs are produced by *route helpers*: named callables that take positional
//! id arguments plus url options (`host`, `protocol`, `port`) and return a URL.
//! The host application exposes them through the [`UrlHelpers`] trait; the
//! crate ships [`RouteSet`], an in-memory table of path templates.
//!
//! ## Helper names
//!
//! [`UrlResolver`] derives a helper name from path segments: the web service's
//! `api_prefix` (if any) followed by the segments, joined with `_` and
//! lower-cased.
//!
//! | Target | Segments | Helper (no prefix) | Helper (prefix `api`) |
//! |--------|----------|--------------------|-----------------------|
//! | member | `["foo"]` + id | `foo` | `api_foo` |
//! | nested collection | `["bar", "dingos"]` + owner id | `bar_dingos` | `api_bar_dingos` |
//! | collection | `["bars"]` | `bars` | `api_bars` |
//!
//! A `url_for` override names the helper directly and bypasses the prefix.
//!
//! ## Misses
//!
//! A helper that does not exist, or that cannot be filled from the given
//! arguments, is a normal outcome: resolution yields `None` and the document
//! carries `null` for that href.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

/// Named url options such as `host`.
pub type UrlOptions = serde_json::Map<String, JsonValue>;

/// The route-generation collaborator.
pub trait UrlHelpers: Send + Sync {
    /// Calls the helper `helper`, or returns `None` if no such helper exists
    /// or it cannot build a URL from `args`.
    fn call(&self, helper: &str, args: &[JsonValue], options: &UrlOptions) -> Option<String>;
}

/// Route helpers of an application without routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRoutes;

impl UrlHelpers for NoRoutes {
    fn call(&self, _helper: &str, _args: &[JsonValue], _options: &UrlOptions) -> Option<String> {
        None
    }
}

/// Derives helper names and calls them with the configured url options.
#[derive(Clone)]
pub struct UrlResolver {
    helpers: Arc<dyn UrlHelpers>,
    api_prefix: Option<String>,
    default_url_options: UrlOptions,
}

impl UrlResolver {
    pub fn new(helpers: Arc<dyn UrlHelpers>, api_prefix: Option<&str>, default_url_options: UrlOptions) -> Self {
        Self {
            helpers,
            api_prefix: api_prefix.filter(|prefix| !prefix.is_empty()).map(str::to_string),
            default_url_options,
        }
    }

    pub fn api_prefix(&self) -> Option<&str> {
        self.api_prefix.as_deref()
    }

    /// The helper name for `segments`, prefixed with the api prefix.
    pub fn helper_name(&self, segments: &[&str]) -> String {
        self.api_prefix
            .as_deref()
            .into_iter()
            .chain(segments.iter().copied())
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }

    /// Resolves the helper derived from `segments`.
    pub fn resolve(&self, segments: &[&str], args: &[JsonValue]) -> Option<String> {
        self.call(&self.helper_name(segments), args)
    }

    /// Resolves an explicitly named helper.
    pub fn resolve_override(&self, helper: &str, args: &[JsonValue]) -> Option<String> {
        self.call(helper, args)
    }

    fn call(&self, helper: &str, args: &[JsonValue]) -> Option<String> {
        let url = self.helpers.call(helper, args, &self.default_url_options);
        match &url {
            Some(url) => debug!(helper, %url, "Resolved"),
            None => debug!(helper, "No route"),
        }
        url
    }
}

impl std::fmt::Debug for UrlResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlResolver")
            .field("api_prefix", &self.api_prefix)
            .field("default_url_options", &self.default_url_options)
            .finish_non_exhaustive()
    }
}

/// In-memory route table: helper name → path template.
///
/// Templates use `:name` placeholders, filled positionally from the helper's
/// arguments:
///
/// ```rust
/// use restful::url::{RouteSet, UrlHelpers, UrlOptions};
/// use serde_json::json;
///
/// let routes = RouteSet::new()
///     .route("bar", "/bars/:id")
///     .route("bar_dingos", "/bars/:bar_id/dingos");
///
/// let mut options = UrlOptions::new();
/// options.insert("host".into(), json!("test.org"));
///
/// assert_eq!(
///     routes.call("bar_dingos", &[json!(3)], &options).as_deref(),
///     Some("http://test.org/bars/3/dingos")
/// );
/// assert_eq!(routes.call("bar", &[json!(3)], &UrlOptions::new()).as_deref(), Some("/bars/3"));
/// assert_eq!(routes.call("bar", &[], &options), None);
/// assert_eq!(routes.call("missing", &[], &options), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    routes: BTreeMap<String, String>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route, replacing any route with the same helper name.
    pub fn route(mut self, helper: &str, template: &str) -> Self {
        self.add(helper, template);
        self
    }

    pub fn add(&mut self, helper: &str, template: &str) -> &mut Self {
        self.routes.insert(helper.to_string(), template.to_string());
        self
    }

    pub fn helpers(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Fills the template of `helper` with `args`.
    pub fn path(&self, helper: &str, args: &[JsonValue]) -> Option<String> {
        let template = self.routes.get(helper)?;
        let mut args = args.iter();
        let mut segments = Vec::new();
        for segment in template.split('/') {
            match segment.strip_prefix(':') {
                Some(placeholder) => match args.next() {
                    Some(arg) => segments.push(path_segment(arg)),
                    None => {
                        warn!(helper, placeholder, "Missing route argument");
                        return None;
                    }
                },
                None => segments.push(segment.to_string()),
            }
        }
        Some(segments.join("/"))
    }
}

impl UrlHelpers for RouteSet {
    fn call(&self, helper: &str, args: &[JsonValue], options: &UrlOptions) -> Option<String> {
        let path = self.path(helper, args)?;
        Some(url_for(options, &path))
    }
}

/// Prefixes `path` with `protocol://host[:port]` when a host is configured.
pub fn url_for(options: &UrlOptions, path: &str) -> String {
    let Some(host) = options.get("host").and_then(JsonValue::as_str) else {
        return path.to_string();
    };
    let protocol = options
        .get("protocol")
        .and_then(JsonValue::as_str)
        .map(|protocol| protocol.trim_end_matches("://"))
        .unwrap_or("http");
    match options.get("port").filter(|port| !port.is_null()) {
        Some(port) => format!("{protocol}://{host}:{}{path}", path_segment(port)),
        None => format!("{protocol}://{host}{path}"),
    }
}

fn path_segment(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
