//! # Registry
//!
//! The [`Registry`] owns everything a serialization reads besides the subject:
//! the registered web services, the application-wide default url options and
//! the route helpers.
//!
//! ## Lifecycle
//!
//! 1. **Startup**: create the registry with the application's routes, set the
//!    default url options and register each web service.
//! 2. **Requests**: build serializers through [`Registry::serializer`] (or the
//!    [`Restful`](crate::Restful) extension trait). Lookups hand out copies, so
//!    a serialization never mutates registered configuration.
//! 3. **Reset**: [`Registry::clear`] drops all services and defaults, isolating
//!    independent configuration cycles such as tests.
//!
//! State sits behind a `parking_lot::RwLock`, so every method takes `&self`
//! and a registry can be shared across threads once populated.
//!
//! ## Names
//!
//! Web service names are normalized before use: lower-cased, with every run of
//! non-word characters collapsed into one underscore. `"My API"`, `"my-api"`
//! and `"my_api"` name the same service.
//!
//! ## Default url options
//!
//! A web service registered without url options of its own picks up the
//! registry defaults the first time it is looked up. The injection is stored,
//! so later changes to the registry defaults do not reach that service.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::configuration::{Value, WebService};
use crate::error::{Error, Result};
use crate::serializer::SerializerBuilder;
use crate::subject::Subject;
use crate::url::{NoRoutes, UrlHelpers, UrlOptions};

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("static pattern is valid"));

/// Normalizes a web service name: `"My API"` → `"my_api"`.
pub fn normalize_name(name: &str) -> String {
    NON_WORD.replace_all(&name.to_lowercase(), "_").into_owned()
}

#[derive(Debug, Default)]
struct RegistryState {
    default_url_options: UrlOptions,
    web_services: BTreeMap<String, WebService>,
}

/// Registered web services, default url options and route helpers.
pub struct Registry {
    state: RwLock<RegistryState>,
    routes: Arc<dyn UrlHelpers>,
}

impl Registry {
    pub fn new(routes: Arc<dyn UrlHelpers>) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            routes,
        }
    }

    pub fn routes(&self) -> Arc<dyn UrlHelpers> {
        self.routes.clone()
    }

    /// Sets the url options used by web services that have none.
    ///
    /// `options` must be a map (or nil, which clears them).
    pub fn set_default_url_options(&self, options: impl Into<Value>) -> Result<()> {
        let options = match options.into() {
            Value::Nil => UrlOptions::new(),
            map @ Value::Map(_) => match map.to_json() {
                JsonValue::Object(options) => options,
                _ => UrlOptions::new(),
            },
            other => {
                return Err(Error::UnexpectedValue {
                    option: "default_url_options".to_string(),
                    expected: "a map",
                    received: other.describe(),
                })
            }
        };
        debug!(?options, "Default url options");
        self.state.write().default_url_options = options;
        Ok(())
    }

    pub fn default_url_options(&self) -> UrlOptions {
        self.state.read().default_url_options.clone()
    }

    /// Registers a web service built from `options`, replacing any service of
    /// the same normalized name. Returns a copy of the stored service.
    pub fn register_web_service(&self, name: &str, options: impl Into<Value>) -> Result<WebService> {
        self.register_web_service_with(name, options, |_| Ok(()))
    }

    /// Like [`Registry::register_web_service`], yielding the new service to
    /// `configure` before it is stored.
    pub fn register_web_service_with<F>(&self, name: &str, options: impl Into<Value>, configure: F) -> Result<WebService>
    where
        F: FnOnce(&mut WebService) -> Result<()>,
    {
        let web_service = WebService::register(name, options, configure)?;
        let key = normalize_name(name);
        info!(web_service = %key, resources = web_service.resource_keys().len(), "Registered");
        self.state.write().web_services.insert(key, web_service.clone());
        Ok(web_service)
    }

    /// A copy of the web service registered under `name`, after injecting the
    /// registry's default url options into it if it has none.
    pub fn web_service_configuration(&self, name: &str) -> Option<WebService> {
        let key = normalize_name(name);
        let mut state = self.state.write();
        let RegistryState {
            default_url_options,
            web_services,
        } = &mut *state;
        let web_service = web_services.get_mut(&key)?;
        if web_service.inherit_default_url_options(default_url_options) {
            debug!(web_service = %key, "Injected default url options");
        }
        Some(web_service.clone())
    }

    /// Normalized names of the registered web services.
    pub fn web_service_names(&self) -> Vec<String> {
        self.state.read().web_services.keys().cloned().collect()
    }

    /// Drops every registered web service and the default url options.
    pub fn clear(&self) {
        let mut state = self.state.write();
        info!(web_services = state.web_services.len(), "Cleared");
        *state = RegistryState::default();
    }

    /// Starts a serialization of `subject`.
    pub fn serializer<'a>(&'a self, subject: impl Into<Subject<'a>>) -> SerializerBuilder<'a> {
        SerializerBuilder::new(self, subject.into())
    }

    /// The web service used when a call names none: the only registered one,
    /// or an unconfigured service carrying the registry's url options.
    pub(crate) fn implicit_web_service(&self) -> WebService {
        let names = self.web_service_names();
        if let [name] = names.as_slice() {
            if let Some(web_service) = self.web_service_configuration(name) {
                return web_service;
            }
        }
        let mut stub = WebService::default();
        stub.inherit_default_url_options(&self.default_url_options());
        stub
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Arc::new(NoRoutes))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
