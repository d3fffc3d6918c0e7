//! # Typed Shapes
//!
//! A shape is a typed wrapper around a [`Config`] node with a fixed [`Schema`].
//! The [`config_shape!`] macro declares one from a table of options: it emits
//! the `static` schema, the wrapper struct, its [`Shape`] impl and one
//! `set_<option>` mutator per option (via `paste`). Typed getters are written
//! by hand next to each shape.
//!
//! Every shape gets the same `register(options, configure)` constructor from
//! [`Shape`]: build from an option map, then hand the instance to a callback
//! for fine-grained setup.

use super::config::{Config, HashOptions};
use super::option::Schema;
use super::value::{Map, Value};
use crate::error::Result;

/// Common behaviour of typed configuration shapes.
pub trait Shape: Sized + Clone {
    fn schema() -> &'static Schema;

    fn from_config(config: Config) -> Self;

    fn config(&self) -> &Config;

    fn config_mut(&mut self) -> &mut Config;

    fn into_config(self) -> Config;

    /// Builds an instance from a map of options.
    fn from_options(options: impl Into<Value>) -> Result<Self> {
        Config::from_options(Self::schema(), options).map(Self::from_config)
    }

    /// Builds an instance, then yields it to `configure`.
    fn register<F>(options: impl Into<Value>, configure: F) -> Result<Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut shape = Self::from_options(options)?;
        configure(&mut shape)?;
        Ok(shape)
    }

    /// See [`Config::set`].
    fn set(&mut self, options: impl Into<Value>) -> Result<&mut Self> {
        self.config_mut().set(options)?;
        Ok(self)
    }

    fn reset(&mut self) {
        self.config_mut().reset();
    }

    fn to_hash(&self, options: HashOptions) -> Map {
        self.config().to_hash(options)
    }

    fn is_explicitly_set(&self, name: &str) -> bool {
        self.config().is_explicitly_set(name)
    }

    fn deep_clone(&self) -> Self {
        Self::from_config(self.config().deep_clone())
    }

    /// See [`Config::deep_merge`].
    fn deep_merge(&self, other: &Self) -> Result<Self> {
        self.config().deep_merge(other.config()).map(Self::from_config)
    }

    /// See [`Config::deep_merge_map`].
    fn deep_merge_map(&self, other: &Map) -> Result<Self> {
        self.config().deep_merge_map(other).map(Self::from_config)
    }
}

/// Copies the nested node held in `slot` out as a typed shape.
pub(crate) fn nested<S: Shape>(slot: Option<&Value>) -> Option<S> {
    match slot {
        Some(Value::Config(config)) if config.schema() == S::schema() => {
            Some(S::from_config(config.clone()))
        }
        _ => None,
    }
}

/// Yields the nested node held in `slot` to `configure` as a typed shape and
/// stores it back, whatever the callback returns.
pub(crate) fn with_nested<S, F>(slot: Option<&mut Value>, configure: F) -> Result<bool>
where
    S: Shape,
    F: FnOnce(&mut S) -> Result<()>,
{
    let Some(Value::Config(node)) = slot else {
        return Ok(false);
    };
    if node.schema() != S::schema() {
        return Ok(false);
    }
    let mut shape = S::from_config(std::mem::replace(node, Config::new(S::schema())));
    let outcome = configure(&mut shape);
    *node = shape.into_config();
    outcome.map(|()| true)
}

/// Declares a typed configuration shape from a table of options.
///
/// ```ignore
/// config_shape! {
///     /// Docs for the shape.
///     pub struct Gizmo => GIZMO("gizmo") {
///         name: plain,
///         tags: list,
///         enabled: with_default(DefaultValue::Bool(true)),
///     }
/// }
/// ```
macro_rules! config_shape {
    (
        $(#[$meta:meta])*
        pub struct $shape:ident => $schema:ident($label:literal) {
            $(
                $(#[$option_meta:meta])*
                $option:ident: $kind:ident $(( $($arg:expr),* ))?,
            )*
        }
    ) => {
        #[doc = concat!("Option table of [`", stringify!($shape), "`].")]
        pub static $schema: $crate::configuration::Schema = $crate::configuration::Schema {
            name: $label,
            options: &[
                $(
                    $crate::configuration::OptionSpec::$kind(
                        stringify!($option) $(, $($arg),*)?
                    ),
                )*
            ],
        };

        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
        #[serde(transparent)]
        pub struct $shape {
            config: $crate::configuration::Config,
        }

        impl $crate::configuration::Shape for $shape {
            fn schema() -> &'static $crate::configuration::Schema {
                &$schema
            }

            fn from_config(config: $crate::configuration::Config) -> Self {
                Self { config }
            }

            fn config(&self) -> &$crate::configuration::Config {
                &self.config
            }

            fn config_mut(&mut self) -> &mut $crate::configuration::Config {
                &mut self.config
            }

            fn into_config(self) -> $crate::configuration::Config {
                self.config
            }
        }

        impl Default for $shape {
            fn default() -> Self {
                Self {
                    config: $crate::configuration::Config::new(&$schema),
                }
            }
        }

        impl From<$shape> for $crate::configuration::Value {
            fn from(shape: $shape) -> Self {
                $crate::configuration::Value::Config(shape.config)
            }
        }

        paste::paste! {
            impl $shape {
                $(
                    $(#[$option_meta])*
                    pub fn [<set_ $option>](
                        &mut self,
                        value: impl Into<$crate::configuration::Value>,
                    ) -> $crate::error::Result<&mut Self> {
                        self.config.assign(stringify!($option), value)?;
                        Ok(self)
                    }
                )*
            }
        }
    };
}

pub(crate) use config_shape;
