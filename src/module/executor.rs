//! Turning module source into an exported value.

use serde_json::{Map, Value};

use super::loader::ModuleLoader;
use crate::error::{FsError, Result};

/// Evaluates module source text.
///
/// The executor receives the source and a [`ModuleLoader`] bound to the
/// module's directory; nested `require` calls go through the loader. The
/// returned value is what the module exports.
///
/// Closures with the matching signature implement this trait:
///
/// ```ignore
/// let fs = BufferedFs::with_executor(|src: &str, _: &ModuleLoader<'_, String>| {
///     Ok(src.to_uppercase())
/// })
/// .load_tar_blocking(bytes)?;
/// ```
pub trait Executor<V>: Send + Sync {
    /// Evaluate `source` and return its exports.
    fn execute(&self, source: &str, loader: &ModuleLoader<'_, V>) -> Result<V>;
}

impl<V, F> Executor<V> for F
where
    F: Fn(&str, &ModuleLoader<'_, V>) -> Result<V> + Send + Sync,
{
    fn execute(&self, source: &str, loader: &ModuleLoader<'_, V>) -> Result<V> {
        self(source, loader)
    }
}

/// Executor for modules written as JSON documents.
///
/// A module exports its parsed JSON value. Any object of the exact form
/// `{"$require": "<specifier>"}` is replaced by the exports of that module,
/// resolved relative to the current one. The key is configurable through
/// [`ResolveConfig::require_key`](crate::ResolveConfig::require_key).
///
/// ```text
/// modules/nested/deep/index.js:
///   { "deepModule": [{ "$require": "./a" }],
///     "nestedModule": { "$require": "../index.js" } }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExecutor;

impl Executor<Value> for JsonExecutor {
    fn execute(&self, source: &str, loader: &ModuleLoader<'_, Value>) -> Result<Value> {
        let value: Value = serde_json::from_str(source)
            .map_err(|e| FsError::execution(loader.path(), e.to_string()))?;
        link(value, loader)
    }
}

/// Replace require markers depth-first.
fn link(value: Value, loader: &ModuleLoader<'_, Value>) -> Result<Value> {
    match value {
        Value::Object(map) => {
            if map.len() == 1
                && let Some(Value::String(spec)) = map.get(&loader.config().require_key)
            {
                return loader.require(spec);
            }
            map.into_iter()
                .map(|(key, value)| Ok((key, link(value, loader)?)))
                .collect::<Result<Map<String, Value>>>()
                .map(Value::Object)
        }
        Value::Array(items) => items
            .into_iter()
            .map(|item| link(item, loader))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other),
    }
}
