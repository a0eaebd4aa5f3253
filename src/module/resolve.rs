//! The `require` resolution algorithm.

use serde::Deserialize;
use serde_json::json;

use super::loader::ModuleLoader;
use crate::config::ResolveConfig;
use crate::error::{FsError, NativeLoadError, Result};
use crate::fs::BufferedFs;
use crate::path::{self, Specifier};

/// Source text located in the archive, ready to execute.
struct Located {
    path: String,
    dir: String,
    source: String,
}

/// The part of a package manifest the resolver reads.
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    main: Option<String>,
}

impl Manifest {
    /// Entry file relative to the package directory.
    fn entry(&self, config: &ResolveConfig) -> String {
        match self.main.as_deref().filter(|main| !main.is_empty()) {
            Some(main) => config.with_source_extension(main),
            None => config.index_file.clone(),
        }
    }
}

impl<V: Clone> BufferedFs<V> {
    /// Resolve `specifier`, execute it and return its exports.
    ///
    /// Provided modules are returned as-is. Bare names go to the native
    /// loader first, then to `./node_modules/<name>`. Relative paths are
    /// tried as given, with the source extension, and finally through the
    /// directory's manifest.
    pub fn require(&self, specifier: &str) -> Result<V> {
        self.resolve(specifier, ".")
    }

    /// Overrides are keyed by the bare name, or by the relative path as seen
    /// from the base directory.
    pub(crate) fn resolve(&self, specifier: &str, from_dir: &str) -> Result<V> {
        match Specifier::parse(specifier) {
            Specifier::Bare(name) => match self.lookup_provided(name) {
                Some(value) => Ok(value),
                None => {
                    self.log_require(name, from_dir);
                    self.resolve_bare(name, from_dir)
                }
            },
            Specifier::Relative(rel) => {
                let path = relative_to(from_dir, rel);
                match self.lookup_provided(&path) {
                    Some(value) => Ok(value),
                    None => {
                        self.log_require(&path, from_dir);
                        self.resolve_relative(&path)
                    }
                }
            }
        }
    }

    fn lookup_provided(&self, key: &str) -> Option<V> {
        let value = self.provided(key)?;
        self.logger
            .debug("Providing module", || Some(json!({ "name": key })));
        Some(value)
    }

    fn log_require(&self, module: &str, from_dir: &str) {
        self.logger.debug("Requiring module", || {
            Some(json!({ "module": module, "currentDir": from_dir }))
        });
    }

    fn resolve_bare(&self, name: &str, from_dir: &str) -> Result<V> {
        self.logger
            .debug("Requiring native module", || Some(json!({ "module": name })));

        match self.natives.load(name) {
            Ok(value) => Ok(value),
            Err(NativeLoadError::NotFound(_)) => {
                let fallback = format!(
                    "./{}",
                    path::join(&[from_dir, &self.config.dependency_dir, name])
                );
                self.logger.debug(
                    "Native module not found, trying dependency directory",
                    || Some(json!({ "module": name, "path": fallback })),
                );
                self.resolve_relative(&fallback)
            }
            Err(err) => {
                self.logger.error(
                    "Failed to natively require module",
                    || Some(json!({ "module": name, "exception": err.to_string() })),
                );
                Err(err.into())
            }
        }
    }

    fn resolve_relative(&self, path: &str) -> Result<V> {
        let Located { path, dir, source } = self.locate(path)?;
        self.logger.debug(
            "Executing module",
            || Some(json!({ "path": path, "currentDir": dir })),
        );
        let loader = ModuleLoader::new(self, path, dir);
        self.executor.execute(&source, &loader)
    }

    /// Find source for a relative path, trying each lookup in order.
    fn locate(&self, path: &str) -> Result<Located> {
        self.logger
            .debug("Attempting to read file as is", || Some(json!({ "path": path })));
        match self.read_file(path) {
            Ok(source) => return Ok(Located::new(path.to_string(), source)),
            Err(err) => {
                self.log_failure("Failed to read module as is", path, &err);
                if !err.is_not_found() || self.config.has_explicit_extension(path) {
                    return Err(err);
                }
            }
        }

        let with_ext = format!("{path}{}", self.config.source_extension);
        self.logger.debug(
            "Attempting to read file with source extension",
            || Some(json!({ "path": with_ext })),
        );
        match self.read_file(with_ext.as_str()) {
            Ok(source) => return Ok(Located::new(with_ext, source)),
            Err(err) => {
                self.log_failure("Failed to read module with source extension", &with_ext, &err);
                if !err.is_not_found() {
                    return Err(err);
                }
            }
        }

        self.locate_package(path).inspect_err(|err| {
            self.log_failure("Failed to read module from manifest", path, err);
        })
    }

    /// Read `<path>/<manifest>` and load the entry file it declares.
    ///
    /// The first package loaded this way while no base directory is set
    /// re-roots the file system at the entry file's directory.
    fn locate_package(&self, path: &str) -> Result<Located> {
        let manifest_path = path::dot_relative(&path::join(&[path, &self.config.manifest_name]));
        self.logger.debug(
            "Attempting to read file from manifest",
            || Some(json!({ "path": path, "manifest": manifest_path })),
        );

        let text = self.read_file(manifest_path.as_str())?;
        let manifest: Manifest =
            serde_json::from_str(&text).map_err(|source| FsError::ManifestParse {
                path: manifest_path.clone(),
                source,
            })?;

        let entry = path::join(&[path, &manifest.entry(&self.config)]);
        let entry_path = path::dot_relative(&entry);
        let source = self.read_file(entry_path.as_str())?;

        let dir = if self.current_basedir().is_none() {
            let base = path::dirname(&entry).to_string();
            self.basedir(&base)?;
            self.logger.info(
                "Base directory set from manifest",
                || Some(json!({ "basedir": base, "manifest": manifest_path })),
            );
            ".".to_string()
        } else {
            path::dirname(&entry).to_string()
        };

        Ok(Located {
            path: entry_path,
            dir,
            source,
        })
    }

    fn log_failure(&self, message: &str, path: &str, err: &FsError) {
        self.logger.error(
            message,
            || Some(json!({ "path": path, "exception": err.to_string() })),
        );
    }
}

impl Located {
    fn new(path: String, source: String) -> Self {
        let dir = path::dirname(&path).to_string();
        Self { path, dir, source }
    }
}

/// Express a relative specifier from `from_dir` as a path from the base.
fn relative_to(from_dir: &str, spec: &str) -> String {
    if from_dir == "." {
        spec.to_string()
    } else {
        format!("./{}", path::join(&[from_dir, spec]))
    }
}
