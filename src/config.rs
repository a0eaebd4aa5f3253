//! Resolution conventions.
//!
//! [`ResolveConfig`] names the file-layout conventions the module resolver
//! follows. The defaults match the Node.js package layout; use
//! [`ResolveConfigBuilder`] to change them.

/// Conventions used by module resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Extension appended when inferring a source file.
    /// Example: `".js"`
    pub source_extension: String,
    /// Extensions besides the source one that mark an exact file reference.
    pub data_extensions: Vec<String>,
    /// Per-directory manifest declaring a package's entry point.
    pub manifest_name: String,
    /// Default entry file of a directory.
    pub index_file: String,
    /// Directory that holds dependencies of a package.
    pub dependency_dir: String,
    /// Object key the JSON executor treats as a nested `require`.
    pub require_key: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            source_extension: ".js".to_string(),
            data_extensions: vec![".json".to_string()],
            manifest_name: "package.json".to_string(),
            index_file: "index.js".to_string(),
            dependency_dir: "node_modules".to_string(),
            require_key: "$require".to_string(),
        }
    }
}

impl ResolveConfig {
    /// Create a builder starting from the defaults.
    pub fn builder() -> ResolveConfigBuilder {
        ResolveConfigBuilder::new()
    }

    /// Whether `path` names a file explicitly by its extension.
    pub fn has_explicit_extension(&self, path: &str) -> bool {
        path.ends_with(&self.source_extension)
            || self.data_extensions.iter().any(|ext| path.ends_with(ext))
    }

    /// Append the source extension unless `path` already carries it.
    pub fn with_source_extension(&self, path: &str) -> String {
        if path.ends_with(&self.source_extension) {
            path.to_string()
        } else {
            format!("{path}{}", self.source_extension)
        }
    }

    /// The path directory-style reads are rewritten to.
    pub fn index_path(&self) -> String {
        format!("./{}", self.index_file)
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ResolveConfigBuilder {
    source_extension: Option<String>,
    data_extensions: Option<Vec<String>>,
    manifest_name: Option<String>,
    index_file: Option<String>,
    dependency_dir: Option<String>,
    require_key: Option<String>,
}

impl ResolveConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inferred source extension (including the dot).
    ///
    /// Default: `".js"`
    pub fn source_extension(mut self, ext: impl Into<String>) -> Self {
        self.source_extension = Some(ext.into());
        self
    }

    /// Add an extension that marks an exact file reference.
    ///
    /// The first call replaces the default `[".json"]`.
    pub fn data_extension(mut self, ext: impl Into<String>) -> Self {
        self.data_extensions
            .get_or_insert_with(Vec::new)
            .push(ext.into());
        self
    }

    /// Set the manifest file name.
    ///
    /// Default: `"package.json"`
    pub fn manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = Some(name.into());
        self
    }

    /// Set the directory index file name.
    ///
    /// Default: `"index.js"`
    pub fn index_file(mut self, name: impl Into<String>) -> Self {
        self.index_file = Some(name.into());
        self
    }

    /// Set the dependency directory name.
    ///
    /// Default: `"node_modules"`
    pub fn dependency_dir(mut self, name: impl Into<String>) -> Self {
        self.dependency_dir = Some(name.into());
        self
    }

    /// Set the key the JSON executor resolves as a nested module.
    ///
    /// Default: `"$require"`
    pub fn require_key(mut self, key: impl Into<String>) -> Self {
        self.require_key = Some(key.into());
        self
    }

    /// Build the configuration, filling unset fields with defaults.
    pub fn build(self) -> ResolveConfig {
        let defaults = ResolveConfig::default();
        ResolveConfig {
            source_extension: self.source_extension.unwrap_or(defaults.source_extension),
            data_extensions: self.data_extensions.unwrap_or(defaults.data_extensions),
            manifest_name: self.manifest_name.unwrap_or(defaults.manifest_name),
            index_file: self.index_file.unwrap_or(defaults.index_file),
            dependency_dir: self.dependency_dir.unwrap_or(defaults.dependency_dir),
            require_key: self.require_key.unwrap_or(defaults.require_key),
        }
    }
}
