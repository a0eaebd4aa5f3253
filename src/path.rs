//! Path utilities.
//!
//! Archive keys are plain `/`-separated strings, so these helpers work on
//! `str` with POSIX semantics rather than on `std::path::Path`.

/// A module specifier, classified once and used by every resolution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier<'a> {
    /// `./x`, `../x`, or a directory reference ending in `/`.
    Relative(&'a str),
    /// Anything else: a package or host-native name.
    Bare(&'a str),
}

impl<'a> Specifier<'a> {
    /// Classify a specifier string.
    pub fn parse(spec: &'a str) -> Self {
        if spec.starts_with("./") || spec.starts_with("../") || spec.ends_with('/') {
            Self::Relative(spec)
        } else {
            Self::Bare(spec)
        }
    }

    /// The specifier text.
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Relative(s) | Self::Bare(s) => s,
        }
    }
}

/// Normalize a path, resolving `.` and `..` segments.
///
/// A trailing `/` is kept. An empty result becomes `.`.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let mut out = parts.join("/");
    if absolute {
        out.insert(0, '/');
    } else if out.is_empty() {
        out.push('.');
    }
    if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Join segments with `/` and normalize the result.
pub fn join(segments: &[&str]) -> String {
    let joined = segments
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    normalize(&joined)
}

/// Directory portion of a path (`.` when there is none).
pub fn dirname(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        None => ".",
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
    }
}

/// Prefix a relative path with `./` unless it already starts with it.
pub fn dot_relative(path: &str) -> String {
    if path.starts_with("./") || path.starts_with("../") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("./{path}")
    }
}

/// Strip every leading `./`.
pub fn strip_dot_slash(mut path: &str) -> &str {
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specifier_classification() {
        assert_eq!(Specifier::parse("./a"), Specifier::Relative("./a"));
        assert_eq!(Specifier::parse("../a"), Specifier::Relative("../a"));
        assert_eq!(Specifier::parse("./"), Specifier::Relative("./"));
        assert_eq!(Specifier::parse("lib/"), Specifier::Relative("lib/"));
        assert_eq!(Specifier::parse("fs"), Specifier::Bare("fs"));
        assert_eq!(Specifier::parse("lodash/fp"), Specifier::Bare("lodash/fp"));
        assert_eq!(Specifier::parse("fs").as_str(), "fs");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("./modules/./index.js"), "modules/index.js");
        assert_eq!(normalize("a/b/../c"), "a/c");
        assert_eq!(normalize("nested/"), "nested/");
        assert_eq!(normalize("./nested/../"), "./");
        assert_eq!(normalize("../x"), "../x");
        assert_eq!(normalize("a/../../x"), "../x");
        assert_eq!(normalize("/a/../.."), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), ".");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&["./modules", "./index.js"]), "modules/index.js");
        assert_eq!(join(&["./nested/deep", "../index.js"]), "nested/index.js");
        assert_eq!(join(&[".", "node_modules", "pkg"]), "node_modules/pkg");
        assert_eq!(join(&["", "a"]), "a");
        assert_eq!(join(&[]), ".");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("./nested/index.js"), "./nested");
        assert_eq!(dirname("fs"), ".");
        assert_eq!(dirname("./"), ".");
        assert_eq!(dirname("a/b/"), "a");
        assert_eq!(dirname("/a"), "/");
        assert_eq!(dirname(""), ".");
    }

    #[test]
    fn test_dot_relative_and_strip() {
        assert_eq!(dot_relative("modules"), "./modules");
        assert_eq!(dot_relative("./modules"), "./modules");
        assert_eq!(dot_relative("../up"), "../up");
        assert_eq!(strip_dot_slash("././a/b"), "a/b");
        assert_eq!(strip_dot_slash("a/./b"), "a/./b");
    }
}
