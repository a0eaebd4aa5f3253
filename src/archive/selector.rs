//! Lookup selectors: an exact path or a pattern.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

static ANY: LazyLock<Regex> = LazyLock::new(|| Regex::new(".*").expect("static pattern compiles"));

/// What a read looks up.
///
/// A path selector is joined with the base directory and matches at most one
/// entry. A pattern selector is matched against raw entry keys and may match
/// any number of them.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Exact entry path, relative to the base directory.
    Path(String),
    /// Regular expression tested against every stored key.
    Pattern(Regex),
}

impl Selector {
    /// Compile a pattern selector.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Pattern matching every key.
    pub fn any() -> Self {
        Self::Pattern(ANY.clone())
    }

    /// The path, if this is a path selector.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            Self::Pattern(_) => None,
        }
    }
}

impl From<&str> for Selector {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for Selector {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<&String> for Selector {
    fn from(path: &String) -> Self {
        Self::Path(path.clone())
    }
}

impl From<Regex> for Selector {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_path() {
        let selector = Selector::from("min");
        assert_eq!(selector.as_path(), Some("min"));
    }

    #[test]
    fn test_pattern() {
        let selector = Selector::pattern(r"\.js$").unwrap();
        assert!(selector.as_path().is_none());
        assert!(Selector::pattern("(").is_err());
    }

    #[test]
    fn test_any_matches_everything() {
        let Selector::Pattern(re) = Selector::any() else {
            panic!("expected pattern");
        };
        assert!(re.is_match(""));
        assert!(re.is_match("modules/index.js"));
    }
}
