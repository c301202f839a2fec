//! Configuration errors and validation violations.

use std::fmt;
use std::path::PathBuf;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicit configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// No configuration file found during discovery.
    #[error("No docsite configuration found in {} or any parent directory", .0.display())]
    NotDiscovered(PathBuf),
    /// File extension does not map to a known format.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`analytics.tracking_id`").
        field: String,
        /// Error message (e.g., "${`GTAG_ID`} not set").
        message: String,
    },
    /// One or more validation rules were violated.
    #[error("{0}")]
    Invalid(Violations),
}

impl ConfigError {
    /// Violations carried by an [`ConfigError::Invalid`] error.
    #[must_use]
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid(violations) => Some(violations),
            _ => None,
        }
    }
}

/// A single violated rule, located by its field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path, e.g. `navbar.items[2].label` or `sidebar[3]`.
    pub path: String,
    /// What is wrong at that path.
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// The rule a [`Violation`] breaks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViolationKind {
    #[error("is required")]
    Missing,
    #[error("cannot be empty")]
    Empty,
    #[error("must be an absolute http(s) URL or a root-relative path, got `{0}`")]
    InvalidBaseUrl(String),
    #[error("must be an absolute http(s) URL, got `{0}`")]
    InvalidUrl(String),
    #[error("must be an http(s) or mailto: URL, got `{0}`")]
    InvalidHref(String),
    #[error("is an external URL `{0}`, use `href` instead of `to`")]
    ExternalRoute(String),
    #[error("must set only one of `to` or `href`")]
    AmbiguousTarget,
    #[error("must set one of `to` or `href`")]
    MissingTarget,
    #[error("unknown value `{value}`, expected one of: {expected}")]
    UnknownValue {
        value: String,
        expected: &'static str,
    },
    #[error("duplicate category `{label}` (first defined at sidebar[{first}])")]
    DuplicateCategory { label: String, first: usize },
    #[error("category `{0}` has no documents")]
    EmptyCategory(String),
    #[error("unrecognized language `{0}`")]
    UnknownLanguage(String),
    #[error("language `{0}` is listed more than once")]
    DuplicateLanguage(String),
    #[error("is also set at the top level")]
    DuplicateSection,
    #[error("duplicate preset `{0}`")]
    DuplicatePreset(String),
    #[error("dark default mode requires dark mode to be enabled")]
    DarkModeDisabled,
    #[error("must not start or end with `/`, got `{0}`")]
    SlashDelimited(String),
    #[error("document `{0}` does not exist")]
    UnknownDocument(String),
}

/// Non-empty, ordered list of violations.
///
/// Order follows the order in which fields appear in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Wrap collected violations, returning `None` when there are none.
    pub(crate) fn from_vec(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self(violations))
        }
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty. Lists produced by the loader never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over violations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Find the first violation at `path`.
    #[must_use]
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.0.iter().find(|v| v.path == path)
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.0.len();
        let noun = if count == 1 { "error" } else { "errors" };
        write!(f, "Configuration has {count} {noun}:")?;
        for violation in &self.0 {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

/// Collects violations while walking a configuration tree.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    violations: Vec<Violation>,
}

impl Collector {
    pub(crate) fn push(&mut self, path: impl Into<String>, kind: ViolationKind) {
        self.violations.push(Violation {
            path: path.into(),
            kind,
        });
    }

    /// Finish collecting: `Ok(value)` if nothing was reported.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, ConfigError> {
        match Violations::from_vec(self.violations) {
            Some(violations) => Err(ConfigError::Invalid(violations)),
            None => Ok(value),
        }
    }
}
