//! Source document formats.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ConfigError;

/// Format of a configuration source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension.
    ///
    /// Returns `None` for missing or unknown extensions.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Deserialize `source` in this format.
    pub(crate) fn parse<T: DeserializeOwned>(self, source: &str) -> Result<T, ConfigError> {
        Ok(match self {
            Self::Toml => toml::from_str(source)?,
            Self::Json => serde_json::from_str(source)?,
            Self::Yaml => serde_yaml::from_str(source)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path(Path::new("docsite.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("a/b.JSON")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("site.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("site.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("sidebars.js")), None);
        assert_eq!(Format::from_path(Path::new("docsite")), None);
    }

    #[test]
    fn test_parse_errors_map_to_variant() {
        let err = Format::Json.parse::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));

        let err = Format::Toml.parse::<toml::Table>("title = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
