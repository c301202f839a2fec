//! Site configuration model for docsite.
//!
//! Parses the site configuration (identity, navbar, sidebar, theme, presets)
//! from TOML, JSON or YAML, validates it and produces an immutable
//! [`SiteConfig`] for the static-site renderer.
//!
//! Validation reports every violated rule at once, each located by a field
//! path such as `navbar.items[2].label`.
//!
//! `navbar`, `gtag` and `footer` may also be written under `themeConfig`, as
//! docusaurus configurations do. Setting a section in both places is a
//! violation.
//!
//! ```
//! use docsite_config::{Format, load_config};
//!
//! let config = load_config(
//!     r#"
//! title = "NBomber"
//! base_url = "/"
//!
//! [[navbar.items]]
//! to = "docs/overview"
//! label = "Docs"
//!
//! [[sidebar]]
//! label = "Getting Started"
//! items = ["overview", "basics"]
//! "#,
//!     Format::Toml,
//! )
//! .unwrap();
//!
//! assert_eq!(config.title(), "NBomber");
//! assert_eq!(config.sidebar().get("Getting Started").unwrap().len(), 2);
//! ```
//!
//! ## Loading from files
//!
//! [`SiteConfig::load`] reads a file (or discovers `docsite.toml`,
//! `docsite.json`, `docsite.yaml` or `docsite.yml` in the current directory
//! and its parents), expands environment variables, resolves an external
//! sidebar file and applies [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `url`
//! - `base_url`
//! - `analytics.tracking_id`
//! - `presets[].docs.edit_url`
//! - `presets[].blog.edit_url`

mod documents;
mod error;
mod expand;
mod format;
mod language;
mod model;
mod raw;
mod validate;

use std::path::{Path, PathBuf};

pub use documents::DocumentIndex;
pub use error::{ConfigError, Violation, ViolationKind, Violations};
pub use format::Format;
pub use language::canonical_language;
pub use model::{
    Analytics, BlogOptions, ColorMode, DocsOptions, Footer, FooterStyle, LinkTarget, Logo, Navbar,
    NavbarEntry, NavbarTarget, Position, Preset, PrismConfig, PrismTheme, SidebarCategory,
    SidebarTree, SiteConfig, ThemeConfig, ThemeOptions,
};

use raw::{SidebarFileRaw, SiteConfigRaw};

/// Configuration filenames searched for during discovery, in priority order.
pub const CONFIG_FILENAMES: &[&str] = &[
    "docsite.toml",
    "docsite.json",
    "docsite.yaml",
    "docsite.yml",
];

/// Parse and validate a configuration document.
///
/// Pure: performs no I/O and no environment variable expansion.
///
/// # Errors
///
/// Returns a parse error if `source` is not well-formed, or
/// `ConfigError::Invalid` listing every violated rule.
pub fn load_config(source: &str, format: Format) -> Result<SiteConfig, ConfigError> {
    validate::validate(parse_raw(source, format)?)
}

/// Parse a source document into its raw shape, with sections nested under
/// `themeConfig` moved to the top level.
fn parse_raw(source: &str, format: Format) -> Result<SiteConfigRaw, ConfigError> {
    let mut raw: SiteConfigRaw = format.parse(source)?;
    raw.hoist_theme_sections();
    Ok(raw)
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site URL.
    pub url: Option<String>,
    /// Override base URL.
    pub base_url: Option<String>,
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for a configuration file in the current directory and parents.
    ///
    /// CLI settings are applied before validation, so overridden values are
    /// validated like any other.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be found or read, parsing or
    /// environment expansion fails, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        } else {
            let cwd = std::env::current_dir()?;
            discover_config(&cwd).ok_or(ConfigError::NotDiscovered(cwd))?
        };

        Self::load_from_file(&path, cli_settings)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path, cli_settings: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let format = Format::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path)?;
        let mut raw = parse_raw(&content, format)?;

        expand::expand_config(&mut raw)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        resolve_sidebar_file(&mut raw, config_dir)?;

        if let Some(settings) = cli_settings {
            apply_cli_settings(&mut raw, settings);
        }

        let mut config = validate::validate(raw)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            navbar_items = config.navbar.items.len(),
            categories = config.sidebar.len(),
            "Loaded site configuration"
        );

        Ok(config)
    }
}

/// Apply CLI settings to the raw configuration.
fn apply_cli_settings(raw: &mut SiteConfigRaw, settings: &CliSettings) {
    if let Some(url) = &settings.url {
        raw.url = Some(url.clone());
    }
    if let Some(base_url) = &settings.base_url {
        raw.base_url = Some(base_url.clone());
    }
}

/// Load the sidebar from the docs preset's `sidebar_path` when the
/// configuration has no inline sidebar.
fn resolve_sidebar_file(raw: &mut SiteConfigRaw, config_dir: &Path) -> Result<(), ConfigError> {
    if raw.sidebar.is_some() {
        return Ok(());
    }
    let Some(sidebar_path) = raw
        .docs_preset()
        .and_then(|docs| docs.sidebar_path.as_deref())
        .filter(|p| !p.trim().is_empty())
    else {
        return Ok(());
    };

    let path = config_dir.join(sidebar_path);
    let format =
        Format::from_path(&path).ok_or_else(|| ConfigError::UnsupportedFormat(path.clone()))?;
    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }

    let content = std::fs::read_to_string(&path)?;
    let file: SidebarFileRaw = format.parse(&content)?;
    tracing::debug!(
        path = %path.display(),
        categories = file.sidebar.0.len(),
        "Loaded sidebar file"
    );
    raw.sidebar = Some(file.sidebar);

    Ok(())
}

/// Search for a configuration file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILENAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered configuration file");
                return Some(candidate);
            }
        }
        if !current.pop() {
            return None;
        }
    }
}
