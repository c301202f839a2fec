//! Validated site configuration.
//!
//! [`SiteConfig`] is the aggregate handed to the renderer. Its fields are
//! private and only the loader builds it, so a value of this type has always
//! passed validation. The nested types are plain values.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Validated site configuration.
///
/// Serializes in the camelCase shape expected by the static-site renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub(crate) title: String,
    pub(crate) tagline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
    pub(crate) base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) project_name: Option<String>,
    pub(crate) navbar: Navbar,
    pub(crate) sidebar: SidebarTree,
    #[serde(rename = "themeConfig")]
    pub(crate) theme: ThemeConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) analytics: Option<Analytics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) footer: Option<Footer>,
    pub(crate) presets: Vec<Preset>,
    #[serde(skip)]
    pub(crate) config_path: Option<PathBuf>,
}

impl SiteConfig {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn tagline(&self) -> &str {
        &self.tagline
    }

    /// Public site URL, e.g. `https://nbomber.com`.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Base URL the site is served under: an absolute URL or a root-relative path.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    #[must_use]
    pub fn organization_name(&self) -> Option<&str> {
        self.organization_name.as_deref()
    }

    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    #[must_use]
    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    #[must_use]
    pub fn sidebar(&self) -> &SidebarTree {
        &self.sidebar
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    #[must_use]
    pub fn analytics(&self) -> Option<&Analytics> {
        self.analytics.as_ref()
    }

    #[must_use]
    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }

    /// Presets in declaration order.
    #[must_use]
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Path of the file this configuration was loaded from, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Docs options of the first preset that configures docs.
    #[must_use]
    pub fn docs_options(&self) -> Option<&DocsOptions> {
        self.docs_preset().map(|(_, docs)| docs)
    }

    pub(crate) fn docs_preset(&self) -> Option<(usize, &DocsOptions)> {
        self.presets
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.docs.as_ref().map(|docs| (i, docs)))
    }

    /// Docs source directory, resolved relative to the configuration file.
    ///
    /// Uses the docs preset's `path`, or `docs` when no preset sets one.
    /// Returns `None` for configurations not loaded from a file.
    #[must_use]
    pub fn docs_dir(&self) -> Option<PathBuf> {
        let config_dir = self.config_path.as_deref()?.parent()?;
        let docs_path = self
            .docs_options()
            .map_or(DEFAULT_DOCS_PATH, |docs| docs.path.as_str());
        Some(config_dir.join(docs_path))
    }
}

pub(crate) const DEFAULT_DOCS_PATH: &str = "docs";
pub(crate) const DEFAULT_ROUTE_BASE_PATH: &str = "docs";

/// Top navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navbar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    /// Entries in left-to-right render order.
    pub items: Vec<NavbarEntry>,
}

/// Navbar logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Logo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LinkTarget>,
}

/// Browsing context a logo link opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkTarget {
    #[serde(rename = "_self")]
    SelfTab,
    #[serde(rename = "_blank")]
    Blank,
}

impl LinkTarget {
    pub(crate) const EXPECTED: &'static str = "_self, _blank";

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "_self" => Some(Self::SelfTab),
            "_blank" => Some(Self::Blank),
            _ => None,
        }
    }
}

/// A single clickable item in the navbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarEntry {
    #[serde(flatten)]
    pub target: NavbarTarget,
    pub label: String,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_base_path: Option<String>,
}

/// Where a navbar entry points. Serialized as `to` or `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NavbarTarget {
    /// Internal route, e.g. `docs/overview`.
    #[serde(rename = "to")]
    Route(String),
    /// External link, e.g. `https://github.com/PragmaticFlow/NBomber`.
    #[serde(rename = "href")]
    External(String),
}

/// Horizontal placement of a navbar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

impl Position {
    pub(crate) const EXPECTED: &'static str = "left, right";

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Category-grouped table of contents.
///
/// Categories keep their declaration order and labels are unique.
/// Serializes as an ordered map from label to document ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SidebarTree {
    pub(crate) categories: Vec<SidebarCategory>,
}

/// One sidebar category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarCategory {
    pub label: String,
    /// Document ids in display order.
    pub items: Vec<String>,
}

impl SidebarTree {
    #[must_use]
    pub fn categories(&self) -> &[SidebarCategory] {
        &self.categories
    }

    /// Document ids of the category labelled `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.items.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All document ids, category by category.
    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter().map(String::as_str))
    }
}

impl Serialize for SidebarTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.label, &category.items)?;
        }
        map.end()
    }
}

/// Appearance toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub disable_dark_mode: bool,
    pub default_mode: ColorMode,
    pub respect_prefers_color_scheme: bool,
    pub prism: PrismConfig,
}

/// Color mode used when the reader has no preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub(crate) const EXPECTED: &'static str = "light, dark";

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Syntax-highlighting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrismConfig {
    pub theme: PrismTheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_theme: Option<PrismTheme>,
    /// Canonical language ids, in declaration order, without duplicates.
    pub additional_languages: Vec<String>,
}

/// Built-in highlighting themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PrismTheme {
    #[default]
    Github,
    Dracula,
    DuotoneDark,
    DuotoneLight,
    NightOwl,
    NightOwlLight,
    OceanicNext,
    Okaidia,
    Palenight,
    ShadesOfPurple,
    Synthwave84,
    Ultramin,
    VsDark,
    VsLight,
}

impl PrismTheme {
    pub(crate) const EXPECTED: &'static str = "github, dracula, duotoneDark, duotoneLight, \
        nightOwl, nightOwlLight, oceanicNext, okaidia, palenight, shadesOfPurple, \
        synthwave84, ultramin, vsDark, vsLight";

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "github" => Some(Self::Github),
            "dracula" => Some(Self::Dracula),
            "duotoneDark" => Some(Self::DuotoneDark),
            "duotoneLight" => Some(Self::DuotoneLight),
            "nightOwl" => Some(Self::NightOwl),
            "nightOwlLight" => Some(Self::NightOwlLight),
            "oceanicNext" => Some(Self::OceanicNext),
            "okaidia" => Some(Self::Okaidia),
            "palenight" => Some(Self::Palenight),
            "shadesOfPurple" => Some(Self::ShadesOfPurple),
            "synthwave84" => Some(Self::Synthwave84),
            "ultramin" => Some(Self::Ultramin),
            "vsDark" => Some(Self::VsDark),
            "vsLight" => Some(Self::VsLight),
            _ => None,
        }
    }
}

impl fmt::Display for PrismTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Github => "github",
            Self::Dracula => "dracula",
            Self::DuotoneDark => "duotoneDark",
            Self::DuotoneLight => "duotoneLight",
            Self::NightOwl => "nightOwl",
            Self::NightOwlLight => "nightOwlLight",
            Self::OceanicNext => "oceanicNext",
            Self::Okaidia => "okaidia",
            Self::Palenight => "palenight",
            Self::ShadesOfPurple => "shadesOfPurple",
            Self::Synthwave84 => "synthwave84",
            Self::Ultramin => "ultramin",
            Self::VsDark => "vsDark",
            Self::VsLight => "vsLight",
        };
        f.write_str(name)
    }
}

/// Google analytics (`gtag`) settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(rename = "trackingID")]
    pub tracking_id: String,
}

/// Page footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub style: FooterStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    Dark,
    #[default]
    Light,
}

impl FooterStyle {
    pub(crate) const EXPECTED: &'static str = "dark, light";

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

/// A renderer preset and its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<DocsOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<BlogOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeOptions>,
}

/// Docs plugin options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsOptions {
    /// Docs source directory, relative to the configuration file.
    pub path: String,
    /// URL prefix of doc routes, without surrounding slashes.
    pub route_base_path: String,
    /// Document shown at the docs root route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
}

/// Blog plugin options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogOptions {
    pub show_reading_time: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
}

/// Theme plugin options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
}
