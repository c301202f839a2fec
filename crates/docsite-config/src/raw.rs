//! Configuration as parsed from the source document, before validation.
//!
//! Every field is optional here so that missing or malformed values surface
//! as violations from the validator instead of aborting deserialization on
//! the first problem. Enum-like values stay strings for the same reason.

use std::fmt;

use serde::Deserialize;
use serde::de::{self, MapAccess, SeqAccess, Visitor};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SiteConfigRaw {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub url: Option<String>,
    #[serde(alias = "baseUrl")]
    pub base_url: Option<String>,
    pub favicon: Option<String>,
    #[serde(alias = "organizationName")]
    pub organization_name: Option<String>,
    #[serde(alias = "projectName")]
    pub project_name: Option<String>,
    pub navbar: NavbarRaw,
    #[serde(alias = "sidebars")]
    pub sidebar: Option<SidebarRaw>,
    #[serde(alias = "themeConfig")]
    pub theme: ThemeRaw,
    #[serde(alias = "gtag")]
    pub analytics: Option<AnalyticsRaw>,
    pub footer: Option<FooterRaw>,
    pub presets: Vec<PresetRaw>,
    /// Sections given both at the top level and under `themeConfig`.
    #[serde(skip)]
    pub clashes: Vec<&'static str>,
}

impl SiteConfigRaw {
    /// Move `navbar`, `gtag` and `footer` written under `themeConfig` to the
    /// top level. A section set in both places is recorded in `clashes` and
    /// the top-level one is kept.
    pub(crate) fn hoist_theme_sections(&mut self) {
        if let Some(navbar) = self.theme.navbar.take() {
            if self.navbar.is_empty() {
                self.navbar = navbar;
            } else {
                self.clashes.push("theme.navbar");
            }
        }
        if let Some(analytics) = self.theme.analytics.take() {
            if self.analytics.is_none() {
                self.analytics = Some(analytics);
            } else {
                self.clashes.push("theme.analytics");
            }
        }
        if let Some(footer) = self.theme.footer.take() {
            if self.footer.is_none() {
                self.footer = Some(footer);
            } else {
                self.clashes.push("theme.footer");
            }
        }
    }

    /// Options of the first preset that configures docs.
    pub(crate) fn docs_preset(&self) -> Option<&DocsPresetRaw> {
        self.presets.iter().find_map(|p| p.docs.as_ref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NavbarRaw {
    pub title: Option<String>,
    pub logo: Option<LogoRaw>,
    #[serde(alias = "links")]
    pub items: Vec<NavbarEntryRaw>,
}

impl NavbarRaw {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.logo.is_none() && self.items.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LogoRaw {
    pub alt: Option<String>,
    pub src: Option<String>,
    pub href: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NavbarEntryRaw {
    pub to: Option<String>,
    pub href: Option<String>,
    pub label: Option<String>,
    pub position: Option<String>,
    #[serde(alias = "activeBasePath")]
    pub active_base_path: Option<String>,
}

/// Sidebar categories in document order.
///
/// Accepts either a map (`{ "API": ["core"] }`) or a list of
/// `{ label, items }` records. Map entries are consumed one at a time, so
/// formats that stream duplicate keys (JSON) keep them for the validator.
#[derive(Debug, Default)]
pub(crate) struct SidebarRaw(pub Vec<CategoryRaw>);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CategoryRaw {
    pub label: Option<String>,
    pub items: Vec<String>,
}

impl<'de> Deserialize<'de> for SidebarRaw {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(SidebarVisitor)
    }
}

struct SidebarVisitor;

impl<'de> Visitor<'de> for SidebarVisitor {
    type Value = SidebarRaw;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of category labels to document ids, or a list of categories")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut categories = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((label, items)) = map.next_entry::<String, Vec<String>>()? {
            categories.push(CategoryRaw {
                label: Some(label),
                items,
            });
        }
        Ok(SidebarRaw(categories))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut categories = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(category) = seq.next_element::<CategoryRaw>()? {
            categories.push(category);
        }
        Ok(SidebarRaw(categories))
    }
}

/// Standalone sidebar file referenced by the docs preset's `sidebar_path`.
///
/// Categories sit under a `sidebar` key, or under the one named sidebar the
/// file defines (`{ "someSidebar": { ... } }`).
#[derive(Debug)]
pub(crate) struct SidebarFileRaw {
    pub sidebar: SidebarRaw,
}

impl<'de> Deserialize<'de> for SidebarFileRaw {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_map(SidebarFileVisitor)
    }
}

struct SidebarFileVisitor;

impl<'de> Visitor<'de> for SidebarFileVisitor {
    type Value = SidebarFileRaw;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a `sidebar` key or a single named sidebar")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut named: Vec<(String, SidebarRaw)> = Vec::new();
        while let Some((name, sidebar)) = map.next_entry::<String, SidebarRaw>()? {
            named.push((name, sidebar));
        }

        if let Some(i) = named.iter().position(|(name, _)| name == "sidebar") {
            let (_, sidebar) = named.swap_remove(i);
            return Ok(SidebarFileRaw { sidebar });
        }
        match named.len() {
            1 => {
                let (_, sidebar) = named.swap_remove(0);
                Ok(SidebarFileRaw { sidebar })
            }
            0 => Err(de::Error::missing_field("sidebar")),
            _ => {
                let names: Vec<&str> = named.iter().map(|(name, _)| name.as_str()).collect();
                Err(de::Error::custom(format!(
                    "expected a `sidebar` key or a single named sidebar, found: {}",
                    names.join(", ")
                )))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ThemeRaw {
    #[serde(alias = "disableDarkMode")]
    pub disable_dark_mode: Option<bool>,
    #[serde(alias = "defaultMode")]
    pub default_mode: Option<String>,
    #[serde(alias = "respectPrefersColorScheme")]
    pub respect_prefers_color_scheme: Option<bool>,
    pub prism: PrismRaw,
    pub navbar: Option<NavbarRaw>,
    #[serde(alias = "gtag")]
    pub analytics: Option<AnalyticsRaw>,
    pub footer: Option<FooterRaw>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PrismRaw {
    pub theme: Option<String>,
    #[serde(alias = "darkTheme")]
    pub dark_theme: Option<String>,
    #[serde(alias = "additionalLanguages")]
    pub additional_languages: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AnalyticsRaw {
    #[serde(alias = "trackingID", alias = "trackingId")]
    pub tracking_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FooterRaw {
    pub style: Option<String>,
    pub copyright: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PresetRaw {
    pub name: Option<String>,
    pub docs: Option<DocsPresetRaw>,
    pub blog: Option<BlogPresetRaw>,
    pub theme: Option<ThemePresetRaw>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DocsPresetRaw {
    pub path: Option<String>,
    #[serde(alias = "routeBasePath")]
    pub route_base_path: Option<String>,
    #[serde(alias = "homePageId")]
    pub home_page_id: Option<String>,
    #[serde(alias = "sidebarPath")]
    pub sidebar_path: Option<String>,
    #[serde(alias = "editUrl")]
    pub edit_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BlogPresetRaw {
    #[serde(alias = "showReadingTime")]
    pub show_reading_time: Option<bool>,
    #[serde(alias = "editUrl")]
    pub edit_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ThemePresetRaw {
    #[serde(alias = "customCss")]
    pub custom_css: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(sidebar: &SidebarRaw) -> Vec<&str> {
        sidebar
            .0
            .iter()
            .map(|c| c.label.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_sidebar_map_form_keeps_order() {
        let json = r#"{"Zeta": ["z"], "Alpha": ["a", "b"], "Mid": ["m"]}"#;
        let sidebar: SidebarRaw = serde_json::from_str(json).unwrap();

        assert_eq!(labels(&sidebar), vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(sidebar.0[1].items, vec!["a", "b"]);
    }

    #[test]
    fn test_sidebar_map_form_keeps_duplicate_keys() {
        let json = r#"{"NBomber": ["a"], "NBomber": ["b"]}"#;
        let sidebar: SidebarRaw = serde_json::from_str(json).unwrap();

        assert_eq!(labels(&sidebar), vec!["NBomber", "NBomber"]);
    }

    #[test]
    fn test_sidebar_list_form() {
        let toml = r#"
[[sidebar]]
label = "Getting Started"
items = ["overview"]

[[sidebar]]
items = ["orphan"]
"#;
        let raw: SidebarFileRaw = toml::from_str(toml).unwrap();

        assert_eq!(raw.sidebar.0.len(), 2);
        assert_eq!(raw.sidebar.0[0].label.as_deref(), Some("Getting Started"));
        assert!(raw.sidebar.0[1].label.is_none());
    }

    #[test]
    fn test_sidebar_file_named_sidebar() {
        let json = r#"{"someSidebar": {"NBomber": ["overview"], "API": ["core"]}}"#;
        let raw: SidebarFileRaw = serde_json::from_str(json).unwrap();

        assert_eq!(labels(&raw.sidebar), vec!["NBomber", "API"]);
    }

    #[test]
    fn test_sidebar_file_prefers_sidebar_key() {
        let json = r#"{"docs": {"Old": ["a"]}, "sidebar": {"API": ["core"]}}"#;
        let raw: SidebarFileRaw = serde_json::from_str(json).unwrap();

        assert_eq!(labels(&raw.sidebar), vec!["API"]);
    }

    #[test]
    fn test_sidebar_file_rejects_ambiguous_names() {
        let json = r#"{"docs": {"A": ["a"]}, "api": {"B": ["b"]}}"#;
        let err = serde_json::from_str::<SidebarFileRaw>(json).unwrap_err();
        assert!(err.to_string().contains("docs, api"));

        assert!(serde_json::from_str::<SidebarFileRaw>("{}").is_err());
    }

    #[test]
    fn test_hoist_theme_sections() {
        let json = r#"{
            "themeConfig": {
                "navbar": {"links": [{"to": "docs/", "label": "Docs"}]},
                "gtag": {"trackingID": "UA-1"},
                "footer": {"style": "dark"}
            }
        }"#;
        let mut raw: SiteConfigRaw = serde_json::from_str(json).unwrap();
        raw.hoist_theme_sections();

        assert_eq!(raw.navbar.items.len(), 1);
        assert_eq!(
            raw.analytics.as_ref().and_then(|a| a.tracking_id.as_deref()),
            Some("UA-1")
        );
        assert_eq!(
            raw.footer.as_ref().and_then(|f| f.style.as_deref()),
            Some("dark")
        );
        assert!(raw.theme.navbar.is_none());
        assert!(raw.clashes.is_empty());
    }

    #[test]
    fn test_hoist_theme_sections_records_clashes() {
        let json = r#"{
            "navbar": {"items": [{"to": "docs/", "label": "Docs"}]},
            "footer": {"style": "light"},
            "themeConfig": {
                "navbar": {"links": [{"to": "blog", "label": "Blog"}]},
                "footer": {"style": "dark"}
            }
        }"#;
        let mut raw: SiteConfigRaw = serde_json::from_str(json).unwrap();
        raw.hoist_theme_sections();

        assert_eq!(raw.navbar.items[0].label.as_deref(), Some("Docs"));
        assert_eq!(
            raw.footer.as_ref().and_then(|f| f.style.as_deref()),
            Some("light")
        );
        assert_eq!(raw.clashes, vec!["theme.navbar", "theme.footer"]);
    }

    #[test]
    fn test_sidebar_rejects_scalar() {
        let result: Result<SidebarRaw, _> = serde_json::from_str(r#""overview""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_camel_case_aliases() {
        let json = r#"{
            "baseUrl": "/",
            "organizationName": "Pragmatic Flow",
            "navbar": {"links": [{"to": "docs/", "activeBasePath": "docs", "label": "Docs"}]},
            "themeConfig": {"disableDarkMode": true, "prism": {"additionalLanguages": ["csharp"]}},
            "gtag": {"trackingID": "UA-1"}
        }"#;
        let raw: SiteConfigRaw = serde_json::from_str(json).unwrap();

        assert_eq!(raw.base_url.as_deref(), Some("/"));
        assert_eq!(raw.organization_name.as_deref(), Some("Pragmatic Flow"));
        assert_eq!(raw.navbar.items.len(), 1);
        assert_eq!(raw.navbar.items[0].active_base_path.as_deref(), Some("docs"));
        assert_eq!(raw.theme.disable_dark_mode, Some(true));
        assert_eq!(raw.theme.prism.additional_languages, vec!["csharp"]);
        assert_eq!(
            raw.analytics.and_then(|a| a.tracking_id).as_deref(),
            Some("UA-1")
        );
    }

    #[test]
    fn test_docs_preset_picks_first_with_docs() {
        let toml = r#"
[[presets]]
name = "blog-only"
[presets.blog]
show_reading_time = true

[[presets]]
name = "classic"
[presets.docs]
home_page_id = "overview"
"#;
        let raw: SiteConfigRaw = toml::from_str(toml).unwrap();
        let docs = raw.docs_preset().unwrap();
        assert_eq!(docs.home_page_id.as_deref(), Some("overview"));
    }
}
