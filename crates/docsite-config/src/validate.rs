//! Conversion of raw configuration into a validated [`SiteConfig`].
//!
//! The validator never stops at the first problem: every rule is checked and
//! every violation is collected, then the result is all-or-nothing.

use std::collections::{HashMap, HashSet};

use url::Url;

use crate::error::{Collector, ConfigError, ViolationKind};
use crate::language::canonical_language;
use crate::model::{
    Analytics, BlogOptions, ColorMode, DEFAULT_DOCS_PATH, DEFAULT_ROUTE_BASE_PATH, DocsOptions,
    Footer, FooterStyle, LinkTarget, Logo, Navbar, NavbarEntry, NavbarTarget, Position,
    PrismConfig, PrismTheme, Preset, SidebarCategory, SidebarTree, SiteConfig, ThemeConfig,
    ThemeOptions,
};
use crate::raw::{
    AnalyticsRaw, FooterRaw, LogoRaw, NavbarEntryRaw, NavbarRaw, PresetRaw, SidebarRaw,
    SiteConfigRaw, ThemeRaw,
};

/// Validate raw configuration.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` listing every violated rule.
pub(crate) fn validate(raw: SiteConfigRaw) -> Result<SiteConfig, ConfigError> {
    let mut c = Collector::default();

    let title = required(&mut c, raw.title, "title");

    let base_url = required(&mut c, raw.base_url, "base_url");
    if !base_url.is_empty() && !is_http_url(&base_url) && !is_root_relative(&base_url) {
        c.push("base_url", ViolationKind::InvalidBaseUrl(base_url.clone()));
    }

    let url = optional(&mut c, raw.url, "url");
    if let Some(url) = &url
        && !is_http_url(url)
    {
        c.push("url", ViolationKind::InvalidUrl(url.clone()));
    }

    let config = SiteConfig {
        title,
        tagline: raw.tagline.unwrap_or_default(),
        url,
        base_url,
        favicon: optional(&mut c, raw.favicon, "favicon"),
        organization_name: optional(&mut c, raw.organization_name, "organization_name"),
        project_name: optional(&mut c, raw.project_name, "project_name"),
        navbar: validate_navbar(&mut c, raw.navbar),
        sidebar: validate_sidebar(&mut c, raw.sidebar),
        theme: validate_theme(&mut c, raw.theme),
        analytics: raw.analytics.map(|a| validate_analytics(&mut c, a)),
        footer: raw.footer.map(|f| validate_footer(&mut c, f)),
        presets: validate_presets(&mut c, raw.presets),
        config_path: None,
    };

    for path in raw.clashes {
        c.push(path, ViolationKind::DuplicateSection);
    }

    c.finish(config)
}

fn validate_navbar(c: &mut Collector, raw: NavbarRaw) -> Navbar {
    let items = raw
        .items
        .into_iter()
        .enumerate()
        .map(|(i, entry)| validate_navbar_entry(c, entry, &format!("navbar.items[{i}]")))
        .collect();

    Navbar {
        title: raw.title,
        logo: raw.logo.map(|logo| validate_logo(c, logo)),
        items,
    }
}

fn validate_navbar_entry(c: &mut Collector, raw: NavbarEntryRaw, path: &str) -> NavbarEntry {
    let label = required(c, raw.label, &format!("{path}.label"));

    let target = match (raw.to, raw.href) {
        (Some(_), Some(_)) => {
            c.push(path, ViolationKind::AmbiguousTarget);
            NavbarTarget::Route(String::new())
        }
        (None, None) => {
            c.push(path, ViolationKind::MissingTarget);
            NavbarTarget::Route(String::new())
        }
        (Some(to), None) => {
            let field = format!("{path}.to");
            if is_blank(&to) {
                c.push(field, ViolationKind::Empty);
            } else if to.contains("://") || to.starts_with("//") {
                c.push(field, ViolationKind::ExternalRoute(to.clone()));
            }
            NavbarTarget::Route(to)
        }
        (None, Some(href)) => {
            let field = format!("{path}.href");
            if is_blank(&href) {
                c.push(field, ViolationKind::Empty);
            } else if !is_href(&href) {
                c.push(field, ViolationKind::InvalidHref(href.clone()));
            }
            NavbarTarget::External(href)
        }
    };

    NavbarEntry {
        target,
        label,
        position: choice(
            c,
            raw.position,
            &format!("{path}.position"),
            Position::parse,
            Position::EXPECTED,
        )
        .unwrap_or_default(),
        active_base_path: optional(c, raw.active_base_path, &format!("{path}.active_base_path")),
    }
}

fn validate_logo(c: &mut Collector, raw: LogoRaw) -> Logo {
    let href = optional(c, raw.href, "navbar.logo.href");
    if let Some(href) = &href
        && !is_href(href)
        && !is_root_relative(href)
    {
        c.push("navbar.logo.href", ViolationKind::InvalidBaseUrl(href.clone()));
    }

    Logo {
        alt: raw.alt,
        src: required(c, raw.src, "navbar.logo.src"),
        href,
        target: choice(
            c,
            raw.target,
            "navbar.logo.target",
            LinkTarget::parse,
            LinkTarget::EXPECTED,
        ),
    }
}

fn validate_sidebar(c: &mut Collector, raw: Option<SidebarRaw>) -> SidebarTree {
    let Some(SidebarRaw(raw_categories)) = raw else {
        c.push("sidebar", ViolationKind::Missing);
        return SidebarTree::default();
    };

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut categories = Vec::with_capacity(raw_categories.len());

    for (i, category) in raw_categories.into_iter().enumerate() {
        let path = format!("sidebar[{i}]");
        let label = required(c, category.label, &format!("{path}.label"));

        if !label.is_empty() {
            if let Some(&first) = first_seen.get(&label) {
                c.push(
                    &path,
                    ViolationKind::DuplicateCategory {
                        label: label.clone(),
                        first,
                    },
                );
            } else {
                first_seen.insert(label.clone(), i);
            }
        }

        if category.items.is_empty() {
            c.push(&path, ViolationKind::EmptyCategory(label.clone()));
        }
        for (j, item) in category.items.iter().enumerate() {
            if is_blank(item) {
                c.push(format!("{path}.items[{j}]"), ViolationKind::Empty);
            }
        }

        categories.push(SidebarCategory {
            label,
            items: category.items,
        });
    }

    SidebarTree { categories }
}

fn validate_theme(c: &mut Collector, raw: ThemeRaw) -> ThemeConfig {
    let disable_dark_mode = raw.disable_dark_mode.unwrap_or(false);
    let default_mode = choice(
        c,
        raw.default_mode,
        "theme.default_mode",
        ColorMode::parse,
        ColorMode::EXPECTED,
    )
    .unwrap_or_default();
    if disable_dark_mode && default_mode == ColorMode::Dark {
        c.push("theme.default_mode", ViolationKind::DarkModeDisabled);
    }

    let theme = choice(
        c,
        raw.prism.theme,
        "theme.prism.theme",
        PrismTheme::parse,
        PrismTheme::EXPECTED,
    )
    .unwrap_or_default();
    let dark_theme = choice(
        c,
        raw.prism.dark_theme,
        "theme.prism.dark_theme",
        PrismTheme::parse,
        PrismTheme::EXPECTED,
    );

    let mut seen = HashSet::new();
    let mut additional_languages = Vec::with_capacity(raw.prism.additional_languages.len());
    for (i, language) in raw.prism.additional_languages.into_iter().enumerate() {
        let path = format!("theme.prism.additional_languages[{i}]");
        match canonical_language(&language) {
            None => c.push(path, ViolationKind::UnknownLanguage(language)),
            Some(canonical) if !seen.insert(canonical) => {
                c.push(path, ViolationKind::DuplicateLanguage(language));
            }
            Some(canonical) => additional_languages.push(canonical.to_owned()),
        }
    }

    ThemeConfig {
        disable_dark_mode,
        default_mode,
        respect_prefers_color_scheme: raw.respect_prefers_color_scheme.unwrap_or(false),
        prism: PrismConfig {
            theme,
            dark_theme,
            additional_languages,
        },
    }
}

fn validate_analytics(c: &mut Collector, raw: AnalyticsRaw) -> Analytics {
    Analytics {
        tracking_id: required(c, raw.tracking_id, "analytics.tracking_id"),
    }
}

fn validate_footer(c: &mut Collector, raw: FooterRaw) -> Footer {
    Footer {
        style: choice(
            c,
            raw.style,
            "footer.style",
            FooterStyle::parse,
            FooterStyle::EXPECTED,
        )
        .unwrap_or_default(),
        copyright: raw.copyright,
    }
}

fn validate_presets(c: &mut Collector, raw: Vec<PresetRaw>) -> Vec<Preset> {
    let mut names = HashSet::new();
    let mut presets = Vec::with_capacity(raw.len());

    for (i, preset) in raw.into_iter().enumerate() {
        let path = format!("presets[{i}]");
        let name = required(c, preset.name, &format!("{path}.name"));
        if !name.is_empty() && !names.insert(name.clone()) {
            c.push(
                format!("{path}.name"),
                ViolationKind::DuplicatePreset(name.clone()),
            );
        }

        let docs = preset.docs.map(|docs| {
            let route_path = format!("{path}.docs.route_base_path");
            let route_base_path = docs
                .route_base_path
                .unwrap_or_else(|| DEFAULT_ROUTE_BASE_PATH.to_owned());
            if route_base_path.starts_with('/') || route_base_path.ends_with('/') {
                c.push(
                    route_path,
                    ViolationKind::SlashDelimited(route_base_path.clone()),
                );
            }

            DocsOptions {
                path: optional(c, docs.path, &format!("{path}.docs.path"))
                    .unwrap_or_else(|| DEFAULT_DOCS_PATH.to_owned()),
                route_base_path,
                home_page_id: optional(c, docs.home_page_id, &format!("{path}.docs.home_page_id")),
                sidebar_path: optional(c, docs.sidebar_path, &format!("{path}.docs.sidebar_path")),
                edit_url: http_url(c, docs.edit_url, &format!("{path}.docs.edit_url")),
            }
        });

        let blog = preset.blog.map(|blog| BlogOptions {
            show_reading_time: blog.show_reading_time.unwrap_or(false),
            edit_url: http_url(c, blog.edit_url, &format!("{path}.blog.edit_url")),
        });

        let theme = preset.theme.map(|theme| ThemeOptions {
            custom_css: optional(c, theme.custom_css, &format!("{path}.theme.custom_css")),
        });

        presets.push(Preset {
            name,
            docs,
            blog,
            theme,
        });
    }

    presets
}

/// Required, non-blank string. Returns an empty string after reporting.
fn required(c: &mut Collector, value: Option<String>, path: &str) -> String {
    match value {
        None => {
            c.push(path, ViolationKind::Missing);
            String::new()
        }
        Some(v) if is_blank(&v) => {
            c.push(path, ViolationKind::Empty);
            String::new()
        }
        Some(v) => v,
    }
}

/// Optional string that must not be blank when present.
fn optional(c: &mut Collector, value: Option<String>, path: &str) -> Option<String> {
    match value {
        Some(v) if is_blank(&v) => {
            c.push(path, ViolationKind::Empty);
            None
        }
        other => other,
    }
}

/// Optional absolute http(s) URL.
fn http_url(c: &mut Collector, value: Option<String>, path: &str) -> Option<String> {
    let value = optional(c, value, path)?;
    if !is_http_url(&value) {
        c.push(path, ViolationKind::InvalidUrl(value.clone()));
    }
    Some(value)
}

/// Optional enumerated value.
fn choice<T>(
    c: &mut Collector,
    value: Option<String>,
    path: &str,
    parse: fn(&str) -> Option<T>,
    expected: &'static str,
) -> Option<T> {
    let value = value?;
    let parsed = parse(&value);
    if parsed.is_none() {
        c.push(path, ViolationKind::UnknownValue { value, expected });
    }
    parsed
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Well-formed `http://` or `https://` URL with a host.
fn is_http_url(s: &str) -> bool {
    let Some(rest) = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
    else {
        return false;
    };
    if rest.starts_with('/') || has_whitespace(s) {
        return false;
    }
    Url::parse(s).is_ok_and(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

/// Path starting with a single `/`.
fn is_root_relative(s: &str) -> bool {
    s.starts_with('/') && !s.starts_with("//") && !has_whitespace(s)
}

fn is_href(s: &str) -> bool {
    if is_http_url(s) {
        return true;
    }
    s.starts_with("mailto:")
        && !has_whitespace(s)
        && Url::parse(s).is_ok_and(|url| url.path().contains('@'))
}
