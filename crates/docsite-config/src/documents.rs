//! Resolution of document references against a document catalog.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use crate::error::{Collector, ConfigError, ViolationKind};
use crate::model::{NavbarTarget, SiteConfig};

/// Set of document ids known to the renderer.
pub trait DocumentIndex {
    /// Whether a document with this id exists.
    fn contains(&self, id: &str) -> bool;
}

impl<S: BuildHasher> DocumentIndex for HashSet<String, S> {
    fn contains(&self, id: &str) -> bool {
        HashSet::contains(self, id)
    }
}

impl DocumentIndex for BTreeSet<String> {
    fn contains(&self, id: &str) -> bool {
        BTreeSet::contains(self, id)
    }
}

impl SiteConfig {
    /// Check that every referenced document exists in `index`.
    ///
    /// Checks sidebar items, the docs home page and navbar routes under the
    /// docs route base path (`docs/` resolves to the home page). Navbar
    /// routes are not checked when no preset configures docs or docs are
    /// mounted at the site root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` listing every unresolved reference.
    pub fn check_documents<I: DocumentIndex + ?Sized>(&self, index: &I) -> Result<(), ConfigError> {
        let mut c = Collector::default();

        for (i, category) in self.sidebar.categories().iter().enumerate() {
            for (j, id) in category.items.iter().enumerate() {
                if !index.contains(id) {
                    c.push(
                        format!("sidebar[{i}].items[{j}]"),
                        ViolationKind::UnknownDocument(id.clone()),
                    );
                }
            }
        }

        if let Some((p, docs)) = self.docs_preset() {
            let home_page_id = docs.home_page_id.as_deref();
            if let Some(home) = home_page_id
                && !index.contains(home)
            {
                c.push(
                    format!("presets[{p}].docs.home_page_id"),
                    ViolationKind::UnknownDocument(home.to_owned()),
                );
            }

            for (i, entry) in self.navbar.items.iter().enumerate() {
                if let NavbarTarget::Route(route) = &entry.target
                    && let Some(id) = doc_id_for_route(route, &docs.route_base_path, home_page_id)
                    && !index.contains(id)
                {
                    c.push(
                        format!("navbar.items[{i}].to"),
                        ViolationKind::UnknownDocument(id.to_owned()),
                    );
                }
            }
        }

        c.finish(())
    }
}

/// Document id an internal route points to, if it is a docs route.
///
/// - `docs/overview` -> `overview`
/// - `/docs/api/core/` -> `api/core`
/// - `docs/` -> home page id
/// - `blog` -> `None`
fn doc_id_for_route<'a>(
    route: &'a str,
    route_base_path: &str,
    home_page_id: Option<&'a str>,
) -> Option<&'a str> {
    if route_base_path.is_empty() {
        return None;
    }

    let route = route.split(['#', '?']).next().unwrap_or("");
    let rest = route.trim_start_matches('/').strip_prefix(route_base_path)?;
    let id = if rest.is_empty() {
        rest
    } else {
        rest.strip_prefix('/')?.trim_end_matches('/')
    };

    if id.is_empty() { home_page_id } else { Some(id) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Format, load_config};

    const SITE: &str = r#"
title = "NBomber"
base_url = "/"

[[navbar.items]]
to = "docs/"
label = "Docs"

[[navbar.items]]
to = "docs/changelog"
label = "Changelog"

[[navbar.items]]
to = "blog"
label = "Blog"

[[navbar.items]]
href = "https://github.com/PragmaticFlow/NBomber/tree/dev/examples"
label = "Examples"

[sidebar]
"Getting Started" = ["overview", "docker-setup"]
"API" = ["core-abstractions"]

[[presets]]
name = "@docusaurus/preset-classic"
[presets.docs]
home_page_id = "overview"
"#;

    fn docs(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_doc_id_for_route() {
        assert_eq!(doc_id_for_route("docs/overview", "docs", None), Some("overview"));
        assert_eq!(doc_id_for_route("/docs/api/core/", "docs", None), Some("api/core"));
        assert_eq!(doc_id_for_route("docs/", "docs", Some("overview")), Some("overview"));
        assert_eq!(doc_id_for_route("docs", "docs", Some("overview")), Some("overview"));
        assert_eq!(doc_id_for_route("docs/", "docs", None), None);
        assert_eq!(doc_id_for_route("docs/logging#sinks", "docs", None), Some("logging"));
        assert_eq!(doc_id_for_route("docsify/x", "docs", None), None);
        assert_eq!(doc_id_for_route("blog", "docs", None), None);
        assert_eq!(doc_id_for_route("anything", "", None), None);
    }

    #[test]
    fn test_all_documents_resolve() {
        let config = load_config(SITE, Format::Toml).unwrap();
        let index = docs(&["overview", "docker-setup", "core-abstractions", "changelog"]);
        assert!(config.check_documents(&index).is_ok());
    }

    #[test]
    fn test_unresolved_documents_are_all_reported() {
        let config = load_config(SITE, Format::Toml).unwrap();
        let index: BTreeSet<String> = ["docker-setup"].iter().map(|s| (*s).to_owned()).collect();

        let err = config.check_documents(&index).unwrap_err();
        let violations = err.violations().unwrap();
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "sidebar[0].items[0]",
                "sidebar[1].items[0]",
                "presets[0].docs.home_page_id",
                "navbar.items[0].to",
                "navbar.items[1].to",
            ]
        );
        assert_eq!(
            violations.at("navbar.items[1].to").unwrap().kind,
            ViolationKind::UnknownDocument("changelog".to_owned())
        );
    }

    #[test]
    fn test_navbar_not_checked_without_docs_preset() {
        let source = r#"
title = "NBomber"
base_url = "/"

[[navbar.items]]
to = "docs/missing"
label = "Docs"

[sidebar]
"API" = ["core"]
"#;
        let config = load_config(source, Format::Toml).unwrap();
        assert!(config.check_documents(&docs(&["core"])).is_ok());
    }
}
