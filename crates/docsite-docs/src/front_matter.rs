//! YAML front matter and title extraction for document files.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("valid H1 regex"));

/// Front matter fields used by the catalog.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
}

/// Split `content` into its front matter block and the remaining body.
///
/// Front matter is a leading block delimited by `---` lines.
/// Returns `(None, content)` when there is no such block.
pub(crate) fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let body = &rest[offset + line.len()..];
            return (Some(&rest[..offset]), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse front matter fields.
///
/// Returns `None` if the YAML is empty or malformed.
pub(crate) fn parse_front_matter(yaml: &str) -> Option<FrontMatter> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_yaml::from_str(trimmed).ok()
}

/// First level-one heading in a markdown body.
pub(crate) fn extract_h1(body: &str) -> Option<String> {
    let caps = H1_REGEX.captures(body)?;
    Some(caps[1].trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let content = "---\nid: intro\ntitle: Intro\n---\n# Heading\n";
        let (yaml, body) = split_front_matter(content);
        assert_eq!(yaml, Some("id: intro\ntitle: Intro\n"));
        assert_eq!(body, "# Heading\n");
    }

    #[test]
    fn test_split_front_matter_crlf() {
        let content = "---\r\nid: intro\r\n---\r\nbody";
        let (yaml, body) = split_front_matter(content);
        assert_eq!(yaml, Some("id: intro\r\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_without_front_matter() {
        let content = "# Heading\n---\nnot front matter\n";
        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn test_split_unterminated_front_matter() {
        let content = "---\nid: intro\n# Heading\n";
        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn test_parse_front_matter() {
        let fm = parse_front_matter("id: docker-setup\ntitle: \"Docker Setup\"").unwrap();
        assert_eq!(fm.id.as_deref(), Some("docker-setup"));
        assert_eq!(fm.title.as_deref(), Some("Docker Setup"));

        let fm = parse_front_matter("sidebar_label: Setup").unwrap();
        assert!(fm.id.is_none());

        assert!(parse_front_matter("").is_none());
        assert!(parse_front_matter("id: [broken").is_none());
    }

    #[test]
    fn test_extract_h1() {
        assert_eq!(
            extract_h1("intro\n\n#  Load testing basics \n## Sub"),
            Some("Load testing basics".to_owned())
        );
        assert_eq!(extract_h1("## Only h2"), None);
    }
}
