//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Bare `$VAR` is left alone so URLs containing `$` survive unchanged.

use crate::ConfigError;
use crate::raw::SiteConfigRaw;

/// Expand environment references in the fields that support them.
///
/// Expanded fields: `url`, `base_url`, `analytics.tracking_id`,
/// `presets[i].docs.edit_url` and `presets[i].blog.edit_url`.
pub(crate) fn expand_config(raw: &mut SiteConfigRaw) -> Result<(), ConfigError> {
    expand_field(&mut raw.url, "url")?;
    expand_field(&mut raw.base_url, "base_url")?;

    if let Some(analytics) = raw.analytics.as_mut() {
        expand_field(&mut analytics.tracking_id, "analytics.tracking_id")?;
    }

    for (i, preset) in raw.presets.iter_mut().enumerate() {
        if let Some(docs) = preset.docs.as_mut() {
            expand_field(&mut docs.edit_url, &format!("presets[{i}].docs.edit_url"))?;
        }
        if let Some(blog) = preset.blog.as_mut() {
            expand_field(&mut blog.edit_url, &format!("presets[{i}].blog.edit_url"))?;
        }
    }

    Ok(())
}

fn expand_field(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(current) = value.as_deref() {
        *value = Some(expand_env(current, field)?);
    }
    Ok(())
}

/// Expand environment variable references in a single string.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{AnalyticsRaw, BlogPresetRaw, PresetRaw};

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCSITE_TEST_HOST", "nbomber.com");
        }
        let result = expand_env("https://${DOCSITE_TEST_HOST:-example.com}", "url").unwrap();
        assert_eq!(result, "https://nbomber.com");
        unsafe {
            std::env::remove_var("DOCSITE_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSITE_UNSET_BASE");
        }
        let result = expand_env("${DOCSITE_UNSET_BASE:-/}", "base_url").unwrap();
        assert_eq!(result, "/");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSITE_MISSING_GTAG");
        }
        let err = expand_env("${DOCSITE_MISSING_GTAG}", "analytics.tracking_id").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCSITE_MISSING_GTAG"));
        assert!(err.to_string().contains("analytics.tracking_id"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("https://example.com/$path", "url").unwrap();
        assert_eq!(result, "https://example.com/$path");
    }

    #[test]
    fn test_expand_config_walks_nested_fields() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCSITE_TEST_GTAG", "UA-139868155-1");
            std::env::set_var("DOCSITE_TEST_REPO", "https://github.com/PragmaticFlow/NBomber");
        }

        let mut raw = SiteConfigRaw {
            base_url: Some("/".to_owned()),
            analytics: Some(AnalyticsRaw {
                tracking_id: Some("${DOCSITE_TEST_GTAG}".to_owned()),
            }),
            presets: vec![PresetRaw {
                blog: Some(BlogPresetRaw {
                    show_reading_time: Some(true),
                    edit_url: Some("${DOCSITE_TEST_REPO}/edit/dev/blog".to_owned()),
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        expand_config(&mut raw).unwrap();

        assert_eq!(raw.base_url.as_deref(), Some("/"));
        assert_eq!(
            raw.analytics.unwrap().tracking_id.as_deref(),
            Some("UA-139868155-1")
        );
        assert_eq!(
            raw.presets[0].blog.as_ref().unwrap().edit_url.as_deref(),
            Some("https://github.com/PragmaticFlow/NBomber/edit/dev/blog")
        );

        unsafe {
            std::env::remove_var("DOCSITE_TEST_GTAG");
            std::env::remove_var("DOCSITE_TEST_REPO");
        }
    }

    #[test]
    fn test_expand_config_reports_preset_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSITE_MISSING_EDIT");
        }
        let mut raw = SiteConfigRaw {
            presets: vec![
                PresetRaw::default(),
                PresetRaw {
                    blog: Some(BlogPresetRaw {
                        show_reading_time: None,
                        edit_url: Some("${DOCSITE_MISSING_EDIT}".to_owned()),
                    }),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let err = expand_config(&mut raw).unwrap_err();
        assert!(err.to_string().contains("presets[1].blog.edit_url"));
    }
}
