use crate::error::{Error, Result};
use crate::theme::Preference;
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file at the root of a blog directory
pub const CONFIG_FILE: &str = "blog.toml";

/// Raw TOML configuration structure
/// This matches the blog.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    content: Option<RawContent>,
    #[serde(default)]
    theme: Option<RawTheme>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    title: String,
    base_url: Option<String>,
    author: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    posts: String, // Convert to PathBuf
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    default: Option<String>, // Parse as Preference
    storage_key: Option<String>,
}

/// Parse blog.toml from a file path
pub fn parse_blog_toml<P: AsRef<Path>>(path: P) -> Result<BlogConfig> {
    let content = fs::read_to_string(path)?;
    parse_blog_toml_str(&content)
}

/// Parse blog.toml from a string (useful for testing)
pub fn parse_blog_toml_str(content: &str) -> Result<BlogConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let base_url = validate_base_url(raw.site.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

    let site = SiteConfig {
        title: raw.site.title,
        base_url,
        author: raw.site.author,
        description: raw.site.description,
    };

    let posts = match raw.content {
        Some(content) => validate_path(&content.posts, "content.posts")?,
        None => PathBuf::from("posts"),
    };

    let mut theme = ThemeConfig::default();
    if let Some(raw_theme) = raw.theme {
        if let Some(default) = raw_theme.default {
            theme.default = default
                .parse::<Preference>()
                .map_err(|e| Error::ConfigParse(format!("Invalid theme.default: {}", e)))?;
        }
        if let Some(key) = raw_theme.storage_key {
            if key.trim().is_empty() {
                return Err(Error::ConfigParse(
                    "theme.storage_key must not be empty".to_string(),
                ));
            }
            theme.storage_key = key;
        }
    }

    Ok(BlogConfig {
        site,
        content: ContentConfig { posts },
        theme,
    })
}

/// Normalize the site base address.
///
/// Requires an http(s) scheme and a host, and strips trailing slashes so
/// that post URLs can be joined with a single `/`.
fn validate_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| {
            Error::ConfigParse(format!(
                "site.base_url must start with http:// or https://: '{}'",
                url
            ))
        })?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(Error::ConfigParse(format!(
            "site.base_url has no valid host: '{}'",
            url
        )));
    }

    Ok(url.trim_end_matches('/').to_string())
}

/// Validate and convert a path string to PathBuf.
///
/// This function prevents path traversal by rejecting:
/// - Absolute paths (starting with `/` or Windows drive letters)
/// - Paths containing parent directory references (`..`)
///
/// # Arguments
///
/// * `path_str` - The path string from user input (blog.toml)
/// * `field_name` - Name of the field for error messages
///
/// # Examples
///
/// ```text
/// validate_path("posts", "content.posts")  → Ok(PathBuf)
/// validate_path("/etc", "content.posts")  → Err("Absolute paths not allowed...")
/// validate_path("../other-blog/posts", "content.posts")  → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    // Ensure path is not empty
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_valid_relative() {
        assert!(validate_path("posts", "content.posts").is_ok());
        assert!(validate_path("content/posts", "content.posts").is_ok());
        assert!(validate_path("./posts", "content.posts").is_ok());
    }

    #[test]
    fn test_validate_path_rejects_absolute_unix() {
        let result = validate_path("/etc/passwd", "content.posts");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Absolute paths not allowed")
        );
    }

    #[test]
    fn test_validate_path_rejects_parent_dir() {
        let result = validate_path("../posts", "content.posts");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Parent directory references")
        );

        let result = validate_path("posts/../../secret", "content.posts");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_path_rejects_empty() {
        let result = validate_path("   ", "content.posts");
        assert!(result.unwrap_err().to_string().contains("Empty path"));
    }

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("https://example.com/").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            validate_base_url("http://localhost:8080").unwrap(),
            "http://localhost:8080"
        );
        assert!(validate_base_url("example.com").is_err());
        assert!(validate_base_url("https://").is_err());
        assert!(validate_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = r##"
[site]
title = "jmlog"
author = "jm"
        "##;

        let config = parse_blog_toml_str(toml).unwrap();
        assert_eq!(config.site.title, "jmlog");
        assert_eq!(config.site.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.content.posts, PathBuf::from("posts"));
        assert_eq!(config.theme.default, Preference::Light);
        assert_eq!(config.theme.storage_key, "theme");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r##"
[site]
title = "Notes"
base_url = "https://notes.example.com/"
author = "Someone"
description = "Things I learned"

[content]
posts = "content/posts"

[theme]
default = "dark"
storage_key = "notes-theme"
        "##;

        let config = parse_blog_toml_str(toml).unwrap();
        assert_eq!(config.site.base_url, "https://notes.example.com");
        assert_eq!(config.site.description.as_deref(), Some("Things I learned"));
        assert_eq!(config.content.posts, PathBuf::from("content/posts"));
        assert_eq!(config.theme.default, Preference::Dark);
        assert_eq!(config.theme.storage_key, "notes-theme");
    }

    #[test]
    fn test_parse_config_rejects_unknown_preference() {
        let toml = r##"
[site]
title = "jmlog"
author = "jm"

[theme]
default = "system"
        "##;

        let result = parse_blog_toml_str(toml);
        assert!(result.unwrap_err().to_string().contains("theme.default"));
    }

    #[test]
    fn test_parse_config_rejects_path_traversal() {
        let toml = r##"
[site]
title = "jmlog"
author = "jm"

[content]
posts = "../../etc"
        "##;

        let result = parse_blog_toml_str(toml);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Parent directory references")
        );
    }

    #[test]
    fn test_parse_config_missing_site_fails() {
        assert!(parse_blog_toml_str("[theme]\ndefault = \"dark\"\n").is_err());
    }
}
