use chrono::{DateTime, NaiveDate, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::theme::Preference;

/// Base address used when `blog.toml` does not override it
pub const DEFAULT_BASE_URL: &str = "https://jmlog.vercel.app";

/// Everything but RFC 3986 unreserved characters is escaped in a slug
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Complete blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    pub site: SiteConfig,
    pub content: ContentConfig,
    pub theme: ThemeConfig,
}

/// Site identity, used in page heads and the sitemap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    /// Absolute base address without a trailing slash
    pub base_url: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where posts live, relative to the blog directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub posts: PathBuf,
}

/// Theme switch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Preference applied when the browser has nothing stored
    pub default: Preference,
    /// `localStorage` key holding the visitor's preference
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: Preference::Light,
            storage_key: "theme".to_string(),
        }
    }
}

/// Post front matter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
}

/// A single markdown post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    pub meta: PostMeta,
    /// Raw markdown following the front matter
    pub body: String,
}

impl Post {
    /// Last modification time: `updated` when present, otherwise `date`,
    /// at midnight UTC
    pub fn last_modified(&self) -> DateTime<Utc> {
        let day = self.meta.updated.unwrap_or(self.meta.date);
        day.and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_default()
    }

    /// Site-relative path of the post page, slug percent-encoded
    pub fn path(&self) -> String {
        format!("/blog/{}", utf8_percent_encode(&self.slug, PATH_SEGMENT))
    }

    /// Absolute URL of the post page
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// One indexable URL in the sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
}

impl SitemapEntry {
    pub fn new(url: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            last_modified,
        }
    }
}

/// Helper to format a post date for display
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
