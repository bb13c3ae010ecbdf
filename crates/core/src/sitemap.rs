//! Sitemap assembly.
//!
//! [`SitemapProvider`] asks its [`PostSource`] for the post entries and puts
//! the home page in front of them. A failing source fails the whole call.

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

use crate::error::Result;
use crate::post::PostSource;
use crate::types::SitemapEntry;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Well-known path of the sitemap resource
pub const SITEMAP_PATH: &str = "sitemap.xml";

pub struct SitemapProvider {
    base_url: String,
    source: Arc<dyn PostSource>,
}

impl SitemapProvider {
    pub fn new(base_url: impl Into<String>, source: Arc<dyn PostSource>) -> Self {
        Self {
            base_url: base_url.into(),
            source,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full entry list, timestamping the home entry with the current time
    pub async fn sitemap(&self) -> Result<Vec<SitemapEntry>> {
        self.sitemap_at(Utc::now()).await
    }

    /// Full entry list with the home entry stamped at `now`
    pub async fn sitemap_at(&self, now: DateTime<Utc>) -> Result<Vec<SitemapEntry>> {
        let posts = self.source.sitemap_post_list().await?;

        let mut entries = Vec::with_capacity(posts.len() + 1);
        entries.push(SitemapEntry::new(self.base_url.clone(), now));
        entries.extend(posts);

        tracing::debug!(entries = entries.len(), "sitemap generated");
        Ok(entries)
    }
}

/// XML-escape text content and attribute values
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render entries as a sitemaps.org `urlset` document
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));

    for entry in entries {
        xml.push_str("<url>\n");
        xml.push_str(&format!("<loc>{}</loc>\n", xml_escape(&entry.url)));
        xml.push_str(&format!(
            "<lastmod>{}</lastmod>\n",
            entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        xml.push_str("</url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// robots.txt allowing every crawler and pointing at the sitemap
pub fn render_robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/{}\n",
        base_url.trim_end_matches('/'),
        SITEMAP_PATH
    )
}
