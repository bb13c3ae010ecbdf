use anyhow::{Context, Result};
use jmlog_core::SitemapProvider;
use jmlog_core::sitemap::render_sitemap_xml;
use std::path::PathBuf;

use super::load_blog;
use crate::SitemapFormat;

/// Print the sitemap the site would publish
pub async fn run(path: PathBuf, format: SitemapFormat) -> Result<()> {
    let blog = load_blog(&path)?;
    let provider = SitemapProvider::new(blog.config.site.base_url.clone(), blog.source);

    let entries = provider
        .sitemap()
        .await
        .context("Failed to generate sitemap")?;

    match format {
        SitemapFormat::Xml => print!("{}", render_sitemap_xml(&entries)),
        SitemapFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    Ok(())
}
