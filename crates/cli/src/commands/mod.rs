pub mod build;
pub mod init;
pub mod preview;
pub mod sitemap;
pub mod validate;

use anyhow::{Context, Result};
use jmlog_core::config::{CONFIG_FILE, parse_blog_toml};
use jmlog_core::{BlogConfig, ContentDir};
use std::path::Path;
use std::sync::Arc;

/// Configuration plus the post source it points at
pub struct Blog {
    pub config: BlogConfig,
    pub source: Arc<ContentDir>,
}

/// Load blog.toml from a blog directory, with hints for the usual mistakes
pub fn load_blog(path: &Path) -> Result<Blog> {
    if !path.exists() {
        anyhow::bail!(
            "Blog directory does not exist: {}\nRun 'jmlog init {}' first",
            path.display(),
            path.display()
        );
    }

    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'jmlog init {}' first",
            CONFIG_FILE,
            path.display(),
            path.display()
        );
    }

    let config = parse_blog_toml(&config_path)
        .with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;
    let source = Arc::new(ContentDir::new(
        path.join(&config.content.posts),
        config.site.base_url.clone(),
    ));

    Ok(Blog { config, source })
}
