use anyhow::Result;
use jmlog_validator::validate_blog;
use std::path::PathBuf;

use super::load_blog;

pub async fn run(path: PathBuf) -> Result<()> {
    println!("Validating blog at: {}", path.display());

    let blog = load_blog(&path)?;
    println!("✓ blog.toml valid");
    println!("  Site: {} by {}", blog.config.site.title, blog.config.site.author);
    println!("  Base URL: {}", blog.config.site.base_url);

    let posts = blog.source.all_posts().await?;
    let report = validate_blog(&blog.config, &posts, blog.source.dir());

    for line in &report.info {
        println!("  {}", line);
    }
    for warning in &report.warnings {
        println!("⚠ {}", warning);
    }
    for error in &report.errors {
        println!("✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✓ Blog is valid");
    Ok(())
}
