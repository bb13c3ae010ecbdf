use anyhow::{Context, Result};
use jmlog_core::{PostSource, SitemapProvider};
use jmlog_generator::generate_site;
use jmlog_validator::validate_blog;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::load_blog;

/// Directory of files copied verbatim into the site root
const PUBLIC_DIR: &str = "public";

/// Build static site for deployment
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let blog = load_blog(&path)?;
    println!("✓ Loaded: {}", blog.config.site.title);

    // Refuse to publish a broken blog
    let all_posts = blog.source.all_posts().await?;
    let report = validate_blog(&blog.config, &all_posts, blog.source.dir());
    for warning in &report.warnings {
        eprintln!("   ⚠ Warning: {}", warning);
    }
    if !report.is_ok() {
        for error in &report.errors {
            eprintln!("   ✗ {}", error);
        }
        anyhow::bail!("Validation failed, run 'jmlog validate {}'", path.display());
    }

    let posts = blog.source.posts().await?;
    println!("  Posts: {}", posts.len());
    println!();

    println!("🗺  Generating sitemap...");
    let provider = SitemapProvider::new(blog.config.site.base_url.clone(), blog.source.clone());
    let sitemap = provider
        .sitemap()
        .await
        .context("Failed to generate sitemap")?;
    println!("   ✓ {} sitemap entries", sitemap.len());

    println!("📄 Rendering pages...");
    let site = generate_site(&blog.config, &posts, &sitemap);

    fs::create_dir_all(&output).context("Failed to create output directory")?;

    // Public files go first so generated output wins on a name clash
    println!("📁 Copying public files...");
    let public = copy_public(&path.join(PUBLIC_DIR), &output)?;
    println!("   ✓ Copied {} public files", public.len());

    let generated = site
        .pages
        .iter()
        .map(|(rel, contents)| (rel, contents.as_bytes()))
        .chain(site.assets.iter().map(|(rel, contents)| (rel, contents.as_slice())));
    for (rel, contents) in generated {
        if public.contains(Path::new(rel)) {
            eprintln!(
                "   ⚠ Warning: {}/{} is replaced by the generated file",
                PUBLIC_DIR, rel
            );
            tracing::warn!(path = %rel, "public file shadowed by generated output");
        }
        write_output(&output, rel, contents)?;
    }
    println!("   ✓ Wrote {} pages", site.pages.len());
    println!("   ✓ Wrote {} assets", site.assets.len());

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

fn write_output(output: &Path, rel: &str, contents: &[u8]) -> Result<()> {
    let dst = output.join(rel);
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&dst, contents).with_context(|| format!("Failed to write {}", dst.display()))?;
    tracing::debug!(path = %dst.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

/// Copy everything under `public/` into the output root, keeping layout.
/// Returns the copied files relative to the output root; a missing
/// directory copies nothing.
fn copy_public(public: &Path, output: &Path) -> Result<HashSet<PathBuf>> {
    let mut copied = HashSet::new();
    if !public.exists() {
        return Ok(copied);
    }

    for entry in WalkDir::new(public).min_depth(1) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(public)
            .context("Public file outside public directory")?;
        let dst = output.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied.insert(rel.to_path_buf());
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_blog(dir: &Path) {
        fs::write(
            dir.join("blog.toml"),
            "[site]\ntitle = \"jmlog\"\nbase_url = \"https://jmlog.vercel.app\"\nauthor = \"jm\"\n",
        )
        .unwrap();
        fs::create_dir_all(dir.join("posts")).unwrap();
        fs::write(
            dir.join("posts").join("hello.md"),
            "+++\ntitle = \"Hello\"\ndate = \"2024-01-01\"\n+++\n\nHi.\n",
        )
        .unwrap();
        fs::write(
            dir.join("posts").join("draft.md"),
            "+++\ntitle = \"Soon\"\ndate = \"2024-02-01\"\ndraft = true\n+++\n\nLater.\n",
        )
        .unwrap();
        fs::create_dir_all(dir.join("public").join("img")).unwrap();
        fs::write(dir.join("public").join("img").join("a.png"), b"png").unwrap();
    }

    #[tokio::test]
    async fn test_build_writes_site() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_blog(src.path());

        run(src.path().to_path_buf(), out.path().to_path_buf())
            .await
            .unwrap();

        let out = out.path();
        assert!(out.join("index.html").exists());
        assert!(out.join("blog/hello/index.html").exists());
        assert!(!out.join("blog/draft/index.html").exists());
        assert!(out.join("theme.js").exists());
        assert!(out.join("style.css").exists());
        assert!(out.join("robots.txt").exists());
        assert!(out.join("img/a.png").exists());

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("<url>").count(), 2);
        assert!(sitemap.contains("<loc>https://jmlog.vercel.app/blog/hello</loc>"));
        assert!(!sitemap.contains("/blog/draft"));
    }

    #[tokio::test]
    async fn test_build_fails_without_config() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let result = run(src.path().to_path_buf(), out.path().to_path_buf()).await;
        assert!(result.unwrap_err().to_string().contains("blog.toml not found"));
    }

    #[test]
    fn test_copy_public_missing_dir() {
        let out = TempDir::new().unwrap();
        let copied = copy_public(&out.path().join("public"), out.path()).unwrap();
        assert!(copied.is_empty());
    }

    #[tokio::test]
    async fn test_generated_files_win_over_public() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_blog(src.path());
        fs::write(src.path().join("public").join("sitemap.xml"), "stale").unwrap();
        fs::write(src.path().join("public").join("theme.js"), "stale").unwrap();

        run(src.path().to_path_buf(), out.path().to_path_buf())
            .await
            .unwrap();

        let sitemap = fs::read_to_string(out.path().join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<urlset"));
        assert!(sitemap.contains("<loc>https://jmlog.vercel.app/blog/hello</loc>"));
        let theme = fs::read_to_string(out.path().join("theme.js")).unwrap();
        assert_ne!(theme, "stale");
        assert!(out.path().join("img/a.png").exists());
    }
}
