//! Content checks run by `jmlog validate` and before `jmlog build`.

use jmlog_core::BlogConfig;
use jmlog_core::post::POST_EXTENSION;
use jmlog_core::types::Post;
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check configuration and posts.
///
/// `posts` must include drafts so they can be counted; `content_dir` is
/// scanned for files that will never be published.
pub fn validate_blog(config: &BlogConfig, posts: &[Post], content_dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_config(config, &mut report);
    check_posts(posts, &mut report);
    check_stray_files(content_dir, &mut report);

    let drafts = posts.iter().filter(|p| p.meta.draft).count();
    report.info.push(format!(
        "{} post(s), {} published, {} draft(s)",
        posts.len(),
        posts.len() - drafts,
        drafts
    ));

    report
}

fn check_config(config: &BlogConfig, report: &mut ValidationReport) {
    if !config.site.base_url.starts_with("https://") {
        report.warnings.push(format!(
            "site.base_url '{}' is not https; search engines may ignore the sitemap",
            config.site.base_url
        ));
    }
    if config.site.title.trim().is_empty() {
        report.errors.push("site.title is empty".to_string());
    }
    if config.site.description.is_none() {
        report
            .warnings
            .push("site.description is not set".to_string());
    }
}

fn check_posts(posts: &[Post], report: &mut ValidationReport) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    for post in posts {
        // Slugs differing only by case collide on case-insensitive filesystems
        *seen.entry(post.slug.to_lowercase()).or_default() += 1;

        if !is_url_safe_slug(&post.slug) {
            report.warnings.push(format!(
                "Post '{}' has a slug that will be percent-encoded in its URL; \
                 rename the file using letters, digits, '-' and '_'",
                post.slug
            ));
        }

        if post.meta.title.trim().is_empty() {
            report
                .errors
                .push(format!("Post '{}' has an empty title", post.slug));
        }

        if let Some(updated) = post.meta.updated
            && updated < post.meta.date
        {
            report.errors.push(format!(
                "Post '{}' was updated ({}) before it was published ({})",
                post.slug, updated, post.meta.date
            ));
        }

        if !post.meta.draft && post.meta.description.is_none() {
            report.warnings.push(format!(
                "Post '{}' has no description; an excerpt will be used",
                post.slug
            ));
        }

        if post.body.trim().is_empty() {
            report
                .warnings
                .push(format!("Post '{}' has an empty body", post.slug));
        }
    }

    let mut duplicates: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();
    for (slug, count) in duplicates {
        report
            .errors
            .push(format!("Slug '{}' is used by {} posts", slug, count));
    }
}

/// Slugs that appear in URLs unchanged
fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn check_stray_files(content_dir: &Path, report: &mut ValidationReport) {
    if !content_dir.exists() {
        report.errors.push(format!(
            "Posts directory does not exist: {}",
            content_dir.display()
        ));
        return;
    }

    for entry in WalkDir::new(content_dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        if entry.file_type().is_dir() {
            report.warnings.push(format!(
                "Subdirectory {} is ignored; posts must sit directly in the posts directory",
                path.display()
            ));
        } else if entry.depth() == 1
            && path.extension().and_then(|e| e.to_str()) != Some(POST_EXTENSION)
        {
            report.warnings.push(format!(
                "{} is not a .{} file and will not be published",
                path.display(),
                POST_EXTENSION
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jmlog_core::config::parse_blog_toml_str;
    use jmlog_core::post::parse_post;
    use std::fs;
    use tempfile::TempDir;

    fn config(base_url: &str) -> BlogConfig {
        parse_blog_toml_str(&format!(
            "[site]\ntitle = \"jmlog\"\nbase_url = \"{base_url}\"\nauthor = \"jm\"\ndescription = \"d\"\n"
        ))
        .unwrap()
    }

    fn post(slug: &str, front: &str) -> Post {
        parse_post(slug, &format!("+++\n{front}\n+++\n\nbody\n")).unwrap()
    }

    #[test]
    fn test_clean_blog_has_no_errors() {
        let dir = TempDir::new().unwrap();
        let posts = vec![post(
            "a",
            "title = \"A\"\ndate = \"2024-01-01\"\ndescription = \"x\"",
        )];

        let report = validate_blog(&config("https://example.com"), &posts, dir.path());
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.info, vec!["1 post(s), 1 published, 0 draft(s)"]);
    }

    #[test]
    fn test_duplicate_slugs_are_errors() {
        let dir = TempDir::new().unwrap();
        let posts = vec![
            post("Hello", "title = \"A\"\ndate = \"2024-01-01\""),
            post("hello", "title = \"B\"\ndate = \"2024-01-02\""),
        ];

        let report = validate_blog(&config("https://example.com"), &posts, dir.path());
        assert!(report.errors.iter().any(|e| e.contains("Slug 'hello'")));
    }

    #[test]
    fn test_updated_before_date_is_error() {
        let dir = TempDir::new().unwrap();
        let posts = vec![post(
            "a",
            "title = \"A\"\ndate = \"2024-02-01\"\nupdated = \"2024-01-01\"",
        )];

        let report = validate_blog(&config("https://example.com"), &posts, dir.path());
        assert!(report.errors.iter().any(|e| e.contains("before it was published")));
    }

    #[test]
    fn test_warnings_for_http_and_stray_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let posts = vec![post("a", "title = \"A\"\ndate = \"2024-01-01\"\ndraft = true")];

        let report = validate_blog(&config("http://example.com"), &posts, dir.path());
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("not https")));
        assert!(report.warnings.iter().any(|w| w.contains("notes.txt")));
        assert!(report.warnings.iter().any(|w| w.contains("nested")));
        assert_eq!(report.info, vec!["1 post(s), 0 published, 1 draft(s)"]);
    }

    #[test]
    fn test_unsafe_slug_is_warned() {
        let dir = TempDir::new().unwrap();
        let posts = vec![
            post("my post", "title = \"A\"\ndate = \"2024-01-01\"\ndescription = \"x\""),
            post("fine_slug-2", "title = \"B\"\ndate = \"2024-01-02\"\ndescription = \"x\""),
        ];

        let report = validate_blog(&config("https://example.com"), &posts, dir.path());
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1, "{:?}", report.warnings);
        assert!(report.warnings[0].contains("'my post'"));
        assert!(report.warnings[0].contains("percent-encoded"));
    }

    #[test]
    fn test_missing_content_dir_is_error() {
        let dir = TempDir::new().unwrap();
        let report = validate_blog(&config("https://example.com"), &[], &dir.path().join("posts"));
        assert!(!report.is_ok());
    }
}
