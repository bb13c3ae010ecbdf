use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{Post, PostMeta, SitemapEntry};

const FRONT_MATTER_FENCE: &str = "+++";
pub const POST_EXTENSION: &str = "md";

/// Supplier of published posts.
///
/// `sitemap_post_list` yields entries that are already shaped for the
/// sitemap; callers never build post URLs themselves.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn posts(&self) -> Result<Vec<Post>>;

    async fn sitemap_post_list(&self) -> Result<Vec<SitemapEntry>>;
}

/// Posts read from a directory of markdown files
#[derive(Debug, Clone)]
pub struct ContentDir {
    dir: PathBuf,
    base_url: String,
}

impl ContentDir {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every parseable post, drafts included
    pub async fn all_posts(&self) -> Result<Vec<Post>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut posts = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(POST_EXTENSION) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = tokio::fs::read_to_string(&path).await?;
            posts.push(parse_post(slug, &content)?);
        }

        sort_newest_first(&mut posts);
        tracing::debug!(dir = %self.dir.display(), count = posts.len(), "loaded posts");
        Ok(posts)
    }
}

#[async_trait]
impl PostSource for ContentDir {
    async fn posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.all_posts().await?;
        posts.retain(|p| !p.meta.draft);
        Ok(posts)
    }

    async fn sitemap_post_list(&self) -> Result<Vec<SitemapEntry>> {
        let posts = self.posts().await?;
        Ok(posts
            .iter()
            .map(|p| SitemapEntry::new(p.url(&self.base_url), p.last_modified()))
            .collect())
    }
}

/// Newest first by date, ties broken by slug
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.meta
            .date
            .cmp(&a.meta.date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

/// Parse a post file: a TOML front matter block fenced by `+++` lines,
/// followed by the markdown body.
pub fn parse_post(slug: &str, content: &str) -> Result<Post> {
    let post_err = |message: String| Error::PostParse {
        slug: slug.to_string(),
        message,
    };

    let content = content.trim_start_matches('\u{feff}');
    let mut lines = content.lines();

    match lines.next() {
        Some(first) if first.trim_end() == FRONT_MATTER_FENCE => {}
        _ => {
            return Err(post_err(format!(
                "missing front matter, expected the file to start with '{}'",
                FRONT_MATTER_FENCE
            )));
        }
    }

    let mut front_matter = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == FRONT_MATTER_FENCE {
            closed = true;
            break;
        }
        front_matter.push_str(line);
        front_matter.push('\n');
    }

    if !closed {
        return Err(post_err("unterminated front matter".to_string()));
    }

    let meta: PostMeta = toml::from_str(&front_matter).map_err(|e| post_err(e.to_string()))?;

    let body = lines.collect::<Vec<_>>().join("\n");

    Ok(Post {
        slug: slug.to_string(),
        meta,
        body: body.trim_start_matches('\n').to_string(),
    })
}
