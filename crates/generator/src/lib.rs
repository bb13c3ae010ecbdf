//! Static site generation with Leptos SSR.

pub mod assets;
pub mod components;
pub mod markdown;
pub mod render;

use jmlog_core::BlogConfig;
use jmlog_core::sitemap::{SITEMAP_PATH, render_robots_txt, render_sitemap_xml};
use jmlog_core::theme::{MemoryThemeStore, ThemeHandle};
use jmlog_core::types::{Post, SitemapEntry};
use leptos::prelude::*;

use components::{Layout, PostList, PostPage};
use render::render_document;

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
}

/// Rendering options that differ between build and preview
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub live_reload: bool,
}

/// Store used while rendering on the server: always the configured default,
/// since the visitor's stored preference is unknowable here.
pub fn server_theme_store(config: &BlogConfig) -> ThemeHandle {
    MemoryThemeStore::handle(config.theme.default)
}

/// Render the home page listing every post
pub fn render_index(config: &BlogConfig, posts: &[Post], options: RenderOptions) -> String {
    let site = config.site.clone();
    let theme = config.theme.clone();
    let store = server_theme_store(config);
    let title = site.title.clone();
    let posts = posts.to_vec();

    render_document(move || {
        view! {
            <Layout site=site theme=theme store=store title=title live_reload=options.live_reload>
                <PostList posts=posts/>
            </Layout>
        }
    })
}

/// Render one post page
pub fn render_post(config: &BlogConfig, post: &Post, options: RenderOptions) -> String {
    let site = config.site.clone();
    let theme = config.theme.clone();
    let store = server_theme_store(config);
    let title = format!("{} | {}", post.meta.title, site.title);
    let description = Some(components::post::summary(post));
    let post = post.clone();

    render_document(move || {
        view! {
            <Layout
                site=site
                theme=theme
                store=store
                title=title
                description=description
                live_reload=options.live_reload
            >
                <PostPage post=post/>
            </Layout>
        }
    })
}

/// Output path of a post page relative to the site root
pub fn post_page_path(post: &Post) -> String {
    format!("blog/{}/index.html", post.slug)
}

/// Generate every page and asset of the site.
///
/// `posts` should already exclude drafts; `sitemap` is the provider's
/// output, home entry first.
pub fn generate_site(config: &BlogConfig, posts: &[Post], sitemap: &[SitemapEntry]) -> GeneratedSite {
    let options = RenderOptions::default();

    let mut pages = Vec::with_capacity(posts.len() + 3);
    pages.push(("index.html".to_string(), render_index(config, posts, options)));

    for post in posts {
        pages.push((post_page_path(post), render_post(config, post, options)));
    }

    pages.push((SITEMAP_PATH.to_string(), render_sitemap_xml(sitemap)));
    pages.push((
        "robots.txt".to_string(),
        render_robots_txt(&config.site.base_url),
    ));

    let assets = vec![
        (
            assets::THEME_JS_PATH.to_string(),
            assets::THEME_JS.as_bytes().to_vec(),
        ),
        (
            assets::STYLE_CSS_PATH.to_string(),
            assets::STYLE_CSS.as_bytes().to_vec(),
        ),
    ];

    tracing::debug!(pages = pages.len(), assets = assets.len(), "site generated");
    GeneratedSite { pages, assets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use jmlog_core::config::parse_blog_toml_str;
    use jmlog_core::post::parse_post;

    fn config() -> BlogConfig {
        parse_blog_toml_str(
            r##"
[site]
title = "jmlog"
base_url = "https://jmlog.vercel.app"
author = "jm"

[theme]
default = "dark"
storage_key = "jmlog-theme"
"##,
        )
        .unwrap()
    }

    fn post(slug: &str, date: &str) -> Post {
        parse_post(
            slug,
            &format!(
                "+++\ntitle = \"Post <{slug}>\"\ndate = \"{date}\"\ntags = [\"rust\"]\n+++\n\nHello **there**.\n"
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_site_paths() {
        let posts = vec![post("second", "2024-02-01"), post("first", "2024-01-01")];
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let sitemap = vec![SitemapEntry::new("https://jmlog.vercel.app", now)];

        let site = generate_site(&config(), &posts, &sitemap);
        let paths: Vec<_> = site.pages.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "index.html",
                "blog/second/index.html",
                "blog/first/index.html",
                "sitemap.xml",
                "robots.txt",
            ]
        );

        let asset_paths: Vec<_> = site.assets.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(asset_paths, vec!["theme.js", "style.css"]);
    }

    #[test]
    fn test_index_lists_posts_and_escapes_titles() {
        let posts = vec![post("hello", "2024-02-01")];
        let html = render_index(&config(), &posts, RenderOptions::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("href=\"/blog/hello\""));
        assert!(html.contains("Post &lt;hello&gt;"));
        assert!(html.contains("February 1, 2024"));
    }

    #[test]
    fn test_pages_carry_theme_settings_and_no_live_button() {
        let html = render_index(&config(), &[], RenderOptions::default());

        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("data-theme-key=\"jmlog-theme\""));
        assert!(html.contains("/theme.js"));
        assert!(html.contains("No posts yet."));
        assert!(!html.contains("EventSource"));

        // The only button is the inert template copy
        let template = html.find("<template").unwrap();
        assert!(html.find("<button").unwrap() > template);
    }

    #[test]
    fn test_post_page_renders_markdown() {
        let p = post("hello", "2024-02-01");
        let html = render_post(&config(), &p, RenderOptions { live_reload: true });

        assert!(html.contains("<strong>there</strong>"));
        assert!(html.contains("#rust"));
        assert!(html.contains("<meta name=\"description\" content=\"Hello there.\""));
        assert!(html.contains("EventSource"));
    }

    #[test]
    fn test_index_description_falls_back_to_site() {
        let html = render_index(&config(), &[], RenderOptions::default());
        assert!(!html.contains("name=\"description\""));

        let mut described = config();
        described.site.description = Some("Notes".to_string());
        let html = render_index(&described, &[], RenderOptions::default());
        assert!(html.contains("<meta name=\"description\" content=\"Notes\""));
    }
}
