use anyhow::{Context, Result};
use chrono::Local;
use jmlog_core::config::CONFIG_FILE;
use jmlog_core::types::DEFAULT_BASE_URL;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_TITLE: &str = "jmlog";
const DEFAULT_AUTHOR: &str = "Your Name";

/// Escape a string for safe inclusion in a TOML basic string
///
/// Handles the required escape sequences for TOML basic strings:
/// - Backslash (\\) -> \\\\
/// - Quote (\") -> \\\"
/// - Backspace, form feed, newline, carriage return, tab
///
/// The config is written from a template with comments, which the toml
/// serializer would not preserve.
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a new blog directory.
///
/// Creates:
/// - `blog.toml` with the site title, author and theme defaults
/// - `posts/hello-world.md` as a first post dated today
/// - an empty `public/` directory for static files
///
/// # Errors
///
/// Returns an error if `blog.toml` already exists in the directory or a file
/// operation fails.
pub async fn run(path: PathBuf, title: Option<String>, author: Option<String>) -> Result<()> {
    println!("Initializing blog directory: {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            CONFIG_FILE,
            config_path.display()
        );
    }

    fs::create_dir_all(path.join("posts")).context("Failed to create posts directory")?;
    fs::create_dir_all(path.join("public")).context("Failed to create public directory")?;

    generate_blog_toml(
        &path,
        title.as_deref().unwrap_or(DEFAULT_TITLE),
        author.as_deref().unwrap_or(DEFAULT_AUTHOR),
    )?;
    generate_first_post(&path)?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── blog.toml            ← Set title, author, base_url");
    println!("  ├── posts/");
    println!("  │   └── hello-world.md");
    println!("  └── public/              ← Files copied as-is (images, favicon)");

    println!("\nNext steps:");
    println!("  1. Edit blog.toml");
    println!("  2. Write posts in posts/");
    println!("  3. Preview: jmlog preview {}", path.display());

    Ok(())
}

fn generate_blog_toml(base: &Path, title: &str, author: &str) -> Result<()> {
    let content = format!(
        r##"# jmlog configuration

[site]
title = "{title}"
# Absolute address the site is served from; used for the sitemap
base_url = "{base_url}"
author = "{author}"
description = "Notes and writing"

[content]
# Markdown posts with TOML front matter between +++ lines
posts = "posts"

[theme]
# Shown until the visitor picks one: "light" or "dark"
default = "light"
# localStorage key holding the visitor's choice
storage_key = "theme"
"##,
        title = toml_escape_string(title),
        base_url = DEFAULT_BASE_URL,
        author = toml_escape_string(author),
    );

    fs::write(base.join(CONFIG_FILE), content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
    Ok(())
}

fn generate_first_post(base: &Path) -> Result<()> {
    let today = Local::now().date_naive();
    let post = format!(
        r##"+++
title = "Hello, world"
date = "{today}"
description = "The first post"
tags = ["meta"]
+++

This is the first post. Edit or delete it, then write your own.

Posts are markdown, so you can use:

- **Bold** and *italic* text
- Lists, tables and links
- Code blocks

Set `draft = true` in the front matter to keep a post out of the site.
"##,
        today = today.format("%Y-%m-%d")
    );

    fs::write(base.join("posts").join("hello-world.md"), post)
        .context("Failed to write first post")?;
    Ok(())
}
