use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::{StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use jmlog_core::sitemap::{render_robots_txt, render_sitemap_xml};
use jmlog_core::{PostSource, SitemapProvider};
use jmlog_generator::assets::{STYLE_CSS, THEME_JS};
use jmlog_generator::{RenderOptions, render_index, render_post};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use jmlog_core::config::CONFIG_FILE;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{Blog, load_blog};

const PREVIEW: RenderOptions = RenderOptions { live_reload: true };

#[derive(Clone)]
struct AppState {
    blog_path: PathBuf,
    reload_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Config and posts are re-read on every request so edits show up
    /// without restarting
    fn blog(&self) -> Result<Blog> {
        load_blog(&self.blog_path)
    }
}

/// Start preview server with hot reload for local development.
///
/// This command:
/// - Validates and loads blog.toml
/// - Renders pages on request, including `/sitemap.xml`
/// - Serves `public/` for everything else
/// - Watches for file changes and triggers hot reload
///
/// # Arguments
///
/// * `path` - Path to blog directory containing blog.toml
/// * `port` - Port to serve on (default: 8080)
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("📝 Starting preview server...");
    println!("   Blog: {}", path.display());

    let blog = load_blog(&path)?;
    let posts = blog.source.posts().await.context("Failed to load posts")?;

    println!("   ✓ Loaded: {}", blog.config.site.title);
    println!("   ✓ Posts: {}", posts.len());

    // Create broadcast channel for reload events
    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        blog_path: path.clone(),
        reload_tx: reload_tx.clone(),
    };

    let app = router(state, path.join("public"));

    // Start file watcher
    let targets = watch_targets(&path, &blog);
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(targets, watcher_tx).await {
            tracing::error!(error = %e, "file watcher stopped");
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;
    tracing::info!(%addr, "preview server listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState, public_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/blog/{slug}", get(post_handler))
        .route("/blog/{slug}/", get(post_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/theme.js", get(theme_js_handler))
        .route("/style.css", get(style_css_handler))
        .route("/_reload", get(sse_handler))
        .fallback_service(ServeDir::new(public_dir))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Inputs of the site: blog.toml, the posts directory and `public/`.
/// A build output directory inside the blog is left unwatched.
fn watch_targets(path: &Path, blog: &Blog) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets = vec![
        (path.join(CONFIG_FILE), RecursiveMode::NonRecursive),
        (blog.source.dir().to_path_buf(), RecursiveMode::Recursive),
    ];
    let public = path.join("public");
    if public.is_dir() {
        targets.push((public, RecursiveMode::Recursive));
    }
    targets
}

/// Watch for file changes and trigger reload
async fn watch_files(
    targets: Vec<(PathBuf, RecursiveMode)>,
    reload_tx: broadcast::Sender<()>,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    for (target, mode) in &targets {
        watcher
            .watch(target, *mode)
            .with_context(|| format!("Failed to watch {}", target.display()))?;
    }

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Filter out temporary files and hidden files
                if event.paths.iter().any(|p| {
                    let filename = p.file_name().unwrap_or_default().to_string_lossy();
                    !filename.starts_with('.') && !filename.ends_with('~')
                }) {
                    println!("   📝 File changed, reloading...");
                    tracing::debug!(paths = ?event.paths, "reload triggered");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            if rx.recv().await.is_ok() {
                yield Ok(Event::default().data("reload"));
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Error page shown in place of a page that failed to render
fn error_page(status: StatusCode, heading: &str, err: &anyhow::Error) -> Response {
    tracing::error!(error = %format!("{:#}", err), "{}", heading);
    (
        status,
        Html(format!(
            r#"<!DOCTYPE html>
<html><head><title>Error</title></head><body>
<h1>{}</h1>
<pre>{:#}</pre>
<script>{}</script>
</body></html>"#,
            heading,
            err,
            jmlog_generator::assets::LIVE_RELOAD_JS
        )),
    )
        .into_response()
}

async fn index_handler(State(state): State<AppState>) -> Response {
    let result = async {
        let blog = state.blog()?;
        let posts = blog.source.posts().await?;
        Ok::<_, anyhow::Error>(render_index(&blog.config, &posts, PREVIEW))
    }
    .await;

    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, "Configuration Error", &e),
    }
}

async fn post_handler(
    State(state): State<AppState>,
    UrlPath(slug): UrlPath<String>,
) -> Response {
    let result = async {
        let blog = state.blog()?;
        let posts = blog.source.posts().await?;
        let page = posts
            .iter()
            .find(|p| p.slug == slug)
            .map(|post| render_post(&blog.config, post, PREVIEW));
        Ok::<_, anyhow::Error>(page)
    }
    .await;

    match result {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("No post named '{}'", slug)).into_response(),
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, "Post Error", &e),
    }
}

/// Generated per request; a failing post listing fails the request
async fn sitemap_handler(State(state): State<AppState>) -> Response {
    let result = async {
        let blog = state.blog()?;
        let provider = SitemapProvider::new(blog.config.site.base_url.clone(), blog.source);
        let entries = provider.sitemap().await?;
        Ok::<_, anyhow::Error>(render_sitemap_xml(&entries))
    }
    .await;

    match result {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "sitemap generation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)).into_response()
        }
    }
}

async fn robots_handler(State(state): State<AppState>) -> Response {
    match state.blog() {
        Ok(blog) => render_robots_txt(&blog.config.site.base_url).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)).into_response(),
    }
}

async fn theme_js_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], THEME_JS)
}

async fn style_css_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], STYLE_CSS)
}
