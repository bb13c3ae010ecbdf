use chrono::{Datelike, Utc};
use jmlog_core::theme::ThemeHandle;
use jmlog_core::types::{SiteConfig, ThemeConfig};
use leptos::prelude::*;

use super::theme_switch::ThemeSwitchSlot;
use crate::assets::{LIVE_RELOAD_JS, STYLE_CSS_PATH, THEME_INIT_JS, THEME_JS_PATH};

/// Page shell shared by every document
#[component]
pub fn Layout(
    site: SiteConfig,
    theme: ThemeConfig,
    store: ThemeHandle,
    #[prop(into)] title: String,
    #[prop(default = None)] description: Option<String>,
    /// Adds the preview server's reload hook
    #[prop(optional)]
    live_reload: bool,
    children: Children,
) -> impl IntoView {
    let description = description.or_else(|| site.description.clone());
    let footer = format!("© {} {}", Utc::now().year(), site.author);
    let SiteConfig { title: site_title, author, .. } = site;
    let ThemeConfig { default, storage_key } = theme;

    view! {
        <html
            lang="en"
            data-theme=default.as_str()
            data-theme-default=default.as_str()
            data-theme-key=storage_key
        >
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                {description.map(|d| view! { <meta name="description" content=d/> })}
                <meta name="author" content=author/>
                <link rel="stylesheet" href=format!("/{}", STYLE_CSS_PATH)/>
                <link rel="sitemap" type="application/xml" href="/sitemap.xml"/>
                <script inner_html=THEME_INIT_JS></script>
                <script src=format!("/{}", THEME_JS_PATH) defer=""></script>
                {live_reload.then(|| view! { <script inner_html=LIVE_RELOAD_JS></script> })}
            </head>
            <body>
                <header class="site-header">
                    <a class="site-title" href="/">{site_title}</a>
                    <ThemeSwitchSlot store=store/>
                </header>
                <main>{children()}</main>
                <footer class="site-footer">{footer}</footer>
            </body>
        </html>
    }
}
