use jmlog_core::types::{Post, format_date};
use leptos::prelude::*;

use crate::markdown::{excerpt, render_markdown};

const EXCERPT_CHARS: usize = 160;

/// Summary text for listings and meta descriptions
pub fn summary(post: &Post) -> String {
    post.meta
        .description
        .clone()
        .unwrap_or_else(|| excerpt(&post.body, EXCERPT_CHARS))
}

#[component]
fn Tags(tags: Vec<String>) -> impl IntoView {
    (!tags.is_empty()).then(|| {
        view! {
            <ul class="tags">
                {tags.into_iter().map(|tag| view! { <li>{format!("#{}", tag)}</li> }).collect_view()}
            </ul>
        }
    })
}

/// Index page listing, newest first
#[component]
pub fn PostList(posts: Vec<Post>) -> impl IntoView {
    if posts.is_empty() {
        return view! { <p class="empty">"No posts yet."</p> }.into_any();
    }

    view! {
        <ul class="post-list">
            {posts
                .into_iter()
                .map(|post| {
                    let summary = summary(&post);
                    let href = post.path();
                    let date = post.meta.date;
                    let title = post.meta.title;
                    view! {
                        <li>
                            <a class="post-title" href=href>{title}</a>
                            <div>
                                <time datetime=date.to_string()>{format_date(date)}</time>
                            </div>
                            <p class="post-summary">{summary}</p>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

/// A single post
#[component]
pub fn PostPage(post: Post) -> impl IntoView {
    let body = render_markdown(&post.body);
    let Post { meta, .. } = post;
    let date = meta.date;
    let updated = meta
        .updated
        .filter(|u| *u != date)
        .map(|u| view! { <span class="updated">{format!(" · updated {}", format_date(u))}</span> });

    view! {
        <article class="post">
            <h1>{meta.title}</h1>
            <div>
                <time datetime=date.to_string()>{format_date(date)}</time>
                {updated}
            </div>
            <Tags tags=meta.tags/>
            <div class="post-body" inner_html=body></div>
        </article>
    }
}
