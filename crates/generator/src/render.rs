use leptos::prelude::*;
use leptos::reactive::owner::Owner;

/// Render a full HTML document under a fresh reactive owner
pub fn render_document<F, V>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    format!("<!DOCTYPE html>{}", render_fragment(build))
}

/// Render a view to an HTML string without a doctype
pub fn render_fragment<F, V>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    owner.with(|| build().to_html())
}
