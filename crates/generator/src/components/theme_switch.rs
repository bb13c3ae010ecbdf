//! Light/dark switch.
//!
//! `ThemeSwitch` keeps a [`MountState`] and only renders the button after an
//! effect has marked it mounted. Effects never run during server rendering,
//! so the server pass emits nothing here; `theme.js` performs the mount step
//! on the static site by cloning the `SwitchButton` markup out of a template.

use jmlog_core::theme::{MountState, SwitchView, ThemeHandle, toggle_preference};
use leptos::prelude::*;

use crate::assets::{MOON_SVG, SUN_SVG};

/// Element id of the header slot the switch mounts into
pub const SWITCH_SLOT_ID: &str = "theme-switch-slot";

/// Element id of the inert template holding the pre-rendered button
pub const SWITCH_TEMPLATE_ID: &str = "theme-switch-template";

/// The two-phase switch. Renders nothing until mounted.
#[component]
pub fn ThemeSwitch(store: ThemeHandle) -> impl IntoView {
    let mount = RwSignal::new(MountState::Unmounted);

    Effect::new(move |_| {
        mount.update(|state| {
            state.mount();
        });
    });

    move || {
        mount
            .get()
            .is_mounted()
            .then(|| view! { <SwitchButton store=store.clone()/> })
    }
}

/// The mounted control: one button, a sun and a moon.
///
/// Which icon shows is decided by the `data-theme` attribute on `<html>`,
/// not by anything held here.
#[component]
pub fn SwitchButton(store: ThemeHandle) -> impl IntoView {
    let shown = SwitchView::for_preference(store.preference());

    view! {
        <button
            type="button"
            class="theme-switch"
            data-theme-switch=""
            title=shown.label
            aria-pressed=shown.moon_visible.to_string()
            on:click=move |_| {
                toggle_preference(&*store);
            }
        >
            <span class="icon icon-sun" inner_html=SUN_SVG></span>
            <span class="icon icon-moon" inner_html=MOON_SVG></span>
            <span class="sr-only">{shown.label}</span>
        </button>
    }
}

/// Header slot plus the template `theme.js` mounts from
#[component]
pub fn ThemeSwitchSlot(store: ThemeHandle) -> impl IntoView {
    let template_store = store.clone();

    view! {
        <div id=SWITCH_SLOT_ID>
            <ThemeSwitch store=store/>
        </div>
        <template id=SWITCH_TEMPLATE_ID>
            <SwitchButton store=template_store/>
        </template>
    }
}
