//! Client-side assets shipped with every site.
//!
//! The pages are rendered on the server only. The theme switch is mounted on
//! the client by `theme.js`: one animation frame after the page is ready it
//! copies the pre-rendered switch out of its `<template>` into the header
//! slot, so the first paint never shows a switch that disagrees with the
//! visitor's stored preference.

/// Path of the switch script relative to the site root
pub const THEME_JS_PATH: &str = "theme.js";

/// Path of the stylesheet relative to the site root
pub const STYLE_CSS_PATH: &str = "style.css";

/// Runs in `<head>` before first paint. Applies the stored preference to
/// `<html data-theme>`, falling back to the configured default.
pub const THEME_INIT_JS: &str = r#"(function () {
  var root = document.documentElement;
  var key = root.dataset.themeKey || 'theme';
  var stored = null;
  try { stored = window.localStorage.getItem(key); } catch (e) {}
  if (stored === 'light' || stored === 'dark') {
    root.dataset.theme = stored;
  } else {
    root.dataset.theme = root.dataset.themeDefault === 'dark' ? 'dark' : 'light';
  }
})();"#;

pub const THEME_JS: &str = r#"(function () {
  'use strict';

  var root = document.documentElement;
  var key = root.dataset.themeKey || 'theme';
  var fallback = root.dataset.themeDefault === 'dark' ? 'dark' : 'light';

  function read() {
    var stored = null;
    try { stored = window.localStorage.getItem(key); } catch (e) {}
    if (stored === 'light' || stored === 'dark') return stored;
    var current = root.dataset.theme;
    return current === 'light' || current === 'dark' ? current : fallback;
  }

  function write(value) {
    root.dataset.theme = value;
    try { window.localStorage.setItem(key, value); } catch (e) {}
  }

  function sync(button) {
    button.setAttribute('aria-pressed', String(read() === 'dark'));
  }

  function mount() {
    var slot = document.getElementById('theme-switch-slot');
    var template = document.getElementById('theme-switch-template');
    if (!slot || !template || slot.firstElementChild) return;

    slot.appendChild(template.content.cloneNode(true));
    var button = slot.querySelector('[data-theme-switch]');
    if (!button) return;

    sync(button);
    button.addEventListener('click', function () {
      write(read() === 'light' ? 'dark' : 'light');
      sync(button);
    });

    // Keep other tabs in step
    window.addEventListener('storage', function (event) {
      if (event.key !== key) return;
      if (event.newValue === 'light' || event.newValue === 'dark') {
        root.dataset.theme = event.newValue;
        sync(button);
      }
    });
  }

  function scheduleMount() {
    window.requestAnimationFrame(mount);
  }

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', scheduleMount);
  } else {
    scheduleMount();
  }
})();
"#;

/// Injected by the preview server only
pub const LIVE_RELOAD_JS: &str = r#"(function () {
  var source = new EventSource('/_reload');
  source.onmessage = function () {
    console.log('Reloading...');
    location.reload();
  };
  source.onerror = function () {
    console.log('Preview server disconnected');
    source.close();
  };
})();"#;

pub const SUN_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><circle cx="12" cy="12" r="4"/><path d="M12 2v2"/><path d="M12 20v2"/><path d="m4.93 4.93 1.41 1.41"/><path d="m17.66 17.66 1.41 1.41"/><path d="M2 12h2"/><path d="M20 12h2"/><path d="m6.34 17.66-1.41 1.41"/><path d="m19.07 4.93-1.41 1.41"/></svg>"#;

pub const MOON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z"/></svg>"#;

pub const STYLE_CSS: &str = r#":root {
  --bg: #ffffff;
  --fg: #1f2328;
  --muted: #656d76;
  --accent: #0969da;
  --border: #d0d7de;
  --code-bg: #f6f8fa;
  color-scheme: light;
}

[data-theme="dark"] {
  --bg: #0d1117;
  --fg: #e6edf3;
  --muted: #8d96a0;
  --accent: #4493f8;
  --border: #30363d;
  --code-bg: #161b22;
  color-scheme: dark;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
  line-height: 1.7;
  color: var(--fg);
  background: var(--bg);
  transition: background-color 0.2s, color 0.2s;
}

a { color: var(--accent); text-decoration: none; }
a:hover { text-decoration: underline; }

.site-header, main, .site-footer {
  max-width: 720px;
  margin: 0 auto;
  padding: 1.5rem;
}

.site-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  border-bottom: 1px solid var(--border);
}

.site-title { font-weight: 700; font-size: 1.25rem; color: var(--fg); }

#theme-switch-slot { min-width: 2.5rem; min-height: 2.5rem; }

.theme-switch {
  position: relative;
  width: 2.5rem;
  height: 2.5rem;
  display: inline-flex;
  align-items: center;
  justify-content: center;
  border: none;
  border-radius: 0.375rem;
  background: transparent;
  color: var(--fg);
  cursor: pointer;
}

.theme-switch .icon {
  display: inline-flex;
  transition: transform 0.3s ease, opacity 0.3s ease;
}

.theme-switch .icon-sun { transform: rotate(0deg) scale(1); }
.theme-switch .icon-moon { position: absolute; transform: rotate(90deg) scale(0); }

[data-theme="dark"] .theme-switch .icon-sun { transform: rotate(-90deg) scale(0); }
[data-theme="dark"] .theme-switch .icon-moon { transform: rotate(0deg) scale(1); }

.sr-only {
  position: absolute;
  width: 1px;
  height: 1px;
  padding: 0;
  margin: -1px;
  overflow: hidden;
  clip: rect(0, 0, 0, 0);
  white-space: nowrap;
  border: 0;
}

.post-list { list-style: none; }
.post-list li { padding: 1rem 0; border-bottom: 1px solid var(--border); }
.post-list li:last-child { border-bottom: none; }
.post-list .post-title { font-size: 1.15rem; font-weight: 600; }

time, .post-summary, .tags { color: var(--muted); font-size: 0.9rem; }
.tags { list-style: none; display: flex; gap: 0.5rem; margin-top: 0.25rem; }

.post h1 { font-size: 2rem; line-height: 1.3; margin-bottom: 0.25rem; }
.post-body { margin-top: 2rem; }
.post-body > * + * { margin-top: 1rem; }
.post-body pre, .post-body code { background: var(--code-bg); border-radius: 4px; }
.post-body pre { padding: 1rem; overflow-x: auto; }
.post-body code { padding: 0.1rem 0.3rem; }
.post-body pre code { padding: 0; }
.post-body blockquote { border-left: 3px solid var(--border); padding-left: 1rem; color: var(--muted); }

.site-footer {
  border-top: 1px solid var(--border);
  color: var(--muted);
  font-size: 0.85rem;
  text-align: center;
}
"#;
