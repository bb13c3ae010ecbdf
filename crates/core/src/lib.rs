pub mod config;
pub mod error;
pub mod post;
pub mod sitemap;
pub mod theme;
pub mod types;

pub use config::parse_blog_toml;
pub use error::{Error, Result};
pub use post::{ContentDir, PostSource};
pub use sitemap::SitemapProvider;
pub use theme::{MemoryThemeStore, Preference, ThemeHandle, ThemeStore, ThemeSwitch};
pub use types::*;
