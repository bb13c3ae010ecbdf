pub mod layout;
pub mod post;
pub mod theme_switch;

pub use layout::Layout;
pub use post::{PostList, PostPage};
pub use theme_switch::{SwitchButton, ThemeSwitch, ThemeSwitchSlot};
