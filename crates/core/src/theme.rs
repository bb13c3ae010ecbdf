//! Theme preference and the two-phase theme switch.
//!
//! The preference itself lives in a [`ThemeStore`] handed to the switch at
//! construction. A [`ThemeSwitch`] renders nothing until it has been ticked
//! once after its first render pass, so a server-rendered page never commits
//! to a preference the visitor's browser may not share.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use crate::error::Error;

/// The visitor's selected UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Light,
    Dark,
}

impl Preference {
    /// The other preference. Never yields anything outside light/dark.
    pub fn toggled(self) -> Self {
        match self {
            Preference::Light => Preference::Dark,
            Preference::Dark => Preference::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Light => "light",
            Preference::Dark => "dark",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Preference::Light),
            "dark" => Ok(Preference::Dark),
            other => Err(Error::InvalidData(format!(
                "Unknown theme preference '{}', expected 'light' or 'dark'",
                other
            ))),
        }
    }
}

/// Owner of the current preference.
///
/// Writes are fire-and-forget: a store that fails to persist deals with it
/// internally.
pub trait ThemeStore: Send + Sync {
    fn preference(&self) -> Preference;
    fn set_preference(&self, preference: Preference);
}

/// Shared handle passed to every switch instance
pub type ThemeHandle = Arc<dyn ThemeStore>;

/// In-process store, used for server rendering and tests
#[derive(Debug)]
pub struct MemoryThemeStore {
    current: RwLock<Preference>,
}

impl MemoryThemeStore {
    pub fn new(initial: Preference) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn handle(initial: Preference) -> ThemeHandle {
        Arc::new(Self::new(initial))
    }
}

impl ThemeStore for MemoryThemeStore {
    fn preference(&self) -> Preference {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set_preference(&self, preference: Preference) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = preference;
    }
}

/// Read the store and write back the complement. Returns the written value.
pub fn toggle_preference(store: &dyn ThemeStore) -> Preference {
    let next = store.preference().toggled();
    store.set_preference(next);
    tracing::debug!(preference = %next, "theme preference toggled");
    next
}

/// Mount lifecycle of a switch instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountState {
    #[default]
    Unmounted,
    Mounted,
}

impl MountState {
    /// Advance to `Mounted`. Returns true only for the actual transition.
    pub fn mount(&mut self) -> bool {
        match self {
            MountState::Unmounted => {
                *self = MountState::Mounted;
                true
            }
            MountState::Mounted => false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self, MountState::Mounted)
    }
}

/// What a mounted switch shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchView {
    pub preference: Preference,
    pub sun_visible: bool,
    pub moon_visible: bool,
    pub label: &'static str,
}

impl SwitchView {
    pub const LABEL: &'static str = "Toggle theme";

    pub fn for_preference(preference: Preference) -> Self {
        Self {
            preference,
            sun_visible: preference == Preference::Light,
            moon_visible: preference == Preference::Dark,
            label: Self::LABEL,
        }
    }
}

/// A single theme switch instance
pub struct ThemeSwitch {
    state: MountState,
    store: ThemeHandle,
}

impl ThemeSwitch {
    pub fn new(store: ThemeHandle) -> Self {
        Self {
            state: MountState::Unmounted,
            store,
        }
    }

    /// The post-render scheduling step. Only the first call mounts.
    pub fn tick(&mut self) -> bool {
        self.state.mount()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.is_mounted()
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    /// Current output; `None` while unmounted.
    pub fn view(&self) -> Option<SwitchView> {
        self.is_mounted()
            .then(|| SwitchView::for_preference(self.store.preference()))
    }

    /// Primary action of the control. There is no control to press before
    /// mount, so this does nothing and returns `None` until then.
    pub fn toggle(&self) -> Option<Preference> {
        self.is_mounted().then(|| toggle_preference(&*self.store))
    }
}

impl fmt::Debug for ThemeSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSwitch")
            .field("state", &self.state)
            .field("preference", &self.store.preference())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_toggles_between_two_values() {
        assert_eq!(Preference::Light.toggled(), Preference::Dark);
        assert_eq!(Preference::Dark.toggled(), Preference::Light);
        assert_eq!(Preference::Light.toggled().toggled(), Preference::Light);
    }

    #[test]
    fn test_preference_parse_rejects_third_state() {
        assert_eq!("light".parse::<Preference>().unwrap(), Preference::Light);
        assert_eq!("dark".parse::<Preference>().unwrap(), Preference::Dark);
        assert!("system".parse::<Preference>().is_err());
        assert!("".parse::<Preference>().is_err());
        assert!("Dark".parse::<Preference>().is_err());
    }

    #[test]
    fn test_switch_renders_nothing_before_tick() {
        let switch = ThemeSwitch::new(MemoryThemeStore::handle(Preference::Light));
        assert_eq!(switch.state(), MountState::Unmounted);
        assert!(switch.view().is_none());
    }

    #[test]
    fn test_switch_mounts_exactly_once() {
        let mut switch = ThemeSwitch::new(MemoryThemeStore::handle(Preference::Dark));
        assert!(switch.tick());
        assert!(switch.is_mounted());
        assert!(!switch.tick());
        assert!(switch.is_mounted());

        let view = switch.view().unwrap();
        assert_eq!(view.preference, Preference::Dark);
        assert!(view.moon_visible);
        assert!(!view.sun_visible);
        assert_eq!(view.label, "Toggle theme");
    }

    #[test]
    fn test_toggle_is_noop_while_unmounted() {
        let store = MemoryThemeStore::handle(Preference::Light);
        let switch = ThemeSwitch::new(store.clone());
        assert_eq!(switch.toggle(), None);
        assert_eq!(store.preference(), Preference::Light);
    }

    #[test]
    fn test_toggle_writes_complement_for_every_preference() {
        for start in [Preference::Light, Preference::Dark] {
            let store = MemoryThemeStore::handle(start);
            let mut switch = ThemeSwitch::new(store.clone());
            switch.tick();
            assert_eq!(switch.toggle(), Some(start.toggled()));
            assert_eq!(store.preference(), start.toggled());
        }
    }

    #[test]
    fn test_toggle_twice_is_a_two_cycle() {
        let store = MemoryThemeStore::handle(Preference::Light);
        let mut switch = ThemeSwitch::new(store.clone());
        switch.tick();

        assert_eq!(switch.toggle(), Some(Preference::Dark));
        assert_eq!(switch.toggle(), Some(Preference::Light));
        assert_eq!(store.preference(), Preference::Light);
    }

    #[test]
    fn test_view_follows_store_not_local_state() {
        let store = MemoryThemeStore::handle(Preference::Light);
        let mut switch = ThemeSwitch::new(store.clone());
        switch.tick();
        assert!(switch.view().unwrap().sun_visible);

        // Another switch sharing the store flips it
        store.set_preference(Preference::Dark);
        let view = switch.view().unwrap();
        assert!(view.moon_visible);
        assert!(!view.sun_visible);
    }

    #[test]
    fn test_toggle_preference_returns_written_value() {
        let store = MemoryThemeStore::new(Preference::Dark);
        assert_eq!(toggle_preference(&store), Preference::Light);
        assert_eq!(store.preference(), Preference::Light);
    }
}
