//! Screens and the registry that switches between them.

use std::collections::HashMap;

/// Display mode of a screen panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Laid out and visible.
    Flex,
    /// Not rendered.
    #[default]
    Hidden,
}

impl DisplayMode {
    /// Returns true for the visible mode.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Flex)
    }
}

/// A UI region toggled between visible and hidden as a unit.
pub trait Panel {
    /// Identifier used as registry key. Panels without one are not registered.
    fn id(&self) -> Option<&str>;

    /// Current display mode.
    fn display(&self) -> DisplayMode;

    /// Changes the display mode.
    fn set_display(&mut self, display: DisplayMode);
}

/// Identifier to panel mapping, built once from the panels the UI supplies.
///
/// Keys never change after construction; only the display mode of the
/// registered panels does.
#[derive(Debug, Clone)]
pub struct ScreenRegistry<P> {
    screens: HashMap<String, P>,
}

impl<P: Panel> ScreenRegistry<P> {
    /// Builds the registry.
    ///
    /// Panels with a missing or empty identifier are skipped. If two panels
    /// share an identifier the later one replaces the earlier.
    pub fn from_panels<I>(panels: I) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        let mut screens = HashMap::new();
        for panel in panels {
            let Some(id) = panel.id().filter(|id| !id.is_empty()).map(str::to_owned) else {
                continue;
            };
            screens.insert(id, panel);
        }
        Self { screens }
    }

    /// Shows `screen_id` and hides every other panel.
    ///
    /// Unknown identifiers leave every panel untouched. Returns whether the
    /// switch happened.
    pub fn set_current_screen(&mut self, screen_id: &str) -> bool {
        if !self.screens.contains_key(screen_id) {
            return false;
        }

        for (id, panel) in &mut self.screens {
            if id == screen_id {
                panel.set_display(DisplayMode::Flex);
            } else {
                panel.set_display(DisplayMode::Hidden);
            }
        }
        true
    }

    /// Returns true if `screen_id` is registered.
    #[must_use]
    pub fn contains(&self, screen_id: &str) -> bool {
        self.screens.contains_key(screen_id)
    }

    /// Looks up a panel.
    #[must_use]
    pub fn get(&self, screen_id: &str) -> Option<&P> {
        self.screens.get(screen_id)
    }

    /// First visible panel, if any.
    #[must_use]
    pub fn active(&self) -> Option<&P> {
        self.screens.values().find(|panel| panel.display().is_visible())
    }

    /// Identifiers of all visible panels, sorted.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .screens
            .iter()
            .filter(|(_, panel)| panel.display().is_visible())
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// All registered identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.screens.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Returns true when nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
