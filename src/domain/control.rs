//! Input-gated connect control.

use std::collections::BTreeSet;

/// Visual marker carried by a disabled control.
pub const DISABLED_MARKER: &str = "disabled";

/// The connect button. Its enabled state follows the name field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectControl {
    disabled: bool,
    classes: BTreeSet<String>,
}

impl ConnectControl {
    /// Creates an enabled control without markers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the control iff `value` is not the empty string.
    ///
    /// Whitespace counts as input.
    pub fn apply_input(&mut self, value: &str) {
        self.set_disabled(value.is_empty());
    }

    /// Sets the disabled flag and keeps the marker in sync with it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.classes.insert(DISABLED_MARKER.to_string());
        } else {
            self.classes.remove(DISABLED_MARKER);
        }
    }

    /// Returns true when clicks are ignored.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns true if the control carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", true ; "empty")]
    #[test_case("a", false ; "single_char")]
    #[test_case(" ", false ; "whitespace")]
    #[test_case("hello", false ; "word")]
    fn test_apply_input(value: &str, disabled: bool) {
        let mut control = ConnectControl::new();
        control.apply_input(value);

        assert_eq!(control.is_disabled(), disabled);
        assert_eq!(control.has_class(DISABLED_MARKER), disabled);
    }

    #[test]
    fn test_marker_removed_when_reenabled() {
        let mut control = ConnectControl::new();
        control.apply_input("");
        control.apply_input("x");
        control.apply_input("");
        control.apply_input("xy");

        assert!(!control.is_disabled());
        assert!(!control.has_class(DISABLED_MARKER));
    }
}
