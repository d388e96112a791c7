/// Auto-scroll (follow) preference for the log area
///
/// The preference is sticky and only changes on explicit toggles. Scrolling
/// away from the bottom suspends following without turning it off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollState {
    enabled: bool,
    suspended: bool,
}

impl ScrollState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            suspended: false,
        }
    }

    /// Whether the user wants to follow new entries
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether following is paused because the view left the bottom
    pub fn is_suspended(&self) -> bool {
        self.enabled && self.suspended
    }

    /// Flip the preference; turning it on also lifts any suspension.
    /// Returns the new preference.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if self.enabled {
            self.suspended = false;
        }
        self.enabled
    }

    /// Record a manual scroll, `at_bottom` telling where it ended
    pub fn on_user_scroll(&mut self, at_bottom: bool) {
        self.suspended = !at_bottom;
    }

    /// Whether a render should jump to the newest entry
    pub fn should_follow(&self, search_active: bool) -> bool {
        self.enabled && !self.suspended && !search_active
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_by_default() {
        let scroll = ScrollState::default();
        assert!(scroll.should_follow(false));
        assert!(!scroll.should_follow(true));
    }

    #[test]
    fn test_manual_scroll_suspends_and_bottom_resumes() {
        let mut scroll = ScrollState::default();
        scroll.on_user_scroll(false);
        assert!(scroll.is_enabled());
        assert!(scroll.is_suspended());
        assert!(!scroll.should_follow(false));

        scroll.on_user_scroll(true);
        assert!(scroll.should_follow(false));
    }

    #[test]
    fn test_reenable_lifts_suspension() {
        let mut scroll = ScrollState::default();
        scroll.on_user_scroll(false);
        assert!(!scroll.toggle());
        assert!(!scroll.should_follow(false));
        assert!(scroll.toggle());
        assert!(scroll.should_follow(false));
    }
}
