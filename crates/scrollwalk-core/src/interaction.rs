//! Section interaction state machine.
//!
//! Tracks which marker is open and which informational overlay is active.
//! Purely reactive: every transition is triggered by a click or a scroll.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a section marker placed along the path.
pub type MarkerId = u32;

/// Informational section that can be shown as an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    About,
    Skills,
    Projects,
    Contact,
}

impl SectionKey {
    pub const ALL: [SectionKey; 4] = [Self::About, Self::Skills, Self::Projects, Self::Contact];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section key: {0:?}")]
pub struct SectionKeyError(pub String);

impl FromStr for SectionKey {
    type Err = SectionKeyError;

    /// Parses a section key case-insensitively ("About" and "about" both work).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| SectionKeyError(s.to_string()))
    }
}

/// Externally visible phase of the interaction machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionPhase {
    #[default]
    Closed,
    /// One marker's sub-labels are visible.
    MarkerOpen(MarkerId),
    /// A full informational panel is shown over the blurred scene.
    OverlayActive(SectionKey),
}

/// Open marker and active overlay.
///
/// At most one of each is tracked; an active overlay takes precedence in
/// [`InteractionState::phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    open_marker: Option<MarkerId>,
    active_overlay: Option<SectionKey>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_marker(&self) -> Option<MarkerId> {
        self.open_marker
    }

    pub fn active_overlay(&self) -> Option<SectionKey> {
        self.active_overlay
    }

    pub fn phase(&self) -> InteractionPhase {
        match (self.active_overlay, self.open_marker) {
            (Some(section), _) => InteractionPhase::OverlayActive(section),
            (None, Some(id)) => InteractionPhase::MarkerOpen(id),
            (None, None) => InteractionPhase::Closed,
        }
    }

    pub fn is_marker_open(&self, id: MarkerId) -> bool {
        self.open_marker == Some(id)
    }

    /// Click on a marker body.
    ///
    /// Toggles the clicked marker; a different marker simply replaces the
    /// tracked one. Ignored while an overlay covers the scene.
    /// Returns `true` if the state changed.
    pub fn marker_click(&mut self, id: MarkerId) -> bool {
        if self.active_overlay.is_some() {
            return false;
        }
        if self.open_marker == Some(id) {
            self.open_marker = None;
        } else {
            self.open_marker = Some(id);
        }
        true
    }

    /// Click on a sub-label of marker `id`.
    ///
    /// Only accepted while that marker is open and no overlay is showing.
    pub fn sub_label_click(&mut self, id: MarkerId, section: SectionKey) -> bool {
        if self.open_marker != Some(id) || self.active_overlay.is_some() {
            return false;
        }
        self.active_overlay = Some(section);
        true
    }

    /// Click on the navigation control for `section`.
    ///
    /// Clicking the control of the active overlay closes everything.
    pub fn nav_click(&mut self, section: SectionKey) -> bool {
        if self.active_overlay == Some(section) {
            return self.close();
        }
        self.active_overlay = Some(section);
        true
    }

    /// Explicit close action.
    pub fn close(&mut self) -> bool {
        let changed = self.open_marker.is_some() || self.active_overlay.is_some();
        self.open_marker = None;
        self.active_overlay = None;
        changed
    }

    /// Any scroll event clears both the open marker and the overlay.
    pub fn scroll(&mut self) -> bool {
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_toggle() {
        let mut state = InteractionState::new();
        assert!(state.marker_click(3));
        assert_eq!(state.phase(), InteractionPhase::MarkerOpen(3));
        assert!(state.marker_click(3));
        assert_eq!(state.phase(), InteractionPhase::Closed);
    }

    #[test]
    fn test_second_marker_replaces_first() {
        let mut state = InteractionState::new();
        state.marker_click(3);
        state.marker_click(5);
        assert_eq!(state.phase(), InteractionPhase::MarkerOpen(5));
        assert!(!state.is_marker_open(3));
    }

    #[test]
    fn test_full_click_sequence() {
        let mut state = InteractionState::new();
        state.marker_click(3);
        assert_eq!(state.phase(), InteractionPhase::MarkerOpen(3));
        state.marker_click(3);
        assert_eq!(state.phase(), InteractionPhase::Closed);

        state.marker_click(5);
        let section: SectionKey = "About".parse().unwrap();
        assert!(state.sub_label_click(5, section));
        assert_eq!(
            state.phase(),
            InteractionPhase::OverlayActive(SectionKey::About)
        );

        assert!(state.scroll());
        assert_eq!(state.phase(), InteractionPhase::Closed);
        assert_eq!(state.open_marker(), None);
    }

    #[test]
    fn test_sub_label_requires_open_marker() {
        let mut state = InteractionState::new();
        assert!(!state.sub_label_click(2, SectionKey::About));
        state.marker_click(4);
        assert!(!state.sub_label_click(2, SectionKey::About));
        assert_eq!(state.phase(), InteractionPhase::MarkerOpen(4));
    }

    #[test]
    fn test_nav_toggle_and_switch() {
        let mut state = InteractionState::new();
        state.nav_click(SectionKey::Skills);
        assert_eq!(
            state.phase(),
            InteractionPhase::OverlayActive(SectionKey::Skills)
        );
        state.nav_click(SectionKey::Contact);
        assert_eq!(state.active_overlay(), Some(SectionKey::Contact));
        state.nav_click(SectionKey::Contact);
        assert_eq!(state.phase(), InteractionPhase::Closed);
    }

    #[test]
    fn test_marker_click_ignored_under_overlay() {
        let mut state = InteractionState::new();
        state.nav_click(SectionKey::Projects);
        assert!(!state.marker_click(6));
        assert_eq!(state.open_marker(), None);
        assert!(state.close());
        assert!(!state.close());
    }

    #[test]
    fn test_scroll_from_closed_is_noop() {
        let mut state = InteractionState::new();
        assert!(!state.scroll());
        assert_eq!(state, InteractionState::default());
    }

    #[test]
    fn test_section_key_parsing() {
        assert_eq!(" contact ".parse::<SectionKey>(), Ok(SectionKey::Contact));
        assert_eq!("PROJECTS".parse::<SectionKey>(), Ok(SectionKey::Projects));
        assert!("blog".parse::<SectionKey>().is_err());
        assert_eq!(SectionKey::Skills.to_string(), "skills");
    }
}
