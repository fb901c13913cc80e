//! Reveal panels: per-panel open/closed state
//!
//! Panels are independent. Opening one never closes another, so a reader can
//! keep several answers visible while comparing them.

use super::WidgetId;
use std::collections::HashMap;

/// Open/closed state for the reveal panels of one view
///
/// An id that was never toggled is closed. There is no failure mode: every
/// operation is a synchronous map update.
#[derive(Debug, Default, Clone)]
pub struct DisclosureController {
    open: HashMap<WidgetId, bool>,
}

impl DisclosureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the panel's state (a never-seen panel opens)
    pub fn toggle(&mut self, id: impl Into<WidgetId>) {
        let id = id.into();
        let open = self.open.entry(id).or_insert(false);
        *open = !*open;
    }

    /// Whether the panel is currently revealed
    pub fn is_open(&self, id: impl Into<WidgetId>) -> bool {
        self.open.get(&id.into()).copied().unwrap_or(false)
    }

    /// Number of panels currently revealed
    pub fn open_count(&self) -> usize {
        self.open.values().filter(|open| **open).count()
    }

    /// Close every panel
    pub fn collapse_all(&mut self) {
        self.open.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_panels_are_closed() {
        let panels = DisclosureController::new();
        assert!(!panels.is_open("q1"));
        assert!(!panels.is_open(7));
        assert_eq!(panels.open_count(), 0);
    }

    #[test]
    fn test_toggle_parity() {
        for times in 0..7 {
            let mut panels = DisclosureController::new();
            for _ in 0..times {
                panels.toggle("q");
            }
            assert_eq!(panels.is_open("q"), times % 2 == 1, "after {} toggles", times);
        }
    }

    #[test]
    fn test_panels_open_independently() {
        let mut panels = DisclosureController::new();

        panels.toggle("q1");
        assert!(panels.is_open("q1"));

        panels.toggle("q2");
        assert!(panels.is_open("q1"));
        assert!(panels.is_open("q2"));

        panels.toggle("q1");
        assert!(!panels.is_open("q1"));
        assert!(panels.is_open("q2"));
    }

    #[test]
    fn test_no_cross_talk_between_ids() {
        let ids: Vec<WidgetId> = vec!["a".into(), "b".into(), 0.into(), 1.into()];
        let mut panels = DisclosureController::new();
        panels.toggle("b");

        for target in &ids {
            let before: Vec<bool> = ids.iter().map(|id| panels.is_open(id)).collect();
            panels.toggle(target);
            for (id, was) in ids.iter().zip(before) {
                if id != target {
                    assert_eq!(panels.is_open(id), was, "toggling {} moved {}", target, id);
                }
            }
        }
    }

    #[test]
    fn test_collapse_all() {
        let mut panels = DisclosureController::new();
        panels.toggle(0);
        panels.toggle(2);
        assert_eq!(panels.open_count(), 2);

        panels.collapse_all();
        assert_eq!(panels.open_count(), 0);
        assert!(!panels.is_open(0));

        // Still usable afterwards
        panels.toggle(0);
        assert!(panels.is_open(0));
    }
}
