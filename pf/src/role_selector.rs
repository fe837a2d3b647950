//! Expert role picker
//!
//! A toggleable list over `EXPERT_ROLES`. Picking an entry writes the label
//! into the role field and closes the list.

use tracing::debug;

use crate::composer::Composer;
use crate::prompt::{EXPERT_ROLES, Field};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSelector {
    open: bool,
    highlighted: usize,
}

impl RoleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the highlighted entry in `EXPERT_ROLES`
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Open the list if closed, close it if open
    pub fn toggle(&mut self) {
        self.open = !self.open;
        debug!(open = self.open, "RoleSelector::toggle: called");
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Move the highlight down (wraps)
    pub fn next(&mut self) {
        self.highlighted = (self.highlighted + 1) % EXPERT_ROLES.len();
    }

    /// Move the highlight up (wraps)
    pub fn prev(&mut self) {
        self.highlighted = (self.highlighted + EXPERT_ROLES.len() - 1) % EXPERT_ROLES.len();
    }

    /// Set the role to the highlighted label and close the list
    pub fn select(&mut self, composer: &mut Composer) -> &'static str {
        let role = EXPERT_ROLES[self.highlighted];
        debug!(%role, "RoleSelector::select: called");
        composer.set_field(Field::Role, role);
        self.open = false;
        role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use keystore::MemoryStore;

    fn composer() -> Composer {
        Composer::new(Box::new(MemoryStore::new()), Box::new(MemoryClipboard::new()))
    }

    #[test]
    fn test_toggle() {
        let mut selector = RoleSelector::new();
        assert!(!selector.is_open());
        selector.toggle();
        assert!(selector.is_open());
        selector.toggle();
        assert!(!selector.is_open());
    }

    #[test]
    fn test_highlight_wraps() {
        let mut selector = RoleSelector::new();
        selector.prev();
        assert_eq!(selector.highlighted(), EXPERT_ROLES.len() - 1);
        selector.next();
        assert_eq!(selector.highlighted(), 0);
    }

    #[test]
    fn test_select_sets_role_and_closes() {
        let mut composer = composer();
        composer.set_field(Field::Task, "keep me");
        let mut selector = RoleSelector::new();
        selector.toggle();
        selector.next();
        selector.next();

        let picked = selector.select(&mut composer);
        assert_eq!(picked, "Technical Consultant");
        assert_eq!(composer.form().role, "Technical Consultant");
        assert_eq!(composer.form().task, "keep me");
        assert!(!selector.is_open());
    }

    #[test]
    fn test_free_form_role_still_allowed() {
        let mut composer = composer();
        composer.set_field(Field::Role, "Pirate Captain");
        assert!(!EXPERT_ROLES.contains(&composer.form().role.as_str()));
        assert_eq!(composer.form().role, "Pirate Captain");
    }
}
