//! Current selection and hover state.
//!
//! [`SelectionStore`] holds at most one inspection record. Every
//! successful pick replaces it wholesale; there is no history and no
//! multi-select. [`HoverState`] only drives the pointer affordance and
//! never touches the selection.

use crate::catalog::InspectionRecord;

/// Single-slot holder of the selected record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionStore {
    current: Option<InspectionRecord>,
}

impl SelectionStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection. Selecting the current record again leaves
    /// the store unchanged.
    pub fn select(&mut self, record: InspectionRecord) {
        if self.current.as_ref() == Some(&record) {
            return;
        }
        log::debug!("selected record {}", record.id);
        self.current = Some(record);
    }

    /// The selected record, if any.
    #[must_use]
    pub fn current(&self) -> Option<&InspectionRecord> {
        self.current.as_ref()
    }

    /// Whether nothing has been selected yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// Cursor shape a front end should show over the 3D view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAffordance {
    /// Nothing interactive under the pointer.
    #[default]
    Default,
    /// Pointer is over a hit volume.
    Pointer,
}

/// Which hit volume, if any, is under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<usize>,
}

impl HoverState {
    /// Pointer entered (or moved within) the volume of `record_index`.
    pub fn enter(&mut self, record_index: usize) {
        self.hovered = Some(record_index);
    }

    /// Pointer left every volume.
    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Record index under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Cursor to show for the current hover.
    #[must_use]
    pub fn cursor(&self) -> CursorAffordance {
        if self.hovered.is_some() {
            CursorAffordance::Pointer
        } else {
            CursorAffordance::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn record(id: &str) -> InspectionRecord {
        Catalog::builtin().unwrap().find(id).unwrap().clone()
    }

    #[test]
    fn starts_empty() {
        let store = SelectionStore::new();
        assert!(store.is_empty());
        assert!(store.current().is_none());
    }

    #[test]
    fn select_replaces_previous() {
        let mut store = SelectionStore::new();
        store.select(record("aspa1"));
        store.select(record("torre"));
        assert_eq!(store.current().unwrap().id, "torre");
    }

    #[test]
    fn select_is_idempotent() {
        let mut once = SelectionStore::new();
        once.select(record("aspa3"));
        let mut twice = SelectionStore::new();
        twice.select(record("aspa3"));
        twice.select(record("aspa3"));
        assert_eq!(once, twice);
    }

    #[test]
    fn hover_drives_cursor() {
        let mut hover = HoverState::default();
        assert_eq!(hover.cursor(), CursorAffordance::Default);
        hover.enter(2);
        assert_eq!(hover.hovered(), Some(2));
        assert_eq!(hover.cursor(), CursorAffordance::Pointer);
        hover.leave();
        assert_eq!(hover.cursor(), CursorAffordance::Default);
    }
}
