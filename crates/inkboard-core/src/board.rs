//! Element store with snapshot-based undo/redo history.

use crate::elements::{Element, ElementId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The element store plus its history log.
///
/// Elements are kept in insertion order; later elements draw on top and are
/// hit-tested first. Every mutation that should be undoable goes through
/// [`Board::commit`], which records a full deep snapshot of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    elements: Vec<Element>,
    /// Snapshot log. Always holds at least the initial empty snapshot.
    snapshots: Vec<Vec<Element>>,
    /// Cursor into `snapshots`; always a valid index.
    index: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            snapshots: vec![Vec::new()],
            index: 0,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements in z-order (first = bottom).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Replace the store contents and push a snapshot.
    ///
    /// Committing after an undo truncates the redo branch; the history is
    /// linear, not a tree.
    pub fn commit(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(self.elements.clone());
        self.index = self.snapshots.len() - 1;
        log::debug!(
            "committed snapshot {} ({} elements)",
            self.index,
            self.elements.len()
        );
    }

    /// Push a snapshot of the current store contents.
    pub fn commit_current(&mut self) {
        let elements = self.elements.clone();
        self.commit(elements);
    }

    /// Step the cursor back and restore that snapshot. No-op at index 0.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.elements = self.snapshots[self.index].clone();
        log::debug!("undo to snapshot {}", self.index);
        true
    }

    /// Step the cursor forward and restore that snapshot. No-op at the tail.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.snapshots.len() {
            return false;
        }
        self.index += 1;
        self.elements = self.snapshots[self.index].clone();
        log::debug!("redo to snapshot {}", self.index);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Remove everything and commit the empty store.
    pub fn clear(&mut self) {
        self.commit(Vec::new());
    }

    /// Topmost element whose bounds contain the world point.
    pub fn hit_test(&self, point: Point) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.hit_test(point))
    }

    /// Id of the currently selected element, if any.
    pub fn selected_id(&self) -> Option<ElementId> {
        self.elements.iter().find(|e| e.selected()).map(|e| e.id())
    }

    pub fn selected(&self) -> Option<&Element> {
        self.elements.iter().find(|e| e.selected())
    }

    /// Select exactly one element, deselecting every other.
    pub fn select_only(&mut self, id: ElementId) {
        for element in &mut self.elements {
            element.set_selected(element.id() == id);
        }
    }

    pub fn clear_selection(&mut self) {
        for element in &mut self.elements {
            element.set_selected(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{PathElement, Rgba};

    fn path_at(x: f64) -> Element {
        Element::Path(PathElement::from_points(
            vec![Point::new(x, 0.0), Point::new(x + 10.0, 10.0)],
            Rgba::black(),
            2.0,
            None,
        ))
    }

    #[test]
    fn test_starts_empty_with_initial_snapshot() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.can_undo());
        assert!(!board.can_redo());
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut board = Board::new();
        board.commit(vec![path_at(0.0)]);
        board.commit(vec![path_at(0.0), path_at(100.0)]);
        assert_eq!(board.elements().len(), 2);

        assert!(board.undo());
        assert_eq!(board.elements().len(), 1);
        assert!(board.undo());
        assert!(board.is_empty());

        assert!(board.redo());
        assert_eq!(board.elements().len(), 1);
        assert!(board.redo());
        assert_eq!(board.elements().len(), 2);
    }

    #[test]
    fn test_undo_redo_edge_noops() {
        let mut board = Board::new();
        assert!(!board.undo());
        assert!(!board.redo());

        board.commit(vec![path_at(0.0)]);
        assert!(!board.redo());
        assert!(board.undo());
        assert!(!board.undo());
    }

    #[test]
    fn test_commit_truncates_redo_branch() {
        let mut board = Board::new();
        board.commit(vec![path_at(0.0)]);
        board.commit(vec![path_at(0.0), path_at(100.0)]);
        board.undo();

        board.commit(vec![path_at(50.0)]);
        // The branch with two elements is gone.
        assert!(!board.redo());
        assert_eq!(board.elements().len(), 1);

        board.undo();
        assert_eq!(board.elements().len(), 1);
        board.undo();
        assert!(board.is_empty());
    }

    #[test]
    fn test_undo_restores_exact_snapshot() {
        let mut board = Board::new();
        let first = vec![path_at(0.0)];
        board.commit(first.clone());
        board.commit(vec![path_at(0.0), path_at(100.0)]);

        board.undo();
        assert_eq!(board.elements(), first.as_slice());
    }

    #[test]
    fn test_hit_test_topmost_first() {
        let mut board = Board::new();
        let bottom = path_at(0.0);
        let top = path_at(5.0);
        let top_id = top.id();
        board.commit(vec![bottom, top]);

        // Overlap region belongs to the element drawn later.
        let hit = board.hit_test(Point::new(7.0, 5.0)).unwrap();
        assert_eq!(hit.id(), top_id);
        assert!(board.hit_test(Point::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn test_select_only_enforces_single_selection() {
        let mut board = Board::new();
        let a = path_at(0.0);
        let b = path_at(100.0);
        let a_id = a.id();
        let b_id = b.id();
        board.commit(vec![a, b]);

        board.select_only(a_id);
        assert_eq!(board.selected_id(), Some(a_id));
        board.select_only(b_id);
        assert_eq!(board.selected_id(), Some(b_id));
        assert_eq!(board.elements().iter().filter(|e| e.selected()).count(), 1);

        board.clear_selection();
        assert!(board.selected_id().is_none());
    }

    #[test]
    fn test_clear_commits_empty_store() {
        let mut board = Board::new();
        board.commit(vec![path_at(0.0)]);
        board.clear();
        assert!(board.is_empty());
        assert!(board.undo());
        assert_eq!(board.elements().len(), 1);
    }
}
