//! Selection ranges and multi-range selections.

use crate::state::EditOperation;

/// A selection range with an anchor and a head (caret) position.
/// When anchor == head, the range is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRange {
    /// The anchor point (where selection started).
    pub anchor: usize,
    /// The head position (where the caret is).
    pub head: usize,
}

impl SelectionRange {
    /// Creates a caret at the given position.
    pub fn cursor(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Creates a range from anchor to head.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Maps both ends through a document edit.
    pub fn map_through(&self, op: &EditOperation) -> Self {
        Self {
            anchor: op.map_pos(self.anchor),
            head: op.map_pos(self.head),
        }
    }
}

/// One or more selection ranges, one of which is the main range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSelection {
    ranges: Vec<SelectionRange>,
    main_index: usize,
}

impl Default for EditorSelection {
    fn default() -> Self {
        Self::cursor(0)
    }
}

impl EditorSelection {
    /// Creates a selection holding a single caret.
    pub fn cursor(pos: usize) -> Self {
        Self {
            ranges: vec![SelectionRange::cursor(pos)],
            main_index: 0,
        }
    }

    /// Creates a selection holding a single range.
    pub fn single(anchor: usize, head: usize) -> Self {
        Self {
            ranges: vec![SelectionRange::new(anchor, head)],
            main_index: 0,
        }
    }

    /// Creates a selection from several ranges.
    ///
    /// An empty list becomes a caret at 0 and the main index is clamped
    /// to the last range.
    pub fn create(ranges: Vec<SelectionRange>, main_index: usize) -> Self {
        if ranges.is_empty() {
            return Self::default();
        }
        let main_index = main_index.min(ranges.len() - 1);
        Self { ranges, main_index }
    }

    /// Returns the main range.
    pub fn main(&self) -> SelectionRange {
        self.ranges[self.main_index]
    }

    /// Returns all ranges.
    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    /// Returns the number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false: a selection holds at least one range.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Maps every range through a document edit.
    pub fn map_through(&self, op: &EditOperation) -> Self {
        Self {
            ranges: self.ranges.iter().map(|r| r.map_through(op)).collect(),
            main_index: self.main_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_clamps_main_index() {
        let sel = EditorSelection::create(
            vec![SelectionRange::cursor(1), SelectionRange::cursor(5)],
            7,
        );
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.main().head, 5);

        let empty = EditorSelection::create(Vec::new(), 0);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty.main().head, 0);
    }

    #[test]
    fn test_map_through_insert_and_delete() {
        let sel = EditorSelection::single(2, 6);

        let insert = EditOperation::Insert {
            position: 4,
            text: "xyz".to_string(),
        };
        assert_eq!(sel.map_through(&insert).main(), SelectionRange::new(2, 9));

        let delete = EditOperation::Delete {
            position: 1,
            text: "abc".to_string(),
        };
        assert_eq!(sel.map_through(&delete).main(), SelectionRange::new(1, 3));
    }
}
