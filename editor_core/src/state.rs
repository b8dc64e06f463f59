//! Editor state snapshots and the transactions that move between them.

use crate::buffer::TextBuffer;
use crate::facet::{Facet, FacetStore, FacetType};
use crate::plugin::Extension;
use crate::selection::EditorSelection;
use std::sync::Arc;

/// A single document edit, in character indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    /// Insert text at position.
    Insert { position: usize, text: String },
    /// Delete text starting at position.
    Delete { position: usize, text: String },
}

impl EditOperation {
    /// Returns the inverse operation (for undo).
    pub fn inverse(&self) -> EditOperation {
        match self {
            EditOperation::Insert { position, text } => EditOperation::Delete {
                position: *position,
                text: text.clone(),
            },
            EditOperation::Delete { position, text } => EditOperation::Insert {
                position: *position,
                text: text.clone(),
            },
        }
    }

    /// Maps a position in the old document to the new one.
    ///
    /// Positions at the insertion point move after the inserted text;
    /// positions inside a deleted span collapse to its start.
    pub fn map_pos(&self, pos: usize) -> usize {
        match self {
            EditOperation::Insert { position, text } => {
                if pos >= *position {
                    pos + text.chars().count()
                } else {
                    pos
                }
            }
            EditOperation::Delete { position, text } => {
                let end = position + text.chars().count();
                if pos >= end {
                    pos - (end - position)
                } else if pos > *position {
                    *position
                } else {
                    pos
                }
            }
        }
    }

    fn apply(&self, doc: &mut TextBuffer) {
        match self {
            EditOperation::Insert { position, text } => doc.insert(*position, text),
            EditOperation::Delete { position, text } => {
                doc.remove(*position, position + text.chars().count())
            }
        }
    }
}

/// Vertical alignment for a scroll-into-view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollStrategy {
    /// Scroll the minimal amount needed to make the target visible.
    #[default]
    Nearest,
    /// Place the target at the top, `y_margin` below the viewport edge.
    Start,
    /// Place the target at the bottom, `y_margin` above the viewport edge.
    End,
    /// Center the target vertically.
    Center,
}

/// A request to bring a document position into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub pos: usize,
    pub y: ScrollStrategy,
    pub y_margin: f64,
}

impl ScrollTarget {
    pub fn new(pos: usize, y: ScrollStrategy, y_margin: f64) -> Self {
        Self { pos, y, y_margin }
    }
}

/// Side effects carried by a transaction that are not document changes.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEffect {
    ScrollIntoView(ScrollTarget),
}

/// Hierarchical label describing the user action behind a transaction,
/// e.g. `input.type` or `select.pointer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserEvent(String);

impl UserEvent {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Metadata markers attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// Issued by the typewriter scroll behaviour itself.
    TypewriterScroll,
}

/// Description of a state change, before it is resolved against a state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionSpec {
    pub changes: Vec<EditOperation>,
    pub selection: Option<EditorSelection>,
    pub effects: Vec<StateEffect>,
    pub user_event: Option<UserEvent>,
    pub annotations: Vec<Annotation>,
}

impl TransactionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn change(mut self, op: EditOperation) -> Self {
        self.changes.push(op);
        self
    }

    pub fn selection(mut self, selection: EditorSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn effect(mut self, effect: StateEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn user_event(mut self, label: impl Into<String>) -> Self {
        self.user_event = Some(UserEvent::new(label));
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A resolved transaction: the spec plus the state it produces.
#[derive(Debug, Clone)]
pub struct Transaction {
    spec: TransactionSpec,
    state: EditorState,
}

impl Transaction {
    pub fn effects(&self) -> &[StateEffect] {
        &self.spec.effects
    }

    pub fn user_event(&self) -> Option<&UserEvent> {
        self.spec.user_event.as_ref()
    }

    pub fn has_annotation(&self, annotation: Annotation) -> bool {
        self.spec.annotations.contains(&annotation)
    }

    /// The state after this transaction.
    pub fn state(&self) -> &EditorState {
        &self.state
    }
}

/// Immutable editor state snapshot.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    doc: TextBuffer,
    selection: EditorSelection,
    facets: Arc<FacetStore>,
}

impl EditorState {
    /// Creates a state holding the facet contributions of `extension`.
    pub fn create(doc: TextBuffer, selection: EditorSelection, extension: &Extension) -> Self {
        Self {
            doc,
            selection,
            facets: Arc::new(extension.facets().clone()),
        }
    }

    pub fn doc(&self) -> &TextBuffer {
        &self.doc
    }

    pub fn selection(&self) -> &EditorSelection {
        &self.selection
    }

    /// Reads the effective value of a facet.
    pub fn facet<T: FacetType>(&self, facet: &Facet<T>) -> T {
        self.facets.get(facet)
    }

    /// Returns this state with the facet contributions of another extension.
    pub fn reconfigure(&self, extension: &Extension) -> Self {
        Self {
            doc: self.doc.clone(),
            selection: self.selection.clone(),
            facets: Arc::new(extension.facets().clone()),
        }
    }

    /// Resolves a transaction spec against this state.
    ///
    /// Without an explicit selection the current one is mapped through
    /// the edits.
    pub fn update(&self, spec: TransactionSpec) -> Transaction {
        let mut doc = self.doc.clone();
        let mut selection = self.selection.clone();
        for op in &spec.changes {
            op.apply(&mut doc);
            selection = selection.map_through(op);
        }
        if let Some(explicit) = &spec.selection {
            selection = explicit.clone();
        }
        let state = EditorState {
            doc,
            selection,
            facets: Arc::clone(&self.facets),
        };
        Transaction { spec, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionRange;

    #[test]
    fn test_update_maps_selection_through_edits() {
        let state = EditorState::create(
            TextBuffer::from_str("hello"),
            EditorSelection::cursor(5),
            &Extension::new(),
        );
        let tr = state.update(
            TransactionSpec::new()
                .change(EditOperation::Insert {
                    position: 5,
                    text: " world".to_string(),
                })
                .user_event("input.type"),
        );
        assert_eq!(tr.state().doc().to_string(), "hello world");
        assert_eq!(tr.state().selection().main().head, 11);
        assert_eq!(state.selection().main().head, 5);
        assert_eq!(tr.user_event().map(UserEvent::as_str), Some("input.type"));
    }

    #[test]
    fn test_explicit_selection_wins() {
        let state = EditorState::create(
            TextBuffer::from_str("abc\ndef"),
            EditorSelection::cursor(0),
            &Extension::new(),
        );
        let tr = state.update(TransactionSpec::new().selection(EditorSelection::cursor(6)));
        assert_eq!(tr.state().selection().main(), SelectionRange::cursor(6));
        assert_eq!(tr.state().doc(), state.doc());
    }

    #[test]
    fn test_inverse_undoes_edit() {
        let op = EditOperation::Delete {
            position: 1,
            text: "bc".to_string(),
        };
        let mut doc = TextBuffer::from_str("abcd");
        op.apply(&mut doc);
        assert_eq!(doc.to_string(), "ad");
        op.inverse().apply(&mut doc);
        assert_eq!(doc.to_string(), "abcd");
    }

    #[test]
    fn test_annotations() {
        let state = EditorState::default();
        let tr = state.update(TransactionSpec::new().annotate(Annotation::TypewriterScroll));
        assert!(tr.has_annotation(Annotation::TypewriterScroll));
        assert!(!state.update(TransactionSpec::new()).has_annotation(Annotation::TypewriterScroll));
    }
}
