//! Keeps the caret line at the typewriter offset as the caret moves.

use crate::config::{FIX_BOTTOM_ONLY, TYPEWRITER_OFFSET};
use crate::padding::typewriter_offset_px;
use crate::plugin::ViewPlugin;
use crate::state::{
    Annotation, ScrollStrategy, ScrollTarget, StateEffect, Transaction, TransactionSpec,
};
use crate::view::{ViewHost, ViewUpdate};
use regex::Regex;
use std::sync::LazyLock;

/// Correction between `coords_at_pos` tops and the client height scale.
const CARET_TOP_CORRECTION: f64 = 100.0;

static ALLOWED_USER_EVENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(select|input|delete|undo|redo)(\..+)?$")
        .expect("Invalid allowed user event regex")
});

static DISALLOWED_USER_EVENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^select\.pointer$").expect("Invalid disallowed user event regex")
});

/// True if a single transaction's user event may trigger a scroll.
/// Unlabelled transactions never do.
pub fn is_allowed_transaction(tr: &Transaction) -> bool {
    tr.user_event().is_some_and(|event| {
        ALLOWED_USER_EVENTS.is_match(event.as_str())
            && !DISALLOWED_USER_EVENTS.is_match(event.as_str())
    })
}

/// True if every transaction in the update is allowed, and there is at
/// least one.
pub fn is_allowed_update(transactions: &[Transaction]) -> bool {
    !transactions.is_empty() && transactions.iter().all(is_allowed_transaction)
}

/// True if the update contains a transaction this behaviour issued.
fn is_self_issued(update: &ViewUpdate) -> bool {
    update
        .transactions
        .iter()
        .any(|tr| tr.has_annotation(Annotation::TypewriterScroll))
}

/// Caret data captured when a scroll is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CaretMove {
    range_count: usize,
    head: usize,
    prev_head: usize,
}

/// Scrolls the caret line to the typewriter offset after selection,
/// input, delete, undo and redo actions.
///
/// The correction is dispatched from the next animation frame and tagged
/// with [`Annotation::TypewriterScroll`]; the update it produces is
/// skipped without evaluation so the plugin never reacts to itself.
#[derive(Debug, Default)]
pub struct TypewriterScroll {
    scheduled: u64,
    skipped: u64,
}

impl TypewriterScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed() -> Box<dyn ViewPlugin> {
        Box::new(Self::new())
    }

    /// Number of frames scheduled so far.
    pub fn scheduled(&self) -> u64 {
        self.scheduled
    }

    /// Number of self-issued updates skipped so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl ViewPlugin for TypewriterScroll {
    fn name(&self) -> &'static str {
        "typewriter-scroll"
    }

    fn update(&mut self, update: &ViewUpdate, host: &mut dyn ViewHost) {
        if is_self_issued(update) {
            self.skipped += 1;
            log::trace!("typewriter scroll: skipping self-issued update");
            return;
        }
        if !is_allowed_update(&update.transactions) {
            return;
        }

        let caret = CaretMove {
            range_count: update.state.selection().len(),
            head: update.state.selection().main().head,
            prev_head: update.start_state.selection().main().head,
        };
        self.scheduled += 1;
        // Dispatching inside an update is not allowed.
        host.request_animation_frame(Box::new(move |host: &mut dyn ViewHost| {
            center_on_head(host, caret)
        }));
    }
}

fn center_on_head(host: &mut dyn ViewHost, caret: CaretMove) {
    if caret.range_count != 1 || caret.head == caret.prev_head {
        return;
    }
    let Some(coords) = host.coords_at_pos(caret.head, -1) else {
        log::debug!("typewriter scroll: no coordinates for {}", caret.head);
        return;
    };

    let height = host.client_height();
    let state = host.state();
    let fraction = state.facet(&TYPEWRITER_OFFSET);
    log::debug!(
        "client height: {}, caret top: {}, caret bottom: {}",
        height,
        coords.top,
        coords.bottom
    );

    let approx_distance_from_top = coords.top - CARET_TOP_CORRECTION;
    if state.facet(&FIX_BOTTOM_ONLY) && approx_distance_from_top / height < fraction {
        return;
    }

    let offset = typewriter_offset_px(height, fraction, host.default_line_height());
    let effect = StateEffect::ScrollIntoView(ScrollTarget::new(
        caret.head,
        ScrollStrategy::Start,
        offset,
    ));
    host.dispatch(
        TransactionSpec::new()
            .effect(effect)
            .annotate(Annotation::TypewriterScroll),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::Extension;
    use crate::selection::EditorSelection;
    use crate::state::EditorState;
    use crate::view::{ContentStyle, FrameCallback, Rect};
    use crate::TextBuffer;

    /// Host whose caret is always drawn `caret_top` pixels down.
    struct RecordingHost {
        state: EditorState,
        style: ContentStyle,
        caret_top: f64,
        frames: Vec<FrameCallback>,
        dispatched: Vec<TransactionSpec>,
    }

    impl RecordingHost {
        fn new(extension: &Extension, caret_top: f64) -> Self {
            Self {
                state: EditorState::create(
                    TextBuffer::from_str("one\ntwo\nthree\n"),
                    EditorSelection::cursor(0),
                    extension,
                ),
                style: ContentStyle::default(),
                caret_top,
                frames: Vec::new(),
                dispatched: Vec::new(),
            }
        }

        fn run_frame(&mut self) {
            for callback in std::mem::take(&mut self.frames) {
                callback(self);
            }
        }
    }

    impl ViewHost for RecordingHost {
        fn state(&self) -> &EditorState {
            &self.state
        }

        fn client_height(&self) -> f64 {
            1000.0
        }

        fn default_line_height(&self) -> f64 {
            20.0
        }

        fn coords_at_pos(&self, _pos: usize, _side: i8) -> Option<Rect> {
            Some(Rect {
                top: self.caret_top,
                bottom: self.caret_top + 20.0,
                ..Rect::default()
            })
        }

        fn content_style(&self) -> &ContentStyle {
            &self.style
        }

        fn content_style_mut(&mut self) -> &mut ContentStyle {
            &mut self.style
        }

        fn dispatch(&mut self, spec: TransactionSpec) {
            self.dispatched.push(spec);
        }

        fn request_animation_frame(&mut self, callback: FrameCallback) {
            self.frames.push(callback);
        }
    }

    fn caret_update(host: &RecordingHost, label: &str, head: usize) -> ViewUpdate {
        let tr = host.state.update(
            TransactionSpec::new()
                .selection(EditorSelection::cursor(head))
                .user_event(label),
        );
        ViewUpdate::from_transactions(host.state.clone(), vec![tr])
    }

    fn tr(label: Option<&str>) -> Transaction {
        let spec = match label {
            Some(label) => TransactionSpec::new().user_event(label),
            None => TransactionSpec::new(),
        };
        EditorState::default().update(spec)
    }

    #[test]
    fn test_allowed_labels() {
        let labels = [
            "select",
            "input",
            "input.type",
            "delete.backward",
            "undo",
            "redo",
            "select.extend",
        ];
        for label in labels {
            assert!(is_allowed_transaction(&tr(Some(label))), "{}", label);
        }
    }

    #[test]
    fn test_rejected_labels() {
        for label in ["select.pointer", "move", "input.", "selectall", "paste", ""] {
            assert!(!is_allowed_transaction(&tr(Some(label))), "{}", label);
        }
        assert!(!is_allowed_transaction(&tr(None)));
    }

    #[test]
    fn test_pointer_sub_labels_are_allowed() {
        // Only the exact pointer label is denied.
        assert!(is_allowed_transaction(&tr(Some("select.pointer.drag"))));
    }

    #[test]
    fn test_update_needs_every_transaction_allowed() {
        assert!(!is_allowed_update(&[]));
        assert!(is_allowed_update(&[tr(Some("input")), tr(Some("select"))]));
        assert!(!is_allowed_update(&[tr(Some("input")), tr(Some("select.pointer"))]));
        assert!(!is_allowed_update(&[tr(Some("input")), tr(None)]));
    }

    #[test]
    fn test_schedules_and_dispatches_annotated_scroll() {
        let mut host = RecordingHost::new(&Extension::new(), 300.0);
        let mut plugin = TypewriterScroll::new();

        let update = caret_update(&host, "input", 8);
        plugin.update(&update, &mut host);
        assert_eq!(plugin.scheduled(), 1);
        assert!(host.dispatched.is_empty());

        host.run_frame();
        let expected = TransactionSpec::new()
            .effect(StateEffect::ScrollIntoView(ScrollTarget::new(
                8,
                ScrollStrategy::Start,
                490.0,
            )))
            .annotate(Annotation::TypewriterScroll);
        assert_eq!(host.dispatched, vec![expected]);
    }

    #[test]
    fn test_skips_self_issued_update_regardless_of_content() {
        let mut host = RecordingHost::new(&Extension::new(), 300.0);
        let mut plugin = TypewriterScroll::new();

        let tr = host.state.update(
            TransactionSpec::new()
                .selection(EditorSelection::cursor(4))
                .user_event("input")
                .annotate(Annotation::TypewriterScroll),
        );
        let update = ViewUpdate::from_transactions(host.state.clone(), vec![tr]);
        plugin.update(&update, &mut host);
        assert_eq!(plugin.skipped(), 1);
        assert_eq!(plugin.scheduled(), 0);
        assert!(host.frames.is_empty());
    }

    #[test]
    fn test_fix_bottom_only_above_offset() {
        let extension = Extension::new().with_facet(&FIX_BOTTOM_ONLY, true);
        let mut host = RecordingHost::new(&extension, 300.0);
        let mut plugin = TypewriterScroll::new();

        plugin.update(&caret_update(&host, "input", 8), &mut host);
        host.run_frame();
        assert!(host.dispatched.is_empty());
    }

    #[test]
    fn test_fix_bottom_only_below_offset() {
        let extension = Extension::new().with_facet(&FIX_BOTTOM_ONLY, true);
        let mut host = RecordingHost::new(&extension, 700.0);
        let mut plugin = TypewriterScroll::new();

        plugin.update(&caret_update(&host, "input", 8), &mut host);
        host.run_frame();
        assert_eq!(host.dispatched.len(), 1);
    }

    #[test]
    fn test_geometry_update_is_ignored() {
        let mut host = RecordingHost::new(&Extension::new(), 300.0);
        let mut plugin = TypewriterScroll::new();
        plugin.update(&ViewUpdate::geometry(host.state.clone()), &mut host);
        assert_eq!(plugin.scheduled(), 0);
        assert!(host.frames.is_empty());
    }

    #[test]
    fn test_pointer_transaction_vetoes_mixed_update() {
        let mut host = RecordingHost::new(&Extension::new(), 300.0);
        let mut plugin = TypewriterScroll::new();

        let typed = host.state.update(
            TransactionSpec::new()
                .selection(EditorSelection::cursor(4))
                .user_event("input"),
        );
        let clicked = typed.state().update(
            TransactionSpec::new()
                .selection(EditorSelection::cursor(8))
                .user_event("select.pointer"),
        );
        let update = ViewUpdate::from_transactions(host.state.clone(), vec![typed, clicked]);
        plugin.update(&update, &mut host);

        assert_eq!(plugin.scheduled(), 0);
        assert!(host.frames.is_empty());
        host.run_frame();
        assert!(host.dispatched.is_empty());
    }
}
