//! Typewriter scroll demo.
//!
//! Usage: typewriter-demo [OPTIONS_JSON]
//!
//! Runs a scripted editing session against a headless view and logs how
//! the padding and scroll position follow the caret. Set `RUST_LOG=debug`
//! to see every plugin decision.

use std::env;
use typewriter_core::{
    reset_typewriter_scroll, typewriter_scroll, EditOperation, EditorSelection, SelectionRange,
    TransactionSpec, TypewriterOptions, ViewHost,
};
use typewriter_view::HeadlessView;

const DOC_LINES: usize = 200;
const CLIENT_HEIGHT: f64 = 1000.0;
const LINE_HEIGHT: f64 = 20.0;

/// One scripted user action.
#[derive(Debug, Clone, Copy)]
enum Step {
    Type(&'static str),
    MoveDown(usize),
    Click(usize),
    Backspace,
    Undo,
    AddCursorAtLine(usize),
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match env::args().nth(1) {
        Some(path) => {
            log::info!("Loading options from {}", path);
            TypewriterOptions::load(&path).unwrap_or_else(|e| {
                log::error!("Failed to load options '{}': {}", path, e);
                TypewriterOptions::default()
            })
        }
        None => TypewriterOptions::default(),
    };
    log::info!("Options: {:?}", options);

    let doc: String = (0..DOC_LINES).map(|i| format!("line {}\n", i)).collect();
    let extension = typewriter_scroll(options);
    let mut view = HeadlessView::new(&doc, CLIENT_HEIGHT, LINE_HEIGHT, &extension);
    view.measure();
    report(&view, "initial layout");

    let script = [
        Step::MoveDown(120),
        Step::Type("Hello"),
        Step::MoveDown(5),
        Step::Click(10),
        Step::Type(" world"),
        Step::Backspace,
        Step::Undo,
        Step::AddCursorAtLine(40),
    ];

    let mut last_edit: Option<EditOperation> = None;
    for step in script {
        let spec = transaction_for(&view, step, &mut last_edit);
        view.dispatch(spec);
        view.run_frame();
        report(&view, &format!("{:?}", step));
    }

    log::info!("Turning typewriter scrolling off");
    view.reconfigure(&reset_typewriter_scroll());
    report(&view, "after reset");

    log::info!("Typewriter demo exited");
}

fn transaction_for(
    view: &HeadlessView,
    step: Step,
    last_edit: &mut Option<EditOperation>,
) -> TransactionSpec {
    let state = view.state();
    let doc = state.doc();
    let head = state.selection().main().head;
    match step {
        Step::Type(text) => {
            let op = EditOperation::Insert {
                position: head,
                text: text.to_string(),
            };
            *last_edit = Some(op.clone());
            TransactionSpec::new().change(op).user_event("input.type")
        }
        Step::MoveDown(lines) => {
            let (line, col) = doc.char_to_line_col(head);
            let target = doc.line_start(line + lines) + col;
            TransactionSpec::new()
                .selection(EditorSelection::cursor(target.min(doc.len_chars())))
                .user_event("select")
        }
        Step::Click(line) => TransactionSpec::new()
            .selection(EditorSelection::cursor(doc.line_start(line)))
            .user_event("select.pointer"),
        Step::Backspace => {
            if head == 0 {
                return TransactionSpec::new().user_event("delete.backward");
            }
            let op = EditOperation::Delete {
                position: head - 1,
                text: doc.slice(head - 1, head),
            };
            *last_edit = Some(op.clone());
            TransactionSpec::new().change(op).user_event("delete.backward")
        }
        Step::Undo => match last_edit.take() {
            Some(op) => TransactionSpec::new().change(op.inverse()).user_event("undo"),
            None => TransactionSpec::new().user_event("undo"),
        },
        Step::AddCursorAtLine(line) => {
            let mut ranges = state.selection().ranges().to_vec();
            ranges.push(SelectionRange::cursor(doc.line_start(line)));
            let main = ranges.len() - 1;
            TransactionSpec::new()
                .selection(EditorSelection::create(ranges, main))
                .user_event("select")
        }
    }
}

fn report(view: &HeadlessView, label: &str) {
    let state = view.state();
    let head = state.selection().main().head;
    let caret_top = view.coords_at_pos(head, -1).map(|r| r.top);
    log::info!(
        "{}: line {}, scroll_top {}, caret top {:?}, padding {:?}/{:?}",
        label,
        state.doc().line_of(head),
        view.scroll_top(),
        caret_top,
        view.content_style().padding_top,
        view.content_style().padding_bottom
    );
}
