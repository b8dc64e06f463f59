//! The seam between view plugins and the host editor view.
//!
//! Everything here is provided by the host: measurement, the content
//! element's style, transaction dispatch, and frame scheduling. Plugins
//! only ever see the host through [`ViewHost`].

use crate::state::{EditorState, Transaction, TransactionSpec};

/// Screen rectangle in pixels, relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Inline style of the content element.
///
/// Lengths are CSS-like strings: empty when unset, otherwise `"<n>px"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentStyle {
    pub padding_top: String,
    pub padding_bottom: String,
}

impl ContentStyle {
    /// Parses `padding_top` back to pixels; unset counts as 0.
    pub fn padding_top_px(&self) -> f64 {
        parse_px(&self.padding_top)
    }

    /// Parses `padding_bottom` back to pixels; unset counts as 0.
    pub fn padding_bottom_px(&self) -> f64 {
        parse_px(&self.padding_bottom)
    }
}

/// Formats a pixel length the way it is stored in [`ContentStyle`].
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

fn parse_px(value: &str) -> f64 {
    value
        .strip_suffix("px")
        .and_then(|n| n.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Work deferred to the next display frame.
pub type FrameCallback = Box<dyn FnOnce(&mut dyn ViewHost)>;

/// Operations a host editor view exposes to plugins.
pub trait ViewHost {
    /// The current state.
    fn state(&self) -> &EditorState;

    /// Height of the visible area in pixels.
    fn client_height(&self) -> f64;

    /// Height of a line of text in the default font.
    fn default_line_height(&self) -> f64;

    /// Viewport coordinates of a document position.
    ///
    /// `side` picks the glyph before (`-1`) or after (`1`) the position.
    /// Returns `None` when the position is outside the laid-out document.
    fn coords_at_pos(&self, pos: usize, side: i8) -> Option<Rect>;

    fn content_style(&self) -> &ContentStyle;

    fn content_style_mut(&mut self) -> &mut ContentStyle;

    /// Applies a new transaction. Not allowed while an update is running.
    fn dispatch(&mut self, spec: TransactionSpec);

    /// Runs `callback` at the start of the next display frame.
    fn request_animation_frame(&mut self, callback: FrameCallback);
}

/// Snapshot of a single view update.
#[derive(Debug, Clone)]
pub struct ViewUpdate {
    /// State after the update.
    pub state: EditorState,
    /// State before the update.
    pub start_state: EditorState,
    /// Transactions applied in this update, in order. Empty for
    /// geometry-only updates such as a resize.
    pub transactions: Vec<Transaction>,
}

impl ViewUpdate {
    /// Builds the update produced by a batch of transactions.
    pub fn from_transactions(start_state: EditorState, transactions: Vec<Transaction>) -> Self {
        let state = transactions
            .last()
            .map(|tr| tr.state().clone())
            .unwrap_or_else(|| start_state.clone());
        Self {
            state,
            start_state,
            transactions,
        }
    }

    /// An update without transactions (resize, remeasure).
    pub fn geometry(state: EditorState) -> Self {
        Self {
            start_state: state.clone(),
            state,
            transactions: Vec::new(),
        }
    }
}
