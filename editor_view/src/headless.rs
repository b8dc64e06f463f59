//! In-memory editor view.

use std::mem;
use typewriter_core::{
    ContentStyle, EditorSelection, EditorState, Extension, FrameCallback, Rect, ScrollStrategy,
    ScrollTarget, StateEffect, TextBuffer, Transaction, TransactionSpec, ViewHost, ViewPlugin,
    ViewUpdate,
};

/// Width of a character cell in pixels.
const CHAR_WIDTH: f64 = 8.0;

/// A view with uniform line height and no wrapping.
///
/// Line `n` occupies `[padding_top + n * line_height, padding_top + (n + 1) * line_height)`
/// in content coordinates; viewport coordinates subtract `scroll_top`.
///
/// Note: Does not derive Debug because plugins and frame callbacks are
/// trait objects.
pub struct HeadlessView {
    state: EditorState,
    plugins: Vec<Box<dyn ViewPlugin>>,
    client_height: f64,
    line_height: f64,
    scroll_top: f64,
    content_style: ContentStyle,
    /// Number of times plugins took mutable access to the style.
    style_writes: usize,
    frames: Vec<FrameCallback>,
    /// True while plugins are running.
    updating: bool,
    dispatched: Vec<Transaction>,
}

impl HeadlessView {
    /// Creates a view over `doc` with the caret at 0.
    pub fn new(doc: &str, client_height: f64, line_height: f64, extension: &Extension) -> Self {
        let state = EditorState::create(
            TextBuffer::from_str(doc),
            EditorSelection::cursor(0),
            extension,
        );
        Self {
            state,
            plugins: extension.instantiate_plugins(),
            client_height,
            line_height,
            scroll_top: 0.0,
            content_style: ContentStyle::default(),
            style_writes: 0,
            frames: Vec::new(),
            updating: false,
            dispatched: Vec::new(),
        }
    }

    /// Current vertical scroll offset in pixels.
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Scrolls without an update, like a wheel scroll.
    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top;
        self.clamp_scroll();
    }

    /// Resizes the viewport and runs a geometry update.
    pub fn set_client_height(&mut self, client_height: f64) {
        self.client_height = client_height;
        self.measure();
    }

    /// Runs an update with no transactions, as after layout.
    pub fn measure(&mut self) {
        let update = ViewUpdate::geometry(self.state.clone());
        self.run_plugins(&update);
        self.clamp_scroll();
    }

    /// Replaces the active extension, keeping document and selection.
    ///
    /// Plugins are recreated, so per-instance state starts over.
    pub fn reconfigure(&mut self, extension: &Extension) {
        log::debug!("reconfiguring view with {} plugin(s)", extension.plugin_count());
        self.state = self.state.reconfigure(extension);
        self.plugins = extension.instantiate_plugins();
        self.measure();
    }

    /// Runs the callbacks queued before this frame started. Callbacks
    /// requested while the frame runs wait for the next one.
    pub fn run_frame(&mut self) -> usize {
        let due = mem::take(&mut self.frames);
        let count = due.len();
        for callback in due {
            callback(self);
        }
        count
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Every transaction applied so far, in order.
    pub fn dispatched(&self) -> &[Transaction] {
        &self.dispatched
    }

    /// Number of mutable style accesses made by plugins.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    /// Total content height including padding.
    pub fn content_height(&self) -> f64 {
        self.content_style.padding_top_px()
            + self.state.doc().len_lines() as f64 * self.line_height
            + self.content_style.padding_bottom_px()
    }

    fn line_top(&self, line: usize) -> f64 {
        self.content_style.padding_top_px() + line as f64 * self.line_height
    }

    fn clamp_scroll(&mut self) {
        let max = (self.content_height() - self.client_height).max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, max);
    }

    fn run_plugins(&mut self, update: &ViewUpdate) {
        self.updating = true;
        let mut plugins = mem::take(&mut self.plugins);
        for plugin in plugins.iter_mut() {
            log::trace!("updating plugin {}", plugin.name());
            plugin.update(update, self);
        }
        self.plugins = plugins;
        self.updating = false;
    }

    fn scroll_into_view(&mut self, target: ScrollTarget) {
        let line = self.state.doc().line_of(target.pos);
        let top = self.line_top(line);
        let bottom = top + self.line_height;
        let height = self.client_height;
        self.scroll_top = match target.y {
            ScrollStrategy::Start => top - target.y_margin,
            ScrollStrategy::End => bottom + target.y_margin - height,
            ScrollStrategy::Center => top - (height - self.line_height) / 2.0,
            ScrollStrategy::Nearest => {
                if top - target.y_margin < self.scroll_top {
                    top - target.y_margin
                } else if bottom + target.y_margin > self.scroll_top + height {
                    bottom + target.y_margin - height
                } else {
                    self.scroll_top
                }
            }
        };
        self.clamp_scroll();
        log::debug!("scrolled {:?} to {}", target, self.scroll_top);
    }
}

impl ViewHost for HeadlessView {
    fn state(&self) -> &EditorState {
        &self.state
    }

    fn client_height(&self) -> f64 {
        self.client_height
    }

    fn default_line_height(&self) -> f64 {
        self.line_height
    }

    fn coords_at_pos(&self, pos: usize, _side: i8) -> Option<Rect> {
        let doc = self.state.doc();
        if pos > doc.len_chars() {
            return None;
        }
        let (line, col) = doc.char_to_line_col(pos);
        let top = self.line_top(line) - self.scroll_top;
        let left = col as f64 * CHAR_WIDTH;
        Some(Rect {
            left,
            right: left,
            top,
            bottom: top + self.line_height,
        })
    }

    fn content_style(&self) -> &ContentStyle {
        &self.content_style
    }

    fn content_style_mut(&mut self) -> &mut ContentStyle {
        self.style_writes += 1;
        &mut self.content_style
    }

    fn dispatch(&mut self, spec: TransactionSpec) {
        if self.updating {
            log::error!("dispatch during a view update is not allowed; transaction dropped");
            return;
        }
        let tr = self.state.update(spec);
        let start_state = mem::replace(&mut self.state, tr.state().clone());
        self.dispatched.push(tr.clone());

        let effects = tr.effects().to_vec();
        let update = ViewUpdate::from_transactions(start_state, vec![tr]);
        self.run_plugins(&update);
        // Scroll after plugins so padding changes are already laid out.
        for effect in effects {
            match effect {
                StateEffect::ScrollIntoView(target) => self.scroll_into_view(target),
            }
        }
        self.clamp_scroll();
    }

    fn request_animation_frame(&mut self, callback: FrameCallback) {
        self.frames.push(callback);
    }
}
