//! Typewriter scrolling for editor views.
//!
//! As the caret moves, the view is padded and scrolled so the caret line
//! stays at a fixed fraction of the viewport height. The behaviour is a
//! set of view plugins; the host editor is reached only through
//! [`ViewHost`].

pub mod buffer;
pub mod config;
pub mod facet;
pub mod padding;
pub mod plugin;
pub mod selection;
pub mod state;
pub mod typewriter;
pub mod view;

pub use buffer::TextBuffer;
pub use config::{TypewriterOptions, FIX_BOTTOM_ONLY, PADDING_ENABLED, TYPEWRITER_OFFSET};
pub use facet::{Facet, FacetStore};
pub use padding::{typewriter_offset_px, ResetPadding, TypewriterPadding};
pub use plugin::{Extension, ViewPlugin};
pub use selection::{EditorSelection, SelectionRange};
pub use state::{
    Annotation, EditOperation, EditorState, ScrollStrategy, ScrollTarget, StateEffect,
    Transaction, TransactionSpec, UserEvent,
};
pub use typewriter::TypewriterScroll;
pub use view::{ContentStyle, FrameCallback, Rect, ViewHost, ViewUpdate};

/// Typewriter scrolling: option contributions, content padding and the
/// caret scroll plugin.
///
/// Options left as `None` contribute nothing, so defaults or values from
/// other extensions apply.
pub fn typewriter_scroll(options: TypewriterOptions) -> Extension {
    let mut ext = Extension::new();
    if let Some(offset) = options.typewriter_offset {
        ext = ext.with_facet(&TYPEWRITER_OFFSET, offset);
    }
    if let Some(padding) = options.padding_option {
        ext = ext.with_facet(&PADDING_ENABLED, padding);
    }
    if let Some(fix_bottom_only) = options.fix_bottom_only {
        ext = ext.with_facet(&FIX_BOTTOM_ONLY, fix_bottom_only);
    }
    ext.with_plugin(TypewriterPadding::boxed)
        .with_plugin(TypewriterScroll::boxed)
}

/// Strips typewriter padding. Attach in place of [`typewriter_scroll`]
/// when turning the behaviour off.
pub fn reset_typewriter_scroll() -> Extension {
    Extension::new().with_plugin(ResetPadding::boxed)
}
