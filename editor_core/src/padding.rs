//! Content padding that lets the caret line reach the typewriter offset
//! at the very start and end of the document.

use crate::config::{PADDING_ENABLED, TYPEWRITER_OFFSET};
use crate::plugin::ViewPlugin;
use crate::view::{px, ViewHost, ViewUpdate};

/// Pixel distance from the viewport top to the top of the caret line.
///
/// The offset fraction marks where the line's middle should sit, so half
/// a line is subtracted. A zero height (not laid out yet) gives a
/// negative result; callers accept that until the next update.
pub fn typewriter_offset_px(client_height: f64, offset: f64, line_height: f64) -> f64 {
    client_height * offset - line_height / 2.0
}

/// Keeps top and bottom padding in sync with the viewport height.
///
/// Top plus bottom padding always equals the viewport height. The style
/// is only written when the computed top padding differs from the one
/// this instance last applied.
#[derive(Debug, Default)]
pub struct TypewriterPadding {
    top_padding: Option<String>,
}

impl TypewriterPadding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed() -> Box<dyn ViewPlugin> {
        Box::new(Self::new())
    }
}

impl ViewPlugin for TypewriterPadding {
    fn name(&self) -> &'static str {
        "typewriter-padding"
    }

    fn update(&mut self, _update: &ViewUpdate, host: &mut dyn ViewHost) {
        let state = host.state();
        if !state.facet(&PADDING_ENABLED) {
            return;
        }
        let height = host.client_height();
        let offset = typewriter_offset_px(
            height,
            state.facet(&TYPEWRITER_OFFSET),
            host.default_line_height(),
        );
        let top = px(offset);
        if self.top_padding.as_deref() == Some(top.as_str()) {
            return;
        }
        log::debug!("typewriter padding: top {} bottom {}", top, px(height - offset));
        let style = host.content_style_mut();
        style.padding_top = top.clone();
        style.padding_bottom = px(height - offset);
        self.top_padding = Some(top);
    }
}

/// Removes typewriter padding, leaving half a viewport of bottom padding.
///
/// Reacts only to whether top padding is currently set, independent of
/// any typewriter option.
#[derive(Debug, Default)]
pub struct ResetPadding;

impl ResetPadding {
    pub fn boxed() -> Box<dyn ViewPlugin> {
        Box::new(ResetPadding)
    }
}

impl ViewPlugin for ResetPadding {
    fn name(&self) -> &'static str {
        "typewriter-reset-padding"
    }

    fn update(&mut self, _update: &ViewUpdate, host: &mut dyn ViewHost) {
        if host.content_style().padding_top.is_empty() {
            return;
        }
        let bottom = px(host.client_height() / 2.0);
        log::debug!("typewriter padding reset: bottom {}", bottom);
        let style = host.content_style_mut();
        style.padding_top.clear();
        style.padding_bottom = bottom;
    }
}
