//! Page-wide text selection rule shared by every widget on the page.

use dom_resize_core::SelectionLock;
use web_sys::Document;

pub(crate) static SELECTION_LOCK: SelectionLock = SelectionLock::new();

const STYLE_ID: &str = "dom-resize-select-style";

const UNSELECT_CSS: &str = "
* {
  -webkit-touch-callout: none;
  -webkit-user-select: none;
  -khtml-user-select: none;
  -moz-user-select: none;
  -ms-user-select: none;
  user-select: none;
}
";

/// Write (or clear) the `user-select: none` rule in `<head>`.
pub(crate) fn write_rule(document: &Document, enabled: bool) {
    let css = if enabled { "" } else { UNSELECT_CSS };

    if let Some(style) = document.get_element_by_id(STYLE_ID) {
        style.set_text_content(Some(css));
        return;
    }
    if enabled {
        return;
    }

    let Some(head) = document.head() else {
        tracing::warn!("[selection] Document has no <head>; cannot suppress text selection");
        return;
    };
    let style = match document.create_element("style") {
        Ok(style) => style,
        Err(err) => {
            tracing::warn!("[selection] Failed to create style node: {err:?}");
            return;
        }
    };
    style.set_id(STYLE_ID);
    style.set_text_content(Some(css));
    if let Err(err) = head.append_child(&style) {
        tracing::warn!("[selection] Failed to append style node: {err:?}");
    }
}

/// Current contents of the rule, if the node exists.
#[cfg(test)]
pub(crate) fn current_rule(document: &Document) -> Option<String> {
    document.get_element_by_id(STYLE_ID)?.text_content()
}
