//! `web-sys` implementation of the engine's host traits.

use std::rc::Weak;

use dom_resize_core::{
    Direction, Point, Rect, ResizeError, ResizeHost, SelectionLock, StyleAccessor, StyleMap,
};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent, Window};

use crate::selection::{SELECTION_LOCK, write_rule};
use crate::widget::Shared;

/// Attribute carrying a handle's direction name.
pub(crate) const CONTROL_ATTR: &str = "data-control";

pub struct WebHost {
    window: Window,
    document: Document,
    shared: Weak<Shared>,
    move_listener: Option<EventListener>,
    up_listener: Option<EventListener>,
}

impl WebHost {
    pub fn new() -> Result<Self, ResizeError> {
        let window =
            web_sys::window().ok_or_else(|| ResizeError::Dom("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| ResizeError::Dom("window has no document".to_string()))?;
        Ok(Self {
            window,
            document,
            shared: Weak::new(),
            move_listener: None,
            up_listener: None,
        })
    }

    /// Widget the document listeners report to.
    pub(crate) fn bind(&mut self, shared: Weak<Shared>) {
        self.shared = shared;
    }
}

impl StyleAccessor for WebHost {
    type Element = Element;

    fn computed_value(&self, element: &Element, property: &str) -> Result<String, ResizeError> {
        let style = self
            .window
            .get_computed_style(element)
            .map_err(dom_error)?
            .ok_or_else(|| {
                ResizeError::Dom(format!("no computed style for <{}>", element.tag_name()))
            })?;
        style.get_property_value(property).map_err(dom_error)
    }

    fn apply_styles(&self, element: &Element, styles: &StyleMap) -> Result<(), ResizeError> {
        let html = element.dyn_ref::<HtmlElement>().ok_or_else(|| {
            ResizeError::Dom(format!("cannot style non-HTML element <{}>", element.tag_name()))
        })?;
        let style = html.style();
        for (property, value) in styles.iter() {
            style.set_property(property, value).map_err(dom_error)?;
        }
        Ok(())
    }
}

impl ResizeHost for WebHost {
    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn scroll_offset(&self) -> Point {
        Point::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn handle_direction(&self, node: &Element) -> Option<String> {
        node.get_attribute(CONTROL_ATTR)
    }

    fn find_handle(&self, target: &Element, direction: Direction) -> Option<Element> {
        let selector = format!(":scope > div[{CONTROL_ATTR}=\"{}\"]", direction.name());
        target.query_selector(&selector).ok().flatten()
    }

    fn create_handle(&self, target: &Element, direction: Direction) -> Result<Element, ResizeError> {
        let handle = self.document.create_element("div").map_err(dom_error)?;
        handle
            .set_attribute(CONTROL_ATTR, direction.name())
            .map_err(dom_error)?;
        target.append_child(&handle).map_err(dom_error)?;
        Ok(handle)
    }

    fn remove_element(&self, element: &Element) {
        element.remove();
    }

    fn selection_lock(&self) -> &SelectionLock {
        &SELECTION_LOCK
    }

    fn set_text_selection(&self, enabled: bool) {
        write_rule(&self.document, enabled);
    }

    fn listen_drag(&mut self) {
        let shared = self.shared.clone();
        self.move_listener = Some(EventListener::new(&self.document, "mousemove", move |event| {
            let (Some(shared), Some(event)) = (shared.upgrade(), event.dyn_ref::<MouseEvent>())
            else {
                return;
            };
            let page = Point::new(f64::from(event.page_x()), f64::from(event.page_y()));
            shared.pointer_move(page, js_sys::Date::now());
        }));

        let shared = self.shared.clone();
        self.up_listener = Some(EventListener::once(&self.document, "mouseup", move |_| {
            if let Some(shared) = shared.upgrade() {
                shared.pointer_up();
            }
        }));
    }

    fn release_drag(&mut self) {
        // The single-shot up listener is the caller here; it is dropped by the
        // next `listen_drag` or by `detach`.
        self.move_listener = None;
    }

    fn detach(&mut self) {
        self.move_listener = None;
        self.up_listener = None;
    }
}

fn dom_error(err: wasm_bindgen::JsValue) -> ResizeError {
    ResizeError::Dom(format!("{err:?}"))
}
