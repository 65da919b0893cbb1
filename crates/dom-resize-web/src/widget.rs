//! `DomResize`: the widget class exported to JavaScript.

use std::cell::RefCell;
use std::rc::Rc;

use dom_resize_core::{
    Direction, EventKind, HandleSpec, Point, ResizeConfig, ResizeError, Resizer, Target,
};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::host::WebHost;

/// State reachable from the DOM listeners. They hold it weakly, so dropping
/// the widget tears everything down.
pub(crate) struct Shared {
    resizer: RefCell<Resizer<WebHost>>,
    down_listener: RefCell<Option<EventListener>>,
}

impl Shared {
    /// Run `f` on the engine. Fails with `Busy` when called from inside one of
    /// the widget's own callbacks.
    fn with_resizer<R>(&self, f: impl FnOnce(&mut Resizer<WebHost>) -> R) -> Result<R, ResizeError> {
        let mut resizer = self.resizer.try_borrow_mut().map_err(|_| ResizeError::Busy)?;
        Ok(f(&mut resizer))
    }

    /// Like `with_resizer`, then deliver the lifecycle callbacks `f` queued.
    /// They run after the engine is released, so they may call back into
    /// this widget.
    fn dispatch<R>(&self, f: impl FnOnce(&mut Resizer<WebHost>) -> R) -> Result<R, ResizeError> {
        let (result, notifications) = self.with_resizer(|r| {
            let result = f(r);
            (result, r.take_notifications())
        })?;
        for notification in notifications {
            notification.deliver();
        }
        Ok(result)
    }

    fn pointer_down(&self, node: &Element) {
        if let Err(err) = self.dispatch(|r| r.pointer_down(node)).and_then(|started| started) {
            tracing::warn!("[widget] Dropped mousedown: {err}");
        }
    }

    pub(crate) fn pointer_move(&self, page: Point, now_ms: f64) {
        if let Err(err) = self.dispatch(|r| r.pointer_move(page, now_ms)).and_then(|moved| moved) {
            tracing::warn!("[widget] Dropped mousemove: {err}");
        }
    }

    pub(crate) fn pointer_up(&self) {
        if let Err(err) = self.dispatch(Resizer::pointer_up) {
            tracing::warn!("[widget] Dropped mouseup: {err}");
        }
    }
}

/// Resizable-element widget.
///
/// ```js
/// const widget = new DomResize("#panel", { width: [100, 600], proportional: true });
/// widget.on("end", (direction, element) => console.log(direction, element.style.width));
/// ```
#[wasm_bindgen]
pub struct DomResize {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl DomResize {
    /// `target` is an `Element` or a selector string. `config` is an optional
    /// plain object; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(target: JsValue, config: JsValue) -> Result<DomResize, JsValue> {
        let target = if let Some(selector) = target.as_string() {
            Target::Selector(selector)
        } else {
            let element = target.dyn_into::<Element>().map_err(|_| {
                to_js_error(&ResizeError::InvalidConfig(
                    "target must be an Element or a selector string".to_string(),
                ))
            })?;
            Target::Element(element)
        };

        let config = if config.is_undefined() || config.is_null() {
            ResizeConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| to_js_error(&ResizeError::InvalidConfig(e.to_string())))?
        };

        DomResize::attach(target, &config).map_err(|e| to_js_error(&e))
    }

    /// Enable or disable one handle. `handleSpec` is `false` (leave the node
    /// in place), `true` (create/remove the node; the default) or a style
    /// object applied over the default handle styles.
    #[wasm_bindgen(js_name = setControlState)]
    pub fn set_control_state(
        &self,
        name: &str,
        enabled: bool,
        handle_spec: JsValue,
    ) -> Result<(), JsValue> {
        let run = || -> Result<(), ResizeError> {
            let direction: Direction = name.parse()?;
            let spec = handle_spec_from_js(handle_spec)?;
            self.try_set_control_state(direction, enabled, &spec)
        };
        run().map_err(|e| to_js_error(&e))
    }

    #[wasm_bindgen(js_name = setAllControlState)]
    pub fn set_all_control_state(&self, enabled: bool, handle_spec: JsValue) -> Result<(), JsValue> {
        let run = || -> Result<(), ResizeError> {
            let spec = handle_spec_from_js(handle_spec)?;
            self.try_set_all_control_state(enabled, &spec)
        };
        run().map_err(|e| to_js_error(&e))
    }

    /// Register `callback(direction, element)` for `start`, `move` or `end`,
    /// replacing any previous one.
    pub fn on(&self, event: &str, callback: js_sys::Function) -> Result<(), JsValue> {
        let kind: EventKind = event.parse().map_err(|e| to_js_error(&e))?;
        self.on_event(kind, move |direction, element| {
            let direction = JsValue::from_str(direction.name());
            if let Err(err) = callback.call2(&JsValue::NULL, &direction, element) {
                tracing::error!("[widget] '{kind}' callback threw: {err:?}");
            }
        })
        .map_err(|e| to_js_error(&e))
    }

    pub fn off(&self, event: &str) -> Result<(), JsValue> {
        let kind: EventKind = event.parse().map_err(|e| to_js_error(&e))?;
        self.shared
            .with_resizer(|r| r.off(kind))
            .map_err(|e| to_js_error(&e))
    }

    /// Remove handles and listeners. The widget is inert afterwards.
    pub fn destroy(&self) -> Result<(), JsValue> {
        self.try_destroy().map_err(|e| to_js_error(&e))
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.shared
            .with_resizer(|r| r.is_dragging())
            .unwrap_or_default()
    }
}

impl DomResize {
    /// Rust-side constructor.
    pub fn attach(target: Target<Element>, config: &ResizeConfig) -> Result<Self, ResizeError> {
        let resizer = Resizer::new(WebHost::new()?, target, config)?;
        let element = resizer.element().clone();

        let shared = Rc::new(Shared {
            resizer: RefCell::new(resizer),
            down_listener: RefCell::new(None),
        });
        shared
            .resizer
            .borrow_mut()
            .host_mut()
            .bind(Rc::downgrade(&shared));

        let weak = Rc::downgrade(&shared);
        let listener = EventListener::new(&element, "mousedown", move |event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            // primary button only
            if event.button() != 0 {
                return;
            }
            if let Some(node) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                shared.pointer_down(&node);
            }
        });
        *shared.down_listener.borrow_mut() = Some(listener);

        Ok(Self { shared })
    }

    pub fn element(&self) -> Result<Element, ResizeError> {
        self.shared.with_resizer(|r| r.element().clone())
    }

    pub fn try_set_control_state(
        &self,
        direction: Direction,
        enabled: bool,
        spec: &HandleSpec,
    ) -> Result<(), ResizeError> {
        self.shared
            .with_resizer(|r| r.set_control_state(direction, enabled, spec))?
    }

    pub fn try_set_all_control_state(
        &self,
        enabled: bool,
        spec: &HandleSpec,
    ) -> Result<(), ResizeError> {
        self.shared
            .with_resizer(|r| r.set_all_control_state(enabled, spec))?
    }

    pub fn on_event(
        &self,
        kind: EventKind,
        handler: impl FnMut(Direction, &Element) + 'static,
    ) -> Result<(), ResizeError> {
        self.shared.with_resizer(|r| r.on(kind, handler))
    }

    pub fn try_destroy(&self) -> Result<(), ResizeError> {
        self.shared.with_resizer(Resizer::destroy)?;
        self.shared.down_listener.borrow_mut().take();
        Ok(())
    }
}

/// `undefined`/`null` -> `Materialize`, booleans -> `Keep`/`Materialize`,
/// objects -> `Styled`.
fn handle_spec_from_js(value: JsValue) -> Result<HandleSpec, ResizeError> {
    if value.is_undefined() || value.is_null() {
        return Ok(HandleSpec::Materialize);
    }
    if let Some(flag) = value.as_bool() {
        return Ok(flag.into());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| ResizeError::InvalidConfig(e.to_string()))
}

fn to_js_error(err: &ResizeError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::current_rule;
    use dom_resize_core::ControlSpec;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::MouseEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn mount(id: &str) -> Element {
        let document = document();
        let element = document.create_element("div").unwrap();
        element.set_id(id);
        element
            .set_attribute(
                "style",
                "position: absolute; left: 0px; top: 0px; width: 200px; height: 100px;",
            )
            .unwrap();
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    fn handle_count(element: &Element) -> u32 {
        element.query_selector_all("[data-control]").unwrap().length()
    }

    fn mouse(kind: &str, x: i32, y: i32) -> MouseEvent {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(x);
        init.set_client_y(y);
        MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
    }

    fn press(node: &Element) {
        node.dispatch_event(&mouse("mousedown", 0, 0)).unwrap();
    }

    fn move_to(x: i32, y: i32) {
        document().dispatch_event(&mouse("mousemove", x, y)).unwrap();
    }

    fn release() {
        document().dispatch_event(&mouse("mouseup", 0, 0)).unwrap();
    }

    fn inline_style(element: &Element, property: &str) -> String {
        element
            .dyn_ref::<web_sys::HtmlElement>()
            .unwrap()
            .style()
            .get_property_value(property)
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_attach_by_selector_creates_default_handles() {
        let element = mount("attach-default");
        let widget =
            DomResize::attach(Target::Selector("#attach-default".into()), &ResizeConfig::default())
                .unwrap();

        assert_eq!(handle_count(&element), 3);
        assert!(element.query_selector("[data-control=\"bottomRight\"]").unwrap().is_some());
        assert_eq!(inline_style(&element, "box-sizing"), "border-box");

        widget.try_destroy().unwrap();
        element.remove();
    }

    #[wasm_bindgen_test]
    fn test_missing_selector_is_not_found() {
        let result = DomResize::attach(
            Target::Selector("#does-not-exist".into()),
            &ResizeConfig::default(),
        );
        assert!(matches!(result, Err(ResizeError::NotFound(_))));
    }

    #[wasm_bindgen_test]
    fn test_drag_right_handle() {
        let element = mount("drag-right");
        let config = ResizeConfig::default().with_width(50.0, 300.0);
        let widget = DomResize::attach(Target::Element(element.clone()), &config).unwrap();
        let right = element.query_selector("[data-control=\"right\"]").unwrap().unwrap();

        press(&right);
        assert!(widget.is_dragging());
        let rule = current_rule(&document()).unwrap();
        assert!(rule.contains("  user-select: none;"));
        assert!(rule.contains("-khtml-user-select: none;"));

        move_to(400, 0);
        assert_eq!(inline_style(&element, "width"), "300px");

        release();
        assert!(!widget.is_dragging());
        assert_eq!(current_rule(&document()).as_deref(), Some(""));

        widget.try_destroy().unwrap();
        element.remove();
    }

    #[wasm_bindgen_test]
    fn test_removed_handle_cannot_start_drag() {
        let element = mount("removed-left");
        let config = ResizeConfig::default()
            .with_control([ControlSpec::from(Direction::Left), ControlSpec::from(Direction::Right)]);
        let widget = DomResize::attach(Target::Element(element.clone()), &config).unwrap();
        let left = element.query_selector("[data-control=\"left\"]").unwrap().unwrap();

        widget
            .try_set_control_state(Direction::Left, false, &HandleSpec::Materialize)
            .unwrap();
        assert!(element.query_selector("[data-control=\"left\"]").unwrap().is_none());

        press(&left);
        assert!(!widget.is_dragging());

        widget.try_destroy().unwrap();
        element.remove();
    }

    #[wasm_bindgen_test]
    fn test_destroy_mid_drag_detaches_everything() {
        let element = mount("destroy-mid-drag");
        let widget =
            DomResize::attach(Target::Element(element.clone()), &ResizeConfig::default()).unwrap();
        let bottom = element.query_selector("[data-control=\"bottom\"]").unwrap().unwrap();

        press(&bottom);
        assert!(widget.is_dragging());
        widget.try_destroy().unwrap();

        assert_eq!(handle_count(&element), 0);
        let before = inline_style(&element, "height");
        move_to(0, 400);
        assert_eq!(inline_style(&element, "height"), before);
        assert!(!widget.is_dragging());

        element.remove();
    }

    #[wasm_bindgen_test]
    fn test_callbacks_may_call_back_into_widget() {
        let element = mount("reentrant");
        let widget =
            DomResize::attach(Target::Element(element.clone()), &ResizeConfig::default()).unwrap();
        let dragging_in_start = Rc::new(RefCell::new(None));

        let observer = DomResize {
            shared: widget.shared.clone(),
        };
        let sink = dragging_in_start.clone();
        widget
            .on_event(EventKind::Start, move |_, _| {
                *sink.borrow_mut() = Some(observer.is_dragging());
            })
            .unwrap();
        let this = DomResize {
            shared: widget.shared.clone(),
        };
        widget
            .on_event(EventKind::End, move |_, _| this.try_destroy().unwrap())
            .unwrap();
        let right = element.query_selector("[data-control=\"right\"]").unwrap().unwrap();

        press(&right);
        assert_eq!(*dragging_in_start.borrow(), Some(true));
        release();

        assert_eq!(handle_count(&element), 0);
        assert!(widget.shared.resizer.borrow().is_destroyed());
        assert_eq!(current_rule(&document()).as_deref(), Some(""));

        element.remove();
    }

    #[wasm_bindgen_test]
    fn test_non_html_target_is_rejected() {
        let document = document();
        let svg = document
            .create_element_ns(Some("http://www.w3.org/2000/svg"), "svg")
            .unwrap();
        document.body().unwrap().append_child(&svg).unwrap();

        let result = DomResize::attach(Target::Element(svg.clone()), &ResizeConfig::default());
        assert!(matches!(result, Err(ResizeError::Dom(_))));

        svg.remove();
    }

    #[wasm_bindgen_test]
    fn test_callbacks_fire() {
        let element = mount("callbacks");
        let widget =
            DomResize::attach(Target::Element(element.clone()), &ResizeConfig::default()).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [EventKind::Start, EventKind::Move, EventKind::End] {
            let sink = log.clone();
            widget
                .on_event(kind, move |direction, _| sink.borrow_mut().push((kind, direction)))
                .unwrap();
        }
        let bottom = element.query_selector("[data-control=\"bottom\"]").unwrap().unwrap();

        press(&bottom);
        move_to(0, 150);
        release();

        assert_eq!(
            *log.borrow(),
            vec![
                (EventKind::Start, Direction::Bottom),
                (EventKind::Move, Direction::Bottom),
                (EventKind::End, Direction::Bottom),
            ]
        );

        widget.try_destroy().unwrap();
        element.remove();
    }
}
