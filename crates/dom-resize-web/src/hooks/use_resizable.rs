//! Yew hook that makes a rendered element resizable.

use std::cell::RefCell;
use std::rc::Rc;

use dom_resize_core::{Direction, EventKind, HandleSpec, ResizeConfig, ResizeError, Target};
use web_sys::Element;
use yew::prelude::*;

use crate::DomResize;

/// Options for [`use_resizable`].
#[derive(Clone, PartialEq, Default)]
pub struct ResizableOptions {
    pub config: ResizeConfig,
    /// Called when a drag starts.
    pub on_start: Option<Callback<Direction>>,
    /// Called for every processed move sample.
    pub on_move: Option<Callback<Direction>>,
    /// Called when a drag ends.
    pub on_end: Option<Callback<Direction>>,
}

/// Handle returned by [`use_resizable`]. All calls are no-ops until the node
/// is mounted.
#[derive(Clone)]
pub struct UseResizableHandle {
    widget: Rc<RefCell<Option<DomResize>>>,
}

impl UseResizableHandle {
    pub fn is_attached(&self) -> bool {
        self.widget.borrow().is_some()
    }

    pub fn set_control_state(
        &self,
        direction: Direction,
        enabled: bool,
        spec: &HandleSpec,
    ) -> Result<(), ResizeError> {
        match self.widget.borrow().as_ref() {
            Some(widget) => widget.try_set_control_state(direction, enabled, spec),
            None => Ok(()),
        }
    }

    pub fn set_all_control_state(&self, enabled: bool, spec: &HandleSpec) -> Result<(), ResizeError> {
        match self.widget.borrow().as_ref() {
            Some(widget) => widget.try_set_all_control_state(enabled, spec),
            None => Ok(()),
        }
    }
}

/// Attach a resize widget to `node_ref` once it is mounted.
///
/// The widget is destroyed on unmount, and rebuilt whenever the node or the
/// options change.
///
/// # Example
///
/// ```ignore
/// let node_ref = use_node_ref();
/// let resizable = use_resizable(node_ref.clone(), ResizableOptions {
///     config: ResizeConfig::default().with_width(100.0, 600.0),
///     on_end: Some(Callback::from(|direction| tracing::info!("resized via {direction}"))),
///     ..Default::default()
/// });
/// html! { <div ref={node_ref} class="panel" /> }
/// ```
#[hook]
pub fn use_resizable(node_ref: NodeRef, options: ResizableOptions) -> UseResizableHandle {
    let widget = use_mut_ref(|| None::<DomResize>);

    {
        let widget = widget.clone();
        use_effect_with((node_ref, options), move |(node_ref, options)| {
            if let Some(element) = node_ref.cast::<Element>() {
                match attach(element, options) {
                    Ok(attached) => *widget.borrow_mut() = Some(attached),
                    Err(err) => tracing::error!("[use_resizable] Failed to attach: {err}"),
                }
            }

            move || {
                if let Some(attached) = widget.borrow_mut().take() {
                    if let Err(err) = attached.try_destroy() {
                        tracing::warn!("[use_resizable] Failed to destroy: {err}");
                    }
                }
            }
        });
    }

    UseResizableHandle { widget }
}

fn attach(element: Element, options: &ResizableOptions) -> Result<DomResize, ResizeError> {
    let widget = DomResize::attach(Target::Element(element), &options.config)?;
    let callbacks = [
        (EventKind::Start, &options.on_start),
        (EventKind::Move, &options.on_move),
        (EventKind::End, &options.on_end),
    ];
    for (kind, callback) in callbacks {
        if let Some(callback) = callback.clone() {
            widget.on_event(kind, move |direction, _| callback.emit(direction))?;
        }
    }
    Ok(widget)
}
