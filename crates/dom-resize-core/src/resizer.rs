//! Drag controller.
//!
//! `Resizer` owns one target element: it prepares the element, materializes
//! its handles and runs the `Idle`/`Dragging` state machine fed by the host's
//! pointer events.

use crate::config::ResizeConfig;
use crate::direction::Direction;
use crate::error::ResizeError;
use crate::events::{EventKind, EventRegistry, Notification};
use crate::geometry::{Constraints, Matrix2d, Point, Rect, ResizeOutcome, compute_resize};
use crate::handles::{HandleRegistry, HandleSpec};
use crate::host::{ResizeHost, read_insets, read_transform};
use crate::style::{StyleMap, px};
use crate::throttle::RateLimiter;

/// Element to attach to: a resolved node or a selector to look up.
#[derive(Debug, Clone)]
pub enum Target<E> {
    Element(E),
    Selector(String),
}

/// Snapshot taken at drag start. Every move sample is computed against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub direction: Direction,
    pub origin_rect: Rect,
    pub origin_transform: Matrix2d,
    pub scroll: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging(DragSession),
}

/// Resize controller for one element.
///
/// Lifecycle callbacks are not run from inside the pointer methods. Each
/// `start`/`move`/`end` is queued as a [`Notification`]; the caller drains
/// them with [`Resizer::take_notifications`] and delivers them once it no
/// longer holds the resizer, so a callback may call back into it.
pub struct Resizer<H: ResizeHost> {
    host: H,
    element: H::Element,
    constraints: Constraints,
    registry: HandleRegistry,
    events: EventRegistry<H::Element>,
    pending: Vec<Notification<H::Element>>,
    limiter: RateLimiter,
    state: DragState,
    holds_selection: bool,
    destroyed: bool,
}

impl<H: ResizeHost> Resizer<H> {
    /// Attach to `target`: validate the config, resolve the element, fix up
    /// its positioning, resolve the aspect ratio and create the handles.
    pub fn new(
        host: H,
        target: Target<H::Element>,
        config: &ResizeConfig,
    ) -> Result<Self, ResizeError> {
        config.validate()?;

        let element = match target {
            Target::Element(element) => element,
            Target::Selector(selector) => host
                .query_selector(&selector)
                .ok_or(ResizeError::NotFound(selector))?,
        };

        prepare_element(&host, &element)?;

        let constraints = config.constraints(
            &host.bounding_rect(&element),
            read_insets(&host, &element)?,
        );

        let registry = HandleRegistry::new(&config.handles());
        registry.materialize(&host, &element)?;

        tracing::info!(
            "[resizer] Attached: {} handles, ratio={:?}",
            registry.directions().count(),
            constraints.ratio
        );

        Ok(Self {
            host,
            element,
            constraints,
            registry,
            events: EventRegistry::new(),
            pending: Vec::new(),
            limiter: RateLimiter::default(),
            state: DragState::Idle,
            holds_selection: false,
            destroyed: false,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn element(&self) -> &H::Element {
        &self.element
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn handles(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Pointer pressed on `node`. Starts a drag if `node` is one of this
    /// widget's handles and its direction is enabled; otherwise nothing
    /// happens. Returns whether a drag started.
    pub fn pointer_down(&mut self, node: &H::Element) -> Result<bool, ResizeError> {
        if self.destroyed {
            return Ok(false);
        }
        let Some(direction) = self
            .host
            .handle_direction(node)
            .as_deref()
            .and_then(Direction::parse)
        else {
            return Ok(false);
        };
        if !self.registry.is_enabled(direction) {
            tracing::trace!("[resizer] Ignoring press on disabled {direction} handle");
            return Ok(false);
        }
        // a nested widget's handle bubbling up through our element
        if self.host.find_handle(&self.element, direction).as_ref() != Some(node) {
            return Ok(false);
        }

        let session = DragSession {
            direction,
            origin_rect: self.host.bounding_rect(&self.element),
            origin_transform: read_transform(&self.host, &self.element)?,
            scroll: self.host.scroll_offset(),
        };
        self.state = DragState::Dragging(session);
        self.limiter.reset();
        self.host.listen_drag();
        self.suppress_selection();

        tracing::debug!("[resizer] Drag start: {direction} from {:?}", session.origin_rect);
        self.notify(EventKind::Start, direction);
        Ok(true)
    }

    /// Pointer moved to `page` (document coordinates) at `now_ms`.
    ///
    /// Samples closer than the rate limiter interval to the last processed one
    /// are dropped. Returns the committed geometry, if any.
    pub fn pointer_move(
        &mut self,
        page: Point,
        now_ms: f64,
    ) -> Result<Option<ResizeOutcome>, ResizeError> {
        let DragState::Dragging(session) = self.state else {
            return Ok(None);
        };
        if !self.limiter.admit(now_ms) {
            return Ok(None);
        }
        if !self.registry.contains(session.direction) {
            return Ok(None);
        }

        let pointer = Point::new(page.x - session.scroll.x, page.y - session.scroll.y);
        let outcome = compute_resize(
            session.direction,
            pointer,
            &session.origin_rect,
            &self.constraints,
        );
        let transform = outcome.apply_to(&session.origin_transform);

        let styles = StyleMap::new()
            .with("width", px(outcome.width))
            .with("height", px(outcome.height))
            .with("transform", transform.to_string());
        self.host.apply_styles(&self.element, &styles)?;

        tracing::trace!(
            "[resizer] {}: {}x{} {}",
            session.direction,
            outcome.width,
            outcome.height,
            transform
        );
        self.notify(EventKind::Move, session.direction);
        Ok(Some(outcome))
    }

    /// Pointer released. Ends the drag; a second call is a no-op.
    pub fn pointer_up(&mut self) -> bool {
        let DragState::Dragging(session) = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return false;
        };
        self.restore_selection();
        self.host.release_drag();

        tracing::debug!("[resizer] Drag end: {}", session.direction);
        self.notify(EventKind::End, session.direction);
        true
    }

    /// Drain the lifecycle events queued since the last call, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification<H::Element>> {
        std::mem::take(&mut self.pending)
    }

    pub fn set_control_state(
        &mut self,
        direction: Direction,
        enabled: bool,
        spec: &HandleSpec,
    ) -> Result<(), ResizeError> {
        if self.destroyed {
            return Ok(());
        }
        self.registry
            .set_control_state(&self.host, &self.element, direction, enabled, spec)
    }

    pub fn set_all_control_state(
        &mut self,
        enabled: bool,
        spec: &HandleSpec,
    ) -> Result<(), ResizeError> {
        if self.destroyed {
            return Ok(());
        }
        self.registry
            .set_all_control_state(&self.host, &self.element, enabled, spec)
    }

    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(Direction, &H::Element) + 'static) {
        self.events.on(kind, handler);
    }

    pub fn off(&mut self, kind: EventKind) {
        self.events.off(kind);
    }

    /// Detach from the element: drop listeners, remove handles, end any drag
    /// without firing `end`. Safe to call at any time, any number of times.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.host.detach();
        self.restore_selection();
        self.registry.remove_all(&self.host, &self.element);
        self.state = DragState::Idle;
        self.events.clear();
        self.pending.clear();
        self.destroyed = true;
        tracing::info!("[resizer] Destroyed");
    }

    fn notify(&mut self, kind: EventKind, direction: Direction) {
        if let Some(notification) = self.events.notification(kind, direction, &self.element) {
            self.pending.push(notification);
        }
    }

    fn suppress_selection(&mut self) {
        if self.holds_selection {
            return;
        }
        let host = &self.host;
        host.selection_lock()
            .acquire(|| host.set_text_selection(false));
        self.holds_selection = true;
    }

    fn restore_selection(&mut self) {
        if !self.holds_selection {
            return;
        }
        let host = &self.host;
        host.selection_lock()
            .release(|| host.set_text_selection(true));
        self.holds_selection = false;
    }
}

impl<H: ResizeHost> Drop for Resizer<H> {
    fn drop(&mut self) {
        self.restore_selection();
    }
}

/// Force border-box sizing, and relative positioning if the element is
/// statically positioned. Explicit positioning is left alone.
fn prepare_element<H: ResizeHost>(host: &H, element: &H::Element) -> Result<(), ResizeError> {
    let mut styles = StyleMap::new().with("box-sizing", "border-box");
    if host.computed_value(element, "position")? == "static" {
        styles.set("position", "relative");
    }
    host.apply_styles(element, &styles)
}
