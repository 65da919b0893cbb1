//! Drag lifecycle callbacks.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::direction::Direction;
use crate::error::ResizeError;

/// Lifecycle event fired by the drag controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    Move,
    End,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Move => "move",
            EventKind::End => "end",
        }
    }

    fn slot(self) -> usize {
        match self {
            EventKind::Start => 0,
            EventKind::Move => 1,
            EventKind::End => 2,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(EventKind::Start),
            "move" => Ok(EventKind::Move),
            "end" => Ok(EventKind::End),
            _ => Err(ResizeError::UnknownEvent(s.to_string())),
        }
    }
}

/// Callback invoked with the active direction and the target element.
///
/// Shared so a queued [`Notification`] can outlive a re-registration.
pub type Handler<E> = Rc<RefCell<dyn FnMut(Direction, &E)>>;

/// A lifecycle event captured with the handler that was registered when it
/// happened.
///
/// Delivery is left to the caller so that a handler may call back into the
/// widget that produced it.
pub struct Notification<E> {
    pub kind: EventKind,
    pub direction: Direction,
    element: E,
    handler: Handler<E>,
}

impl<E> Notification<E> {
    /// Run the handler. A handler already on the stack (a nested event from
    /// inside its own body) is skipped.
    pub fn deliver(self) {
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => (&mut *handler)(self.direction, &self.element),
            Err(_) => tracing::warn!(
                "[events] Skipping nested '{}' notification for {}",
                self.kind,
                self.direction
            ),
        }
    }
}

impl<E> fmt::Debug for Notification<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("kind", &self.kind)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// One optional handler per event kind. Registering again replaces the
/// previous handler.
pub struct EventRegistry<E> {
    handlers: [Option<Handler<E>>; 3],
}

impl<E> Default for EventRegistry<E> {
    fn default() -> Self {
        Self {
            handlers: [None, None, None],
        }
    }
}

impl<E> fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("start", &self.handlers[0].is_some())
            .field("move", &self.handlers[1].is_some())
            .field("end", &self.handlers[2].is_some())
            .finish()
    }
}

impl<E: Clone> EventRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(Direction, &E) + 'static) {
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        self.handlers[kind.slot()] = Some(handler);
    }

    pub fn off(&mut self, kind: EventKind) {
        self.handlers[kind.slot()] = None;
    }

    /// Capture `kind` for later delivery. `None` when nothing is registered.
    pub fn notification(
        &self,
        kind: EventKind,
        direction: Direction,
        element: &E,
    ) -> Option<Notification<E>> {
        let handler = self.handlers[kind.slot()].clone()?;
        Some(Notification {
            kind,
            direction,
            element: element.clone(),
            handler,
        })
    }

    pub fn clear(&mut self) {
        self.handlers = [None, None, None];
    }
}
