//! dom-resize core library
//!
//! Drag-to-resize engine for a rectangular element with edge and corner
//! handles, optional aspect-ratio lock and min/max bounds.
//!
//! The engine is platform independent. A [`host::ResizeHost`] supplies style
//! access, layout reads, handle nodes and document listeners; the browser
//! implementation lives in `dom-resize-web`.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod direction;
pub mod error;
pub mod events;
pub mod geometry;
pub mod handles;
pub mod host;
pub mod resizer;
pub mod selection;
pub mod style;
pub mod throttle;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ControlSpec, HandleConfig, ProportionalOption, ResizeConfig};
pub use direction::Direction;
pub use error::ResizeError;
pub use events::{EventKind, EventRegistry, Handler, Notification};
pub use geometry::{
    Bounds, Constraints, Insets, Matrix2d, Point, Rect, ResizeOutcome, compute_resize,
};
pub use handles::{HandleRegistry, HandleSpec, default_styles};
pub use host::{ResizeHost, StyleAccessor};
pub use resizer::{DragSession, DragState, Resizer, Target};
pub use selection::SelectionLock;
pub use style::StyleMap;
pub use throttle::{MOVE_INTERVAL_MS, RateLimiter};
