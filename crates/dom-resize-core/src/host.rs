//! Platform seams.
//!
//! The engine never touches a DOM directly. A host supplies style access,
//! layout reads, handle element management and document-level drag listeners.

use crate::direction::Direction;
use crate::error::ResizeError;
use crate::geometry::{Insets, Matrix2d, Point, Rect};
use crate::selection::SelectionLock;
use crate::style::StyleMap;

/// Reads resolved style values and writes inline styles.
pub trait StyleAccessor {
    type Element: Clone + PartialEq;

    /// Resolved (computed) value of a CSS property. An unset property is an
    /// empty string; an element whose style cannot be resolved is an error.
    fn computed_value(
        &self,
        element: &Self::Element,
        property: &str,
    ) -> Result<String, ResizeError>;

    fn apply_styles(
        &self,
        element: &Self::Element,
        styles: &StyleMap,
    ) -> Result<(), ResizeError>;
}

pub trait ResizeHost: StyleAccessor {
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Viewport-relative bounding rectangle.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Current page scroll offset.
    fn scroll_offset(&self) -> Point;

    /// Direction name carried by a node, if it is a handle.
    fn handle_direction(&self, node: &Self::Element) -> Option<String>;

    /// Existing handle for `direction` under `target`.
    fn find_handle(&self, target: &Self::Element, direction: Direction) -> Option<Self::Element>;

    /// Create a handle node tagged with `direction` and append it to `target`.
    fn create_handle(
        &self,
        target: &Self::Element,
        direction: Direction,
    ) -> Result<Self::Element, ResizeError>;

    fn remove_element(&self, element: &Self::Element);

    /// Lock guarding the process-wide text selection rule.
    fn selection_lock(&self) -> &SelectionLock;

    /// Write the global text selection rule.
    fn set_text_selection(&self, enabled: bool);

    /// Start delivering document move samples and a single pointer-up.
    fn listen_drag(&mut self);

    /// Stop delivering move samples. Called from inside the pointer-up
    /// delivery, so the single-shot up listener may still be running.
    fn release_drag(&mut self);

    /// Drop every document-level listener.
    fn detach(&mut self);
}

/// Resolved transform of an element. Unset or malformed values are identity.
pub fn read_transform<H: StyleAccessor + ?Sized>(
    host: &H,
    element: &H::Element,
) -> Result<Matrix2d, ResizeError> {
    Ok(Matrix2d::parse_css(&host.computed_value(element, "transform")?))
}

/// Padding plus border widths on each axis.
pub fn read_insets<H: StyleAccessor + ?Sized>(
    host: &H,
    element: &H::Element,
) -> Result<Insets, ResizeError> {
    let sum = |properties: [&str; 4]| -> Result<f64, ResizeError> {
        properties.iter().try_fold(0.0, |total, property| {
            Ok(total + parse_px(&host.computed_value(element, property)?))
        })
    };
    Ok(Insets {
        horizontal: sum([
            "padding-left",
            "padding-right",
            "border-left-width",
            "border-right-width",
        ])?,
        vertical: sum([
            "padding-top",
            "padding-bottom",
            "border-top-width",
            "border-bottom-width",
        ])?,
    })
}

/// `"12.5px"` -> `12.5`. Anything else is 0.
pub fn parse_px(value: &str) -> f64 {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
