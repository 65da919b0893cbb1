//! Resize geometry.
//!
//! Converts a pointer position during a drag into a new element size plus the
//! translation needed to keep the opposite edge in place. Everything here is
//! pure: the caller snapshots the element at drag start and commits the
//! result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport-relative bounding rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Summed padding + border of an element, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    pub horizontal: f64,
    pub vertical: f64,
}

/// 2-D affine transform in CSS `matrix(a, b, c, d, e, f)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2d(pub [f64; 6]);

impl Default for Matrix2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2d {
    pub const IDENTITY: Matrix2d = Matrix2d([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Parse a resolved `transform` value.
    ///
    /// `none`, empty and anything unparsable resolve to identity. `matrix3d`
    /// keeps its 2-D components.
    pub fn parse_css(value: &str) -> Self {
        let value = value.trim();
        if let Some(args) = css_function_args(value, "matrix") {
            if let Some([a, b, c, d, e, f]) = parse_components::<6>(args) {
                return Matrix2d([a, b, c, d, e, f]);
            }
        } else if let Some(args) = css_function_args(value, "matrix3d") {
            if let Some(m) = parse_components::<16>(args) {
                return Matrix2d([m[0], m[1], m[4], m[5], m[12], m[13]]);
            }
        }
        Self::IDENTITY
    }

    pub fn translate_x(&self) -> f64 {
        self.0[4]
    }

    pub fn translate_y(&self) -> f64 {
        self.0[5]
    }

    /// Copy with `(dx, dy)` added to the translation components.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut m = self.0;
        m[4] += dx;
        m[5] += dy;
        Matrix2d(m)
    }
}

impl fmt::Display for Matrix2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "matrix({a}, {b}, {c}, {d}, {e}, {g})")
    }
}

fn css_function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_components<const N: usize>(args: &str) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    let mut parts = args.split(',');
    for slot in &mut out {
        let value: f64 = parts.next()?.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        *slot = value;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// Inclusive `[min, max]` range for one dimension.
///
/// Serialized as a two-element array. An unbounded max is written as `null`
/// (JSON has no infinity), and `null` reads back as unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, Option<f64>)", into = "(f64, Option<f64>)")]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl From<(f64, Option<f64>)> for Bounds {
    fn from((min, max): (f64, Option<f64>)) -> Self {
        Self {
            min,
            max: max.unwrap_or(f64::INFINITY),
        }
    }
}

impl From<Bounds> for (f64, Option<f64>) {
    fn from(bounds: Bounds) -> Self {
        let max = bounds.max.is_finite().then_some(bounds.max);
        (bounds.min, max)
    }
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds {
        min: 0.0,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Two-sided clamp. Unlike `f64::clamp` this never panics on an inverted
    /// range; the lower bound wins.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Intersection with another range.
    pub fn intersect(&self, other: Bounds) -> Bounds {
        Bounds {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    /// Range scaled by a positive factor.
    pub fn scaled(&self, factor: f64) -> Bounds {
        Bounds {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

/// Round to 4 decimal digits (aspect ratio precision).
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Resolved size constraints for a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constraints {
    pub width: Bounds,
    pub height: Bounds,
    /// Locked width/height ratio, if proportional resizing is on.
    pub ratio: Option<f64>,
}

/// Output of [`compute_resize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    pub width: f64,
    pub height: f64,
    /// Delta to add to the drag-start transform's x translation.
    pub translate_x: f64,
    /// Delta to add to the drag-start transform's y translation.
    pub translate_y: f64,
}

impl ResizeOutcome {
    /// Apply the translation deltas to the transform captured at drag start.
    pub fn apply_to(&self, origin: &Matrix2d) -> Matrix2d {
        origin.translated(self.translate_x, self.translate_y)
    }
}

/// Compute the element size for a pointer position during a drag.
///
/// `rect` must be the bounding rectangle captured at drag start, and `pointer`
/// must be in the same viewport frame.
pub fn compute_resize(
    direction: Direction,
    pointer: Point,
    rect: &Rect,
    constraints: &Constraints,
) -> ResizeOutcome {
    let from_left = (pointer.x - rect.left).abs();
    let from_right = (rect.right() - pointer.x).abs();
    let from_top = (pointer.y - rect.top).abs();
    let from_bottom = (rect.bottom() - pointer.y).abs();

    let (mut width, mut height) = match direction {
        Direction::Left => (from_right, rect.height),
        Direction::Right => (from_left, rect.height),
        Direction::Top => (rect.width, from_bottom),
        Direction::Bottom => (rect.width, from_top),
        Direction::TopLeft => (from_right, from_bottom),
        Direction::TopRight => (from_left, from_bottom),
        Direction::BottomLeft => (from_right, from_top),
        Direction::BottomRight => (from_left, from_top),
    };

    // Ratio first, then clamp.
    if let Some(ratio) = constraints.ratio {
        if direction.width_leads_ratio() {
            height = width / ratio;
        } else {
            width = height * ratio;
        }
    }

    width = constraints.width.clamp(width);
    height = constraints.height.clamp(height);

    let translate_x = if direction.moves_left_edge() {
        rect.width - width
    } else {
        0.0
    };
    let translate_y = if direction.moves_top_edge() {
        rect.height - height
    } else {
        0.0
    };

    ResizeOutcome {
        width,
        height,
        translate_x,
        translate_y,
    }
}
