//! Resize directions (one per edge or corner handle).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResizeError;

/// Edge or corner a handle is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    // Edges
    Left,
    Right,
    Top,
    Bottom,
    // Corners
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
        Direction::TopLeft,
        Direction::TopRight,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    /// Canonical camelCase name, as written to the `data-control` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::TopLeft => "topLeft",
            Direction::TopRight => "topRight",
            Direction::BottomLeft => "bottomLeft",
            Direction::BottomRight => "bottomRight",
        }
    }

    /// Parse a handle name. `both` is the legacy name of the bottom-right corner.
    pub fn parse(name: &str) -> Option<Self> {
        let direction = match name {
            "left" => Direction::Left,
            "right" => Direction::Right,
            "top" => Direction::Top,
            "bottom" => Direction::Bottom,
            "topLeft" => Direction::TopLeft,
            "topRight" => Direction::TopRight,
            "bottomLeft" => Direction::BottomLeft,
            "bottomRight" | "both" => Direction::BottomRight,
            _ => return None,
        };
        Some(direction)
    }

    /// Whether the drag moves the element's left edge.
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Direction::Left | Direction::TopLeft | Direction::BottomLeft)
    }

    /// Whether the drag moves the element's top edge.
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Direction::Top | Direction::TopLeft | Direction::TopRight)
    }

    /// Whether the pointer drives the width (horizontal component).
    pub fn affects_width(self) -> bool {
        !matches!(self, Direction::Top | Direction::Bottom)
    }

    /// Whether the pointer drives the height (vertical component).
    pub fn affects_height(self) -> bool {
        !matches!(self, Direction::Left | Direction::Right)
    }

    /// Under a locked aspect ratio, whether width is the primary axis
    /// (height is derived from it) or the other way around.
    pub fn width_leads_ratio(self) -> bool {
        matches!(
            self,
            Direction::Left | Direction::Right | Direction::TopRight | Direction::BottomRight
        )
    }

    /// CSS cursor shown over an enabled handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Direction::Left | Direction::Right => "ew-resize",
            Direction::Top | Direction::Bottom => "ns-resize",
            Direction::TopLeft | Direction::BottomRight => "nwse-resize",
            Direction::TopRight | Direction::BottomLeft => "nesw-resize",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::parse(s).ok_or_else(|| ResizeError::UnknownDirection(s.to_string()))
    }
}
