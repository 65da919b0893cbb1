//! Widget configuration.
//!
//! Every field has a default, so a partial user object (`{ "proportional": true }`)
//! deserializes into a complete config. That is the whole "merge over
//! defaults" step; the result is not mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::ResizeError;
use crate::geometry::{Bounds, Constraints, Insets, Rect, round4};
use crate::style::StyleMap;

/// `proportional` option: `false`, `true` (derive from the element) or an
/// explicit width/height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProportionalOption {
    Flag(bool),
    Ratio(f64),
}

impl Default for ProportionalOption {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl ProportionalOption {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }
}

/// One entry of the `control` list: a bare direction name or a detailed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlSpec {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        disabled: bool,
        #[serde(default)]
        styles: Option<StyleMap>,
    },
}

impl ControlSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { name, .. } => name,
        }
    }

    pub fn disabled(&self) -> bool {
        matches!(self, Self::Detailed { disabled: true, .. })
    }

    pub fn styles(&self) -> Option<&StyleMap> {
        match self {
            Self::Detailed { styles, .. } => styles.as_ref(),
            Self::Name(_) => None,
        }
    }
}

impl From<Direction> for ControlSpec {
    fn from(direction: Direction) -> Self {
        Self::Name(direction.name().to_string())
    }
}

/// A `control` entry resolved to a known direction.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleConfig {
    pub direction: Direction,
    pub enabled: bool,
    pub styles: StyleMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeConfig {
    /// Width range in pixels.
    pub width: Bounds,
    /// Height range in pixels.
    pub height: Bounds,
    pub proportional: ProportionalOption,
    /// Handles to create.
    pub control: Vec<ControlSpec>,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: Bounds::UNBOUNDED,
            height: Bounds::UNBOUNDED,
            proportional: ProportionalOption::default(),
            control: vec![
                Direction::Right.into(),
                Direction::Bottom.into(),
                Direction::BottomRight.into(),
            ],
        }
    }
}

impl ResizeConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(json: &str) -> Result<Self, ResizeError> {
        let config: ResizeConfig =
            serde_json::from_str(json).map_err(|e| ResizeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_width(mut self, min: f64, max: f64) -> Self {
        self.width = Bounds::new(min, max);
        self
    }

    pub fn with_height(mut self, min: f64, max: f64) -> Self {
        self.height = Bounds::new(min, max);
        self
    }

    pub fn with_proportional(mut self, proportional: ProportionalOption) -> Self {
        self.proportional = proportional;
        self
    }

    pub fn with_control(mut self, control: impl IntoIterator<Item = ControlSpec>) -> Self {
        self.control = control.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<(), ResizeError> {
        validate_bounds("width", self.width)?;
        validate_bounds("height", self.height)?;
        if let ProportionalOption::Ratio(ratio) = self.proportional {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(ResizeError::InvalidConfig(format!(
                    "proportional ratio must be a positive number, got {ratio}"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the `control` list to known directions. Unknown names are
    /// skipped; a repeated direction keeps its last entry.
    pub fn handles(&self) -> Vec<HandleConfig> {
        let mut handles: Vec<HandleConfig> = Vec::with_capacity(self.control.len());
        for spec in &self.control {
            let Some(direction) = Direction::parse(spec.name()) else {
                tracing::warn!("[config] Ignoring unknown handle direction '{}'", spec.name());
                continue;
            };
            let handle = HandleConfig {
                direction,
                enabled: !spec.disabled(),
                styles: spec.styles().cloned().unwrap_or_default(),
            };
            match handles.iter_mut().find(|h| h.direction == direction) {
                Some(existing) => *existing = handle,
                None => handles.push(handle),
            }
        }
        handles
    }

    /// Resolve the size constraints for an element.
    ///
    /// `rect` and `insets` are only consulted when the ratio has to be
    /// derived from the element.
    pub fn constraints(&self, rect: &Rect, insets: Insets) -> Constraints {
        let mut constraints = Constraints {
            width: self.width,
            height: self.height,
            ratio: None,
        };

        let (ratio, derived) = match self.proportional {
            ProportionalOption::Flag(false) => return constraints,
            ProportionalOption::Ratio(ratio) => (ratio, false),
            ProportionalOption::Flag(true) => {
                let width = self.width.clamp(rect.width);
                let height = self.height.clamp(rect.height);
                if !(width > 0.0 && height > 0.0) {
                    tracing::warn!(
                        "[config] Cannot derive aspect ratio from a {}x{} element; proportional resizing disabled",
                        rect.width,
                        rect.height
                    );
                    return constraints;
                }
                (round4(width / height), true)
            }
        };

        // Each axis range is narrowed to what the other axis allows.
        constraints.width = self.width.intersect(self.height.scaled(ratio));
        constraints.height = self.height.intersect(self.width.scaled(1.0 / ratio));
        if constraints.width.min > constraints.width.max
            || constraints.height.min > constraints.height.max
        {
            tracing::warn!(
                "[config] width/height bounds cannot both hold at ratio {}; min bounds win",
                ratio
            );
        }

        if derived {
            constraints.width.min += insets.horizontal;
            constraints.height.min += insets.vertical;
            // raised minimums must still lie on the ratio line
            constraints.width.min = constraints.width.min.max(constraints.height.min * ratio);
            constraints.height.min = constraints.height.min.max(constraints.width.min / ratio);
        }
        constraints.ratio = Some(ratio);
        constraints
    }
}

fn validate_bounds(axis: &str, bounds: Bounds) -> Result<(), ResizeError> {
    if bounds.min.is_nan() || bounds.max.is_nan() {
        return Err(ResizeError::InvalidConfig(format!("{axis} bounds contain NaN")));
    }
    if bounds.min < 0.0 {
        return Err(ResizeError::InvalidConfig(format!(
            "{axis} minimum must not be negative, got {}",
            bounds.min
        )));
    }
    if bounds.min > bounds.max {
        return Err(ResizeError::InvalidConfig(format!(
            "{axis} minimum {} exceeds maximum {}",
            bounds.min, bounds.max
        )));
    }
    Ok(())
}
