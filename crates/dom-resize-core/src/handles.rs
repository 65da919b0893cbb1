//! Handle registry.
//!
//! Single source of truth for which directions are enabled. Also owns each
//! handle's style override and keeps the handle nodes under the target in
//! sync with that state.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::HandleConfig;
use crate::direction::Direction;
use crate::error::ResizeError;
use crate::host::ResizeHost;
use crate::style::StyleMap;

/// Cursor shown over a disabled handle.
const INERT_CURSOR: &str = "auto";

/// What `set_control_state` should do with the handle node.
///
/// Mirrors the `false | true | {styles}` argument of the JS API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawHandleSpec")]
pub enum HandleSpec {
    /// Leave the node in place; only the cursor follows the enabled flag.
    Keep,
    /// Create or restyle the node when enabling, remove it when disabling.
    Materialize,
    /// Like `Materialize`, with a new style override for the handle.
    Styled(StyleMap),
}

impl HandleSpec {
    pub fn touches_dom(&self) -> bool {
        !matches!(self, HandleSpec::Keep)
    }
}

impl From<bool> for HandleSpec {
    fn from(materialize: bool) -> Self {
        if materialize {
            HandleSpec::Materialize
        } else {
            HandleSpec::Keep
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHandleSpec {
    Flag(bool),
    Styles(StyleMap),
}

impl From<RawHandleSpec> for HandleSpec {
    fn from(raw: RawHandleSpec) -> Self {
        match raw {
            RawHandleSpec::Flag(flag) => flag.into(),
            RawHandleSpec::Styles(styles) => HandleSpec::Styled(styles),
        }
    }
}

/// Built-in look of a handle: a thin strip on edges, a square on corners,
/// both straddling the element border.
pub fn default_styles(direction: Direction) -> StyleMap {
    let base = StyleMap::new()
        .with("position", "absolute")
        .with("z-index", "99")
        .with("cursor", direction.cursor());

    match direction {
        Direction::Left | Direction::Right => base
            .with(side(direction), "-5px")
            .with("top", "0")
            .with("width", "10px")
            .with("height", "100%"),
        Direction::Top | Direction::Bottom => base
            .with(side(direction), "-5px")
            .with("left", "0")
            .with("width", "100%")
            .with("height", "10px"),
        Direction::TopLeft => corner(base, "top", "left"),
        Direction::TopRight => corner(base, "top", "right"),
        Direction::BottomLeft => corner(base, "bottom", "left"),
        Direction::BottomRight => corner(base, "bottom", "right"),
    }
}

fn side(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "left",
        Direction::Right => "right",
        Direction::Top => "top",
        _ => "bottom",
    }
}

fn corner(base: StyleMap, vertical: &str, horizontal: &str) -> StyleMap {
    base.with(vertical, "-10px")
        .with(horizontal, "-10px")
        .with("width", "20px")
        .with("height", "20px")
}

#[derive(Debug, Clone, Default)]
struct HandleState {
    enabled: bool,
    overrides: StyleMap,
}

#[derive(Debug, Clone, Default)]
pub struct HandleRegistry {
    handles: BTreeMap<Direction, HandleState>,
}

impl HandleRegistry {
    pub fn new(handles: &[HandleConfig]) -> Self {
        let handles = handles
            .iter()
            .map(|h| {
                (
                    h.direction,
                    HandleState {
                        enabled: h.enabled,
                        overrides: h.styles.clone(),
                    },
                )
            })
            .collect();
        Self { handles }
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.handles.contains_key(&direction)
    }

    pub fn is_enabled(&self, direction: Direction) -> bool {
        self.handles.get(&direction).is_some_and(|h| h.enabled)
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.handles.keys().copied()
    }

    /// Styles for a handle node: defaults, then the override, then the
    /// inert cursor if disabled.
    pub fn styles_for(&self, direction: Direction) -> StyleMap {
        let mut styles = default_styles(direction);
        if let Some(state) = self.handles.get(&direction) {
            styles = styles.merged(&state.overrides);
            if !state.enabled {
                styles.set("cursor", INERT_CURSOR);
            }
        }
        styles
    }

    /// Create (or restyle) a node for every registered direction.
    pub fn materialize<H: ResizeHost>(
        &self,
        host: &H,
        target: &H::Element,
    ) -> Result<(), ResizeError> {
        for direction in self.directions() {
            self.place(host, target, direction)?;
        }
        Ok(())
    }

    pub fn set_control_state<H: ResizeHost>(
        &mut self,
        host: &H,
        target: &H::Element,
        direction: Direction,
        enabled: bool,
        spec: &HandleSpec,
    ) -> Result<(), ResizeError> {
        let state = self.handles.entry(direction).or_default();
        state.enabled = enabled;
        if let HandleSpec::Styled(overrides) = spec {
            state.overrides = overrides.clone();
        }
        tracing::debug!("[handles] {direction} enabled={enabled} spec={spec:?}");

        if !spec.touches_dom() {
            if let Some(node) = host.find_handle(target, direction) {
                let cursor = if enabled {
                    self.styles_for(direction)
                        .get("cursor")
                        .unwrap_or(direction.cursor())
                        .to_string()
                } else {
                    INERT_CURSOR.to_string()
                };
                host.apply_styles(&node, &StyleMap::new().with("cursor", cursor))?;
            }
            return Ok(());
        }

        if enabled {
            self.place(host, target, direction)
        } else {
            if let Some(node) = host.find_handle(target, direction) {
                host.remove_element(&node);
                tracing::debug!("[handles] Removed {direction} handle");
            }
            Ok(())
        }
    }

    pub fn set_all_control_state<H: ResizeHost>(
        &mut self,
        host: &H,
        target: &H::Element,
        enabled: bool,
        spec: &HandleSpec,
    ) -> Result<(), ResizeError> {
        let directions: Vec<Direction> = self.directions().collect();
        for direction in directions {
            self.set_control_state(host, target, direction, enabled, spec)?;
        }
        Ok(())
    }

    /// Remove every handle node under `target`.
    pub fn remove_all<H: ResizeHost>(&self, host: &H, target: &H::Element) {
        for direction in Direction::ALL {
            if let Some(node) = host.find_handle(target, direction) {
                host.remove_element(&node);
            }
        }
    }

    /// Restyle the existing node for `direction`, or create one.
    fn place<H: ResizeHost>(
        &self,
        host: &H,
        target: &H::Element,
        direction: Direction,
    ) -> Result<(), ResizeError> {
        let styles = self.styles_for(direction);
        if let Some(node) = host.find_handle(target, direction) {
            host.apply_styles(&node, &styles)
        } else {
            let node = host.create_handle(target, direction)?;
            tracing::debug!("[handles] Created {direction} handle");
            host.apply_styles(&node, &styles)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockHost;

    fn registry(handles: &[(Direction, bool)]) -> HandleRegistry {
        let configs: Vec<_> = handles
            .iter()
            .map(|&(direction, enabled)| HandleConfig {
                direction,
                enabled,
                styles: StyleMap::new(),
            })
            .collect();
        HandleRegistry::new(&configs)
    }

    #[test]
    fn test_default_styles_cover_all_directions() {
        for direction in Direction::ALL {
            let styles = default_styles(direction);
            assert_eq!(styles.get("position"), Some("absolute"));
            assert_eq!(styles.get("cursor"), Some(direction.cursor()));
            assert!(styles.get("width").is_some());
            assert!(styles.get("height").is_some());
        }
        let br = default_styles(Direction::BottomRight);
        assert_eq!(br.get("bottom"), Some("-10px"));
        assert_eq!(br.get("right"), Some("-10px"));
    }

    #[test]
    fn test_materialize_creates_one_node_per_direction() {
        let host = MockHost::new();
        let target = host.target();
        let registry = registry(&[(Direction::Right, true), (Direction::Left, false)]);

        registry.materialize(&host, &target).unwrap();
        registry.materialize(&host, &target).unwrap();

        assert_eq!(host.handle_count(), 2);
        let right = host.find_handle(&target, Direction::Right).unwrap();
        assert_eq!(host.style(&right, "cursor").as_deref(), Some("ew-resize"));
        let left = host.find_handle(&target, Direction::Left).unwrap();
        assert_eq!(host.style(&left, "cursor").as_deref(), Some("auto"));
    }

    #[test]
    fn test_disable_with_materialize_removes_node() {
        let host = MockHost::new();
        let target = host.target();
        let mut registry = registry(&[(Direction::Left, true)]);
        registry.materialize(&host, &target).unwrap();

        registry
            .set_control_state(&host, &target, Direction::Left, false, &HandleSpec::Materialize)
            .unwrap();

        assert!(!registry.is_enabled(Direction::Left));
        assert!(host.find_handle(&target, Direction::Left).is_none());
    }

    #[test]
    fn test_disable_with_keep_leaves_inert_node() {
        let host = MockHost::new();
        let target = host.target();
        let mut registry = registry(&[(Direction::Top, true)]);
        registry.materialize(&host, &target).unwrap();

        registry
            .set_control_state(&host, &target, Direction::Top, false, &HandleSpec::Keep)
            .unwrap();
        let node = host.find_handle(&target, Direction::Top).unwrap();
        assert_eq!(host.style(&node, "cursor").as_deref(), Some("auto"));
        assert!(!registry.is_enabled(Direction::Top));

        registry
            .set_control_state(&host, &target, Direction::Top, true, &HandleSpec::Keep)
            .unwrap();
        assert_eq!(host.style(&node, "cursor").as_deref(), Some("ns-resize"));
    }

    #[test]
    fn test_enable_creates_missing_node() {
        let host = MockHost::new();
        let target = host.target();
        let mut registry = registry(&[]);

        registry
            .set_control_state(&host, &target, Direction::TopLeft, true, &HandleSpec::Materialize)
            .unwrap();

        assert!(registry.contains(Direction::TopLeft));
        assert!(registry.is_enabled(Direction::TopLeft));
        assert_eq!(host.handle_count(), 1);
    }

    #[test]
    fn test_styled_override_persists() {
        let host = MockHost::new();
        let target = host.target();
        let mut registry = registry(&[(Direction::Right, true)]);
        registry.materialize(&host, &target).unwrap();

        let spec = HandleSpec::Styled(StyleMap::new().with("background", "blue").with("width", "4px"));
        registry
            .set_control_state(&host, &target, Direction::Right, true, &spec)
            .unwrap();
        let node = host.find_handle(&target, Direction::Right).unwrap();
        assert_eq!(host.style(&node, "background").as_deref(), Some("blue"));
        assert_eq!(host.style(&node, "width").as_deref(), Some("4px"));

        // a plain re-enable keeps the override
        registry
            .set_control_state(&host, &target, Direction::Right, true, &HandleSpec::Materialize)
            .unwrap();
        assert_eq!(registry.styles_for(Direction::Right).get("width"), Some("4px"));
        assert_eq!(host.handle_count(), 1);
    }

    #[test]
    fn test_set_all_control_state() {
        let host = MockHost::new();
        let target = host.target();
        let mut registry = registry(&[(Direction::Right, true), (Direction::Bottom, true)]);
        registry.materialize(&host, &target).unwrap();

        registry
            .set_all_control_state(&host, &target, false, &HandleSpec::Materialize)
            .unwrap();
        assert_eq!(host.handle_count(), 0);
        assert!(registry.directions().all(|d| !registry.is_enabled(d)));

        registry
            .set_all_control_state(&host, &target, true, &HandleSpec::Materialize)
            .unwrap();
        assert_eq!(host.handle_count(), 2);
    }

    #[test]
    fn test_style_write_failure_propagates() {
        let host = MockHost::new();
        let target = host.target();
        let mut registry = registry(&[(Direction::Right, true)]);
        registry.materialize(&host, &target).unwrap();

        host.fail_style_access(true);
        let spec = HandleSpec::Styled(StyleMap::new().with("background", "red"));
        let result = registry.set_control_state(&host, &target, Direction::Right, true, &spec);
        assert!(matches!(result, Err(ResizeError::Dom(_))));

        let result =
            registry.set_control_state(&host, &target, Direction::Right, false, &HandleSpec::Keep);
        assert!(matches!(result, Err(ResizeError::Dom(_))));
    }

    #[test]
    fn test_handle_spec_from_json() {
        let keep: HandleSpec = serde_json::from_str("false").unwrap();
        assert_eq!(keep, HandleSpec::Keep);
        let styled: HandleSpec = serde_json::from_str(r#"{"zIndex": 3}"#).unwrap();
        assert_eq!(styled, HandleSpec::Styled(StyleMap::new().with("z-index", "3")));
    }
}
