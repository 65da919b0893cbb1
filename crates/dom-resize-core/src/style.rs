//! Inline style maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Ordered map of CSS property name to value.
///
/// Keys are stored in kebab-case, so `zIndex` and `z-index` address the same
/// property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleMap(BTreeMap<String, String>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.0.insert(to_kebab_case(property), value.into());
    }

    /// Builder form of [`StyleMap::set`].
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(&to_kebab_case(property)).map(String::as_str)
    }

    /// Copy of `self` with every entry of `overrides` written on top.
    pub fn merged(&self, overrides: &StyleMap) -> StyleMap {
        let mut merged = self.clone();
        for (property, value) in &overrides.0 {
            merged.0.insert(property.clone(), value.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (property, value) in iter {
            map.set(property, value);
        }
        map
    }
}

/// Accepts string or number values (`{ zIndex: 100, width: "12px" }`).
#[derive(Deserialize)]
#[serde(untagged)]
enum StyleValue {
    Text(String),
    Number(f64),
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, StyleValue>::deserialize(deserializer)?;
        let mut map = StyleMap::new();
        for (property, value) in raw {
            let value = match value {
                StyleValue::Text(text) => text,
                StyleValue::Number(number) => number.to_string(),
            };
            map.set(&property, value);
        }
        Ok(map)
    }
}

/// `zIndex` -> `z-index`. Already kebab-cased names pass through.
fn to_kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 2);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Format a pixel length the way CSS expects (`"150px"`).
pub fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_normalization() {
        let map = StyleMap::new().with("zIndex", "99").with("box-sizing", "border-box");
        assert_eq!(map.get("z-index"), Some("99"));
        assert_eq!(map.get("zIndex"), Some("99"));
        assert_eq!(map.get("boxSizing"), Some("border-box"));
    }

    #[test]
    fn test_merge_overrides_win() {
        let defaults = StyleMap::new().with("width", "10px").with("cursor", "ew-resize");
        let overrides = StyleMap::new().with("width", "4px").with("background", "red");
        let merged = defaults.merged(&overrides);

        assert_eq!(merged.get("width"), Some("4px"));
        assert_eq!(merged.get("cursor"), Some("ew-resize"));
        assert_eq!(merged.get("background"), Some("red"));
        // defaults untouched
        assert_eq!(defaults.get("width"), Some("10px"));
    }

    #[test]
    fn test_deserialize_numbers() {
        let map: StyleMap = serde_json::from_str(r#"{"zIndex": 100, "opacity": 0.5}"#).unwrap();
        assert_eq!(map.get("z-index"), Some("100"));
        assert_eq!(map.get("opacity"), Some("0.5"));
    }

    #[test]
    fn test_px() {
        assert_eq!(px(150.0), "150px");
        assert_eq!(px(12.5), "12.5px");
    }
}
