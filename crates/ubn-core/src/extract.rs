//! Deep search for an entity name inside an untyped JSON response.
//!
//! Registry responses differ per source and nest the name at varying depth,
//! under varying keys. The search walks the tree depth-first:
//!
//! 1. In an object, priority keys are checked first, in [`NAME_KEYS`] order.
//!    A direct hit at this level wins over anything nested below it.
//! 2. Otherwise the object's values are visited in document order and the
//!    search recurses into nested objects and arrays.
//! 3. Arrays are visited element by element, in order.
//!
//! The first hit wins. Traversal order is fully determined by the tree, so the
//! same tree always yields the same name.

use serde_json::Value;

/// Keys that may hold an entity name, highest priority first.
///
/// Covers the field names used by the e-Tax portal, the GCIS datasets, the
/// g0v aggregator and government agency records.
pub const NAME_KEYS: &[&str] = &[
    "營業人名稱",
    "機關名稱",
    "中文名稱",
    "商業名稱",
    "公司名稱",
    "名稱",
    "Company_Name",
    "Commercial_Name",
];

/// Returns the trimmed name if `raw` is usable as an entity name.
///
/// Empty and single-character values are placeholders, not names.
pub fn name_candidate(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (trimmed.chars().count() > 1).then_some(trimmed)
}

/// Priority-ordered name search over a JSON tree
#[derive(Debug, Clone, Copy)]
pub struct NameExtractor<'k> {
    keys: &'k [&'k str],
}

impl NameExtractor<'static> {
    /// Extractor using the standard [`NAME_KEYS`] list
    pub const fn standard() -> Self {
        Self { keys: NAME_KEYS }
    }
}

impl Default for NameExtractor<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'k> NameExtractor<'k> {
    /// Extractor with a custom key priority list
    pub const fn with_keys(keys: &'k [&'k str]) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &'k [&'k str] {
        self.keys
    }

    /// Find the first plausible name in `tree`.
    pub fn search<'v>(&self, tree: &'v Value) -> Option<&'v str> {
        match tree {
            Value::Object(map) => {
                let direct = self.keys.iter().find_map(|key| match map.get(*key) {
                    Some(Value::String(s)) => name_candidate(s),
                    _ => None,
                });
                if direct.is_some() {
                    return direct;
                }

                map.values()
                    .filter(|v| v.is_object() || v.is_array())
                    .find_map(|v| self.search(v))
            }
            Value::Array(items) => items.iter().find_map(|v| self.search(v)),
            _ => None,
        }
    }
}

/// Search `tree` with the standard key list.
pub fn deep_search_name(tree: &Value) -> Option<&str> {
    NameExtractor::standard().search(tree)
}
