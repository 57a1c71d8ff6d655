//! Combiner strategies for many-to-one column mappings.
//!
//! When several source columns map onto one destination key, their cell
//! values for a row are reduced to a single value by a [`Combiner`]. A
//! template may register a strategy per destination key; keys without one
//! fall back to [`default_combine`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Reduces the grouped cell values of one destination key to a single value.
///
/// Values arrive in source-column order. Any `Fn(&[String]) -> String` closure
/// is a combiner.
pub trait Combiner: Send + Sync {
    /// Combine the values collected for one destination key.
    fn combine(&self, values: &[String]) -> String;

    /// Short name used in logs and debug output.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Combiner for F
where
    F: Fn(&[String]) -> String + Send + Sync,
{
    fn combine(&self, values: &[String]) -> String {
        self(values)
    }
}

/// Default combiner: drops blank entries and joins the rest with one space.
///
/// Surviving values are joined untrimmed; only the emptiness check trims.
pub fn default_combine(values: &[String]) -> String {
    join_non_blank(values, " ")
}

fn join_non_blank(values: &[String], separator: &str) -> String {
    values
        .iter()
        .filter(|value| !value.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Combiners that can be named from a JSON template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCombiner {
    /// Join non-blank values with a single space (the default).
    Space,
    /// Join non-blank values with `", "`.
    Comma,
    /// Join non-blank values with a newline.
    Newline,
    /// Keep the first non-blank value.
    First,
}

impl BuiltinCombiner {
    /// Resolve a combiner by its template name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "space" | "default" => Some(Self::Space),
            "comma" => Some(Self::Comma),
            "newline" => Some(Self::Newline),
            "first" => Some(Self::First),
            _ => None,
        }
    }

    /// Name as written in templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Comma => "comma",
            Self::Newline => "newline",
            Self::First => "first",
        }
    }
}

impl Combiner for BuiltinCombiner {
    fn combine(&self, values: &[String]) -> String {
        match self {
            Self::Space => default_combine(values),
            Self::Comma => join_non_blank(values, ", "),
            Self::Newline => join_non_blank(values, "\n"),
            Self::First => values
                .iter()
                .find(|value| !value.trim().is_empty())
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Combiner strategies keyed by destination key.
#[derive(Clone, Default)]
pub struct CombinerRegistry {
    entries: BTreeMap<String, Arc<dyn Combiner>>,
}

impl CombinerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the strategy for a destination key.
    pub fn insert(&mut self, key: impl Into<String>, combiner: Arc<dyn Combiner>) {
        self.entries.insert(key.into(), combiner);
    }

    /// Strategy registered for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&dyn Combiner> {
        self.entries.get(key).map(|combiner| combiner.as_ref())
    }

    /// Combine `values` with the strategy for `key`, or the default join.
    pub fn combine(&self, key: &str, values: &[String]) -> String {
        match self.get(key) {
            Some(combiner) => combiner.combine(values),
            None => default_combine(values),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CombinerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(key, combiner)| (key, combiner.name())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn default_joins_with_space() {
        assert_eq!(default_combine(&strings(&["Ada", "Lovelace"])), "Ada Lovelace");
    }

    #[test]
    fn default_drops_blank_values() {
        assert_eq!(default_combine(&strings(&["", "Ada", "   ", "King"])), "Ada King");
        assert_eq!(default_combine(&strings(&["", "  "])), "");
    }

    #[test]
    fn default_keeps_inner_whitespace_of_survivors() {
        assert_eq!(default_combine(&strings(&[" Ada", "B "])), " Ada B ");
    }

    #[test]
    fn builtin_names_resolve() {
        assert_eq!(BuiltinCombiner::from_name("Comma"), Some(BuiltinCombiner::Comma));
        assert_eq!(BuiltinCombiner::from_name("first"), Some(BuiltinCombiner::First));
        assert_eq!(BuiltinCombiner::from_name("concat"), None);
    }

    #[test]
    fn builtin_first_skips_blanks() {
        let values = strings(&["", "x", "y"]);
        assert_eq!(BuiltinCombiner::First.combine(&values), "x");
        assert_eq!(BuiltinCombiner::Comma.combine(&values), "x, y");
    }

    #[test]
    fn registry_falls_back_to_default() {
        let mut registry = CombinerRegistry::new();
        registry.insert("tags", Arc::new(|values: &[String]| values.join("|")));
        let values = strings(&["a", "b"]);
        assert_eq!(registry.combine("tags", &values), "a|b");
        assert_eq!(registry.combine("name", &values), "a b");
        assert_eq!(format!("{registry:?}"), r#"{"tags": "custom"}"#);
    }
}
