//! Wire parameter model shared by every TomTom request builder.
//!
//! Builders describe their recognized options as a [`FieldTable`]: one row per
//! upstream query key with the extractor that reads (and, where needed,
//! transforms) the option. A row yields `None` when the option is unset, so
//! absent options never reach the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Serialized as one `key=value` pair per element.
    List(Vec<String>),
}

impl ParamValue {
    /// Query-string rendering of a scalar value. Lists render comma-joined
    /// here; [`ParamMap::to_query_pairs`] expands them instead.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => format_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(","),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Integral floats render without a fractional part (`10`, not `10.0`).
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// A filter option callers may pass as one string or as a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }

    /// Repeated-key form (`avoid=a&avoid=b`) for true multi-value parameters.
    pub fn repeated(&self) -> ParamValue {
        ParamValue::List(self.values())
    }

    /// Single comma-joined string for enumerations the API reads as one filter.
    pub fn joined(&self) -> ParamValue {
        ParamValue::Text(self.values().join(","))
    }
}

/// Ordered parameter map. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(&'static str, ParamValue)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Flattens into query pairs, expanding lists into repeated keys.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                ParamValue::List(items) => {
                    pairs.extend(items.iter().map(|item| (key.to_string(), item.clone())));
                }
                scalar => pairs.push((key.to_string(), scalar.render())),
            }
        }
        pairs
    }

    /// Applies every row of `table` to `options`, skipping unset options.
    pub fn apply<T>(&mut self, options: &T, table: FieldTable<T>) {
        for &(key, extract) in table {
            if let Some(value) = extract(options) {
                self.insert(key, value);
            }
        }
    }
}

/// Extractor for one upstream key.
pub type Extractor<T> = fn(&T) -> Option<ParamValue>;

/// Enumerated `(upstream key, extractor)` rows for one options type.
pub type FieldTable<T> = &'static [(&'static str, Extractor<T>)];

/// Reads an optional scalar option as a parameter value.
pub fn value<V>(option: &Option<V>) -> Option<ParamValue>
where
    V: Clone + Into<ParamValue>,
{
    option.clone().map(Into::into)
}

/// Per-field "caller value if present, else default" merge.
pub trait Merge {
    fn merge(&self, defaults: &Self) -> Self;
}

/// Implements [`Merge`] by listing every field of an options struct. A missing
/// field is a compile error, so new options cannot silently skip the merge.
macro_rules! impl_merge {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::domains::tomtom::params::Merge for $ty {
            fn merge(&self, defaults: &Self) -> Self {
                Self {
                    $($field: self.$field.clone().or_else(|| defaults.$field.clone()),)*
                }
            }
        }
    };
}

pub(crate) use impl_merge;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(52.3), "52.3");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = ParamMap::new();
        map.insert("limit", 10u32);
        map.insert("language", "en-US");
        map.insert("limit", 5u32);

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["limit", "language"]);
        assert_eq!(map.get("limit"), Some(&ParamValue::Int(5)));
    }

    #[test]
    fn test_lists_expand_to_repeated_keys() {
        let mut map = ParamMap::new();
        map.insert("avoid", ParamValue::List(vec!["tollRoads".into(), "ferries".into()]));
        map.insert("traffic", false);

        assert_eq!(
            map.to_query_pairs(),
            vec![
                ("avoid".to_string(), "tollRoads".to_string()),
                ("avoid".to_string(), "ferries".to_string()),
                ("traffic".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_one_or_many_normalization() {
        let one = OneOrMany::One("7".to_string());
        let many = OneOrMany::Many(vec!["0".to_string(), "7".to_string()]);

        assert_eq!(one.joined(), ParamValue::Text("7".to_string()));
        assert_eq!(many.joined(), ParamValue::Text("0,7".to_string()));
        assert_eq!(
            many.repeated(),
            ParamValue::List(vec!["0".to_string(), "7".to_string()])
        );
    }

    #[test]
    fn test_one_or_many_deserializes_both_shapes() {
        let one: OneOrMany = serde_json::from_str(r#""tollRoads""#).unwrap();
        let many: OneOrMany = serde_json::from_str(r#"["tollRoads","ferries"]"#).unwrap();
        assert_eq!(one, OneOrMany::One("tollRoads".to_string()));
        assert_eq!(many.values().len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut map = ParamMap::new();
        map.insert("t", 1i64);
        assert_eq!(map.remove("t"), Some(ParamValue::Int(1)));
        assert!(map.is_empty());
        assert_eq!(map.remove("t"), None);
    }
}
