//! The dynamic record model: [`Value`], [`Record`], and key extraction.
//!
//! Records are unordered `String -> Value` mappings; they carry no
//! declared schema, so operators are free to add, remove, or rename
//! fields. A `HashMap` gives us `Record == Record` that ignores
//! insertion order for free, matching the "same fields, same values"
//! equality rule.

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A single dynamically-typed field value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
}

// `derive(PartialOrd, Ord)` compares enum variants by declaration order
// first, then by the contained value: Null < Bool < Int < Float < Str.
// That total order lets Sort/Reduce/Join comparators never panic, even
// when a key mixes value types across records (a user error, but not a
// crash -- see SPEC_FULL.md §3).

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(OrderedFloat(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

/// An unordered mapping from field name to [`Value`].
///
/// Two records are equal iff they have the same set of fields with
/// equal values; field insertion order is never observable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record(HashMap<String, Value>);

impl Record {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Get a field's value by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set (insert or overwrite) a field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Remove a field, returning its prior value if present.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// True if the record has the named field.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterate over `(field, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Record {
    fn from(pairs: [(&str, Value); N]) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// The fields a reduce/sort/join operator groups or orders by, in
/// declared order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeySpec(Vec<String>);

impl KeySpec {
    /// The empty key: join operators treat it as "one implicit group
    /// spanning the whole input" (`spec.md` §4.3). Reduce and sort do
    /// not accept an empty key -- see `Graph::add_reduce`/`add_sort`.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extract this key's value tuple from a record. Missing fields
    /// extract as `Value::Null` rather than failing -- a key field
    /// absent from a particular record is treated the same way the
    /// Python source treats a missing dict key when a reducer/joiner
    /// narrows to exactly the declared fields: as an ordering input,
    /// not a runtime panic.
    #[must_use]
    pub fn value_of(&self, record: &Record) -> KeyValue {
        KeyValue(
            self.0
                .iter()
                .map(|f| record.get(f).cloned().unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// Build a fresh record containing exactly this key's fields and
    /// values, per `spec.md` §4.3's "`key_record` is a fresh record
    /// containing exactly the key fields".
    #[must_use]
    pub fn key_record(&self, key: &KeyValue) -> Record {
        self.0
            .iter()
            .cloned()
            .zip(key.0.iter().cloned())
            .collect()
    }
}

impl From<&str> for KeySpec {
    fn from(field: &str) -> Self {
        Self(vec![field.to_string()])
    }
}

impl From<String> for KeySpec {
    fn from(field: String) -> Self {
        Self(vec![field])
    }
}

impl From<&[&str]> for KeySpec {
    fn from(fields: &[&str]) -> Self {
        Self(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeySpec {
    fn from(fields: [&str; N]) -> Self {
        Self(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl From<Vec<String>> for KeySpec {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

/// The value of a record's key under a declared [`KeySpec`]: an ordered
/// tuple of field values, comparable lexicographically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyValue(Vec<Value>);

impl KeyValue {
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

/// Total order on `(Ordering, Ordering)`-ish comparisons collapsed to
/// plain `Ordering`; kept as a free function so call sites read as
/// "compare these two key values" rather than reaching for `Ord::cmp`
/// through a trait bound.
#[must_use]
pub fn compare_keys(a: &KeyValue, b: &KeyValue) -> Ordering {
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_variant_values_compare_naturally() {
        assert!(Value::Int(1) < Value::Int(2));
        assert!(Value::from("a") < Value::from("b"));
        assert!(Value::from(1.0) < Value::from(2.0));
    }

    #[test]
    fn cross_variant_values_compare_by_discriminant_rank() {
        assert!(Value::Null < Value::Bool(false));
        assert!(Value::Bool(true) < Value::Int(0));
        assert!(Value::Int(1_000_000) < Value::Float(OrderedFloat(0.0)));
        assert!(Value::Float(OrderedFloat(0.0)) < Value::Str(String::new()));
    }

    #[test]
    fn key_value_of_missing_field_is_null() {
        let key = KeySpec::from("missing");
        let record = Record::new();
        assert_eq!(key.value_of(&record).values(), &[Value::Null]);
    }

    #[test]
    fn compare_keys_matches_lexicographic_tuple_order() {
        let key = KeySpec::from(vec!["a".to_string(), "b".to_string()]);
        let low = key.value_of(&Record::from([("a", 1.into()), ("b", 9.into())]));
        let high = key.value_of(&Record::from([("a", 1.into()), ("b", 10.into())]));
        assert_eq!(compare_keys(&low, &high), Ordering::Less);
    }

    #[test]
    fn record_equality_ignores_field_insertion_order() {
        let a = Record::from([("x", 1.into()), ("y", 2.into())]);
        let b = Record::from([("y", 2.into()), ("x", 1.into())]);
        assert_eq!(a, b);
    }
}
