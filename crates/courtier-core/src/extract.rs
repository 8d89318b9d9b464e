//! Case-insensitive field extraction from raw backend records
//!
//! Backend rows arrive with inconsistent key casing across API versions:
//! legacy snake_case (`ref_personne`), UPPER_SNAKE exports (`REF_PERSONNE`)
//! and camelCase (`riskProfile`). Instead of scattering reconciliation logic
//! per call site, every canonical field is described by an ordered alias
//! list and resolved through a single lower-cased key map built once per
//! record.
//!
//! Absence is a valid, expected outcome here, never an error.

use std::collections::HashMap;

use serde_json::Value;

/// Lower-cased view over one raw record
///
/// Lookup returns the first alias (in caller-specified priority order) whose
/// value is present and not JSON null.
pub struct FieldMap<'a> {
    keys: HashMap<String, &'a Value>,
}

impl<'a> FieldMap<'a> {
    /// Build the lower-cased key map. Non-object values produce an empty
    /// map, so every lookup degrades to `None`.
    pub fn new(record: &'a Value) -> Self {
        let keys = match record.as_object() {
            Some(map) => map
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
            None => HashMap::new(),
        };
        Self { keys }
    }

    /// First non-null value among `aliases`
    pub fn get(&self, aliases: &[&str]) -> Option<&'a Value> {
        for alias in aliases {
            if let Some(value) = self.keys.get(&alias.to_lowercase()) {
                if !value.is_null() {
                    return Some(value);
                }
            }
        }
        None
    }

    /// String value, stringifying bare numbers the way the backend sometimes
    /// delivers references
    pub fn string(&self, aliases: &[&str]) -> Option<String> {
        match self.get(aliases)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric value coerced from a number or a numeric string
    ///
    /// A coercion that does not produce a finite number (the `"abc"` case)
    /// resolves as absent, never as NaN.
    pub fn number(&self, aliases: &[&str]) -> Option<f64> {
        coerce_number(self.get(aliases)?)
    }

    /// Array value
    pub fn array(&self, aliases: &[&str]) -> Option<&'a [Value]> {
        self.get(aliases)?.as_array().map(|v| v.as_slice())
    }
}

/// Coerce one JSON value to a finite f64, or nothing
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_is_case_insensitive() {
        let upper = json!({ "REF_PERSONNE": "X" });
        let lower = json!({ "ref_personne": "X" });

        let aliases = &["ref_personne", "ref", "id"];
        assert_eq!(FieldMap::new(&upper).string(aliases), Some("X".into()));
        assert_eq!(FieldMap::new(&lower).string(aliases), Some("X".into()));
    }

    #[test]
    fn aliases_resolve_in_priority_order() {
        let record = json!({ "ref": "fallback", "ref_personne": "primary" });
        let map = FieldMap::new(&record);
        assert_eq!(
            map.string(&["ref_personne", "ref"]),
            Some("primary".into())
        );
    }

    #[test]
    fn null_values_fall_through_to_later_aliases() {
        let record = json!({ "ref_personne": null, "ref": "R42" });
        let map = FieldMap::new(&record);
        assert_eq!(map.string(&["ref_personne", "ref"]), Some("R42".into()));
    }

    #[test]
    fn absence_is_not_an_error() {
        let record = json!({ "other": 1 });
        let map = FieldMap::new(&record);
        assert_eq!(map.get(&["ref_personne"]), None);

        // Non-object records degrade to empty maps
        let scalar = json!("just a string");
        assert_eq!(FieldMap::new(&scalar).get(&["ref_personne"]), None);
    }

    #[test]
    fn numbers_coerce_from_numeric_strings() {
        let record = json!({ "age": "42", "score": 71.5 });
        let map = FieldMap::new(&record);
        assert_eq!(map.number(&["age"]), Some(42.0));
        assert_eq!(map.number(&["score"]), Some(71.5));
    }

    #[test]
    fn non_numeric_strings_resolve_as_absent_not_nan() {
        let record = json!({ "age": "abc" });
        let map = FieldMap::new(&record);
        assert_eq!(map.number(&["age"]), None);
    }

    #[test]
    fn numeric_references_stringify() {
        let record = json!({ "ref_personne": 1042 });
        let map = FieldMap::new(&record);
        assert_eq!(map.string(&["ref_personne"]), Some("1042".into()));
    }
}
