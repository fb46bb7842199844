//! Object assembly helpers.

use serde_json::{Map, Number, Value};

/// Largest integer an `f64` holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Collects `(name, value)` pairs into a JSON object, dropping absent values.
///
/// An absent value (`None`) leaves the key out entirely, which is how a
/// JSON document spells "undefined". Insertion order is kept.
///
/// ```
/// use modeltyped_util::object_from_fields;
/// use serde_json::json;
///
/// let obj = object_from_fields(vec![
///     ("a".to_string(), Some(json!(1))),
///     ("b".to_string(), None),
///     ("c".to_string(), Some(json!(null))),
/// ]);
/// assert_eq!(serde_json::Value::Object(obj), json!({"a": 1, "c": null}));
/// ```
pub fn object_from_fields<I>(fields: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (String, Option<Value>)>,
{
    fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
}

/// Converts an `f64` into a JSON number.
///
/// Integral values inside the exactly-representable range become integer
/// numbers, so `5.0` is written as `5`. Non-finite values have no JSON
/// form and become `null`.
pub fn json_number(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}
