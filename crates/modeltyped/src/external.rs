//! Conversion between codec inputs/outputs and the external JSON shape.
//!
//! The absent marker is `None` on the way in (a missing key) and `Ok(None)`
//! on the way out (a key left out of the encoded object).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::ops::{Deref, DerefMut};

use crate::error::{Error, Result};

/// Reads a codec input from an external value that may be absent.
pub trait FromExternal: Sized {
    /// Whether an absent value decodes without failing.
    ///
    /// Fields whose codec input sets this may be left out of constructor data.
    const ACCEPTS_ABSENT: bool = false;

    fn from_external(value: Option<Value>) -> Result<Self>;
}

/// Writes a codec output as an external value, or as absent.
pub trait IntoExternal {
    fn into_external(self) -> Result<Option<Value>>;
}

fn present(value: Option<Value>) -> Result<Value> {
    value.ok_or(Error::Absent)
}

impl FromExternal for Value {
    fn from_external(value: Option<Value>) -> Result<Self> {
        present(value)
    }
}

impl IntoExternal for Value {
    fn into_external(self) -> Result<Option<Value>> {
        Ok(Some(self))
    }
}

macro_rules! external_via_serde {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromExternal for $t {
                fn from_external(value: Option<Value>) -> Result<Self> {
                    Ok(serde_json::from_value(present(value)?)?)
                }
            }

            impl IntoExternal for $t {
                fn into_external(self) -> Result<Option<Value>> {
                    Ok(Some(serde_json::to_value(self)?))
                }
            }
        )*
    };
}

external_via_serde!(String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromExternal for f64 {
    fn from_external(value: Option<Value>) -> Result<Self> {
        Ok(serde_json::from_value(present(value)?)?)
    }
}

impl IntoExternal for f64 {
    fn into_external(self) -> Result<Option<Value>> {
        Ok(Some(modeltyped_util::json_number(self)))
    }
}

impl FromExternal for f32 {
    fn from_external(value: Option<Value>) -> Result<Self> {
        Ok(serde_json::from_value(present(value)?)?)
    }
}

impl IntoExternal for f32 {
    fn into_external(self) -> Result<Option<Value>> {
        Ok(Some(modeltyped_util::json_number(f64::from(self))))
    }
}

// Absent and null both read as `None`; `None` writes as absent.
impl<T: FromExternal> FromExternal for Option<T> {
    const ACCEPTS_ABSENT: bool = true;

    fn from_external(value: Option<Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(None),
            value => T::from_external(value).map(Some),
        }
    }
}

impl<T: IntoExternal> IntoExternal for Option<T> {
    fn into_external(self) -> Result<Option<Value>> {
        match self {
            None => Ok(None),
            Some(v) => v.into_external(),
        }
    }
}

impl<T: FromExternal> FromExternal for Vec<T> {
    fn from_external(value: Option<Value>) -> Result<Self> {
        match present(value)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| T::from_external(Some(item)))
                .collect(),
            other => Err(Error::unexpected("array", &other)),
        }
    }
}

// Arrays have no holes: an absent element is written as null.
impl<T: IntoExternal> IntoExternal for Vec<T> {
    fn into_external(self) -> Result<Option<Value>> {
        let items = self
            .into_iter()
            .map(|item| -> Result<Value> { Ok(item.into_external()?.unwrap_or(Value::Null)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Value::Array(items)))
    }
}

/// An output where `None` is written as an explicit `null` rather than
/// left out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrNull<T>(pub Option<T>);

impl<T: FromExternal> FromExternal for OrNull<T> {
    const ACCEPTS_ABSENT: bool = true;

    fn from_external(value: Option<Value>) -> Result<Self> {
        Option::<T>::from_external(value).map(OrNull)
    }
}

impl<T: IntoExternal> IntoExternal for OrNull<T> {
    fn into_external(self) -> Result<Option<Value>> {
        match self.0 {
            None => Ok(Some(Value::Null)),
            Some(v) => v.into_external(),
        }
    }
}

/// An output that is always absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Omitted;

impl IntoExternal for Omitted {
    fn into_external(self) -> Result<Option<Value>> {
        Ok(None)
    }
}

/// A string, a number or a boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Number(f64),
    String(String),
}

impl FromExternal for Primitive {
    fn from_external(value: Option<Value>) -> Result<Self> {
        match present(value)? {
            Value::Bool(b) => Ok(Primitive::Bool(b)),
            Value::String(s) => Ok(Primitive::String(s)),
            Value::Number(n) => match n.as_f64() {
                Some(n) => Ok(Primitive::Number(n)),
                None => Err(Error::unexpected("primitive", &Value::Number(n))),
            },
            other => Err(Error::unexpected("primitive", &other)),
        }
    }
}

impl IntoExternal for Primitive {
    fn into_external(self) -> Result<Option<Value>> {
        Ok(Some(match self {
            Primitive::Bool(b) => Value::Bool(b),
            Primitive::Number(n) => modeltyped_util::json_number(n),
            Primitive::String(s) => Value::String(s),
        }))
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Primitive::Bool(b)
    }
}

impl From<f64> for Primitive {
    fn from(n: f64) -> Self {
        Primitive::Number(n)
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Primitive::String(s.to_string())
    }
}

impl From<String> for Primitive {
    fn from(s: String) -> Self {
        Primitive::String(s)
    }
}

/// Wraps any serde type so it can be used as a codec input or output.
///
/// ```
/// use modeltyped::{value, Codec, Json};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// #[serde(rename_all = "lowercase")]
/// enum Switch {
///     On,
///     Off,
/// }
///
/// let codec = value::<Json<Switch>>();
/// let state = codec.decode(Json(Switch::On)).unwrap();
/// assert_eq!(*state, Switch::On);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Json<T>(pub T);

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DeserializeOwned> FromExternal for Json<T> {
    fn from_external(value: Option<Value>) -> Result<Self> {
        Ok(Json(serde_json::from_value(present(value)?)?))
    }
}

impl<T: Serialize> IntoExternal for Json<T> {
    fn into_external(self) -> Result<Option<Value>> {
        Ok(Some(serde_json::to_value(self.0)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_fails_for_plain_types() {
        assert!(matches!(String::from_external(None), Err(Error::Absent)));
        assert!(matches!(f64::from_external(None), Err(Error::Absent)));
        assert!(matches!(Value::from_external(None), Err(Error::Absent)));
        assert!(matches!(Vec::<bool>::from_external(None), Err(Error::Absent)));
    }

    #[test]
    fn null_is_not_a_string() {
        assert!(matches!(
            String::from_external(Some(Value::Null)),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn option_reads_absent_and_null_as_none() {
        assert_eq!(Option::<String>::from_external(None).unwrap(), None);
        assert_eq!(
            Option::<String>::from_external(Some(Value::Null)).unwrap(),
            None
        );
        assert_eq!(
            Option::<String>::from_external(Some(json!("x"))).unwrap(),
            Some("x".to_string())
        );
    }

    #[test]
    fn accepts_absent_flags() {
        assert!(!String::ACCEPTS_ABSENT);
        assert!(!Vec::<String>::ACCEPTS_ABSENT);
        assert!(Option::<String>::ACCEPTS_ABSENT);
        assert!(OrNull::<String>::ACCEPTS_ABSENT);
    }

    #[test]
    fn none_writes_absent_or_null() {
        assert_eq!(None::<String>.into_external().unwrap(), None);
        assert_eq!(
            OrNull(None::<String>).into_external().unwrap(),
            Some(Value::Null)
        );
        assert_eq!(Omitted.into_external().unwrap(), None);
    }

    #[test]
    fn vec_elements_round_trip_and_absent_elements_become_null() {
        let v = Vec::<Option<i64>>::from_external(Some(json!([1, null, 3]))).unwrap();
        assert_eq!(v, vec![Some(1), None, Some(3)]);
        assert_eq!(v.into_external().unwrap(), Some(json!([1, null, 3])));
    }

    #[test]
    fn vec_rejects_non_arrays() {
        let err = Vec::<i64>::from_external(Some(json!({"a": 1}))).unwrap_err();
        assert_eq!(err.to_string(), "expected array, found object");
    }

    #[test]
    fn floats_write_like_json_numbers() {
        assert_eq!(5.0f64.into_external().unwrap(), Some(json!(5)));
        assert_eq!(2.5f32.into_external().unwrap(), Some(json!(2.5)));
    }

    #[test]
    fn primitive_accepts_only_leaves() {
        assert_eq!(
            Primitive::from_external(Some(json!("foo"))).unwrap(),
            Primitive::String("foo".into())
        );
        assert_eq!(
            Primitive::from_external(Some(json!(5))).unwrap(),
            Primitive::Number(5.0)
        );
        assert!(Primitive::from_external(Some(json!([]))).is_err());
        assert!(Primitive::from_external(Some(Value::Null)).is_err());
    }
}
