//! Values, getters and methods that extender layers add to an instance.

use serde_json::Value;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use super::ModelInstance;
use crate::error::Result;
use crate::slots::Slot;

pub type Getter = Arc<dyn Fn(&ModelInstance) -> Slot + Send + Sync>;
pub type Method = Arc<dyn Fn(&mut ModelInstance, Value) -> Result<Value> + Send + Sync>;

pub(crate) enum Extra {
    /// Computed once, when the layer runs.
    Value(Slot),
    /// Computed from the live instance on every read.
    Getter {
        get: Getter,
        type_id: TypeId,
        type_name: &'static str,
    },
    Method(Method),
}

impl Extra {
    pub(crate) fn type_id(&self) -> TypeId {
        match self {
            Extra::Value(slot) => slot.type_id(),
            Extra::Getter { type_id, .. } => *type_id,
            Extra::Method(_) => TypeId::of::<Method>(),
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Extra::Value(slot) => slot.type_name(),
            Extra::Getter { type_name, .. } => type_name,
            Extra::Method(_) => "method",
        }
    }
}

impl fmt::Debug for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extra::Value(slot) => f.debug_tuple("Value").field(&slot.type_name()).finish(),
            Extra::Getter { type_name, .. } => f.debug_tuple("Getter").field(type_name).finish(),
            Extra::Method(_) => f.write_str("Method"),
        }
    }
}

/// What one extender layer contributes, in order.
///
/// ```
/// use modeltyped::{build_model, string, Extras, Schema};
/// use serde_json::json;
///
/// let contact = build_model(
///     Schema::new()
///         .field("firstName", string())
///         .field("lastName", string()),
/// )
/// .extend(|_, _| {
///     Extras::new().getter("fullName", |m| {
///         let first = m.get::<String>("firstName").cloned().unwrap_or_default();
///         let last = m.get::<String>("lastName").cloned().unwrap_or_default();
///         format!("{first} {last}")
///     })
/// });
///
/// let jon = contact
///     .create(&json!({"firstName": "Jon", "lastName": "Snow"}))
///     .unwrap();
/// assert_eq!(jon.extra::<String>("fullName").unwrap(), "Jon Snow");
/// ```
#[derive(Default)]
pub struct Extras {
    entries: Vec<(String, Extra)>,
}

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value<T: Any + Send>(mut self, name: impl Into<String>, value: T) -> Self {
        self.entries.push((name.into(), Extra::Value(Slot::new(value))));
        self
    }

    pub fn getter<T, F>(mut self, name: impl Into<String>, get: F) -> Self
    where
        T: Any + Send,
        F: Fn(&ModelInstance) -> T + Send + Sync + 'static,
    {
        let extra = Extra::Getter {
            get: Arc::new(move |m: &ModelInstance| Slot::new(get(m))),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        };
        self.entries.push((name.into(), extra));
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&mut ModelInstance, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.entries
            .push((name.into(), Extra::Method(Arc::new(method))));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(String, Extra)> {
        self.entries
    }
}

impl fmt::Debug for Extras {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, extra)| (name, extra)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_order() {
        let extras = Extras::new()
            .value("a", 1i64)
            .getter("b", |_| "b".to_string())
            .method("c", |_, args| Ok(args));
        let names: Vec<_> = extras
            .into_entries()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn type_ids() {
        let entries = Extras::new()
            .value("a", 1i64)
            .getter("b", |_| 2i64)
            .method("c", |_, args| Ok(args))
            .into_entries();
        assert_eq!(entries[0].1.type_id(), TypeId::of::<i64>());
        assert_eq!(entries[1].1.type_id(), TypeId::of::<i64>());
        assert_eq!(entries[2].1.type_name(), "method");
    }

    #[test]
    fn debug_shows_kinds() {
        let extras = Extras::new().value("a", 1i64).method("c", |_, args| Ok(args));
        let dbg = format!("{extras:?}");
        assert!(dbg.contains("Value(\"i64\")"));
        assert!(dbg.contains("Method"));
    }
}
