use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use super::extras::{Extra, Extras};
use crate::error::{Error, Result};
use crate::schema::{as_object, Schema};
use crate::slots::Slots;

/// A live model object: one slot per schema field plus whatever the
/// definition's extender layers added.
///
/// Fields are read and written through [`get`](Self::get) and
/// [`set`](Self::set); extras through [`extra`](Self::extra) and
/// [`call`](Self::call). Only fields are encoded.
pub struct ModelInstance {
    schema: Arc<Schema>,
    fields: Slots,
    extras: IndexMap<String, Extra>,
}

impl ModelInstance {
    pub(crate) fn new(schema: Arc<Schema>, fields: Slots) -> Self {
        Self {
            schema,
            fields,
            extras: IndexMap::new(),
        }
    }

    pub fn get<T: Any>(&self, field: &str) -> Option<&T> {
        self.fields.get(field)
    }

    pub fn get_mut<T: Any>(&mut self, field: &str) -> Option<&mut T> {
        self.fields.get_mut(field)
    }

    /// Writes a field. The value must have the field's instance type, and
    /// the next [`encode`](Self::encode) reflects it.
    pub fn set<T: Any + Send>(&mut self, field: &str, value: T) -> Result<()> {
        self.fields.set(field, value)
    }

    /// Reads an extra by value. Getters are evaluated against the current
    /// state of the instance; plain values are cloned. Methods are not
    /// readable and yield `None`.
    pub fn extra<T: Any + Clone>(&self, name: &str) -> Option<T> {
        match self.extras.get(name)? {
            Extra::Value(slot) => slot.downcast_ref::<T>().cloned(),
            Extra::Getter { get, .. } => get(self).into_inner::<T>(),
            Extra::Method(_) => None,
        }
    }

    /// Borrows a plain value extra.
    pub fn extra_ref<T: Any>(&self, name: &str) -> Option<&T> {
        match self.extras.get(name)? {
            Extra::Value(slot) => slot.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Invokes a method extra with `args`.
    pub fn call(&mut self, name: &str, args: Value) -> Result<Value> {
        let method = match self.extras.get(name) {
            Some(Extra::Method(method)) => Arc::clone(method),
            _ => return Err(Error::UnknownMethod(name.to_string())),
        };
        method(self, args)
    }

    pub fn has_extra(&self, name: &str) -> bool {
        self.extras.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.names()
    }

    pub fn extra_names(&self) -> impl Iterator<Item = &str> {
        self.extras.keys().map(String::as_str)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Encodes the current field values. Extras never appear in the output.
    pub fn encode(&self) -> Result<Value> {
        self.schema.encode_fields(&self.fields).map(Value::Object)
    }

    pub fn to_json(&self) -> Result<Value> {
        self.encode()
    }

    /// Reconciles every field against `data` in schema order.
    ///
    /// Composite fields are updated in place. Extras are left alone: plain
    /// values keep what they computed at creation, getters see the new
    /// field values. A failure stops at the failing field, keeping the
    /// fields before it updated.
    pub fn update(&mut self, data: &Value) -> Result<()> {
        let fields = as_object(data)?;
        debug!(fields = fields.len(), "updating model instance");
        self.schema
            .reconcile_fields(|name| fields.get(name).cloned(), &mut self.fields)
    }

    /// Folds one extender layer into the instance.
    ///
    /// A value extra with the same type as a field of the same name
    /// overwrites that field. Anything else is stored as an extra, and
    /// shadows an earlier extra of that name. When `check` is set, a type
    /// change against an earlier field or extra fails instead.
    pub(crate) fn merge_extras(&mut self, extras: Extras, check: bool) -> Result<()> {
        for (name, extra) in extras.into_entries() {
            let prior = match self.extras.get(&name) {
                Some(earlier) => Some((earlier.type_id(), earlier.type_name())),
                None => self
                    .fields
                    .slot(&name)
                    .map(|slot| (slot.type_id(), slot.type_name())),
            };
            if let Some((prior_id, prior_name)) = prior {
                if prior_id != extra.type_id() {
                    if check {
                        return Err(Error::OverrideType {
                            name,
                            prior: prior_name,
                            found: extra.type_name(),
                        });
                    }
                    warn!(
                        extra = %name,
                        prior = prior_name,
                        found = extra.type_name(),
                        "extender overrides a value with a different type"
                    );
                }
            }

            let writes_field = matches!(
                &extra,
                Extra::Value(slot) if self
                    .fields
                    .slot(&name)
                    .is_some_and(|field| field.type_id() == slot.type_id())
            );
            if writes_field {
                if let Extra::Value(slot) = extra {
                    self.fields.insert(name.clone(), slot);
                }
                self.extras.shift_remove(&name);
            } else {
                self.extras.insert(name, extra);
            }
        }
        Ok(())
    }
}

impl Serialize for ModelInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl fmt::Debug for ModelInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelInstance")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .field("extras", &self.extras)
            .finish()
    }
}
