//! The live instance produced by [`record`](crate::record()).

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::schema::Schema;
use crate::slots::Slots;

/// A composite value with one slot per schema field.
///
/// Reconciling a record updates its slots in place, so the record itself
/// outlives any number of updates.
pub struct Record {
    pub(crate) schema: Arc<Schema>,
    pub(crate) slots: Slots,
}

impl Record {
    pub(crate) fn new(schema: Arc<Schema>, slots: Slots) -> Self {
        Self { schema, slots }
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.slots.get(key)
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.slots.get_mut(key)
    }

    /// Writes a field directly. The value must have the field's instance type.
    pub fn set<T: Any + Send>(&mut self, key: &str, value: T) -> Result<()> {
        self.slots.set(key, value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.names()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.len() == 0
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Encodes the current field values.
    pub fn encode(&self) -> Result<Value> {
        self.schema.encode_fields(&self.slots).map(Value::Object)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}
