//! Named, ordered collections of field codecs.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::codec::{DynCodec, SharedCodec};
use crate::error::{Error, Result};
use crate::slots::Slots;

/// An ordered mapping from field name to codec.
///
/// Fields whose codec accepts an absent input may be left out of
/// constructor data. All other fields are required, but nothing checks this
/// up front: a missing required field fails inside its codec.
///
/// ```
/// use modeltyped::{optional, string, Schema};
///
/// let schema = Schema::new()
///     .field("firstName", string())
///     .field("nickname", optional(string()));
/// assert_eq!(schema.required_fields(), vec!["firstName"]);
/// assert_eq!(schema.optional_fields(), vec!["nickname"]);
/// ```
#[derive(Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, SharedCodec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, or replaces the codec of an existing one in place.
    pub fn field<C>(self, name: impl Into<String>, codec: C) -> Self
    where
        C: DynCodec + 'static,
    {
        self.shared_field(name, Arc::new(codec))
    }

    pub fn shared_field(mut self, name: impl Into<String>, codec: SharedCodec) -> Self {
        self.fields.insert(name.into(), codec);
        self
    }

    /// Returns a schema with the fields of `self` followed by those of
    /// `other`. Fields present in both take `other`'s codec and keep their
    /// original position.
    pub fn merge(&self, other: &Schema) -> Schema {
        let mut fields = self.fields.clone();
        for (name, codec) in &other.fields {
            fields.insert(name.clone(), Arc::clone(codec));
        }
        Schema { fields }
    }

    pub fn get(&self, name: &str) -> Option<&SharedCodec> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedCodec)> {
        self.fields.iter().map(|(name, codec)| (name.as_str(), codec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields that must be present in constructor data.
    pub fn required_fields(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, codec)| !codec.accepts_absent())
            .map(|(name, _)| name)
            .collect()
    }

    /// Fields that may be left out of constructor data.
    pub fn optional_fields(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, codec)| codec.accepts_absent())
            .map(|(name, _)| name)
            .collect()
    }

    /// Decodes every field in schema order. `take` yields each field's
    /// external value, or `None` when it is absent.
    pub(crate) fn decode_fields(
        &self,
        mut take: impl FnMut(&str) -> Option<Value>,
    ) -> Result<Slots> {
        let mut slots = Slots::with_capacity(self.fields.len());
        for (name, codec) in &self.fields {
            let slot = codec.decode_external(take(name.as_str()))?;
            slots.insert(name.clone(), slot);
        }
        Ok(slots)
    }

    /// Encodes every field from its current slot value. Absent outputs are
    /// left out of the object.
    pub(crate) fn encode_fields(&self, slots: &Slots) -> Result<Map<String, Value>> {
        let fields = self
            .fields
            .iter()
            .map(|(name, codec)| -> Result<(String, Option<Value>)> {
                let slot = slots
                    .slot(name)
                    .ok_or_else(|| Error::UnknownField(name.clone()))?;
                Ok((name.clone(), codec.encode_external(name, slot)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(modeltyped_util::object_from_fields(fields))
    }

    /// Reconciles every field in schema order, writing each result back into
    /// its slot before moving on. Stops at the first failure.
    pub(crate) fn reconcile_fields(
        &self,
        mut take: impl FnMut(&str) -> Option<Value>,
        slots: &mut Slots,
    ) -> Result<()> {
        for (name, codec) in &self.fields {
            let slot = slots
                .slot_mut(name)
                .ok_or_else(|| Error::UnknownField(name.clone()))?;
            codec.reconcile_external(name, take(name.as_str()), slot)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.fields
                    .iter()
                    .map(|(name, codec)| (name, codec.instance_type())),
            )
            .finish()
    }
}

/// Borrows `data` as an object, or fails naming what it was instead.
pub(crate) fn as_object(data: &Value) -> Result<&Map<String, Value>> {
    data.as_object()
        .ok_or_else(|| Error::unexpected("object", data))
}
