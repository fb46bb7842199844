//! Named, type-erased storage for record and model fields.

use indexmap::IndexMap;
use std::any::{type_name, Any, TypeId};
use std::fmt;

use crate::error::{Error, Result};

/// One stored value together with the name of its type.
pub struct Slot {
    value: Box<dyn Any + Send>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Slot {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    pub fn into_inner<T: Any>(self) -> Option<T> {
        self.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Same as [`downcast_ref`](Self::downcast_ref), but reports a
    /// [`Error::SlotType`] naming the slot on mismatch.
    pub(crate) fn expect_ref<T: Any>(&self, name: &str) -> Result<&T> {
        let holds = self.type_name;
        self.value.downcast_ref::<T>().ok_or_else(|| Error::SlotType {
            name: name.to_string(),
            holds,
            requested: type_name::<T>(),
        })
    }

    pub(crate) fn expect_mut<T: Any>(&mut self, name: &str) -> Result<&mut T> {
        let holds = self.type_name;
        self.value.downcast_mut::<T>().ok_or_else(|| Error::SlotType {
            name: name.to_string(),
            holds,
            requested: type_name::<T>(),
        })
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.type_name).finish()
    }
}

/// Ordered slots keyed by field name.
#[derive(Debug, Default)]
pub(crate) struct Slots {
    entries: IndexMap<String, Slot>,
}

impl Slots {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(n),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, slot: Slot) -> Option<Slot> {
        self.entries.insert(name.into(), slot)
    }

    pub(crate) fn slot(&self, name: &str) -> Option<&Slot> {
        self.entries.get(name)
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut Slot> {
        self.entries.get_mut(name)
    }

    pub(crate) fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.entries.get(name)?.downcast_ref::<T>()
    }

    pub(crate) fn get_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name)?.downcast_mut::<T>()
    }

    /// Replaces the value of an existing slot. The new value must have the
    /// slot's type.
    pub(crate) fn set<T: Any + Send>(&mut self, name: &str, value: T) -> Result<()> {
        let slot = self
            .entries
            .get_mut(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        if !slot.is::<T>() {
            return Err(Error::SlotType {
                name: name.to_string(),
                holds: slot.type_name(),
                requested: type_name::<T>(),
            });
        }
        *slot = Slot::new(value);
        Ok(())
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
