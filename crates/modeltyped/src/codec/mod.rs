//! The codec contract and its combinators.
//!
//! A [`Codec`] converts between an external input, a live instance and an
//! external output. Combinators in this module build new codecs from
//! existing ones:
//!
//! - [`value`] and the leaf shorthands ([`string`], [`number`], ...)
//! - [`optional`], [`nullable`], [`with_default`]
//! - [`input_filter`], [`exclude_from_output`]
//! - [`array`], [`record`]
//! - [`model`](crate::model()) lives with the model engine.
//!
//! Schemas store codecs behind the object-safe [`DynCodec`], which talks
//! in [`serde_json::Value`] and [`Slot`]s.

mod array;
mod leaf;
mod presence;
mod record;
mod transform;

pub use array::{array, ArrayCodec};
pub use leaf::{any, boolean, integer, number, primitive, string, value, ValueCodec};
pub use presence::{nullable, optional, with_default, Nullable, Optional, WithDefault};
pub use record::{record, RecordCodec};
pub use transform::{exclude_from_output, input_filter, ExcludeFromOutput, InputFilter};

use serde_json::Value;
use std::any::{type_name, Any};
use std::sync::Arc;

use crate::error::Result;
use crate::external::{FromExternal, IntoExternal};
use crate::slots::Slot;

/// Converts one value between its external and instance representations.
pub trait Codec {
    /// What `decode` and `reconcile` accept.
    type Input;
    /// The live value held by a model or record.
    type Instance;
    /// What `encode` produces.
    type Output;

    fn decode(&self, input: Self::Input) -> Result<Self::Instance>;

    fn encode(&self, instance: &Self::Instance) -> Result<Self::Output>;

    /// Folds new external input into a live instance.
    ///
    /// The default decodes the input and replaces `current` with the result,
    /// so the old instance is discarded. Composite codecs override this to
    /// update `current` in place. If decoding fails, `current` is untouched.
    fn reconcile(&self, input: Self::Input, current: &mut Self::Instance) -> Result<()> {
        *current = self.decode(input)?;
        Ok(())
    }
}

pub type InputOf<C> = <C as Codec>::Input;
pub type InstanceOf<C> = <C as Codec>::Instance;
pub type OutputOf<C> = <C as Codec>::Output;

impl<C: Codec + ?Sized> Codec for Arc<C> {
    type Input = C::Input;
    type Instance = C::Instance;
    type Output = C::Output;

    fn decode(&self, input: Self::Input) -> Result<Self::Instance> {
        (**self).decode(input)
    }

    fn encode(&self, instance: &Self::Instance) -> Result<Self::Output> {
        (**self).encode(instance)
    }

    fn reconcile(&self, input: Self::Input, current: &mut Self::Instance) -> Result<()> {
        (**self).reconcile(input, current)
    }
}

/// Object-safe form of [`Codec`] used by schemas.
///
/// Implemented for every codec whose input reads from JSON, whose output
/// writes to JSON, and whose instance can be stored in a [`Slot`].
pub trait DynCodec: Send + Sync {
    fn decode_external(&self, input: Option<Value>) -> Result<Slot>;

    /// `Ok(None)` means the field is absent from the output. `name` is the
    /// field the slot belongs to and only appears in errors.
    fn encode_external(&self, name: &str, slot: &Slot) -> Result<Option<Value>>;

    fn reconcile_external(&self, name: &str, input: Option<Value>, slot: &mut Slot)
        -> Result<()>;

    /// Whether an absent input decodes without failing.
    fn accepts_absent(&self) -> bool;

    fn instance_type(&self) -> &'static str;
}

/// A codec shared between schemas.
pub type SharedCodec = Arc<dyn DynCodec>;

impl<C> DynCodec for C
where
    C: Codec + Send + Sync,
    C::Input: FromExternal,
    C::Output: IntoExternal,
    C::Instance: Any + Send,
{
    fn decode_external(&self, input: Option<Value>) -> Result<Slot> {
        let input = C::Input::from_external(input)?;
        Ok(Slot::new(self.decode(input)?))
    }

    fn encode_external(&self, name: &str, slot: &Slot) -> Result<Option<Value>> {
        let instance = slot.expect_ref::<C::Instance>(name)?;
        self.encode(instance)?.into_external()
    }

    fn reconcile_external(
        &self,
        name: &str,
        input: Option<Value>,
        slot: &mut Slot,
    ) -> Result<()> {
        let input = C::Input::from_external(input)?;
        let instance = slot.expect_mut::<C::Instance>(name)?;
        self.reconcile(input, instance)
    }

    fn accepts_absent(&self) -> bool {
        C::Input::ACCEPTS_ABSENT
    }

    fn instance_type(&self) -> &'static str {
        type_name::<C::Instance>()
    }
}
