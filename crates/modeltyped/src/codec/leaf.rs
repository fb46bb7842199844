//! Pass-through leaf codecs.

use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

use super::Codec;
use crate::error::Result;
use crate::external::Primitive;

/// Identity codec: the input is the instance, and the instance is the output.
pub struct ValueCodec<T>(PhantomData<fn() -> T>);

impl<T> Clone for ValueCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ValueCodec<T> {}

impl<T> Default for ValueCodec<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T> fmt::Debug for ValueCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T: Clone> Codec for ValueCodec<T> {
    type Input = T;
    type Instance = T;
    type Output = T;

    fn decode(&self, input: T) -> Result<T> {
        Ok(input)
    }

    fn encode(&self, instance: &T) -> Result<T> {
        Ok(instance.clone())
    }
}

pub fn value<T: Clone>() -> ValueCodec<T> {
    ValueCodec::default()
}

pub fn string() -> ValueCodec<String> {
    value()
}

pub fn number() -> ValueCodec<f64> {
    value()
}

pub fn integer() -> ValueCodec<i64> {
    value()
}

pub fn boolean() -> ValueCodec<bool> {
    value()
}

/// A string, number or boolean, kept as given.
pub fn primitive() -> ValueCodec<Primitive> {
    value()
}

/// Any JSON value, kept as given.
pub fn any() -> ValueCodec<Value> {
    value()
}
