//! Codecs that reshape the input or suppress the output of another codec.

use std::fmt;
use std::marker::PhantomData;

use super::Codec;
use crate::error::Result;
use crate::external::Omitted;

/// Runs every input (on decode and on reconcile) through `filter` before
/// handing it to the inner codec.
pub struct InputFilter<C, F, I> {
    inner: C,
    filter: F,
    _input: PhantomData<fn(I)>,
}

pub fn input_filter<C, F, I>(inner: C, filter: F) -> InputFilter<C, F, I>
where
    C: Codec,
    F: Fn(I) -> C::Input,
{
    InputFilter {
        inner,
        filter,
        _input: PhantomData,
    }
}

impl<C: Clone, F: Clone, I> Clone for InputFilter<C, F, I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            filter: self.filter.clone(),
            _input: PhantomData,
        }
    }
}

impl<C: fmt::Debug, F, I> fmt::Debug for InputFilter<C, F, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputFilter")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<C, F, I> Codec for InputFilter<C, F, I>
where
    C: Codec,
    F: Fn(I) -> C::Input,
{
    type Input = I;
    type Instance = C::Instance;
    type Output = C::Output;

    fn decode(&self, input: I) -> Result<Self::Instance> {
        self.inner.decode((self.filter)(input))
    }

    fn encode(&self, instance: &Self::Instance) -> Result<Self::Output> {
        self.inner.encode(instance)
    }

    fn reconcile(&self, input: I, current: &mut Self::Instance) -> Result<()> {
        self.inner.reconcile((self.filter)(input), current)
    }
}

/// Decodes like the inner codec, but always encodes as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeFromOutput<C> {
    inner: C,
}

pub fn exclude_from_output<C: Codec>(inner: C) -> ExcludeFromOutput<C> {
    ExcludeFromOutput { inner }
}

impl<C: Codec> Codec for ExcludeFromOutput<C> {
    type Input = C::Input;
    type Instance = C::Instance;
    type Output = Omitted;

    fn decode(&self, input: Self::Input) -> Result<Self::Instance> {
        self.inner.decode(input)
    }

    fn encode(&self, _instance: &Self::Instance) -> Result<Omitted> {
        Ok(Omitted)
    }
}
