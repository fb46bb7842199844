//! Codecs that tolerate an absent or null input.

use super::Codec;
use crate::error::Result;
use crate::external::OrNull;

/// Absent and null inputs decode to `None`, and `None` encodes as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optional<C> {
    inner: C,
}

pub fn optional<C: Codec>(inner: C) -> Optional<C> {
    Optional { inner }
}

impl<C: Codec> Codec for Optional<C> {
    type Input = Option<C::Input>;
    type Instance = Option<C::Instance>;
    type Output = Option<C::Output>;

    fn decode(&self, input: Self::Input) -> Result<Self::Instance> {
        input.map(|i| self.inner.decode(i)).transpose()
    }

    fn encode(&self, instance: &Self::Instance) -> Result<Self::Output> {
        instance.as_ref().map(|v| self.inner.encode(v)).transpose()
    }
}

/// Absent and null inputs decode to `None`, and `None` encodes as an
/// explicit `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nullable<C> {
    inner: C,
}

pub fn nullable<C: Codec>(inner: C) -> Nullable<C> {
    Nullable { inner }
}

impl<C: Codec> Codec for Nullable<C> {
    type Input = Option<C::Input>;
    type Instance = Option<C::Instance>;
    type Output = OrNull<C::Output>;

    fn decode(&self, input: Self::Input) -> Result<Self::Instance> {
        input.map(|i| self.inner.decode(i)).transpose()
    }

    fn encode(&self, instance: &Self::Instance) -> Result<Self::Output> {
        instance
            .as_ref()
            .map(|v| self.inner.encode(v))
            .transpose()
            .map(OrNull)
    }
}

/// Substitutes a default input for absent or null.
///
/// The default is decoded through the inner codec on every use, so a
/// composite default is never shared between instances.
pub struct WithDefault<C: Codec> {
    inner: C,
    default: C::Input,
}

impl<C> Clone for WithDefault<C>
where
    C: Codec + Clone,
    C::Input: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            default: self.default.clone(),
        }
    }
}

impl<C> std::fmt::Debug for WithDefault<C>
where
    C: Codec + std::fmt::Debug,
    C::Input: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithDefault")
            .field("inner", &self.inner)
            .field("default", &self.default)
            .finish()
    }
}

/// Wraps `inner` so an absent or null input decodes `default` instead.
///
/// The default may be given as anything convertible into the inner codec's
/// input type.
pub fn with_default<C>(inner: C, default: impl Into<C::Input>) -> WithDefault<C>
where
    C: Codec,
    C::Input: Clone,
{
    WithDefault {
        inner,
        default: default.into(),
    }
}

impl<C: Codec> WithDefault<C>
where
    C::Input: Clone,
{
    fn resolve(&self, input: Option<C::Input>) -> C::Input {
        input.unwrap_or_else(|| self.default.clone())
    }
}

impl<C: Codec> Codec for WithDefault<C>
where
    C::Input: Clone,
{
    type Input = Option<C::Input>;
    type Instance = C::Instance;
    type Output = C::Output;

    fn decode(&self, input: Self::Input) -> Result<Self::Instance> {
        self.inner.decode(self.resolve(input))
    }

    fn encode(&self, instance: &Self::Instance) -> Result<Self::Output> {
        self.inner.encode(instance)
    }

    fn reconcile(&self, input: Self::Input, current: &mut Self::Instance) -> Result<()> {
        self.inner.reconcile(self.resolve(input), current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{array, number, string};

    #[test]
    fn optional_maps_absence_to_none() {
        let codec = optional(string());
        assert_eq!(codec.decode(None).unwrap(), None);
        assert_eq!(codec.decode(Some("x".into())).unwrap(), Some("x".into()));
        assert_eq!(codec.encode(&None).unwrap(), None);
    }

    #[test]
    fn nullable_encodes_none_as_null() {
        let codec = nullable(string());
        assert_eq!(codec.decode(None).unwrap(), None);
        assert_eq!(codec.encode(&None).unwrap(), OrNull(None));
        assert_eq!(
            codec.encode(&Some("x".into())).unwrap(),
            OrNull(Some("x".to_string()))
        );
    }

    #[test]
    fn default_substitutes_absent_input() {
        let codec = with_default(string(), "red");
        assert_eq!(codec.decode(None).unwrap(), "red");
        assert_eq!(codec.decode(Some("blue".into())).unwrap(), "blue");
    }

    #[test]
    fn default_reconcile_uses_default_for_absent() {
        let codec = with_default(number(), 5.0);
        let mut current = codec.decode(Some(1.0)).unwrap();
        codec.reconcile(None, &mut current).unwrap();
        assert_eq!(current, 5.0);
    }

    #[test]
    fn default_arrays_are_fresh() {
        let codec = with_default(array(number()), Vec::new());
        let mut a = codec.decode(None).unwrap();
        let b = codec.decode(None).unwrap();
        a.push(5.0);
        assert_eq!(a, vec![5.0]);
        assert!(b.is_empty());
    }
}
