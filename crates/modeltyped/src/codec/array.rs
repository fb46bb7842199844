use super::Codec;
use crate::error::Result;

/// Element-wise codec over arrays.
///
/// Does not override `reconcile`: an update re-decodes the whole array, so
/// neither the array nor its elements keep their identity. Element codecs
/// with a custom `reconcile` are therefore bypassed on update.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayCodec<C> {
    inner: C,
}

pub fn array<C: Codec>(inner: C) -> ArrayCodec<C> {
    ArrayCodec { inner }
}

impl<C: Codec> Codec for ArrayCodec<C> {
    type Input = Vec<C::Input>;
    type Instance = Vec<C::Instance>;
    type Output = Vec<C::Output>;

    fn decode(&self, input: Self::Input) -> Result<Self::Instance> {
        input.into_iter().map(|i| self.inner.decode(i)).collect()
    }

    fn encode(&self, instance: &Self::Instance) -> Result<Self::Output> {
        instance.iter().map(|v| self.inner.encode(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{number, with_default};

    #[test]
    fn maps_elements() {
        let codec = array(with_default(number(), 5.0));
        let decoded = codec.decode(vec![Some(1.0), Some(3.0), None]).unwrap();
        assert_eq!(decoded, vec![1.0, 3.0, 5.0]);
        assert_eq!(codec.encode(&decoded).unwrap(), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn reconcile_builds_a_new_array() {
        let codec = array(number());
        let mut current = codec.decode(vec![1.0, 2.0]).unwrap();
        let before = current.as_ptr();
        codec.reconcile(vec![3.0, 4.0], &mut current).unwrap();
        assert_eq!(current, vec![3.0, 4.0]);
        assert_ne!(before, current.as_ptr());
    }
}
