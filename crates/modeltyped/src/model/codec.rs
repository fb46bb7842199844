use serde_json::Value;

use super::{ModelDefinition, ModelInstance};
use crate::codec::Codec;
use crate::error::Result;

/// Uses a model definition as a field codec, so models nest.
///
/// Reconciling calls [`ModelInstance::update`] on the live sub-model
/// instead of building a new one.
#[derive(Debug, Clone)]
pub struct ModelCodec {
    definition: ModelDefinition,
}

pub fn model(definition: ModelDefinition) -> ModelCodec {
    ModelCodec { definition }
}

impl ModelCodec {
    pub fn definition(&self) -> &ModelDefinition {
        &self.definition
    }
}

impl Codec for ModelCodec {
    type Input = Value;
    type Instance = ModelInstance;
    type Output = Value;

    fn decode(&self, input: Value) -> Result<ModelInstance> {
        self.definition.create(&input)
    }

    fn encode(&self, instance: &ModelInstance) -> Result<Value> {
        instance.encode()
    }

    fn reconcile(&self, input: Value, current: &mut ModelInstance) -> Result<()> {
        current.update(&input)
    }
}
