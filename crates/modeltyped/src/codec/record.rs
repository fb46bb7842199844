use serde_json::Value;
use std::sync::Arc;

use super::Codec;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::Schema;

/// Keyed composite codec.
///
/// Decoding builds a new [`Record`]. Reconciling hands each key's new value
/// to that key's codec together with the live slot, so nested composites
/// are updated in place rather than replaced.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    schema: Arc<Schema>,
}

pub fn record(schema: Schema) -> RecordCodec {
    RecordCodec {
        schema: Arc::new(schema),
    }
}

impl RecordCodec {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Codec for RecordCodec {
    type Input = Value;
    type Instance = Record;
    type Output = Value;

    fn decode(&self, input: Value) -> Result<Record> {
        let mut fields = match input {
            Value::Object(fields) => fields,
            other => return Err(Error::unexpected("object", &other)),
        };
        let slots = self.schema.decode_fields(|key| fields.remove(key))?;
        Ok(Record::new(Arc::clone(&self.schema), slots))
    }

    fn encode(&self, instance: &Record) -> Result<Value> {
        self.schema.encode_fields(&instance.slots).map(Value::Object)
    }

    fn reconcile(&self, input: Value, current: &mut Record) -> Result<()> {
        let mut fields = match input {
            Value::Object(fields) => fields,
            other => return Err(Error::unexpected("object", &other)),
        };
        self.schema
            .reconcile_fields(|key| fields.remove(key), &mut current.slots)
    }
}
