//! Model definitions and their instances.
//!
//! A [`ModelDefinition`] pairs a [`Schema`] with an ordered list of
//! extender layers. [`create`](ModelDefinition::create) decodes every field
//! and then runs the layers in order, each one seeing the instance as the
//! layers before it left it.

mod codec;
mod extras;
mod instance;
mod options;

pub use codec::{model, ModelCodec};
pub use extras::{Extras, Getter, Method};
pub use instance::ModelInstance;
pub use options::{ModelOptions, OverrideCheck};

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::Result;
use crate::schema::{as_object, Schema};

/// One extender layer. Receives the instance built so far and the original
/// constructor data.
pub type Extender = Arc<dyn Fn(&ModelInstance, &Value) -> Extras + Send + Sync>;

/// A reusable model factory.
///
/// Definitions are immutable; [`extend`](Self::extend),
/// [`with_fields`](Self::with_fields) and [`with_options`](Self::with_options)
/// return new definitions and leave the receiver usable.
#[derive(Clone)]
pub struct ModelDefinition {
    schema: Arc<Schema>,
    extenders: Vec<Extender>,
    options: ModelOptions,
}

/// Builds a definition with no extender layers.
pub fn build_model(schema: Schema) -> ModelDefinition {
    ModelDefinition::new(schema)
}

impl ModelDefinition {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            extenders: Vec::new(),
            options: ModelOptions::default(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Number of extender layers.
    pub fn layers(&self) -> usize {
        self.extenders.len()
    }

    pub fn with_options(&self, options: ModelOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    /// Returns a definition that runs `extender` after every existing layer.
    pub fn extend<F>(&self, extender: F) -> Self
    where
        F: Fn(&ModelInstance, &Value) -> Extras + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.extenders.push(Arc::new(extender));
        next
    }

    /// Returns a definition whose schema has `fields` merged in. Existing
    /// extender layers are kept and see the larger schema.
    pub fn with_fields(&self, fields: Schema) -> Self {
        Self {
            schema: Arc::new(self.schema.merge(&fields)),
            ..self.clone()
        }
    }

    /// Decodes `data` into a new instance and applies every extender layer.
    ///
    /// Fails if `data` is not an object, if any field fails to decode, or if
    /// a layer changes the type of an existing name while the override
    /// check is active.
    pub fn create(&self, data: &Value) -> Result<ModelInstance> {
        let fields = as_object(data)?;
        debug!(
            model = self.label(),
            fields = self.schema.len(),
            layers = self.extenders.len(),
            "creating model instance"
        );
        let slots = self
            .schema
            .decode_fields(|name| fields.get(name).cloned())?;
        let mut instance = ModelInstance::new(Arc::clone(&self.schema), slots);

        let check = self.options.override_check.enabled();
        for (layer, extender) in self.extenders.iter().enumerate() {
            let extras = extender(&instance, data);
            trace!(
                model = self.label(),
                layer,
                extras = extras.len(),
                "applying extender layer"
            );
            instance.merge_extras(extras, check)?;
        }
        Ok(instance)
    }

    fn label(&self) -> &str {
        self.options.name.as_deref().unwrap_or("anonymous")
    }
}

impl fmt::Debug for ModelDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDefinition")
            .field("schema", &self.schema)
            .field("layers", &self.extenders.len())
            .field("options", &self.options)
            .finish()
    }
}
