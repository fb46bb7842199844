//! Declarative models over JSON data.
//!
//! Fields are described by [`Codec`]s, composed with combinators such as
//! [`optional`], [`with_default`], [`array`] and [`record`]. A [`Schema`]
//! names the fields of a model, and [`build_model`] turns it into a
//! [`ModelDefinition`] that creates [`ModelInstance`]s from JSON objects,
//! updates them in place and encodes them back.
//!
//! ```
//! use modeltyped::{build_model, number, optional, string, with_default, Schema};
//! use serde_json::json;
//!
//! let person = build_model(
//!     Schema::new()
//!         .field("name", string())
//!         .field("age", optional(number()))
//!         .field("color", with_default(string(), "red")),
//! );
//!
//! let mut anakin = person.create(&json!({"name": "Anakin"})).unwrap();
//! anakin.set("name", "Vader".to_string()).unwrap();
//! assert_eq!(anakin.encode().unwrap(), json!({"name": "Vader", "color": "red"}));
//! ```

pub mod codec;
mod error;
mod external;
pub mod model;
mod record;
mod schema;
mod slots;

pub use codec::{
    any, array, boolean, exclude_from_output, input_filter, integer, nullable, number, optional,
    primitive, record, string, value, with_default, ArrayCodec, Codec, DynCodec, ExcludeFromOutput,
    InputFilter, InputOf, InstanceOf, Nullable, Optional, OutputOf, RecordCodec, SharedCodec,
    ValueCodec, WithDefault,
};
pub use error::{Error, Result};
pub use external::{FromExternal, IntoExternal, Json, Omitted, OrNull, Primitive};
pub use model::{
    build_model, model, Extender, Extras, ModelCodec, ModelDefinition, ModelInstance,
    ModelOptions, OverrideCheck,
};
pub use record::Record;
pub use schema::Schema;
pub use slots::Slot;
