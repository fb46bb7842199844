//! modeltyped-util - JSON plumbing shared by the modeltyped crates.
//!
//! Provides:
//! - [`deep_equal`] for structural comparison of encoded output
//! - [`value_kind`] for naming the shape of a [`serde_json::Value`]
//! - [`object_from_fields`] for assembling an object from fields that may be absent
//! - [`json_number`] for writing an `f64` the way a JSON document would

pub mod json_equal;
pub mod kind;
pub mod object;

pub use json_equal::deep_equal;
pub use kind::value_kind;
pub use object::{json_number, object_from_fields};
