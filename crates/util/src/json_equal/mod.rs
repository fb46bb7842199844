//! JSON equality utilities.
//!
//! Numbers are compared by value rather than by representation, so an
//! integer and a float holding the same quantity are equal. Object key
//! order is ignored.

mod deep_equal;

pub use deep_equal::deep_equal;
