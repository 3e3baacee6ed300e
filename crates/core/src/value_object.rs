//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Stock records and adjustments have no identity of their own: two values with
/// the same fields are the same value. To "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
