//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared entirely by their attribute
/// values: `Money { cents: 100 }` equals any other `Money { cents: 100 }`,
/// while two employees with the same name are still distinct entities.
///
/// To "modify" a value object, build a new one. This keeps values safe to
/// copy across threads and predictable to reason about.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
