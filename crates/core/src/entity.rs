//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products and seasons are compared by id when deciding what to load or
/// persist; their other fields change over time.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
