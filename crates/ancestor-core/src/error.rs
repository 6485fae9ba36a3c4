//! Error types for ancestor resolution and hierarchy validation.

/// Errors from [`crate::resolver::AncestorResolver`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No classes were supplied.
    #[error("at least one class must be provided")]
    InvalidInput,
    /// An input identifier is not known to the metadata provider.
    #[error("invalid class provided: {class} does not exist")]
    UnknownClass { class: String },
    /// Resolution finished without a shared ancestor. Points at malformed
    /// ancestry data or at inputs from disjoint hierarchies.
    #[error("no common ancestor found")]
    NoCommonAncestor,
}

/// Structural problems found by [`crate::hierarchy::ClassHierarchy::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("class {class} has unknown parent {parent}")]
    DanglingParent { class: String, parent: String },
    #[error("inheritance cycle through class {class}")]
    Cycle { class: String },
}
