//! Class metadata provider abstraction.
//!
//! The resolver never owns class information; it asks a provider whether a class
//! exists and what its lineage is. Implement this for whatever registry holds the
//! hierarchy (an ORM schema, a reflection table, a loaded [`crate::ClassHierarchy`]).

/// Read-only access to class existence and ancestry.
///
/// Lineage is assumed to be single-inheritance: every class has at most one
/// parent, so an ancestry chain is a total order with no repeated entries.
pub trait ClassMetadata {
    /// Whether `class` names a known class.
    fn exists(&self, class: &str) -> bool;

    /// Full lineage of `class`, root first, ending with the class itself.
    ///
    /// With `tables_only` set, classes that are not backed by a storage table
    /// are left out of the chain (the class itself included).
    fn ancestry(&self, class: &str, tables_only: bool) -> Vec<String>;
}

impl<T: ClassMetadata + ?Sized> ClassMetadata for &T {
    fn exists(&self, class: &str) -> bool {
        (**self).exists(class)
    }

    fn ancestry(&self, class: &str, tables_only: bool) -> Vec<String> {
        (**self).ancestry(class, tables_only)
    }
}
