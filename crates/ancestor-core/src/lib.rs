//! Closest common ancestor resolution for class hierarchies.
//!
//! Provides the class metadata provider trait ([`metadata::ClassMetadata`]), the
//! ancestor resolver ([`resolver::AncestorResolver`]), an in-memory hierarchy that
//! implements the provider, JSON persistence for hierarchies, and configuration.

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod metadata;
pub mod resolver;
pub mod schema;
pub mod storage;

pub use error::{HierarchyError, ResolveError};
pub use hierarchy::{ClassDef, ClassHierarchy};
pub use metadata::ClassMetadata;
pub use resolver::{AncestorResolver, AncestorTally, closest_common_ancestor};
