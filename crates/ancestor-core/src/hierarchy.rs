//! In-memory class hierarchy implementing [`ClassMetadata`].

use crate::error::HierarchyError;
use crate::metadata::ClassMetadata;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub(crate) const CURRENT_VERSION: &str = "1.0.0";

/// One class definition: its parent (if any) and whether it maps to a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    #[serde(default)]
    pub parent: Option<String>,
    /// Whether the class is persisted to its own storage table.
    #[serde(default)]
    pub has_table: bool,
}

/// A single-inheritance class hierarchy keyed by class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHierarchy {
    pub version: String,
    pub classes: BTreeMap<String, ClassDef>,
}

impl Default for ClassHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            classes: BTreeMap::new(),
        }
    }

    /// Define (or redefine) a class.
    pub fn insert_class(
        &mut self,
        name: impl Into<String>,
        parent: Option<&str>,
        has_table: bool,
    ) -> &mut Self {
        self.classes.insert(
            name.into(),
            ClassDef {
                parent: parent.map(String::from),
                has_table,
            },
        );
        self
    }

    pub fn get(&self, class: &str) -> Option<&ClassDef> {
        self.classes.get(class)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.keys().map(String::as_str)
    }

    /// Direct subclasses of `class`, in name order.
    pub fn children(&self, class: &str) -> Vec<&str> {
        self.classes
            .iter()
            .filter(|(_, def)| def.parent.as_deref() == Some(class))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Walk parent links from `class` upward, nearest first.
    ///
    /// Stops at the root, at a parent that is not defined, or at a class already
    /// visited, so malformed hierarchies still yield a finite chain.
    fn lineage(&self, class: &str) -> Vec<(&str, &ClassDef)> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.classes.get_key_value(class);

        while let Some((name, def)) = current {
            if !seen.insert(name.as_str()) {
                break;
            }
            chain.push((name.as_str(), def));
            current = def
                .parent
                .as_deref()
                .and_then(|parent| self.classes.get_key_value(parent));
        }
        chain
    }

    /// Check that every parent is defined and no class inherits from itself.
    ///
    /// Classes are checked in name order; the first problem found is returned.
    pub fn validate(&self) -> Result<(), HierarchyError> {
        for (name, def) in &self.classes {
            if let Some(parent) = &def.parent
                && !self.classes.contains_key(parent)
            {
                return Err(HierarchyError::DanglingParent {
                    class: name.clone(),
                    parent: parent.clone(),
                });
            }
        }

        for name in self.classes.keys() {
            let mut seen = HashSet::new();
            let mut current = Some(name.as_str());
            while let Some(class) = current {
                if !seen.insert(class) {
                    return Err(HierarchyError::Cycle {
                        class: name.clone(),
                    });
                }
                current = self
                    .classes
                    .get(class)
                    .and_then(|def| def.parent.as_deref());
            }
        }
        Ok(())
    }
}

impl ClassMetadata for ClassHierarchy {
    fn exists(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    fn ancestry(&self, class: &str, tables_only: bool) -> Vec<String> {
        self.lineage(class)
            .into_iter()
            .rev()
            .filter(|(_, def)| !tables_only || def.has_table)
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassHierarchy {
        let mut h = ClassHierarchy::new();
        h.insert_class("Base", None, true)
            .insert_class("Middle", Some("Base"), false)
            .insert_class("LeafA", Some("Middle"), true)
            .insert_class("LeafB", Some("Middle"), true);
        h
    }

    #[test]
    fn test_ancestry_root_first() {
        let h = sample();
        assert_eq!(h.ancestry("LeafA", false), vec!["Base", "Middle", "LeafA"]);
        assert_eq!(h.ancestry("Base", false), vec!["Base"]);
    }

    #[test]
    fn test_ancestry_tables_only() {
        let h = sample();
        assert_eq!(h.ancestry("LeafA", true), vec!["Base", "LeafA"]);
        assert!(h.ancestry("Middle", true).iter().all(|c| c != "Middle"));
    }

    #[test]
    fn test_ancestry_unknown_class_is_empty() {
        let h = sample();
        assert!(!h.exists("Nope"));
        assert!(h.ancestry("Nope", false).is_empty());
    }

    #[test]
    fn test_children_in_name_order() {
        let h = sample();
        assert_eq!(h.children("Middle"), vec!["LeafA", "LeafB"]);
        assert!(h.children("LeafA").is_empty());
    }

    #[test]
    fn test_class_names_sorted() {
        let h = sample();
        let names: Vec<&str> = h.class_names().collect();
        assert_eq!(names, vec!["Base", "LeafA", "LeafB", "Middle"]);
    }

    #[test]
    fn test_insert_overwrites_definition() {
        let mut h = sample();
        h.insert_class("Middle", Some("Base"), true);
        assert_eq!(h.len(), 4);
        assert!(h.get("Middle").unwrap().has_table);
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
        assert!(ClassHierarchy::new().validate().is_ok());
    }

    #[test]
    fn test_validate_dangling_parent() {
        let mut h = sample();
        h.insert_class("Orphan", Some("Ghost"), false);
        assert_eq!(
            h.validate(),
            Err(HierarchyError::DanglingParent {
                class: "Orphan".to_string(),
                parent: "Ghost".to_string(),
            })
        );
        // The walk stops at the missing parent.
        assert_eq!(h.ancestry("Orphan", false), vec!["Orphan"]);
    }

    #[test]
    fn test_validate_cycle() {
        let mut h = ClassHierarchy::new();
        h.insert_class("A", Some("B"), false)
            .insert_class("B", Some("A"), false);
        assert_eq!(
            h.validate(),
            Err(HierarchyError::Cycle {
                class: "A".to_string()
            })
        );
        assert_eq!(h.ancestry("A", false), vec!["B", "A"]);
    }
}
