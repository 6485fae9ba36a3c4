//! Closest common ancestor resolution over a [`ClassMetadata`] provider.

use crate::error::ResolveError;
use crate::metadata::ClassMetadata;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Occurrence counts of ancestors across a set of ancestry chains.
///
/// Each identifier is counted at most once per recorded chain, so after recording
/// N chains a count of N means "present in every chain".
#[derive(Debug, Default)]
pub struct AncestorTally {
    counts: HashMap<String, usize>,
    chains: usize,
}

impl AncestorTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one class's ancestry chain.
    pub fn record_chain(&mut self, chain: &[String]) {
        let mut seen: HashSet<&str> = HashSet::with_capacity(chain.len());
        for class in chain {
            if seen.insert(class.as_str()) {
                *self.counts.entry(class.clone()).or_insert(0) += 1;
            }
        }
        self.chains += 1;
    }

    /// Number of recorded chains containing `class`.
    pub fn count(&self, class: &str) -> usize {
        self.counts.get(class).copied().unwrap_or(0)
    }

    /// Number of chains recorded so far.
    pub fn chains(&self) -> usize {
        self.chains
    }

    /// Number of distinct identifiers seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Identifiers present in every recorded chain, collected into a new set.
    pub fn common(&self) -> HashSet<String> {
        self.counts
            .iter()
            .filter(|&(_, &count)| count == self.chains)
            .map(|(class, _)| class.clone())
            .collect()
    }
}

/// Finds the closest common ancestor of a set of classes.
///
/// Holds nothing but the provider; every call builds and discards its own tally,
/// so one resolver can serve any number of independent calls.
#[derive(Debug, Clone)]
pub struct AncestorResolver<M> {
    metadata: M,
}

impl<M: ClassMetadata> AncestorResolver<M> {
    pub fn new(metadata: M) -> Self {
        Self { metadata }
    }

    /// Resolve the closest (most specific) ancestor shared by all `classes`.
    ///
    /// 1. Reject an empty input and any class the provider does not know.
    /// 2. A single class is its own closest common ancestor. Repeating one class
    ///    does not count as a single class; it is tallied like any other input.
    /// 3. Tally every class's ancestry chain and keep the identifiers present in all of them.
    /// 4. With one survivor, return it. With several, walk the first class's chain
    ///    nearest-first and return the first survivor met.
    pub fn resolve<S: AsRef<str>>(
        &self,
        classes: &[S],
        tables_only: bool,
    ) -> Result<String, ResolveError> {
        let distinct = self.known_distinct(classes)?;
        if let [only] = classes {
            return Ok(only.as_ref().to_string());
        }

        let (reference, mut common) = self.tally_chains(&distinct, tables_only);
        match common.len() {
            0 => Err(ResolveError::NoCommonAncestor),
            1 => common.drain().next().ok_or(ResolveError::NoCommonAncestor),
            n => {
                debug!(candidates = n, "breaking tie along first class's ancestry");
                reference
                    .into_iter()
                    .rev()
                    .find(|class| common.contains(class))
                    .ok_or(ResolveError::NoCommonAncestor)
            }
        }
    }

    /// Every ancestor shared by all `classes`, nearest first.
    ///
    /// The first element is what [`resolve`](Self::resolve) returns, except for a
    /// single input: `resolve` returns the class as-is while this lists its chain.
    pub fn common_ancestors<S: AsRef<str>>(
        &self,
        classes: &[S],
        tables_only: bool,
    ) -> Result<Vec<String>, ResolveError> {
        let classes = self.known_distinct(classes)?;
        let (reference, mut common) = self.tally_chains(&classes, tables_only);

        let ordered: Vec<String> = reference
            .into_iter()
            .rev()
            .filter(|class| common.remove(class))
            .collect();
        if ordered.is_empty() {
            return Err(ResolveError::NoCommonAncestor);
        }
        Ok(ordered)
    }

    /// Validate inputs in order and drop repeated identifiers.
    fn known_distinct<'c, S: AsRef<str>>(
        &self,
        classes: &'c [S],
    ) -> Result<Vec<&'c str>, ResolveError> {
        if classes.is_empty() {
            return Err(ResolveError::InvalidInput);
        }

        let mut seen = HashSet::with_capacity(classes.len());
        let mut distinct = Vec::with_capacity(classes.len());
        for class in classes.iter().map(AsRef::as_ref) {
            if !self.metadata.exists(class) {
                return Err(ResolveError::UnknownClass {
                    class: class.to_string(),
                });
            }
            if seen.insert(class) {
                distinct.push(class);
            }
        }
        Ok(distinct)
    }

    /// Returns the first class's chain (root first) and the common ancestor set.
    fn tally_chains(&self, classes: &[&str], tables_only: bool) -> (Vec<String>, HashSet<String>) {
        let mut tally = AncestorTally::new();
        let mut reference = Vec::new();

        for (i, class) in classes.iter().enumerate() {
            let chain = self.metadata.ancestry(class, tables_only);
            debug!(class, depth = chain.len(), tables_only, "collected ancestry");
            tally.record_chain(&chain);
            if i == 0 {
                reference = chain;
            }
        }

        let common = tally.common();
        debug!(
            inputs = classes.len(),
            ancestors = tally.len(),
            common = common.len(),
            "tallied ancestry chains"
        );
        (reference, common)
    }
}

/// Resolve the closest common ancestor of `classes` with a one-off resolver.
pub fn closest_common_ancestor<M: ClassMetadata, S: AsRef<str>>(
    metadata: M,
    classes: &[S],
    tables_only: bool,
) -> Result<String, ResolveError> {
    AncestorResolver::new(metadata).resolve(classes, tables_only)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Provider backed by literal chains, for shapes a real hierarchy can't produce.
    struct Chains(HashMap<&'static str, Vec<&'static str>>);

    impl ClassMetadata for Chains {
        fn exists(&self, class: &str) -> bool {
            self.0.contains_key(class)
        }

        fn ancestry(&self, class: &str, _tables_only: bool) -> Vec<String> {
            self.0
                .get(class)
                .map(|chain| chain.iter().map(|c| c.to_string()).collect())
                .unwrap_or_default()
        }
    }

    fn chains(entries: &[(&'static str, &[&'static str])]) -> Chains {
        Chains(
            entries
                .iter()
                .map(|(class, chain)| (*class, chain.to_vec()))
                .collect(),
        )
    }

    fn to_strings(chain: &[&str]) -> Vec<String> {
        chain.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_tally_counts_each_chain_once() {
        let mut tally = AncestorTally::new();
        tally.record_chain(&to_strings(&["Base", "Middle", "Middle", "LeafA"]));
        tally.record_chain(&to_strings(&["Base", "Middle", "LeafB"]));

        assert_eq!(tally.chains(), 2);
        assert_eq!(tally.count("Middle"), 2);
        assert_eq!(tally.count("LeafA"), 1);
        assert_eq!(tally.count("Missing"), 0);
        assert_eq!(tally.len(), 4);

        let common = tally.common();
        assert_eq!(common.len(), 2);
        assert!(common.contains("Base"));
        assert!(common.contains("Middle"));
    }

    #[test]
    fn test_empty_tally_has_no_common() {
        let tally = AncestorTally::new();
        assert!(tally.is_empty());
        assert!(tally.common().is_empty());
    }

    #[test]
    fn test_tie_break_walks_first_chain() {
        let provider = chains(&[
            ("A", &["Root", "Mid", "Low", "A"]),
            ("B", &["Root", "Mid", "Low", "B"]),
        ]);
        let resolver = AncestorResolver::new(&provider);
        assert_eq!(resolver.resolve(&["A", "B"], false).unwrap(), "Low");
        assert_eq!(
            resolver.common_ancestors(&["A", "B"], false).unwrap(),
            vec!["Low", "Mid", "Root"]
        );
    }

    #[test]
    fn test_disjoint_chains_have_no_common_ancestor() {
        let provider = chains(&[("A", &["RootA", "A"]), ("B", &["RootB", "B"])]);
        let resolver = AncestorResolver::new(&provider);
        assert_eq!(
            resolver.resolve(&["A", "B"], false),
            Err(ResolveError::NoCommonAncestor)
        );
        assert_eq!(
            resolver.common_ancestors(&["A", "B"], false),
            Err(ResolveError::NoCommonAncestor)
        );
    }

    #[test]
    fn test_empty_chain_from_provider() {
        let provider = chains(&[("A", &[]), ("B", &["B"])]);
        let err = closest_common_ancestor(&provider, &["A", "B"], false).unwrap_err();
        assert_eq!(err, ResolveError::NoCommonAncestor);
    }

    #[test]
    fn test_duplicate_inputs_collapse() {
        let provider = chains(&[("A", &["Root", "A"]), ("B", &["Root", "B"])]);
        let resolver = AncestorResolver::new(&provider);
        assert_eq!(resolver.resolve(&["A", "A"], false).unwrap(), "A");
        assert_eq!(resolver.resolve(&["A", "A"], true).unwrap(), "A");
        assert_eq!(resolver.resolve(&["A", "B", "A"], false).unwrap(), "Root");
    }

    #[test]
    fn test_unknown_reported_before_work() {
        let provider = chains(&[("A", &["A"])]);
        let resolver = AncestorResolver::new(&provider);
        assert_eq!(
            resolver.resolve(&["A", "Nope", "AlsoNope"], false),
            Err(ResolveError::UnknownClass {
                class: "Nope".to_string()
            })
        );
    }

    #[test]
    fn test_empty_input_rejected() {
        let provider = chains(&[]);
        let resolver = AncestorResolver::new(&provider);
        let none: [&str; 0] = [];
        assert_eq!(
            resolver.resolve(&none, false),
            Err(ResolveError::InvalidInput)
        );
        assert_eq!(
            resolver.common_ancestors(&none, true),
            Err(ResolveError::InvalidInput)
        );
    }
}
