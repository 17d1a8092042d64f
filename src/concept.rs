use crate::bitset::BitSet;
use std::fmt;

/// A formal concept: a closed pair `(extent, intent)`.
///
/// Concepts are produced by the enumerators and never mutated afterwards.
/// Equality and hashing are structural over both sets.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Concept {
    extent: BitSet,
    intent: BitSet,
}

impl Concept {
    pub(crate) fn new(extent: BitSet, intent: BitSet) -> Self {
        Self { extent, intent }
    }

    /// The object set.
    pub fn extent(&self) -> &BitSet {
        &self.extent
    }

    /// The attribute set.
    pub fn intent(&self) -> &BitSet {
        &self.intent
    }

    /// Object indices in ascending order.
    pub fn extent_indices(&self) -> Vec<usize> {
        self.extent.to_indices()
    }

    /// Attribute indices in ascending order.
    pub fn intent_indices(&self) -> Vec<usize> {
        self.intent.to_indices()
    }

    /// Number of objects in the extent.
    pub fn support(&self) -> usize {
        self.extent.len()
    }

    /// `self <= other` in the concept order (extent inclusion).
    pub fn is_subconcept_of(&self, other: &Concept) -> bool {
        self.extent.is_subset(&other.extent)
    }

    /// Normalized value key, for matching against concepts produced elsewhere.
    pub fn key(&self) -> ConceptKey {
        ConceptKey {
            extent: self.extent_indices(),
            intent: self.intent_indices(),
        }
    }
}

impl fmt::Debug for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.extent, self.intent)
    }
}

/// Concept identity as sorted index lists.
///
/// External tools report concepts as object and attribute index lists;
/// building a `ConceptKey` from those allows comparing them with enumerated
/// concepts without going through bit sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptKey {
    pub extent: Vec<usize>,
    pub intent: Vec<usize>,
}

impl ConceptKey {
    /// Builds a key, sorting and deduplicating both lists.
    pub fn new(mut extent: Vec<usize>, mut intent: Vec<usize>) -> Self {
        extent.sort_unstable();
        extent.dedup();
        intent.sort_unstable();
        intent.dedup();
        Self { extent, intent }
    }
}

impl From<&Concept> for ConceptKey {
    fn from(concept: &Concept) -> Self {
        concept.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices() {
        let concept = Concept::new(
            BitSet::from_indices(4, [3, 1]),
            BitSet::from_indices(2, [0]),
        );
        assert_eq!(concept.extent_indices(), vec![1, 3]);
        assert_eq!(concept.intent_indices(), vec![0]);
        assert_eq!(concept.support(), 2);
    }

    #[test]
    fn test_structural_equality() {
        let a = Concept::new(BitSet::from_indices(3, [0]), BitSet::from_indices(2, [1]));
        let b = Concept::new(BitSet::from_indices(3, [0]), BitSet::from_indices(2, [1]));
        let c = Concept::new(BitSet::from_indices(3, [0]), BitSet::new(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_subconcept() {
        let bottom = Concept::new(BitSet::from_indices(3, [1]), BitSet::full(2));
        let top = Concept::new(BitSet::full(3), BitSet::new(2));
        assert!(bottom.is_subconcept_of(&top));
        assert!(!top.is_subconcept_of(&bottom));
    }

    #[test]
    fn test_key_normalizes() {
        let concept = Concept::new(BitSet::from_indices(5, [4, 0]), BitSet::from_indices(3, [2]));
        assert_eq!(concept.key(), ConceptKey::new(vec![4, 0, 4], vec![2]));
        assert_eq!(ConceptKey::from(&concept).extent, vec![0, 4]);
    }

    #[test]
    fn test_debug() {
        let concept = Concept::new(BitSet::from_indices(3, [0, 2]), BitSet::new(1));
        assert_eq!(format!("{:?}", concept), "({0, 2}, {})");
    }
}
