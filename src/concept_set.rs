use crate::concept::{Concept, ConceptKey};
use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
use tracing::warn;

/// Receiver for concepts as an enumeration emits them.
///
/// This is the streaming seam for consumers that do not need the whole
/// result in memory, such as writers.
pub trait ConceptSink {
    fn accept(&mut self, concept: Concept);
}

impl ConceptSink for Vec<Concept> {
    fn accept(&mut self, concept: Concept) {
        self.push(concept);
    }
}

impl ConceptSink for ConceptSet {
    fn accept(&mut self, concept: Concept) {
        self.push(concept);
    }
}

/// Emission-ordered collection of distinct concepts.
///
/// A concept's number is its position in emission order. Correct
/// enumerators never emit a concept twice; duplicates are dropped and
/// counted so callers can detect a broken enumerator.
///
/// Each concept is stored once; the index maps concept hashes to the
/// numbers of the concepts carrying them.
#[derive(Debug, Clone, Default)]
pub struct ConceptSet {
    concepts: Vec<Concept>,
    index: HashMap<u64, Vec<usize>>,
    hasher: RandomState,
    duplicates: usize,
}

impl ConceptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            concepts: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            hasher: RandomState::new(),
            duplicates: 0,
        }
    }

    /// Appends a concept, returning false if it was already present.
    pub fn push(&mut self, concept: Concept) -> bool {
        let hash = self.hasher.hash_one(&concept);
        if let Some(number) = self.find(hash, &concept) {
            self.duplicates += 1;
            warn!(number, concept = ?concept, "duplicate concept dropped");
            return false;
        }
        self.index.entry(hash).or_default().push(self.concepts.len());
        self.concepts.push(concept);
        true
    }

    fn find(&self, hash: u64, concept: &Concept) -> Option<usize> {
        self.index
            .get(&hash)?
            .iter()
            .copied()
            .find(|&number| self.concepts[number] == *concept)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Number of rejected duplicate pushes.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Concept with the given number.
    pub fn get(&self, number: usize) -> Option<&Concept> {
        self.concepts.get(number)
    }

    /// Number of a concept, if present.
    pub fn position(&self, concept: &Concept) -> Option<usize> {
        self.find(self.hasher.hash_one(concept), concept)
    }

    pub fn contains(&self, concept: &Concept) -> bool {
        self.position(concept).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Concept> {
        self.concepts.iter()
    }

    /// Concepts paired with their numbers.
    pub fn iter_numbered(&self) -> impl Iterator<Item = (usize, &Concept)> {
        self.concepts.iter().enumerate()
    }

    pub fn as_slice(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn into_vec(self) -> Vec<Concept> {
        self.concepts
    }

    /// Concepts present in both sets, in this set's order.
    pub fn intersection<'a>(&'a self, other: &'a ConceptSet) -> impl Iterator<Item = &'a Concept> {
        self.concepts.iter().filter(move |c| other.contains(c))
    }

    /// Concepts of this set missing from `other`, in this set's order.
    pub fn difference<'a>(&'a self, other: &'a ConceptSet) -> impl Iterator<Item = &'a Concept> {
        self.concepts.iter().filter(move |c| !other.contains(c))
    }

    /// True if both sets hold the same concepts, regardless of order.
    pub fn same_concepts(&self, other: &ConceptSet) -> bool {
        self.len() == other.len() && self.concepts.iter().all(|c| other.contains(c))
    }

    /// Normalized keys, in emission order.
    pub fn keys(&self) -> impl Iterator<Item = ConceptKey> + '_ {
        self.concepts.iter().map(Concept::key)
    }

    /// Matches this set against concepts reported by another source.
    pub fn compare_keys<I>(&self, reported: I) -> KeyComparison
    where
        I: IntoIterator<Item = ConceptKey>,
    {
        let ours: HashSet<ConceptKey> = self.keys().collect();
        let mut seen = HashSet::default();
        let mut comparison = KeyComparison::default();

        for key in reported {
            if !seen.insert(key.clone()) {
                continue;
            }
            if ours.contains(&key) {
                comparison.matched.push(key);
            } else {
                comparison.unexpected.push(key);
            }
        }
        comparison.missing = self.keys().filter(|key| !seen.contains(key)).collect();
        comparison
    }
}

/// Result of [`ConceptSet::compare_keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyComparison {
    /// Reported and enumerated.
    pub matched: Vec<ConceptKey>,
    /// Enumerated but not reported.
    pub missing: Vec<ConceptKey>,
    /// Reported but not enumerated.
    pub unexpected: Vec<ConceptKey>,
}

impl KeyComparison {
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl FromIterator<Concept> for ConceptSet {
    fn from_iter<I: IntoIterator<Item = Concept>>(iter: I) -> Self {
        let mut set = ConceptSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Concept> for ConceptSet {
    fn extend<I: IntoIterator<Item = Concept>>(&mut self, iter: I) {
        for concept in iter {
            self.push(concept);
        }
    }
}

impl IntoIterator for ConceptSet {
    type Item = Concept;
    type IntoIter = std::vec::IntoIter<Concept>;

    fn into_iter(self) -> Self::IntoIter {
        self.concepts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConceptSet {
    type Item = &'a Concept;
    type IntoIter = std::slice::Iter<'a, Concept>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
