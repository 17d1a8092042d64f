use crate::bitset::BitSet;
use crate::concept::Concept;
use crate::relation::Relation;

/// Galois connection over a [`Relation`].
///
/// `extent_of` and `intent_of` are the two derivation operators; `close` is
/// their composition on the attribute side. All operations are pure and
/// total, so a `Closure` is `Copy` and can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct Closure<'a> {
    relation: &'a Relation,
}

impl<'a> Closure<'a> {
    pub fn new(relation: &'a Relation) -> Self {
        Self { relation }
    }

    pub fn relation(&self) -> &'a Relation {
        self.relation
    }

    /// Derivation `A'` for an attribute set: the objects having all of `A`.
    #[inline]
    pub fn extent_of(&self, attributes: &BitSet) -> BitSet {
        self.relation.objects_with(attributes)
    }

    /// Derivation `B'` for an object set: the attributes common to all of `B`.
    #[inline]
    pub fn intent_of(&self, objects: &BitSet) -> BitSet {
        self.relation.attributes_of(objects)
    }

    /// Attribute closure `A''`.
    pub fn close(&self, attributes: &BitSet) -> BitSet {
        self.intent_of(&self.extent_of(attributes))
    }

    /// Object closure `B''`.
    pub fn close_extent(&self, objects: &BitSet) -> BitSet {
        self.extent_of(&self.intent_of(objects))
    }

    pub fn is_closed(&self, attributes: &BitSet) -> bool {
        self.close(attributes) == *attributes
    }

    /// The concept generated by an attribute set: `(A', A'')`.
    pub fn concept_of(&self, attributes: &BitSet) -> Concept {
        let extent = self.extent_of(attributes);
        let intent = self.intent_of(&extent);
        Concept::new(extent, intent)
    }

    /// The concept generated by an object set: `(B'', B')`.
    pub fn concept_of_objects(&self, objects: &BitSet) -> Concept {
        let intent = self.intent_of(objects);
        let extent = self.extent_of(&intent);
        Concept::new(extent, intent)
    }

    /// Empty attribute set of the right width.
    pub fn empty_intent(&self) -> BitSet {
        BitSet::new(self.relation.attribute_count())
    }
}
