use crate::bitset::BitSet;
use crate::error::{FcaError, Result};
use tracing::debug;

/// Immutable binary incidence between objects `0..G` and attributes `0..M`.
///
/// Stored twice: one attribute bit set per object (rows) and one object bit
/// set per attribute (columns), so both derivations are word-wise ANDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    rows: Vec<BitSet>,
    columns: Vec<BitSet>,
    objects: usize,
    attributes: usize,
}

impl Relation {
    /// Builds a relation from a total incidence predicate `I(g, m)`.
    ///
    /// # Example
    ///
    /// ```
    /// use fca_rs::Relation;
    ///
    /// // o0:{a0}, o1:{a0,a1}, o2:{a1}
    /// let rel = Relation::new(3, 2, |g, m| matches!((g, m), (0, 0) | (1, _) | (2, 1)));
    /// assert!(rel.incident(1, 1));
    /// assert!(!rel.incident(2, 0));
    /// ```
    pub fn new<F>(objects: usize, attributes: usize, incidence: F) -> Self
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut rows = vec![BitSet::new(attributes); objects];
        let mut columns = vec![BitSet::new(objects); attributes];

        for (g, row) in rows.iter_mut().enumerate() {
            for (m, column) in columns.iter_mut().enumerate() {
                if incidence(g, m) {
                    row.insert(m);
                    column.insert(g);
                }
            }
        }

        let relation = Self {
            rows,
            columns,
            objects,
            attributes,
        };
        debug!(
            objects,
            attributes,
            incidences = relation.incidence_count(),
            "relation built"
        );
        relation
    }

    /// Builds a relation from the list of incident `(object, attribute)` cells.
    ///
    /// Fails if any cell lies outside `[0, objects) x [0, attributes)`.
    /// Repeated cells are accepted.
    pub fn from_pairs<I>(objects: usize, attributes: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut rows = vec![BitSet::new(attributes); objects];
        let mut columns = vec![BitSet::new(objects); attributes];

        for (g, m) in pairs {
            if g >= objects || m >= attributes {
                return Err(FcaError::malformed(format!(
                    "cell ({}, {}) outside {}x{} grid",
                    g, m, objects, attributes
                )));
            }
            rows[g].insert(m);
            columns[m].insert(g);
        }

        let relation = Self {
            rows,
            columns,
            objects,
            attributes,
        };
        debug!(
            objects,
            attributes,
            incidences = relation.incidence_count(),
            "relation built from pairs"
        );
        Ok(relation)
    }

    /// Like [`Relation::from_pairs`] for callers holding signed counts, such
    /// as parsers of external formats. Negative counts or cells are rejected.
    pub fn from_signed_pairs<I>(objects: i64, attributes: i64, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let objects = usize::try_from(objects)
            .map_err(|_| FcaError::malformed(format!("negative object count {}", objects)))?;
        let attributes = usize::try_from(attributes)
            .map_err(|_| FcaError::malformed(format!("negative attribute count {}", attributes)))?;

        let cells = pairs
            .into_iter()
            .map(|(g, m)| match (usize::try_from(g), usize::try_from(m)) {
                (Ok(g), Ok(m)) => Ok((g, m)),
                _ => Err(FcaError::malformed(format!(
                    "cell ({}, {}) outside {}x{} grid",
                    g, m, objects, attributes
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_pairs(objects, attributes, cells)
    }

    /// Builds a relation from a boolean matrix with one row per object.
    ///
    /// The attribute count is taken from the first row; an empty matrix has
    /// no attributes. Use [`Relation::from_rows_with_width`] to keep
    /// attributes when there are no objects.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        Self::from_rows_with_width(width, rows)
    }

    /// Builds a relation from a boolean matrix, requiring every row to have
    /// exactly `attributes` cells.
    pub fn from_rows_with_width<R: AsRef<[bool]>>(attributes: usize, rows: &[R]) -> Result<Self> {
        if let Some((g, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != attributes)
        {
            return Err(FcaError::malformed(format!(
                "row {} has {} cells, expected {}",
                g,
                row.as_ref().len(),
                attributes
            )));
        }
        Ok(Self::new(rows.len(), attributes, |g, m| rows[g].as_ref()[m]))
    }

    /// Number of objects `|G|`.
    pub fn object_count(&self) -> usize {
        self.objects
    }

    /// Number of attributes `|M|`.
    pub fn attribute_count(&self) -> usize {
        self.attributes
    }

    /// True when there are neither objects nor attributes.
    pub fn is_empty(&self) -> bool {
        self.objects == 0 && self.attributes == 0
    }

    /// Whether object `g` has attribute `m`. Out-of-range cells are not incident.
    pub fn incident(&self, g: usize, m: usize) -> bool {
        self.rows.get(g).is_some_and(|row| row.contains(m))
    }

    /// Attributes of a single object.
    pub fn object_row(&self, g: usize) -> Option<&BitSet> {
        self.rows.get(g)
    }

    /// Objects having a single attribute.
    pub fn attribute_column(&self, m: usize) -> Option<&BitSet> {
        self.columns.get(m)
    }

    pub fn all_objects(&self) -> BitSet {
        BitSet::full(self.objects)
    }

    pub fn all_attributes(&self) -> BitSet {
        BitSet::full(self.attributes)
    }

    /// Total number of incident pairs.
    pub fn incidence_count(&self) -> usize {
        self.rows.iter().map(BitSet::len).sum()
    }

    /// Fraction of incident cells, 0.0 for an empty grid.
    pub fn density(&self) -> f64 {
        let cells = self.objects * self.attributes;
        if cells == 0 {
            0.0
        } else {
            self.incidence_count() as f64 / cells as f64
        }
    }

    /// Objects having every attribute in `attributes`.
    ///
    /// The empty attribute set yields every object.
    ///
    /// # Panics
    ///
    /// Panics if `attributes` is not sized to the attribute count.
    pub fn objects_with(&self, attributes: &BitSet) -> BitSet {
        assert_eq!(
            attributes.capacity(),
            self.attributes,
            "attribute set has capacity {}, relation has {} attributes",
            attributes.capacity(),
            self.attributes
        );
        let mut extent = BitSet::full(self.objects);
        for m in attributes {
            extent.intersect_with(&self.columns[m]);
            if extent.is_empty() {
                break;
            }
        }
        extent
    }

    /// Attributes shared by every object in `objects`.
    ///
    /// The empty object set yields every attribute.
    ///
    /// # Panics
    ///
    /// Panics if `objects` is not sized to the object count.
    pub fn attributes_of(&self, objects: &BitSet) -> BitSet {
        assert_eq!(
            objects.capacity(),
            self.objects,
            "object set has capacity {}, relation has {} objects",
            objects.capacity(),
            self.objects
        );
        let mut intent = BitSet::full(self.attributes);
        for g in objects {
            intent.intersect_with(&self.rows[g]);
            if intent.is_empty() {
                break;
            }
        }
        intent
    }
}
