use crate::concept_set::ConceptSet;
use tracing::debug;

/// Cover relation of a set of concepts ordered by extent inclusion.
///
/// Concepts are referred to by their numbers in the source [`ConceptSet`].
/// `c` is an upper cover of `d` when `extent(d) ⊂ extent(c)` with no
/// concept strictly in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    upper: Vec<Vec<usize>>,
    lower: Vec<Vec<usize>>,
}

impl Lattice {
    pub fn from_concepts(concepts: &ConceptSet) -> Self {
        let n = concepts.len();
        let mut by_size: Vec<usize> = (0..n).collect();
        by_size.sort_by_key(|&i| concepts.as_slice()[i].support());

        let mut upper = vec![Vec::new(); n];
        let mut lower = vec![Vec::new(); n];

        for i in 0..n {
            let extent = concepts.as_slice()[i].extent();
            let mut covers: Vec<usize> = Vec::new();
            for &j in &by_size {
                let candidate = concepts.as_slice()[j].extent();
                if !extent.is_strict_subset(candidate) {
                    continue;
                }
                // Candidates come smallest first, so anything in between
                // is already among the accepted covers.
                let dominated = covers
                    .iter()
                    .any(|&k| concepts.as_slice()[k].extent().is_subset(candidate));
                if !dominated {
                    covers.push(j);
                }
            }
            covers.sort_unstable();
            for &j in &covers {
                lower[j].push(i);
            }
            upper[i] = covers;
        }

        let lattice = Self { upper, lower };
        debug!(
            concepts = n,
            edges = lattice.edge_count(),
            "cover relation built"
        );
        lattice
    }

    /// Number of concepts.
    pub fn len(&self) -> usize {
        self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }

    /// Immediate superconcepts of concept `number`.
    pub fn upper_covers(&self, number: usize) -> &[usize] {
        self.upper.get(number).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Immediate subconcepts of concept `number`.
    pub fn lower_covers(&self, number: usize) -> &[usize] {
        self.lower.get(number).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The unique concept without superconcepts, if there is exactly one.
    pub fn top(&self) -> Option<usize> {
        unique(self.upper.iter().map(Vec::is_empty))
    }

    /// The unique concept without subconcepts, if there is exactly one.
    pub fn bottom(&self) -> Option<usize> {
        unique(self.lower.iter().map(Vec::is_empty))
    }

    /// Number of cover pairs.
    pub fn edge_count(&self) -> usize {
        self.upper.iter().map(Vec::len).sum()
    }

    /// Cover pairs as `(lower, upper)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.upper
            .iter()
            .enumerate()
            .flat_map(|(i, covers)| covers.iter().map(move |&j| (i, j)))
    }
}

fn unique(flags: impl Iterator<Item = bool>) -> Option<usize> {
    let mut found = None;
    for (i, flag) in flags.enumerate() {
        if flag {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}
