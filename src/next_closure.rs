use crate::bitset::BitSet;
use crate::cancel::{self, CancelFlag};
use crate::closure::Closure;
use crate::concept::Concept;
use crate::relation::Relation;
use tracing::{debug, trace};

/// Returns the lectically next closed attribute set after `current`, or
/// `None` if `current` is the last one (the full attribute set).
///
/// `current` must itself be closed.
pub fn next_closed(closure: &Closure<'_>, current: &BitSet) -> Option<BitSet> {
    for i in (0..current.capacity()).rev() {
        if current.contains(i) {
            continue;
        }

        // Candidate: elements of `current` below i, plus i.
        let mut candidate = current.truncated_below(i);
        candidate.insert(i);
        let closed = closure.close(&candidate);

        if closed.agrees_below(current, i) {
            return Some(closed);
        }
    }
    None
}

enum State {
    Active(BitSet),
    Done,
}

/// NextClosure enumeration as an iterator.
///
/// Yields every concept of the relation exactly once, with intents in
/// strictly increasing lectic order. Intrinsically sequential.
///
/// # Example
///
/// ```
/// use fca_rs::{NextClosure, Relation};
///
/// let rel = Relation::from_pairs(3, 2, [(0, 0), (1, 0), (1, 1), (2, 1)]).unwrap();
/// let intents: Vec<Vec<usize>> = NextClosure::new(&rel).map(|c| c.intent_indices()).collect();
/// assert_eq!(intents, vec![vec![], vec![1], vec![0], vec![0, 1]]);
/// ```
pub struct NextClosure<'a> {
    closure: Closure<'a>,
    state: State,
    cancel: Option<CancelFlag>,
    cancelled: bool,
    emitted: usize,
}

impl<'a> NextClosure<'a> {
    /// Starts at `closure(∅)`.
    pub fn new(relation: &'a Relation) -> Self {
        let closure = Closure::new(relation);
        let first = closure.close(&closure.empty_intent());
        Self {
            closure,
            state: State::Active(first),
            cancel: None,
            cancelled: false,
            emitted: 0,
        }
    }

    /// Stops the enumeration at the next transition once `flag` is set.
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// True if the iterator ended because of the cancellation flag.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Number of concepts yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl Iterator for NextClosure<'_> {
    type Item = Concept;

    fn next(&mut self) -> Option<Concept> {
        let State::Active(intent) = std::mem::replace(&mut self.state, State::Done) else {
            return None;
        };

        if cancel::is_set(self.cancel.as_ref()) {
            self.cancelled = true;
            debug!(emitted = self.emitted, "next closure cancelled");
            return None;
        }

        let extent = self.closure.extent_of(&intent);
        match next_closed(&self.closure, &intent) {
            Some(next) => self.state = State::Active(next),
            None => debug!(emitted = self.emitted + 1, "next closure exhausted"),
        }

        self.emitted += 1;
        trace!(extent = ?extent, intent = ?intent, "concept");
        Some(Concept::new(extent, intent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    fn intents(rel: &Relation) -> Vec<Vec<usize>> {
        NextClosure::new(rel).map(|c| c.intent_indices()).collect()
    }

    #[test]
    fn test_scenario() {
        // o0:{a0}, o1:{a0,a1}, o2:{a1}
        let rel = Relation::from_pairs(3, 2, [(0, 0), (1, 0), (1, 1), (2, 1)]).unwrap();
        let concepts: Vec<_> = NextClosure::new(&rel)
            .map(|c| (c.extent_indices(), c.intent_indices()))
            .collect();
        assert_eq!(
            concepts,
            vec![
                (vec![0, 1, 2], vec![]),
                (vec![1, 2], vec![1]),
                (vec![0, 1], vec![0]),
                (vec![1], vec![0, 1]),
            ]
        );
    }

    #[test]
    fn test_full_incidence() {
        let rel = Relation::new(3, 4, |_, _| true);
        let concepts: Vec<_> = NextClosure::new(&rel).collect();
        assert_eq!(concepts.len(), 1);
        assert_eq!(concepts[0].extent(), &rel.all_objects());
        assert_eq!(concepts[0].intent(), &rel.all_attributes());
    }

    #[test]
    fn test_no_incidence() {
        let rel = Relation::new(3, 2, |_, _| false);
        let concepts: Vec<_> = NextClosure::new(&rel).collect();
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts[0].extent(), &rel.all_objects());
        assert!(concepts[0].intent().is_empty());
        assert!(concepts[1].extent().is_empty());
        assert_eq!(concepts[1].intent(), &rel.all_attributes());
    }

    #[test]
    fn test_no_attributes() {
        let rel = Relation::new(4, 0, |_, _| true);
        let concepts: Vec<_> = NextClosure::new(&rel).collect();
        assert_eq!(concepts.len(), 1);
        assert_eq!(concepts[0].extent_indices(), vec![0, 1, 2, 3]);
        assert!(concepts[0].intent().is_empty());
    }

    #[test]
    fn test_no_objects() {
        let rel = Relation::new(0, 3, |_, _| true);
        let concepts: Vec<_> = NextClosure::new(&rel).collect();
        assert_eq!(concepts.len(), 1);
        assert!(concepts[0].extent().is_empty());
        assert_eq!(concepts[0].intent_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_relation() {
        let rel = Relation::new(0, 0, |_, _| true);
        assert_eq!(intents(&rel), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_diagonal_is_powerset() {
        // Object i lacks only attribute i: every subset is closed.
        let rel = Relation::new(3, 3, |g, m| g != m);
        let all = intents(&rel);
        assert_eq!(all.len(), 8);
        assert_eq!(
            all,
            vec![
                vec![],
                vec![2],
                vec![1],
                vec![1, 2],
                vec![0],
                vec![0, 2],
                vec![0, 1],
                vec![0, 1, 2],
            ]
        );
    }

    #[test]
    fn test_lectic_increasing() {
        let rel = Relation::new(6, 5, |g, m| (g * 7 + m * 3) % 4 != 0);
        let concepts: Vec<_> = NextClosure::new(&rel).collect();
        for pair in concepts.windows(2) {
            assert_eq!(pair[0].intent().lectic_cmp(pair[1].intent()), Ordering::Less);
        }
    }

    #[test]
    fn test_next_closed_last() {
        let rel = Relation::new(2, 2, |g, m| g == m);
        let closure = Closure::new(&rel);
        assert_eq!(next_closed(&closure, &rel.all_attributes()), None);
    }

    #[test]
    fn test_cancel_before_start() {
        let rel = Relation::new(3, 3, |g, m| g != m);
        let flag = CancelFlag::new();
        flag.cancel();
        let mut iter = NextClosure::new(&rel).with_cancel(flag);
        assert!(iter.next().is_none());
        assert!(iter.was_cancelled());
        assert_eq!(iter.emitted(), 0);
    }

    #[test]
    fn test_cancel_midway() {
        let rel = Relation::new(3, 3, |g, m| g != m);
        let flag = CancelFlag::new();
        let mut iter = NextClosure::new(&rel).with_cancel(flag.clone());
        assert!(iter.next().is_some());
        assert!(iter.next().is_some());
        flag.cancel();
        assert!(iter.next().is_none());
        assert!(iter.was_cancelled());
        assert_eq!(iter.emitted(), 2);
    }
}
