use crate::bitset::BitSet;
use crate::cancel::{self, CancelFlag};
use crate::closure::Closure;
use crate::concept::Concept;
use crate::relation::Relation;
use rayon::prelude::*;
use tracing::{debug, trace};

/// A search node still being expanded: a concept plus the next attribute
/// to try adding.
#[derive(Debug, Clone)]
struct Frame {
    extent: BitSet,
    intent: BitSet,
    next: usize,
}

impl Frame {
    fn concept(&self) -> Concept {
        Concept::new(self.extent.clone(), self.intent.clone())
    }
}

/// Tries to extend `frame` with attribute `j`.
///
/// Returns the child concept's frame if it is supported by at least one
/// object and passes the canonicity test: the closed intent adds no
/// attribute below `j` that the parent lacked.
fn child(closure: &Closure<'_>, frame: &Frame, j: usize) -> Option<Frame> {
    if frame.intent.contains(j) {
        return None;
    }
    let column = closure.relation().attribute_column(j)?;
    let extent = frame.extent.intersection(column);
    if extent.is_empty() {
        return None;
    }
    let intent = closure.intent_of(&extent);
    if intent.has_extra_below(&frame.intent, j) {
        return None;
    }
    Some(Frame {
        extent,
        intent,
        next: j + 1,
    })
}

fn root(closure: &Closure<'_>) -> Frame {
    let extent = closure.relation().all_objects();
    let intent = closure.intent_of(&extent);
    Frame {
        extent,
        intent,
        next: 0,
    }
}

/// The concept `(∅, M)` is never reached by the search, which prunes
/// empty extents. It is a concept on its own iff no object has every
/// attribute and there is at least one object (otherwise it is the root).
fn needs_bottom(relation: &Relation) -> bool {
    relation.object_count() > 0 && relation.objects_with(&relation.all_attributes()).is_empty()
}

fn bottom(relation: &Relation) -> Concept {
    Concept::new(BitSet::new(relation.object_count()), relation.all_attributes())
}

/// Close-by-One enumeration as a depth-first iterator.
///
/// Produces the same concept set as [`NextClosure`](crate::NextClosure) in
/// depth-first order. The search tree is walked with an explicit stack, so
/// the depth of the tree is bounded only by memory.
///
/// # Example
///
/// ```
/// use fca_rs::{CloseByOne, Relation};
///
/// let rel = Relation::new(3, 2, |_, _| false);
/// let intents: Vec<Vec<usize>> = CloseByOne::new(&rel).map(|c| c.intent_indices()).collect();
/// assert_eq!(intents, vec![vec![], vec![0, 1]]);
/// ```
pub struct CloseByOne<'a> {
    closure: Closure<'a>,
    stack: Vec<Frame>,
    pending: Option<Concept>,
    bottom: bool,
    cancel: Option<CancelFlag>,
    cancelled: bool,
    emitted: usize,
}

impl<'a> CloseByOne<'a> {
    pub fn new(relation: &'a Relation) -> Self {
        let closure = Closure::new(relation);
        let start = root(&closure);
        Self {
            closure,
            pending: Some(start.concept()),
            stack: vec![start],
            bottom: needs_bottom(relation),
            cancel: None,
            cancelled: false,
            emitted: 0,
        }
    }

    /// Walks the subtree below an already emitted node. Used by the
    /// parallel driver; neither the node itself nor the bottom is yielded.
    fn subtree(closure: Closure<'a>, frame: Frame, cancel: Option<CancelFlag>) -> Self {
        Self {
            closure,
            stack: vec![frame],
            pending: None,
            bottom: false,
            cancel,
            cancelled: false,
            emitted: 0,
        }
    }

    /// Stops the search at the next expansion once `flag` is set.
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn emit(&mut self, concept: Concept) -> Option<Concept> {
        self.emitted += 1;
        trace!(concept = ?concept, "concept");
        Some(concept)
    }

    /// Advances the search to the next accepted child.
    fn expand(&mut self) -> Option<Concept> {
        let attributes = self.closure.relation().attribute_count();
        while let Some(top) = self.stack.last_mut() {
            let mut found = None;
            while top.next < attributes {
                let j = top.next;
                top.next += 1;
                if let Some(frame) = child(&self.closure, top, j) {
                    found = Some(frame);
                    break;
                }
            }
            match found {
                Some(frame) => {
                    let concept = frame.concept();
                    self.stack.push(frame);
                    return Some(concept);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

impl Iterator for CloseByOne<'_> {
    type Item = Concept;

    fn next(&mut self) -> Option<Concept> {
        if self.cancelled {
            return None;
        }
        if cancel::is_set(self.cancel.as_ref()) {
            self.cancelled = true;
            self.stack.clear();
            debug!(emitted = self.emitted, "close by one cancelled");
            return None;
        }

        if let Some(concept) = self.pending.take() {
            return self.emit(concept);
        }
        if let Some(concept) = self.expand() {
            return self.emit(concept);
        }
        if std::mem::take(&mut self.bottom) {
            return self.emit(bottom(self.closure.relation()));
        }
        None
    }
}

/// Searches one root subtree, its own root included. Yields nothing once
/// the flag is set, so subtrees scheduled after a cancellation stay empty.
fn search_subtree(
    closure: Closure<'_>,
    frame: Frame,
    cancel: Option<&CancelFlag>,
) -> (Vec<Concept>, bool) {
    if cancel::is_set(cancel) {
        return (Vec::new(), true);
    }
    let mut out = vec![frame.concept()];
    let mut walk = CloseByOne::subtree(closure, frame, cancel.cloned());
    out.extend(walk.by_ref());
    (out, walk.was_cancelled())
}

/// Output of [`par_close_by_one`].
#[derive(Debug, Clone, Default)]
pub struct ParallelRun {
    /// Concepts in the same order the sequential search yields them.
    pub concepts: Vec<Concept>,
    /// True if a worker observed the cancellation flag.
    pub cancelled: bool,
}

/// Close-by-One with the root's subtrees searched on the rayon pool.
///
/// Each accepted child of the root is an independent subtree; workers fill
/// private vectors that are concatenated in child order, so the result is
/// identical to collecting [`CloseByOne`].
pub fn par_close_by_one(relation: &Relation, cancel: Option<&CancelFlag>) -> ParallelRun {
    let closure = Closure::new(relation);
    let start = root(&closure);

    if cancel::is_set(cancel) {
        return ParallelRun {
            concepts: Vec::new(),
            cancelled: true,
        };
    }

    let children: Vec<Frame> = (0..relation.attribute_count())
        .filter_map(|j| child(&closure, &start, j))
        .collect();
    debug!(subtrees = children.len(), "dispatching close by one subtrees");

    let parts: Vec<(Vec<Concept>, bool)> = children
        .into_par_iter()
        .map(|frame| search_subtree(closure, frame, cancel))
        .collect();

    let mut run = ParallelRun {
        concepts: vec![start.concept()],
        cancelled: false,
    };
    for (part, cancelled) in parts {
        run.concepts.extend(part);
        run.cancelled |= cancelled;
    }

    if !run.cancelled && needs_bottom(relation) {
        run.concepts.push(bottom(relation));
    }
    debug!(
        concepts = run.concepts.len(),
        cancelled = run.cancelled,
        "parallel close by one finished"
    );
    run
}
