use crate::cancel::CancelFlag;
use crate::close_by_one::{par_close_by_one, CloseByOne};
use crate::concept::Concept;
use crate::concept_set::{ConceptSet, ConceptSink};
use crate::error::{FcaError, Result};
use crate::next_closure::NextClosure;
use crate::relation::Relation;
use tracing::debug;

/// Which enumeration strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Lectic-order enumeration. Sequential only.
    #[default]
    NextClosure,
    /// Depth-first canonicity-tested search. Can run on the rayon pool.
    CloseByOne,
}

/// Settings for [`enumerate`] and [`enumerate_into`].
#[derive(Debug, Clone, Default)]
pub struct EnumerationOptions {
    pub algorithm: Algorithm,
    /// Search Close-by-One subtrees in parallel. NextClosure ignores it.
    pub parallel: bool,
    /// Fail with [`FcaError::EmptyRelation`] instead of yielding the single
    /// concept `(∅, ∅)` when there are no objects and no attributes.
    pub reject_empty: bool,
    pub cancel: Option<CancelFlag>,
}

impl EnumerationOptions {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn reject_empty(mut self, reject: bool) -> Self {
        self.reject_empty = reject;
        self
    }

    pub fn cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// Enumerates every concept of `relation` into a [`ConceptSet`].
///
/// # Example
///
/// ```
/// use fca_rs::{enumerate, Algorithm, EnumerationOptions, Relation};
///
/// let rel = Relation::from_pairs(3, 2, [(0, 0), (1, 0), (1, 1), (2, 1)]).unwrap();
/// let concepts = enumerate(&rel, &EnumerationOptions::new(Algorithm::CloseByOne)).unwrap();
/// assert_eq!(concepts.len(), 4);
/// ```
pub fn enumerate(relation: &Relation, options: &EnumerationOptions) -> Result<ConceptSet> {
    let mut set = ConceptSet::new();
    enumerate_into(relation, options, &mut set)?;
    Ok(set)
}

/// Streams every concept of `relation` into `sink`, returning how many were
/// emitted.
///
/// On cancellation the sink keeps what it already received and the call
/// fails with [`FcaError::Cancelled`].
pub fn enumerate_into<S: ConceptSink + ?Sized>(
    relation: &Relation,
    options: &EnumerationOptions,
    sink: &mut S,
) -> Result<usize> {
    if options.reject_empty && relation.is_empty() {
        return Err(FcaError::EmptyRelation);
    }
    debug!(
        algorithm = ?options.algorithm,
        parallel = options.parallel,
        objects = relation.object_count(),
        attributes = relation.attribute_count(),
        "enumeration started"
    );

    let (emitted, cancelled) = match options.algorithm {
        Algorithm::NextClosure => {
            if options.parallel {
                debug!("next closure is sequential, ignoring parallel option");
            }
            let mut iter = NextClosure::new(relation);
            if let Some(flag) = &options.cancel {
                iter = iter.with_cancel(flag.clone());
            }
            drain(&mut iter, sink);
            (iter.emitted(), iter.was_cancelled())
        }
        Algorithm::CloseByOne if options.parallel => {
            let run = par_close_by_one(relation, options.cancel.as_ref());
            let emitted = run.concepts.len();
            for concept in run.concepts {
                sink.accept(concept);
            }
            (emitted, run.cancelled)
        }
        Algorithm::CloseByOne => {
            let mut iter = CloseByOne::new(relation);
            if let Some(flag) = &options.cancel {
                iter = iter.with_cancel(flag.clone());
            }
            drain(&mut iter, sink);
            (iter.emitted(), iter.was_cancelled())
        }
    };

    debug!(emitted, cancelled, "enumeration finished");
    if cancelled {
        Err(FcaError::Cancelled { emitted })
    } else {
        Ok(emitted)
    }
}

fn drain<I, S>(iter: &mut I, sink: &mut S)
where
    I: Iterator<Item = Concept>,
    S: ConceptSink + ?Sized,
{
    for concept in iter {
        sink.accept(concept);
    }
}
