//! # fca-rs - Formal Concept Analysis
//!
//! Enumerates every formal concept of a binary relation between objects and
//! attributes. A concept is a pair `(extent, intent)` where the extent is
//! exactly the set of objects having every attribute of the intent, and the
//! intent is exactly the set of attributes shared by every object of the
//! extent.
//!
//! Two enumerators produce the same concept set:
//! 1. **NextClosure**: walks closed intents in lectic order, sequentially
//! 2. **Close-by-One**: depth-first canonicity-tested search whose subtrees
//!    can be searched in parallel
//!
//! ## Example
//!
//! ```
//! use fca_rs::{enumerate, Algorithm, EnumerationOptions, Relation};
//!
//! // o0:{a0}, o1:{a0,a1}, o2:{a1}
//! let rel = Relation::from_pairs(3, 2, [(0, 0), (1, 0), (1, 1), (2, 1)]).unwrap();
//! let concepts = enumerate(&rel, &EnumerationOptions::new(Algorithm::NextClosure)).unwrap();
//!
//! for (number, concept) in concepts.iter_numbered() {
//!     println!("{}: {:?} -> {:?}", number, concept.extent_indices(), concept.intent_indices());
//! }
//! assert_eq!(concepts.len(), 4);
//! ```
//!
//! Reading relations from files and printing concepts by name are left to
//! callers; see the `demos/` directory.

mod bitset;
mod cancel;
mod close_by_one;
mod closure;
mod concept;
mod concept_set;
mod enumerate;
mod error;
mod lattice;
mod next_closure;
mod relation;


pub use bitset::{BitSet, Iter as BitSetIter};
pub use cancel::CancelFlag;
pub use close_by_one::{par_close_by_one, CloseByOne, ParallelRun};
pub use closure::Closure;
pub use concept::{Concept, ConceptKey};
pub use concept_set::{ConceptSet, ConceptSink, KeyComparison};
pub use enumerate::{enumerate, enumerate_into, Algorithm, EnumerationOptions};
pub use error::{FcaError, Result};
pub use lattice::Lattice;
pub use next_closure::{next_closed, NextClosure};
pub use relation::Relation;
