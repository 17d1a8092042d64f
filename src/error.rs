use thiserror::Error;

/// Errors surfaced by relation construction and enumeration.
///
/// Derivation and closure are total over a valid [`Relation`](crate::Relation),
/// so every failure is detected either when the relation is built or when a
/// caller stops an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FcaError {
    /// Inconsistent dimensions or an incidence outside the object/attribute grid.
    #[error("malformed relation: {reason}")]
    MalformedRelation { reason: String },

    /// Both the object and attribute sets are empty and the caller asked
    /// for such relations to be rejected.
    #[error("relation has no objects and no attributes")]
    EmptyRelation,

    /// Enumeration was stopped through a [`CancelFlag`](crate::CancelFlag).
    /// Concepts emitted before the stop remain valid.
    #[error("enumeration cancelled after {emitted} concepts")]
    Cancelled { emitted: usize },
}

impl FcaError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FcaError::MalformedRelation {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FcaError>;
