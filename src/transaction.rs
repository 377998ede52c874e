//! Editor transaction classification.
//!
//! Only document-changing transactions may resize the window. Selection moves,
//! mark toggles and attribute changes must never trigger a resize.

use serde::{Deserialize, Serialize};

/// One step of an editor transaction, reduced to what sizing cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    /// Replace a range with a slice. `slice_size` is None when the step has no slice.
    Replace { slice_size: Option<usize> },
    /// Replace around a range (wrap/unwrap) with a slice
    ReplaceAround { slice_size: Option<usize> },
    AddMark,
    RemoveMark,
    Attribute,
}

impl Step {
    fn slice_size(&self) -> Option<usize> {
        match self {
            Step::Replace { slice_size } | Step::ReplaceAround { slice_size } => *slice_size,
            Step::AddMark | Step::RemoveMark | Step::Attribute => None,
        }
    }
}

/// A committed editor transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub steps: Vec<Step>,
}

impl Transaction {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Selection-only transaction (no steps)
    pub fn selection_only() -> Self {
        Self::default()
    }

    /// A single replace step inserting `size` units of content
    pub fn insert(size: usize) -> Self {
        Self::new(vec![Step::Replace {
            slice_size: Some(size),
        }])
    }

    /// A single replace step deleting a range
    pub fn delete() -> Self {
        Self::new(vec![Step::Replace {
            slice_size: Some(0),
        }])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Insert,
    Delete,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Insert => "insert",
            TransactionKind::Delete => "delete",
        }
    }
}

/// Classify a transaction.
///
/// The first replace step carrying a slice decides: an empty slice is a delete,
/// anything else an insert. Transactions without one are `None`.
pub fn classify(transaction: &Transaction) -> Option<TransactionKind> {
    transaction
        .steps
        .iter()
        .find_map(Step::slice_size)
        .map(|size| {
            if size == 0 {
                TransactionKind::Delete
            } else {
                TransactionKind::Insert
            }
        })
}
