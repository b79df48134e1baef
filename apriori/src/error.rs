use crate::ap::Itemset;

/// Errors raised by mining and rule derivation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MiningError {
    /// A run parameter is out of its accepted range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A subset of a frequent itemset has no entry in the support table.
    ///
    /// Only happens when rules or metrics are computed against a table that is
    /// not the complete output of one mining run.
    #[error("support table has no entry for {subset} (subset of {itemset})")]
    MissingSubsetSupport { itemset: Itemset, subset: Itemset },

    /// The run was cancelled; the level being built is discarded.
    #[error("mining cancelled while building level {level}")]
    Cancelled { level: usize },
}

impl MiningError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        MiningError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MiningError>;
