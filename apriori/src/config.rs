use crate::error::{MiningError, Result};

/// Parameters for one mining run.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningConfig {
    /// Absolute number of transactions an itemset must appear in.
    pub min_support_count: usize,
    /// Lower bound on rule confidence, inclusive.
    pub min_confidence: f64,
    /// Transactions handed to one counting task.
    pub chunk_size: usize,
    /// Count and join on the rayon pool.
    pub parallel: bool,
    /// Stop after this itemset size.
    pub max_itemset_size: Option<usize>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support_count: 1,
            min_confidence: 0.5,
            chunk_size: 1000,
            parallel: true,
            max_itemset_size: None,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support_count: usize, min_confidence: f64) -> Self {
        Self {
            min_support_count,
            min_confidence,
            ..Self::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_itemset_size(mut self, max_itemset_size: usize) -> Self {
        self.max_itemset_size = Some(max_itemset_size);
        self
    }

    /// Checks the settings used by the miner.
    pub fn validate_mining(&self) -> Result<()> {
        validate_min_support_count(self.min_support_count)?;
        if self.chunk_size == 0 {
            return Err(MiningError::invalid("chunk_size", "must be at least 1"));
        }
        if self.max_itemset_size == Some(0) {
            return Err(MiningError::invalid(
                "max_itemset_size",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Checks every setting, including the rule threshold.
    pub fn validate(&self) -> Result<()> {
        self.validate_mining()?;
        validate_min_confidence(self.min_confidence)
    }
}

pub(crate) fn validate_min_support_count(min_support_count: usize) -> Result<()> {
    if min_support_count == 0 {
        return Err(MiningError::invalid(
            "min_support_count",
            "must be a positive transaction count",
        ));
    }
    Ok(())
}

pub(crate) fn validate_min_confidence(min_confidence: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err(MiningError::invalid(
            "min_confidence",
            format!("{min_confidence} is outside [0, 1]"),
        ));
    }
    Ok(())
}
