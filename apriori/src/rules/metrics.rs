use super::generate::Rule;
use crate::ap::{Itemset, SupportTable};
use crate::error::{MiningError, Result};

/// Interestingness measures of one rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMetrics {
    /// Fraction of all transactions containing the whole itemset.
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub cosine: f64,
}

impl RuleMetrics {
    pub fn compute(rule: &Rule, table: &SupportTable, total_transactions: usize) -> Result<Self> {
        let counts = Counts::lookup(rule, table)?;
        let total = transaction_total(total_transactions)?;
        Ok(Self {
            support: counts.whole / total,
            confidence: counts.whole / counts.antecedent,
            lift: counts.whole * total / (counts.antecedent * counts.consequent),
            cosine: counts.whole / (counts.antecedent * counts.consequent).sqrt(),
        })
    }
}

/// `support(Z) / support(S)`
pub fn confidence(rule: &Rule, table: &SupportTable) -> Result<f64> {
    let whole = lookup(table, &rule.itemset, &rule.itemset)?;
    let antecedent = lookup(table, &rule.itemset, &rule.antecedent)?;
    Ok(whole / antecedent)
}

/// `support(Z) / total_transactions`
pub fn support(rule: &Rule, table: &SupportTable, total_transactions: usize) -> Result<f64> {
    let whole = lookup(table, &rule.itemset, &rule.itemset)?;
    Ok(whole / transaction_total(total_transactions)?)
}

/// `support(Z) * total / (support(S) * support(C))`
pub fn lift(rule: &Rule, table: &SupportTable, total_transactions: usize) -> Result<f64> {
    let counts = Counts::lookup(rule, table)?;
    let total = transaction_total(total_transactions)?;
    Ok(counts.whole * total / (counts.antecedent * counts.consequent))
}

/// `support(Z) / sqrt(support(S) * support(C))`
pub fn cosine(rule: &Rule, table: &SupportTable) -> Result<f64> {
    let counts = Counts::lookup(rule, table)?;
    Ok(counts.whole / (counts.antecedent * counts.consequent).sqrt())
}

struct Counts {
    whole: f64,
    antecedent: f64,
    consequent: f64,
}

impl Counts {
    fn lookup(rule: &Rule, table: &SupportTable) -> Result<Self> {
        Ok(Self {
            whole: lookup(table, &rule.itemset, &rule.itemset)?,
            antecedent: lookup(table, &rule.itemset, &rule.antecedent)?,
            consequent: lookup(table, &rule.itemset, &rule.consequent)?,
        })
    }
}

fn lookup(table: &SupportTable, itemset: &Itemset, subset: &Itemset) -> Result<f64> {
    table
        .get(subset)
        .map(|count| count as f64)
        .ok_or_else(|| MiningError::MissingSubsetSupport {
            itemset: itemset.clone(),
            subset: subset.clone(),
        })
}

fn transaction_total(total_transactions: usize) -> Result<f64> {
    if total_transactions == 0 {
        return Err(MiningError::invalid(
            "total_transactions",
            "must be at least 1",
        ));
    }
    Ok(total_transactions as f64)
}
