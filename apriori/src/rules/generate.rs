use rayon::prelude::*;

use crate::ap::{Itemset, MAX_SUBSET_SOURCE_SIZE, SupportTable, proper_non_empty_subsets};
use crate::config::validate_min_confidence;
use crate::error::{MiningError, Result};

/// Association rule `antecedent => consequent` drawn from a frequent itemset.
///
/// `antecedent` and `consequent` partition `itemset`: they are disjoint,
/// non-empty, and their union is `itemset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rule {
    pub itemset: Itemset,
    pub antecedent: Itemset,
    pub consequent: Itemset,
}

impl Rule {
    pub fn new(itemset: Itemset, antecedent: Itemset) -> Self {
        let consequent = itemset.difference(&antecedent);
        Self {
            itemset,
            antecedent,
            consequent,
        }
    }
}

/// Rules with confidence at least `min_confidence` from every frequent itemset
/// of two or more items.
///
/// `table` must be the complete output of one mining run: every subset of a
/// frequent itemset has to be present, otherwise
/// [`MiningError::MissingSubsetSupport`] is returned.
pub fn generate_rules(table: &SupportTable, min_confidence: f64) -> Result<Vec<Rule>> {
    generate_rules_with(table, min_confidence, true)
}

/// Same as [`generate_rules`]; with `parallel` unset every itemset is handled
/// on the calling thread.
pub fn generate_rules_with(
    table: &SupportTable,
    min_confidence: f64,
    parallel: bool,
) -> Result<Vec<Rule>> {
    validate_min_confidence(min_confidence)?;

    let itemsets: Vec<(&Itemset, usize)> = table
        .iter()
        .filter(|(itemset, _)| itemset.len() >= 2)
        .collect();

    let for_itemset = |&(itemset, support): &(&Itemset, usize)| {
        rules_for_itemset(table, itemset, support, min_confidence)
    };
    let per_itemset: Vec<Vec<Rule>> = if parallel {
        itemsets.par_iter().map(for_itemset).collect::<Result<_>>()?
    } else {
        itemsets.iter().map(for_itemset).collect::<Result<_>>()?
    };

    let rules: Vec<Rule> = per_itemset.into_iter().flatten().collect();
    tracing::debug!(
        itemsets = itemsets.len(),
        rules = rules.len(),
        min_confidence,
        parallel,
        "rules generated"
    );
    Ok(rules)
}

fn rules_for_itemset(
    table: &SupportTable,
    itemset: &Itemset,
    support: usize,
    min_confidence: f64,
) -> Result<Vec<Rule>> {
    if itemset.len() > MAX_SUBSET_SOURCE_SIZE {
        return Err(MiningError::invalid(
            "itemset",
            format!(
                "{itemset} has {} items; rules are derived for at most {MAX_SUBSET_SOURCE_SIZE}",
                itemset.len()
            ),
        ));
    }
    let mut rules = Vec::new();
    for antecedent in proper_non_empty_subsets(itemset) {
        let antecedent_support =
            table
                .get(&antecedent)
                .ok_or_else(|| MiningError::MissingSubsetSupport {
                    itemset: itemset.clone(),
                    subset: antecedent.clone(),
                })?;

        if support as f64 / antecedent_support as f64 >= min_confidence {
            rules.push(Rule::new(itemset.clone(), antecedent));
        }
    }
    Ok(rules)
}
