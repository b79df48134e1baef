use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use rayon::prelude::*;

use super::itemset::Itemset;
use super::storage::FrequentLevel;
use super::subsets::k_minus_one_subsets;

/// Candidate `k`-itemsets from the frequent `(k - 1)`-itemsets.
///
/// Joins every pair `i < j` whose union has exactly `k` items, then drops any
/// union with a `(k - 1)`-subset missing from `frequent`.
pub fn generate_candidates(frequent: &BTreeSet<Itemset>) -> BTreeSet<Itemset> {
    frequent
        .iter()
        .flat_map(|outer| joined_with_successors(frequent, outer))
        .collect()
}

/// Same as [`generate_candidates`], with each outer itemset joined on the
/// rayon pool.
pub fn generate_candidates_parallel(frequent: &BTreeSet<Itemset>) -> BTreeSet<Itemset> {
    let joined: Vec<Vec<Itemset>> = frequent
        .par_iter()
        .map(|outer| joined_with_successors(frequent, outer).collect())
        .collect();

    joined.into_iter().flatten().collect()
}

/// Candidates for the level after `level`.
pub fn candidates_for_next_level(level: &FrequentLevel, parallel: bool) -> BTreeSet<Itemset> {
    let frequent: BTreeSet<Itemset> = level.iter_itemsets().cloned().collect();
    if parallel {
        generate_candidates_parallel(&frequent)
    } else {
        generate_candidates(&frequent)
    }
}

fn joined_with_successors<'a>(
    frequent: &'a BTreeSet<Itemset>,
    outer: &'a Itemset,
) -> impl Iterator<Item = Itemset> + 'a {
    frequent
        .range::<Itemset, _>((Excluded(outer), Unbounded))
        .filter_map(move |inner| outer.join(inner))
        .filter(move |candidate| has_frequent_subsets(candidate, frequent))
}

fn has_frequent_subsets(candidate: &Itemset, frequent: &BTreeSet<Itemset>) -> bool {
    k_minus_one_subsets(candidate)
        .iter()
        .all(|subset| frequent.contains(subset))
}
