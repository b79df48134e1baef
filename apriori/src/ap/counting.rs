use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;

use super::itemset::{Item, Itemset};
use super::storage::FrequentLevel;
use crate::cancel::CancellationToken;
use crate::dataset::{Dataset, Transaction};
use crate::error::{MiningError, Result};

/// Frequent 1-itemsets: every distinct item occurring in at least
/// `min_support_count` transactions.
pub fn find_frequent_one_itemsets(dataset: &Dataset, min_support_count: usize) -> FrequentLevel {
    let mut item_counts: HashMap<Item, usize> = HashMap::new();
    for transaction in dataset.transactions() {
        for &item in transaction.items() {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }

    let mut level = FrequentLevel::new(1);
    for (item, count) in item_counts {
        if count >= min_support_count {
            level.add_itemset_with_support(Itemset::singleton(item), count);
        }
    }
    level
}

/// Support count of every candidate, indexed like `candidates`.
///
/// Transactions are split into chunks of `chunk_size`; each chunk is counted
/// on its own and the partial counts are summed. `token` is polled once per
/// chunk, and a cancelled run reports `level` in its error.
pub fn count_support(
    transactions: &[Transaction],
    candidates: &[Itemset],
    chunk_size: usize,
    parallel: bool,
    token: &CancellationToken,
    level: usize,
) -> Result<Vec<usize>> {
    let chunk_size = chunk_size.max(1);
    let count_one = |chunk: &[Transaction]| -> Result<Vec<usize>> {
        if token.is_cancelled() {
            return Err(MiningError::Cancelled { level });
        }
        Ok(count_chunk(chunk, candidates))
    };

    let partials: Vec<Vec<usize>> = if parallel {
        transactions
            .par_chunks(chunk_size)
            .map(count_one)
            .collect::<Result<_>>()?
    } else {
        transactions
            .chunks(chunk_size)
            .map(count_one)
            .collect::<Result<_>>()?
    };

    let mut totals = vec![0usize; candidates.len()];
    for partial in partials {
        for (total, count) in totals.iter_mut().zip(partial) {
            *total += count;
        }
    }
    Ok(totals)
}

fn count_chunk(chunk: &[Transaction], candidates: &[Itemset]) -> Vec<usize> {
    let mut counts = vec![0usize; candidates.len()];
    for transaction in chunk {
        if transaction.len() < candidates.first().map_or(0, Itemset::len) {
            continue;
        }
        for (count, candidate) in counts.iter_mut().zip(candidates) {
            if transaction.contains(candidate) {
                *count += 1;
            }
        }
    }
    counts
}

/// Counts `candidates` over the dataset and keeps those meeting
/// `min_support_count` as level `itemset_size`.
pub(crate) fn frequent_level_from_candidates(
    dataset: &Dataset,
    candidates: BTreeSet<Itemset>,
    itemset_size: usize,
    min_support_count: usize,
    chunk_size: usize,
    parallel: bool,
    token: &CancellationToken,
) -> Result<FrequentLevel> {
    let candidates: Vec<Itemset> = candidates.into_iter().collect();
    let counts = count_support(
        dataset.transactions(),
        &candidates,
        chunk_size,
        parallel,
        token,
        itemset_size,
    )?;

    let mut level = FrequentLevel::new(itemset_size);
    for (candidate, count) in candidates.into_iter().zip(counts) {
        if count >= min_support_count {
            level.add_itemset_with_support(candidate, count);
        }
    }
    Ok(level)
}
