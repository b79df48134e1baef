use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info};

use super::candidates::candidates_for_next_level;
use super::counting::{find_frequent_one_itemsets, frequent_level_from_candidates};
use super::storage::{FrequentLevel, SupportTable};
use crate::cancel::CancellationToken;
use crate::config::{MiningConfig, validate_min_support_count};
use crate::dataset::Dataset;
use crate::error::{MiningError, Result};

/// Every itemset contained in at least `min_support_count` transactions,
/// with its support count. Uses the default counting settings.
pub fn apriori_algorithm(dataset: &Dataset, min_support_count: usize) -> Result<SupportTable> {
    validate_min_support_count(min_support_count)?;
    let config = MiningConfig {
        min_support_count,
        ..MiningConfig::default()
    };
    mine_with_cancel(dataset, &config, &CancellationToken::new())
}

pub fn mine(dataset: &Dataset, config: &MiningConfig) -> Result<SupportTable> {
    mine_with_cancel(dataset, config, &CancellationToken::new())
}

/// Level-wise mining that stops early once `token` is cancelled. The token is
/// checked before every level and once per counting chunk.
pub fn mine_with_cancel(
    dataset: &Dataset,
    config: &MiningConfig,
    token: &CancellationToken,
) -> Result<SupportTable> {
    config.validate_mining()?;
    let min_support_count = config.min_support_count;
    let max_size = config.max_itemset_size.unwrap_or(usize::MAX);

    let mut table = SupportTable::new();
    if dataset.is_empty() {
        debug!("empty dataset, nothing to mine");
        return Ok(table);
    }

    check_cancelled(token, 1)?;
    let started = Instant::now();
    let mut current = find_frequent_one_itemsets(dataset, min_support_count);
    info!(
        level = 1,
        frequent = current.len(),
        transactions = dataset.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "level complete"
    );

    while !current.is_empty() {
        let next_size = current.itemset_size + 1;
        let finished = std::mem::replace(&mut current, FrequentLevel::new(next_size));
        let candidates = if next_size > max_size {
            BTreeSet::new()
        } else {
            check_cancelled(token, next_size)?;
            candidates_for_next_level(&finished, config.parallel)
        };
        table.push_level(finished);

        if candidates.is_empty() {
            debug!(level = next_size, "no candidates, stopping");
            break;
        }

        let started = Instant::now();
        let num_candidates = candidates.len();
        current = frequent_level_from_candidates(
            dataset,
            candidates,
            next_size,
            min_support_count,
            config.chunk_size,
            config.parallel,
            token,
        )?;
        info!(
            level = next_size,
            candidates = num_candidates,
            frequent = current.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "level complete"
        );
    }

    info!(
        itemsets = table.len(),
        max_size = table.max_itemset_size(),
        "mining finished"
    );
    Ok(table)
}

fn check_cancelled(token: &CancellationToken, level: usize) -> Result<()> {
    if token.is_cancelled() {
        return Err(MiningError::Cancelled { level });
    }
    Ok(())
}
