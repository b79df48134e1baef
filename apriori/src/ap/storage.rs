use std::collections::BTreeMap;

use super::itemset::Itemset;

/// Frequent itemsets of one size together with their support counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentLevel {
    pub itemset_size: usize,
    supports: BTreeMap<Itemset, usize>,
}

impl FrequentLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            itemset_size,
            supports: BTreeMap::new(),
        }
    }

    pub fn add_itemset_with_support(&mut self, itemset: Itemset, support: usize) {
        debug_assert_eq!(itemset.len(), self.itemset_size);
        self.supports.insert(itemset, support);
    }

    pub fn len(&self) -> usize {
        self.supports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty()
    }

    pub fn support(&self, itemset: &Itemset) -> Option<usize> {
        self.supports.get(itemset).copied()
    }

    /// Itemsets in canonical order.
    pub fn iter_itemsets(&self) -> impl Iterator<Item = &Itemset> {
        self.supports.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, usize)> {
        self.supports.iter().map(|(itemset, &count)| (itemset, count))
    }
}

/// Support counts of every frequent itemset found in one mining run, grouped
/// by itemset size. Level `k` lives at index `k - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportTable {
    levels: Vec<FrequentLevel>,
}

impl SupportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next level. Levels must arrive in size order.
    pub(crate) fn push_level(&mut self, level: FrequentLevel) {
        debug_assert_eq!(level.itemset_size, self.levels.len() + 1);
        debug_assert!(!level.is_empty());
        self.levels.push(level);
    }

    /// Support count of `itemset`, if it is frequent.
    pub fn get(&self, itemset: &Itemset) -> Option<usize> {
        let size = itemset.len();
        if size == 0 {
            return None;
        }
        self.levels.get(size - 1)?.support(itemset)
    }

    pub fn level(&self, itemset_size: usize) -> Option<&FrequentLevel> {
        itemset_size
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx))
    }

    pub fn levels(&self) -> &[FrequentLevel] {
        &self.levels
    }

    /// Size of the largest frequent itemset, 0 when nothing is frequent.
    pub fn max_itemset_size(&self) -> usize {
        self.levels
            .iter()
            .rev()
            .find(|level| !level.is_empty())
            .map_or(0, |level| level.itemset_size)
    }

    /// Total number of frequent itemsets over all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(FrequentLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(FrequentLevel::is_empty)
    }

    /// Every (itemset, support) pair, smaller itemsets first.
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, usize)> {
        self.levels.iter().flat_map(|level| level.iter())
    }

    pub fn into_map(self) -> BTreeMap<Itemset, usize> {
        self.levels
            .into_iter()
            .flat_map(|level| level.supports)
            .collect()
    }
}

/// Builds a table from explicit entries, e.g. a table persisted by a caller or
/// written by hand in tests. Entries are grouped by itemset size; sizes with no
/// entries below the largest one become empty levels.
impl FromIterator<(Itemset, usize)> for SupportTable {
    fn from_iter<I: IntoIterator<Item = (Itemset, usize)>>(iter: I) -> Self {
        let mut by_size: BTreeMap<usize, FrequentLevel> = BTreeMap::new();
        for (itemset, support) in iter {
            if itemset.is_empty() {
                continue;
            }
            let size = itemset.len();
            by_size
                .entry(size)
                .or_insert_with(|| FrequentLevel::new(size))
                .add_itemset_with_support(itemset, support);
        }

        let mut table = SupportTable::new();
        for (size, level) in by_size {
            while table.levels.len() + 1 < size {
                let gap = table.levels.len() + 1;
                table.levels.push(FrequentLevel::new(gap));
            }
            table.levels.push(level);
        }
        table
    }
}
