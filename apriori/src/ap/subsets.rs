use super::itemset::{Item, Itemset};

/// All `k - 1` item subsets of a `k`-itemset, each omitting one position.
pub fn k_minus_one_subsets(itemset: &Itemset) -> Vec<Itemset> {
    let items = itemset.items();
    (0..items.len())
        .map(|skip| {
            let subset: Vec<Item> = items
                .iter()
                .enumerate()
                .filter_map(|(idx, &item)| (idx != skip).then_some(item))
                .collect();
            Itemset::from_sorted(subset)
        })
        .collect()
}

/// Largest itemset [`ProperSubsets`] can enumerate.
pub const MAX_SUBSET_SOURCE_SIZE: usize = u64::BITS as usize - 1;

/// Iterator over the non-empty proper subsets of an itemset.
///
/// Walks masks `1..=2^k - 2`; bit `j` selects the `j`-th item. Items stay in
/// canonical order so each yielded subset is already sorted.
#[derive(Debug, Clone)]
pub struct ProperSubsets<'a> {
    items: &'a [Item],
    mask: u64,
    last: u64,
}

impl<'a> ProperSubsets<'a> {
    /// # Panics
    ///
    /// If `itemset` has more than [`MAX_SUBSET_SOURCE_SIZE`] items.
    pub fn new(itemset: &'a Itemset) -> Self {
        let items = itemset.items();
        assert!(
            items.len() <= MAX_SUBSET_SOURCE_SIZE,
            "itemset of {} items is too large to enumerate subsets",
            items.len()
        );
        let last = (1u64 << items.len()).saturating_sub(2);
        Self {
            items,
            mask: 1,
            last,
        }
    }
}

impl Iterator for ProperSubsets<'_> {
    type Item = Itemset;

    fn next(&mut self) -> Option<Itemset> {
        if self.mask > self.last {
            return None;
        }
        let mask = self.mask;
        self.mask += 1;

        let subset: Vec<Item> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(j, &item)| ((mask >> j) & 1 == 1).then_some(item))
            .collect();
        Some(Itemset::from_sorted(subset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.mask) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProperSubsets<'_> {}

pub fn proper_non_empty_subsets(itemset: &Itemset) -> ProperSubsets<'_> {
    ProperSubsets::new(itemset)
}
