use std::fmt;

/// Interned item id. Ids are handed out by [`crate::ItemDictionary`] and their
/// numeric order is the canonical item order.
pub type Item = usize;

/// Canonically sorted set of unique items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Itemset(Vec<Item>);

impl Itemset {
    /// Builds an itemset from arbitrary items, sorting and dropping duplicates.
    pub fn new(mut items: Vec<Item>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn singleton(item: Item) -> Self {
        Self(vec![item])
    }

    /// Wraps items that are already strictly ascending.
    pub(crate) fn from_sorted(items: Vec<Item>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.0.iter()
    }

    pub fn contains(&self, item: Item) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// True if every item of `self` occurs in the sorted slice `other`.
    pub fn is_subset_of(&self, other: &[Item]) -> bool {
        if self.0.len() > other.len() {
            return false;
        }
        let mut rest = other.iter();
        'outer: for item in &self.0 {
            for candidate in rest.by_ref() {
                if candidate == item {
                    continue 'outer;
                }
                if candidate > item {
                    return false;
                }
            }
            return false;
        }
        true
    }

    /// Union of two itemsets of equal size `k - 1`, returned only when the
    /// result has exactly `k` items (the inputs differ by a single item).
    pub fn join(&self, other: &Itemset) -> Option<Itemset> {
        let target = self.len() + 1;
        if other.len() + 1 != target {
            return None;
        }

        let mut merged = Vec::with_capacity(target);
        let (mut a, mut b) = (self.0.iter().peekable(), other.0.iter().peekable());
        loop {
            let next = match (a.peek().map(|&&v| v), b.peek().map(|&&v| v)) {
                (Some(x), Some(y)) if x == y => {
                    a.next();
                    b.next();
                    x
                }
                (Some(x), Some(y)) if x < y => {
                    a.next();
                    x
                }
                (Some(_), Some(y)) => {
                    b.next();
                    y
                }
                (Some(x), None) => {
                    a.next();
                    x
                }
                (None, Some(y)) => {
                    b.next();
                    y
                }
                (None, None) => break,
            };
            merged.push(next);
            if merged.len() > target {
                return None;
            }
        }

        (merged.len() == target).then(|| Itemset(merged))
    }

    /// Items of `self` not present in `other`.
    pub fn difference(&self, other: &Itemset) -> Itemset {
        Itemset(
            self.0
                .iter()
                .copied()
                .filter(|item| !other.contains(*item))
                .collect(),
        )
    }
}

impl From<Vec<Item>> for Itemset {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl<const N: usize> From<[Item; N]> for Itemset {
    fn from(items: [Item; N]) -> Self {
        Self::new(items.to_vec())
    }
}

impl FromIterator<Item> for Itemset {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, item) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_dedups() {
        let itemset = Itemset::new(vec![7, 2, 5, 2]);
        assert_eq!(itemset.items(), &[2, 5, 7]);
        assert_eq!(itemset.len(), 3);
    }

    #[test]
    fn test_is_subset_of() {
        let itemset = Itemset::from([2, 5]);
        assert!(itemset.is_subset_of(&[1, 2, 3, 5]));
        assert!(!itemset.is_subset_of(&[1, 2, 3, 4]));
        assert!(!itemset.is_subset_of(&[5]));
        assert!(Itemset::default().is_subset_of(&[]));
    }

    #[test]
    fn test_join_requires_single_item_difference() {
        let ab = Itemset::from([0, 1]);
        let ac = Itemset::from([0, 2]);
        let cd = Itemset::from([2, 3]);

        assert_eq!(ab.join(&ac), Some(Itemset::from([0, 1, 2])));
        assert_eq!(ab.join(&cd), None);
        assert_eq!(ab.join(&ab), None);
        assert_eq!(Itemset::singleton(4).join(&Itemset::singleton(1)), Some(Itemset::from([1, 4])));
    }

    #[test]
    fn test_difference_and_display() {
        let z = Itemset::from([1, 3, 4]);
        let s = Itemset::from([3]);
        assert_eq!(z.difference(&s), Itemset::from([1, 4]));
        assert_eq!(z.to_string(), "{1, 3, 4}");
    }
}
