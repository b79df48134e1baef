use std::collections::HashMap;

use ndarray::ArrayView2;

use crate::ap::{Item, Itemset};

/// Maps item tokens to dense ids in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDictionary {
    ids: HashMap<String, Item>,
    names: Vec<String>,
}

impl ItemDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `name`, assigning the next free id if it is new.
    pub fn intern(&mut self, name: &str) -> Item {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        id
    }

    pub fn id(&self, name: &str) -> Option<Item> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, item: Item) -> Option<&str> {
        self.names.get(item).map(String::as_str)
    }

    /// Itemset built from names; `None` if any name is unknown.
    pub fn itemset<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Option<Itemset> {
        names
            .into_iter()
            .map(|name| self.id(name))
            .collect::<Option<Vec<_>>>()
            .map(Itemset::new)
    }

    /// Item names of `itemset` in canonical order. Unknown ids print as numbers.
    pub fn names_of(&self, itemset: &Itemset) -> Vec<String> {
        itemset
            .iter()
            .map(|&item| {
                self.name(item)
                    .map_or_else(|| item.to_string(), str::to_owned)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One record's distinct items, sorted by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction(Vec<Item>);

impl Transaction {
    pub fn new(mut items: Vec<Item>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        itemset.is_subset_of(&self.0)
    }
}

/// Transactions of one mining run together with the dictionary that names
/// their items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    transactions: Vec<Transaction>,
    dictionary: ItemDictionary,
}

impl Dataset {
    pub fn new(transactions: Vec<Transaction>, dictionary: ItemDictionary) -> Self {
        Self {
            transactions,
            dictionary,
        }
    }

    /// Builds a dataset from string records. Fields are trimmed and empty
    /// fields are dropped; repeated tokens in one record count once.
    pub fn from_records<R, S>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = ItemDictionary::new();
        let transactions = records
            .into_iter()
            .map(|record| {
                let items = record
                    .into_iter()
                    .filter_map(|field| {
                        let token = field.as_ref().trim();
                        (!token.is_empty()).then(|| dictionary.intern(token))
                    })
                    .collect();
                Transaction::new(items)
            })
            .collect();

        Self::new(transactions, dictionary)
    }

    /// Builds a dataset from a one-hot matrix: one row per transaction, a
    /// non-zero cell marks the column's item as present. Items are named after
    /// their column index.
    pub fn from_matrix(matrix: ArrayView2<'_, i32>) -> Self {
        let num_items = matrix.ncols();

        let mut dictionary = ItemDictionary::new();
        for column in 0..num_items {
            dictionary.intern(&column.to_string());
        }

        let transactions = matrix
            .rows()
            .into_iter()
            .map(|row| {
                let items = row
                    .iter()
                    .enumerate()
                    .filter_map(|(column, &cell)| (cell != 0).then_some(column))
                    .collect();
                Transaction::new(items)
            })
            .collect();

        Self::new(transactions, dictionary)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn dictionary(&self) -> &ItemDictionary {
        &self.dictionary
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
