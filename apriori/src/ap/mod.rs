pub mod candidates;
pub mod counting;
pub mod itemset;
pub mod mining;
pub mod storage;
pub mod subsets;


pub use candidates::{generate_candidates, generate_candidates_parallel};
pub use counting::{count_support, find_frequent_one_itemsets};
pub use itemset::{Item, Itemset};
pub use mining::{apriori_algorithm, mine, mine_with_cancel};
pub use storage::{FrequentLevel, SupportTable};
pub use subsets::{
    MAX_SUBSET_SOURCE_SIZE, ProperSubsets, k_minus_one_subsets, proper_non_empty_subsets,
};
