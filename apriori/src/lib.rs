//! Level-wise (Apriori) frequent itemset mining and association rules.
//!
//! ```
//! use apriori::{Dataset, generate_rules, mine, MiningConfig};
//!
//! let dataset = Dataset::from_records(vec![
//!     vec!["bread", "milk"],
//!     vec!["bread", "butter"],
//!     vec!["bread", "milk", "butter"],
//! ]);
//! let config = MiningConfig::new(2, 0.6);
//! let table = mine(&dataset, &config).unwrap();
//! let rules = generate_rules(&table, config.min_confidence).unwrap();
//! assert_eq!(rules.len(), 4);
//! ```

pub mod ap;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod rules;

pub use ap::{
    FrequentLevel, Item, Itemset, SupportTable, apriori_algorithm, generate_candidates, mine,
    mine_with_cancel,
};
pub use cancel::CancellationToken;
pub use config::MiningConfig;
pub use dataset::{Dataset, ItemDictionary, Transaction};
pub use error::{MiningError, Result};
pub use loader::{LoadError, LoadOptions, load_delimited, read_delimited};
pub use rules::{Rule, RuleMetrics, RuleReport, SortKey, generate_rules, generate_rules_with};
