//! Command-line interface definitions and argument parsing

use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::MiningConfig;
use crate::loader::LoadOptions;
use crate::rules::SortKey;

/// Mine frequent itemsets and association rules from a delimited file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input file, one transaction per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Minimum number of transactions an itemset must appear in
    #[arg(short = 's', long)]
    pub min_support: usize,

    /// Minimum rule confidence, between 0 and 1
    #[arg(short = 'c', long, default_value = "0.5")]
    pub min_confidence: f64,

    /// Field delimiter
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,

    /// The first line is data, not a header
    #[arg(long)]
    pub no_header: bool,

    /// Header names of the columns to use, comma separated
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Order rules by this metric, largest first
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Count supports and derive rules on the current thread only
    #[arg(long)]
    pub sequential: bool,

    /// Transactions per counting task
    #[arg(long, default_value = "1000")]
    pub chunk_size: usize,

    /// Largest itemset size to mine
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Abort mining after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print every frequent itemset with its support count
    #[arg(long)]
    pub print_itemsets: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn mining_config(&self) -> MiningConfig {
        let config = MiningConfig::new(self.min_support, self.min_confidence)
            .with_chunk_size(self.chunk_size)
            .with_parallel(!self.sequential);
        match self.max_size {
            Some(max_size) => config.with_max_itemset_size(max_size),
            None => config,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            has_header: !self.no_header,
            columns: self.columns.clone(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

static INIT: Once = Once::new();

/// Installs the global subscriber. `APRIORI_LOG` overrides the level, e.g.
/// `APRIORI_LOG=apriori=debug`.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose { "apriori=debug" } else { "apriori=info" };
        let filter =
            EnvFilter::try_from_env("APRIORI_LOG").unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "apriori",
            "--input",
            "wine.csv",
            "--min-support",
            "5000",
            "--min-confidence",
            "0.9",
            "--columns",
            "province,variety",
            "--sort",
            "lift",
            "--sequential",
            "--max-size",
            "3",
        ]);

        assert_eq!(args.input, PathBuf::from("wine.csv"));
        assert_eq!(args.sort, Some(SortKey::Lift));

        let config = args.mining_config();
        assert_eq!(config.min_support_count, 5000);
        assert_eq!(config.min_confidence, 0.9);
        assert!(!config.parallel);
        assert_eq!(config.max_itemset_size, Some(3));

        let options = args.load_options();
        assert!(options.has_header);
        assert_eq!(
            options.columns,
            Some(vec!["province".to_string(), "variety".to_string()])
        );
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["apriori", "-i", "baskets.csv", "-s", "2"]);

        assert_eq!(args.min_confidence, 0.5);
        assert_eq!(args.delimiter, ',');
        assert!(args.timeout().is_none());
        assert!(args.mining_config().parallel);
        assert!(args.load_options().columns.is_none());
    }
}
