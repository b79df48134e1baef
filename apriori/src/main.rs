//! apriori: mine frequent itemsets and association rules from a delimited file
//!
//! Loads transactions, mines the support table, derives rules and prints one
//! line per rule.

use std::time::Instant;

use anyhow::{Context, Result};
use apriori::cli::{Args, init_tracing};
use apriori::{
    CancellationToken, RuleReport, generate_rules_with, load_delimited, mine_with_cancel,
    rules::report::format_itemset,
};
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.mining_config();
    config.validate()?;

    let started = Instant::now();
    let dataset = load_delimited(&args.input, &args.load_options())
        .with_context(|| format!("loading {}", args.input.display()))?;
    info!(
        transactions = dataset.len(),
        items = dataset.dictionary().len(),
        "dataset loaded"
    );

    let token = CancellationToken::new();
    if let Some(timeout) = args.timeout() {
        let watchdog = token.clone();
        std::thread::spawn(move || {
            std::thread::sleep(timeout);
            watchdog.cancel();
        });
    }

    let table = mine_with_cancel(&dataset, &config, &token).context("mining frequent itemsets")?;

    if args.print_itemsets {
        for (itemset, support) in table.iter() {
            println!(
                "{}: {}",
                format_itemset(itemset, dataset.dictionary()),
                support
            );
        }
    }

    let rules = generate_rules_with(&table, config.min_confidence, config.parallel)
        .context("generating rules")?;
    let mut report = RuleReport::build(rules, &table, dataset.len())?;
    if let Some(key) = args.sort {
        report.sort_by(key);
    }

    for line in report.lines(dataset.dictionary()) {
        println!("{line}");
    }

    info!(
        itemsets = table.len(),
        rules = report.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}
