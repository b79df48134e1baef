use std::thread;
use std::time::{Duration, Instant};

use apriori::{
    CancellationToken, Dataset, MiningConfig, MiningError, generate_rules, mine, mine_with_cancel,
};
use ndarray::Array2;
use rand::Rng;

fn generate_transactions(
    num_transactions: usize,
    num_items: usize,
    avg_transaction_size: usize,
    density: f64,
) -> Dataset {
    let mut rng = rand::thread_rng();
    let mut data = vec![0i32; num_transactions * num_items];

    for tx_idx in 0..num_transactions {
        let random_factor: f64 = rng.r#gen();
        let num_items_in_tx = (avg_transaction_size as f64 * (0.5 + random_factor)).round() as usize;
        let num_items_in_tx = num_items_in_tx.min(num_items);

        for _ in 0..num_items_in_tx {
            let density_check: f64 = rng.r#gen();
            if density_check < density {
                let item = rng.gen_range(0..num_items);
                data[tx_idx * num_items + item] = 1;
            }
        }
    }

    let matrix = Array2::from_shape_vec((num_transactions, num_items), data).unwrap();
    Dataset::from_matrix(matrix.view())
}

fn min_count(dataset: &Dataset, fraction: f64) -> usize {
    ((dataset.len() as f64 * fraction).ceil() as usize).max(1)
}

/// Runs one mining pass with a watchdog that cancels it after `budget`.
fn mine_with_budget(dataset: &Dataset, config: &MiningConfig, budget: Duration) {
    let token = CancellationToken::new();
    let watchdog = token.clone();
    let timer = thread::spawn(move || {
        thread::sleep(budget);
        watchdog.cancel();
    });

    let start = Instant::now();
    match mine_with_cancel(dataset, config, &token) {
        Ok(table) => {
            println!("  Time: {:?}", start.elapsed());
            println!("  Itemsets: {}", table.len());
            println!("  Max itemset size: {}", table.max_itemset_size());
            if table.len() > 1_000_000 {
                println!("  ⚠ Itemset explosion detected!");
            }
        }
        Err(MiningError::Cancelled { level }) => {
            println!("  ✗ Cancelled after {:?} while building level {}", start.elapsed(), level);
        }
        Err(e) => println!("  ✗ Failed: {e}"),
    }

    // The watchdog is left to expire on its own if mining finished early.
    drop(timer);
}

fn stress_test_large_datasets() {
    println!("\n=== Large Dataset Test ===");

    let configs = vec![
        ("10K x 50", 10_000, 50, 15),
        ("50K x 80", 50_000, 80, 20),
        ("100K x 100", 100_000, 100, 25),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        println!("\nTesting: {}", name);
        let start_gen = Instant::now();
        let dataset = generate_transactions(num_tx, num_items, avg_size, 0.7);
        println!("  Generated in {:?}", start_gen.elapsed());

        let config = MiningConfig::new(min_count(&dataset, 0.02), 0.5);
        mine_with_budget(&dataset, &config, Duration::from_secs(60));
    }
}

fn stress_test_sequential_vs_parallel() {
    println!("\n=== Sequential vs Parallel Counting ===");

    let dataset = generate_transactions(50_000, 100, 20, 0.7);
    let threshold = min_count(&dataset, 0.01);

    let start = Instant::now();
    let sequential = mine(&dataset, &MiningConfig::new(threshold, 0.5).with_parallel(false)).unwrap();
    let sequential_time = start.elapsed();
    println!("  Sequential: {:?}, {} itemsets", sequential_time, sequential.len());

    let start = Instant::now();
    let parallel = mine(&dataset, &MiningConfig::new(threshold, 0.5).with_chunk_size(2000)).unwrap();
    let parallel_time = start.elapsed();
    println!("  Parallel:   {:?}, {} itemsets", parallel_time, parallel.len());

    assert_eq!(sequential, parallel, "parallel counting diverged");
    let speedup = sequential_time.as_secs_f64() / parallel_time.as_secs_f64();
    println!("  Speedup: {:.2}x", speedup);
}

fn stress_test_extreme_low_support() {
    println!("\n=== Extreme Low Support Test ===");

    let dataset = generate_transactions(20_000, 100, 20, 0.6);

    for fraction in [0.05, 0.02, 0.01, 0.005, 0.001] {
        println!("\nTesting min_support = {}", fraction);
        let config = MiningConfig::new(min_count(&dataset, fraction), 0.5);
        mine_with_budget(&dataset, &config, Duration::from_secs(30));
    }
}

fn stress_test_dense_data() {
    println!("\n=== Dense Data Test (worst case) ===");

    let configs = vec![
        ("Dense 80%", 10_000, 50, 40, 0.8),
        ("Dense 90%", 10_000, 50, 45, 0.9),
        ("Dense 95%", 10_000, 50, 47, 0.95),
    ];

    for (name, num_tx, num_items, avg_size, density) in configs {
        println!("\nTesting: {}", name);
        let dataset = generate_transactions(num_tx, num_items, avg_size, density);
        let config = MiningConfig::new(min_count(&dataset, 0.1), 0.5);
        mine_with_budget(&dataset, &config, Duration::from_secs(30));
    }
}

fn stress_test_rule_explosion() {
    println!("\n=== Rule Generation Test ===");

    let dataset = generate_transactions(10_000, 40, 12, 0.8);
    let table = mine(&dataset, &MiningConfig::new(min_count(&dataset, 0.02), 0.5)).unwrap();
    println!("  Itemsets: {}", table.len());

    for min_confidence in [0.9, 0.5, 0.1] {
        let start = Instant::now();
        let rules = generate_rules(&table, min_confidence).unwrap();
        println!(
            "  min_confidence = {}: {} rules in {:?}",
            min_confidence,
            rules.len(),
            start.elapsed()
        );
    }
}

fn main() {
    println!("=== Apriori Stress Testing Suite ===");
    println!("Large inputs, low thresholds, dense data and cancellation\n");

    stress_test_large_datasets();
    stress_test_sequential_vs_parallel();
    stress_test_extreme_low_support();
    stress_test_dense_data();
    stress_test_rule_explosion();

    println!("\n=== Stress Testing Complete ===");
}
