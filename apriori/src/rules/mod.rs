pub mod generate;
pub mod metrics;
pub mod report;

pub use generate::{Rule, generate_rules, generate_rules_with};
pub use metrics::{RuleMetrics, confidence, cosine, lift, support};
pub use report::{RuleReport, SortKey, format_rule, scatter_points};
