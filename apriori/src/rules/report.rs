use std::cmp::Ordering;

use super::generate::Rule;
use super::metrics::RuleMetrics;
use crate::ap::{Itemset, SupportTable};
use crate::dataset::ItemDictionary;
use crate::error::Result;

/// Metric used to order a [`RuleReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    Support,
    Confidence,
    Lift,
    Cosine,
}

impl SortKey {
    fn value(self, metrics: &RuleMetrics) -> f64 {
        match self {
            SortKey::Support => metrics.support,
            SortKey::Confidence => metrics.confidence,
            SortKey::Lift => metrics.lift,
            SortKey::Cosine => metrics.cosine,
        }
    }
}

/// Rules paired with their metrics, ready for printing.
#[derive(Debug, Clone, Default)]
pub struct RuleReport {
    entries: Vec<(Rule, RuleMetrics)>,
}

impl RuleReport {
    pub fn build(rules: Vec<Rule>, table: &SupportTable, total_transactions: usize) -> Result<Self> {
        let entries: Vec<(Rule, RuleMetrics)> = rules
            .into_iter()
            .map(|rule| {
                let metrics = RuleMetrics::compute(&rule, table, total_transactions)?;
                Ok((rule, metrics))
            })
            .collect::<Result<_>>()?;
        Ok(Self { entries })
    }

    /// Orders entries by `key`, largest first; ties fall back to the rule
    /// itself so the order is stable across runs.
    pub fn sort_by(&mut self, key: SortKey) {
        self.entries.sort_by(|(rule_a, a), (rule_b, b)| {
            key.value(b)
                .partial_cmp(&key.value(a))
                .unwrap_or(Ordering::Equal)
                .then_with(|| rule_a.cmp(rule_b))
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rule, RuleMetrics)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines(&self, dictionary: &ItemDictionary) -> Vec<String> {
        self.entries
            .iter()
            .map(|(rule, metrics)| format_rule(rule, metrics, dictionary))
            .collect()
    }
}

/// `{a} --> {b}: support = 40.00%, confidence = 50.00%, lift = 0.833, cosine = 0.577`
pub fn format_rule(rule: &Rule, metrics: &RuleMetrics, dictionary: &ItemDictionary) -> String {
    format!(
        "{} --> {}: support = {}, confidence = {}, lift = {}, cosine = {}",
        format_itemset(&rule.antecedent, dictionary),
        format_itemset(&rule.consequent, dictionary),
        format_percent(metrics.support),
        format_percent(metrics.confidence),
        format_significant(metrics.lift, 3),
        format_significant(metrics.cosine, 3),
    )
}

pub fn format_itemset(itemset: &Itemset, dictionary: &ItemDictionary) -> String {
    format!("{{{}}}", dictionary.names_of(itemset).join(", "))
}

/// (lift, cosine) of every entry, in report order.
pub fn scatter_points(report: &RuleReport) -> Vec<(f64, f64)> {
    report
        .iter()
        .map(|(_, metrics)| (metrics.lift, metrics.cosine))
        .collect()
}

fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Rounds to `digits` significant digits. Large or tiny magnitudes switch to
/// `1.23e+03` notation; fixed output keeps at least one decimal.
fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return (if value > 0.0 { "inf" } else { "-inf" }).to_owned();
    }
    if value == 0.0 {
        return "0.0".to_owned();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 - 1 {
        let mantissa = strip_zeros(mantissa);
        let mantissa = mantissa.strip_suffix('.').unwrap_or(mantissa.as_str());
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let decimals = (digits as i32 - 1 - exponent).max(1) as usize;
    let fixed = strip_zeros(&format!("{value:.decimals$}"));
    if fixed.ends_with('.') {
        format!("{fixed}0")
    } else {
        fixed
    }
}

fn strip_zeros(number: &str) -> String {
    if number.contains('.') {
        number.trim_end_matches('0').to_owned()
    } else {
        number.to_owned()
    }
}
