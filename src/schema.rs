use serde_json::Value;

use crate::record::Series;

/// Chains present in the **last** record of a series, in that record's own
/// field order, reserved keys skipped.
///
/// The most recent snapshot alone decides which chains exist: a chain
/// tracked in older records but dropped since gets no row, even though its
/// historical values are still in the series. An empty series yields an
/// empty set, never an error.
pub fn partition_keys(series: &Series) -> Vec<String> {
    series
        .last()
        .map(|record| {
            record
                .partition_fields()
                .map(|(chain, _)| chain.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Tokens ever observed under a chain, scanning the **entire** series oldest
/// to newest, in first-seen order.
///
/// Only records where the chain's value is a nested map contribute; bare
/// scalars under the chain are ignored.
pub fn sub_dimension_keys(series: &Series, chain: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for record in series {
        for (key, value) in record.partition_fields() {
            if key != chain {
                continue;
            }
            if let Value::Object(nested) = value {
                for token in nested.keys() {
                    if !tokens.iter().any(|t| t == token) {
                        tokens.push(token.clone());
                    }
                }
            }
        }
    }
    tokens
}
