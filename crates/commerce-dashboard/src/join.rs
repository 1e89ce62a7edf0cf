//! Left joins used to enrich products and order items.
//!
//! Joins are hash-index lookups over the right table. A left row whose key is
//! null or absent from the index is kept once with no right-side data; a key
//! that appears `k` times on the right fans the left row out `k` times.
//! Duplicate right-side keys are tolerated and reported, never rejected.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::types::{CategoryTranslation, EnrichedLineItem, EnrichedProduct, OrderItem, Product};

/// Row accounting for a single left join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReport {
    pub left_rows: usize,
    pub right_rows: usize,
    pub output_rows: usize,
    /// Left rows that found no right-side match.
    pub unmatched_left: usize,
    /// Distinct right-side keys occurring more than once.
    pub duplicate_right_keys: usize,
}

impl JoinReport {
    /// True when the join preserved the left table's cardinality.
    pub fn preserves_cardinality(&self) -> bool {
        self.output_rows == self.left_rows
    }
}

/// Generic left join on a string key.
pub fn left_join<L, R, O>(
    name: &str,
    left: &[L],
    right: &[R],
    left_key: impl Fn(&L) -> Option<&str>,
    right_key: impl Fn(&R) -> Option<&str>,
    combine: impl Fn(&L, Option<&R>) -> O,
) -> (Vec<O>, JoinReport) {
    let mut index: HashMap<&str, Vec<usize>> = HashMap::with_capacity(right.len());
    for (position, row) in right.iter().enumerate() {
        if let Some(key) = right_key(row) {
            index.entry(key).or_default().push(position);
        }
    }

    let duplicate_right_keys = index.values().filter(|rows| rows.len() > 1).count();

    let mut output = Vec::with_capacity(left.len());
    let mut unmatched_left = 0;

    for row in left {
        match left_key(row).and_then(|key| index.get(key)) {
            Some(matches) => {
                for &position in matches {
                    output.push(combine(row, Some(&right[position])));
                }
            }
            None => {
                unmatched_left += 1;
                output.push(combine(row, None));
            }
        }
    }

    let report = JoinReport {
        left_rows: left.len(),
        right_rows: right.len(),
        output_rows: output.len(),
        unmatched_left,
        duplicate_right_keys,
    };

    if duplicate_right_keys > 0 {
        warn!(
            "{}: {} duplicated right-side keys, {} -> {} rows",
            name, duplicate_right_keys, report.left_rows, report.output_rows
        );
    }
    debug!("{}: {:?}", name, report);

    (output, report)
}

/// Products ⨝ category translations on `product_category_name`.
pub fn enrich_products(
    products: &[Product],
    translations: &[CategoryTranslation],
) -> (Vec<EnrichedProduct>, JoinReport) {
    left_join(
        "product categories",
        products,
        translations,
        |p| p.product_category_name.as_deref(),
        |t| t.product_category_name.as_deref(),
        |p, t| EnrichedProduct {
            product_id: p.product_id.clone(),
            product_category_name: p.product_category_name.clone(),
            product_category_name_english: t
                .and_then(|t| t.product_category_name_english.clone()),
        },
    )
}

/// Order items ⨝ enriched products on `product_id`.
pub fn enrich_line_items(
    items: &[OrderItem],
    products: &[EnrichedProduct],
) -> (Vec<EnrichedLineItem>, JoinReport) {
    left_join(
        "line items",
        items,
        products,
        |i| i.product_id.as_deref(),
        |p| p.product_id.as_deref(),
        |i, p| EnrichedLineItem {
            order_id: i.order_id.clone(),
            product_id: i.product_id.clone(),
            seller_id: i.seller_id.clone(),
            product_category_name: p.and_then(|p| p.product_category_name.clone()),
            product_category_name_english: p
                .and_then(|p| p.product_category_name_english.clone()),
        },
    )
}
