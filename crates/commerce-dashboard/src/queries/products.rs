use std::collections::HashMap;
use tracing::debug;

use super::{TopN, count_keys, rank_top_n};
use crate::loader::Dataset;
use crate::types::{CategoryCount, ProductCount};

/// Label used for products whose category has no english name.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Products appearing on the most line items.
///
/// The category attached to each product is taken from the first line item
/// carrying that product id.
pub fn top_products(data: &Dataset, n: TopN) -> Vec<ProductCount> {
    let counts = count_keys(data.line_items.iter().map(|item| item.product_id.as_deref()));

    let mut first_category: HashMap<&str, Option<&str>> = HashMap::with_capacity(counts.len());
    for item in &data.line_items {
        if let Some(product_id) = item.product_id.as_deref() {
            first_category
                .entry(product_id)
                .or_insert(item.product_category_name_english.as_deref());
        }
    }

    let result: Vec<ProductCount> = rank_top_n(counts, n)
        .into_iter()
        .map(|(product_id, total_orders)| {
            let category = first_category.get(product_id).copied().flatten();
            ProductCount {
                product_id: product_id.to_string(),
                category: category.map(str::to_string),
                total_orders,
                label: format!("{} ({})", category.unwrap_or(UNCATEGORIZED), total_orders),
            }
        })
        .collect();

    debug!("top_products(n={}): {} rows", n, result.len());
    result
}

/// English categories with the most line items.
///
/// Line items without an english category name or without an order id are
/// not counted.
pub fn top_categories(data: &Dataset, n: TopN) -> Vec<CategoryCount> {
    let counts = count_keys(
        data.line_items
            .iter()
            .filter(|item| item.order_id.is_some())
            .map(|item| item.product_category_name_english.as_deref()),
    );

    let result: Vec<CategoryCount> = rank_top_n(counts, n)
        .into_iter()
        .map(|(category, total_orders)| CategoryCount {
            category: category.to_string(),
            total_orders,
        })
        .collect();

    debug!("top_categories(n={}): {} rows", n, result.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Tables;
    use crate::types::{CategoryTranslation, OrderItem, Product};
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        let products = vec![
            ("p1", Some("cama_mesa_banho")),
            ("p2", Some("moveis_decoracao")),
            ("p3", Some("sem_traducao")),
            ("p4", None),
        ];
        let translations = vec![
            ("cama_mesa_banho", "bed_bath_table"),
            ("moveis_decoracao", "furniture_decor"),
        ];
        let items = vec![
            ("o1", "p1"),
            ("o2", "p1"),
            ("o3", "p1"),
            ("o4", "p2"),
            ("o5", "p2"),
            ("o6", "p3"),
            ("o7", "p4"),
            ("o8", "p4"),
            ("o9", "unknown"),
        ];

        Dataset::from_tables(Tables {
            products: products
                .into_iter()
                .map(|(id, category)| Product {
                    product_id: Some(id.to_string()),
                    product_category_name: category.map(str::to_string),
                })
                .collect(),
            category_translations: translations
                .into_iter()
                .map(|(name, english)| CategoryTranslation {
                    product_category_name: Some(name.to_string()),
                    product_category_name_english: Some(english.to_string()),
                })
                .collect(),
            order_items: items
                .into_iter()
                .map(|(order, product)| OrderItem {
                    order_id: Some(order.to_string()),
                    product_id: Some(product.to_string()),
                    seller_id: Some("s1".to_string()),
                })
                .collect(),
            ..Tables::default()
        })
    }

    #[test]
    fn test_top_products_labels() {
        let data = dataset();
        let result = top_products(&data, TopN::new(5).unwrap());

        let labels: Vec<&str> = result.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "bed_bath_table (3)",
                "furniture_decor (2)",
                "uncategorized (2)",
                "uncategorized (1)",
                "uncategorized (1)",
            ]
        );
        assert_eq!(result[2].product_id, "p4");
        assert_eq!(result[2].category, None);
        assert_eq!(result[3].product_id, "p3");
        assert_eq!(result[4].product_id, "unknown");
    }

    #[test]
    fn test_top_products_total_bounded_by_line_items() {
        let data = dataset();
        let result = top_products(&data, TopN::new(20).unwrap());
        let total: usize = result.iter().map(|p| p.total_orders).sum();
        assert!(total <= data.line_items.len());

        for product in &result {
            let count = product
                .label
                .rsplit_once(" (")
                .and_then(|(_, tail)| tail.strip_suffix(')'))
                .unwrap();
            assert_eq!(count, product.total_orders.to_string());
        }
    }

    #[test]
    fn test_label_keeps_digits_in_category() {
        let data = Dataset::from_tables(Tables {
            products: vec![Product {
                product_id: Some("p1".to_string()),
                product_category_name: Some("eletrodomesticos_2".to_string()),
            }],
            category_translations: vec![CategoryTranslation {
                product_category_name: Some("eletrodomesticos_2".to_string()),
                product_category_name_english: Some("home_appliances_2".to_string()),
            }],
            order_items: vec![OrderItem {
                order_id: Some("o1".to_string()),
                product_id: Some("p1".to_string()),
                seller_id: Some("s1".to_string()),
            }],
            ..Tables::default()
        });

        let result = top_products(&data, TopN::new(5).unwrap());
        assert_eq!(result[0].label, "home_appliances_2 (1)");
    }

    #[test]
    fn test_duplicate_translations_first_category_wins() {
        let data = Dataset::from_tables(Tables {
            products: vec![Product {
                product_id: Some("p1".to_string()),
                product_category_name: Some("casa".to_string()),
            }],
            category_translations: ["home", "house"]
                .into_iter()
                .map(|english| CategoryTranslation {
                    product_category_name: Some("casa".to_string()),
                    product_category_name_english: Some(english.to_string()),
                })
                .collect(),
            order_items: vec![OrderItem {
                order_id: Some("o1".to_string()),
                product_id: Some("p1".to_string()),
                seller_id: Some("s1".to_string()),
            }],
            ..Tables::default()
        });
        let n = TopN::new(5).unwrap();

        // The single order item fans out into one line item per translation.
        assert_eq!(
            top_products(&data, n),
            vec![ProductCount {
                product_id: "p1".to_string(),
                category: Some("home".to_string()),
                total_orders: 2,
                label: "home (2)".to_string(),
            }]
        );
        assert_eq!(
            top_categories(&data, n),
            vec![
                CategoryCount {
                    category: "home".to_string(),
                    total_orders: 1,
                },
                CategoryCount {
                    category: "house".to_string(),
                    total_orders: 1,
                },
            ]
        );
    }

    #[test]
    fn test_top_categories() {
        let data = dataset();
        let result = top_categories(&data, TopN::new(5).unwrap());
        assert_eq!(
            result,
            vec![
                CategoryCount {
                    category: "bed_bath_table".to_string(),
                    total_orders: 3,
                },
                CategoryCount {
                    category: "furniture_decor".to_string(),
                    total_orders: 2,
                },
            ]
        );
    }

    #[test]
    fn test_queries_are_idempotent() {
        let data = dataset();
        let n = TopN::new(10).unwrap();
        assert_eq!(top_products(&data, n), top_products(&data, n));
        assert_eq!(top_categories(&data, n), top_categories(&data, n));
    }
}
