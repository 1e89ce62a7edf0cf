//! Integration tests for the dashboard.
//!
//! These tests load the small CSV tables under `tests/fixtures` and check the
//! five sections end to end.

use commerce_dashboard::queries::{
    hourly_transactions, top_categories, top_customer_cities, top_products, top_seller_cities,
};
use commerce_dashboard::{
    CategoryCount, CityCount, Controls, DashboardConfig, DashboardError, Dataset, DatasetCache,
    DatasetFiles, DatasetPaths, HourSelection, HourlyCount, Question, ReportGenerator,
    SectionData, TopN, compute_all, compute_section, shared_dataset,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixtures() -> Dataset {
    Dataset::load(&DatasetPaths::in_dir(fixtures_path())).expect("Failed to load fixtures")
}

fn top(n: usize) -> TopN {
    TopN::new(n).unwrap()
}

fn city(name: &str, count: usize) -> CityCount {
    CityCount {
        city: name.to_string(),
        count,
    }
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_fixture_tables() {
    let data = load_fixtures();
    let summary = data.summary();

    assert_eq!(summary.customers, 12);
    assert_eq!(summary.sellers, 6);
    assert_eq!(summary.orders, 8);
    assert_eq!(summary.order_items, 11);
    assert_eq!(summary.products, 6);
    assert_eq!(summary.category_translations, 3);

    // Empty timestamp stays missing, the `T` separated one is parsed.
    let timestamps: Vec<_> = data
        .tables
        .orders
        .iter()
        .map(|o| o.purchase_timestamp.is_some())
        .collect();
    assert_eq!(timestamps.iter().filter(|present| **present).count(), 7);
}

#[test]
fn test_join_cardinality() {
    let data = load_fixtures();

    assert_eq!(data.line_items.len(), data.tables.order_items.len());
    assert_eq!(data.enriched_products.len(), data.tables.products.len());
    assert!(data.product_join.preserves_cardinality());
    assert!(data.line_item_join.preserves_cardinality());

    // p5 has no category, p6 has no translation.
    assert_eq!(data.product_join.unmatched_left, 2);
    assert_eq!(data.summary().uncategorized_products, 2);
    // p9 is not in the products table.
    assert_eq!(data.line_item_join.unmatched_left, 1);
}

#[test]
fn test_shared_dataset_is_memoized() {
    let paths = DatasetPaths::in_dir(fixtures_path());

    let first = shared_dataset(&paths).unwrap();
    let second = shared_dataset(&paths).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_cache_failure_leaves_cell_empty() {
    let cache = DatasetCache::new();
    let missing = DatasetPaths::in_dir(fixtures_path().join("does_not_exist"));

    let err = cache.get_or_load(&missing).unwrap_err();
    assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    assert!(err.is_load_failure());
    assert!(!cache.is_loaded());

    let loaded = cache.get_or_load(&DatasetPaths::in_dir(fixtures_path())).unwrap();
    assert!(cache.is_loaded());
    assert!(Arc::ptr_eq(&loaded, &cache.get().unwrap()));
}

#[test]
fn test_missing_column_fails_load() {
    let err = Dataset::load(&DatasetPaths::in_dir(fixtures_path().join("missing_column")))
        .unwrap_err();

    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    assert!(err.to_string().contains("customer_city"));
}

#[test]
fn test_bad_timestamp_fails_load() {
    let files = DatasetFiles {
        orders: "bad_timestamp/orders_dataset.csv".to_string(),
        ..DatasetFiles::default()
    };
    let paths = DatasetPaths::new(&fixtures_path(), &files);

    let err = Dataset::load(&paths).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_TIMESTAMP");
    assert!(err.is_load_failure());
    assert!(err.to_string().contains("02/10/2017 8am"));
}

#[test]
fn test_custom_file_names() {
    let files = DatasetFiles {
        customers: "missing.csv".to_string(),
        ..DatasetFiles::default()
    };
    let config = DashboardConfig::builder()
        .data_dir(fixtures_path())
        .files(files)
        .build()
        .unwrap();

    let err = Dataset::load(&config.dataset_paths()).unwrap_err();
    assert!(matches!(
        err,
        DashboardError::WithContext { .. } | DashboardError::FileNotFound(_)
    ));
    assert!(err.to_string().contains("missing.csv"));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_top_customer_cities() {
    let data = load_fixtures();

    assert_eq!(
        top_customer_cities(&data, top(5)),
        vec![
            city("sao paulo", 4),
            city("rio de janeiro", 3),
            city("curitiba", 2),
            city("campinas", 1),
            city("santos", 1),
        ]
    );
}

#[test]
fn test_top_seller_cities_fewer_than_n() {
    let data = load_fixtures();
    let rows = top_seller_cities(&data, top(10));

    assert_eq!(
        rows,
        vec![city("sao paulo", 3), city("curitiba", 2), city("ibitinga", 1)]
    );
}

#[test]
fn test_city_counts_are_non_increasing() {
    let data = load_fixtures();
    for n in [5, 10, 20] {
        let rows = top_customer_cities(&data, top(n));
        assert!(rows.len() <= n);
        assert!(rows.windows(2).all(|pair| pair[0].count >= pair[1].count));
    }
}

#[test]
fn test_hourly_transactions() {
    let data = load_fixtures();
    let hour = |hour, count| HourlyCount { hour, count };

    assert_eq!(
        hourly_transactions(&data, &HourSelection::all()),
        vec![hour(8, 2), hour(9, 1), hour(12, 3), hour(20, 1)]
    );
    assert_eq!(
        hourly_transactions(&data, &HourSelection::new([8, 9, 12]).unwrap()),
        vec![hour(8, 2), hour(9, 1), hour(12, 3)]
    );
    assert!(hourly_transactions(&data, &HourSelection::none()).is_empty());
}

#[test]
fn test_top_products() {
    let data = load_fixtures();
    let rows = top_products(&data, top(5));

    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "bed_bath_table (3)",
            "bed_bath_table (2)",
            "health_beauty (2)",
            "computers_accessories (1)",
            "uncategorized (1)",
        ]
    );

    let total: usize = rows.iter().map(|r| r.total_orders).sum();
    assert!(total <= data.line_items.len());
    for row in &rows {
        assert!(row.label.ends_with(&format!("({})", row.total_orders)));
    }
}

#[test]
fn test_top_categories() {
    let data = load_fixtures();
    let category = |name: &str, total_orders| CategoryCount {
        category: name.to_string(),
        total_orders,
    };

    assert_eq!(
        top_categories(&data, top(5)),
        vec![
            category("bed_bath_table", 4),
            category("health_beauty", 2),
            category("computers_accessories", 1),
        ]
    );
}

#[test]
fn test_queries_are_idempotent() {
    let data = load_fixtures();
    let controls = Controls::default();

    assert_eq!(compute_all(&data, &controls), compute_all(&data, &controls));
}

// ============================================================================
// Dashboard
// ============================================================================

#[test]
fn test_sections_follow_controls() {
    let data = load_fixtures();
    let config = DashboardConfig::builder()
        .data_dir(fixtures_path())
        .top_cities(5)
        .hours(vec![20, 8])
        .build()
        .unwrap();
    let controls = Controls::from_config(&config).unwrap();

    let cities = compute_section(&data, Question::CustomerCities, &controls);
    assert_eq!(cities.data.len(), 5);
    assert_eq!(cities.chart.points[0].label, "sao paulo");

    let hourly = compute_section(&data, Question::HourlyTrend, &controls);
    match hourly.data {
        SectionData::Hourly(rows) => {
            assert_eq!(rows.iter().map(|r| r.hour).collect::<Vec<_>>(), vec![8, 20]);
        }
        other => panic!("unexpected section data: {:?}", other),
    }
}

#[test]
fn test_text_and_json_report() {
    let data = load_fixtures();
    let report = ReportGenerator::build(&data, &Controls::default(), "fixtures");

    let text = ReportGenerator::to_text(&report).unwrap();
    for question in Question::ALL {
        assert!(text.contains(question.heading()));
    }
    assert!(text.contains("bed_bath_table (3)"));

    let json: serde_json::Value =
        serde_json::from_str(&ReportGenerator::to_json(&report).unwrap()).unwrap();
    assert_eq!(json["dataset"]["order_items"], 11);
    assert_eq!(json["sections"][2]["data"]["rows"][2]["hour"], 12);
    assert_eq!(json["sections"][4]["data"]["rows"][0]["total_orders"], 4);
}
