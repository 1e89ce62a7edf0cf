//! Dataset loading.
//!
//! Reads the six input CSV files into typed tables, runs the two enrichment
//! joins, and bundles everything into an immutable [`Dataset`].
//!
//! Loading is all-or-nothing: any missing file, missing column, or bad
//! timestamp fails the whole load. Use [`DatasetCache`] (or
//! [`shared_dataset`]) to pay the cost once per process.

mod cache;
mod csv;

pub use cache::{DatasetCache, shared_dataset};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::DatasetFiles;
use crate::error::{Result, ResultExt};
use crate::join::{JoinReport, enrich_line_items, enrich_products};
use crate::types::{
    CategoryTranslation, Customer, EnrichedLineItem, EnrichedProduct, Order, OrderItem, Product,
    Seller,
};

/// Locations of the six input files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub customers: PathBuf,
    pub sellers: PathBuf,
    pub orders: PathBuf,
    pub order_items: PathBuf,
    pub products: PathBuf,
    pub category_translation: PathBuf,
}

impl DatasetPaths {
    pub fn new(data_dir: &Path, files: &DatasetFiles) -> Self {
        Self {
            customers: data_dir.join(&files.customers),
            sellers: data_dir.join(&files.sellers),
            orders: data_dir.join(&files.orders),
            order_items: data_dir.join(&files.order_items),
            products: data_dir.join(&files.products),
            category_translation: data_dir.join(&files.category_translation),
        }
    }

    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref(), &DatasetFiles::default())
    }
}

/// The six source tables.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub customers: Vec<Customer>,
    pub sellers: Vec<Seller>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub products: Vec<Product>,
    pub category_translations: Vec<CategoryTranslation>,
}

impl Tables {
    /// Load all six tables from disk.
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        Ok(Self {
            customers: load_customers(&paths.customers).context("Loading customers")?,
            sellers: load_sellers(&paths.sellers).context("Loading sellers")?,
            orders: load_orders(&paths.orders).context("Loading orders")?,
            order_items: load_order_items(&paths.order_items).context("Loading order items")?,
            products: load_products(&paths.products).context("Loading products")?,
            category_translations: load_translations(&paths.category_translation)
                .context("Loading category translations")?,
        })
    }
}

/// Loaded tables plus the enriched join outputs. Never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub tables: Tables,
    pub enriched_products: Vec<EnrichedProduct>,
    pub line_items: Vec<EnrichedLineItem>,
    pub product_join: JoinReport,
    pub line_item_join: JoinReport,
}

static_assertions::assert_impl_all!(Dataset: Send, Sync);

impl Dataset {
    /// Load the tables from disk and run the enrichment joins.
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        let started = Instant::now();
        let tables = Tables::load(paths)?;
        let dataset = Self::from_tables(tables);

        info!(
            "Dataset loaded in {}ms: {} customers, {} sellers, {} orders, {} line items",
            started.elapsed().as_millis(),
            dataset.tables.customers.len(),
            dataset.tables.sellers.len(),
            dataset.tables.orders.len(),
            dataset.line_items.len()
        );
        Ok(dataset)
    }

    /// Build a dataset from in-memory tables.
    ///
    /// Category enrichment runs first; the line-item join depends on it.
    pub fn from_tables(tables: Tables) -> Self {
        let (enriched_products, product_join) =
            enrich_products(&tables.products, &tables.category_translations);
        let (line_items, line_item_join) =
            enrich_line_items(&tables.order_items, &enriched_products);

        Self {
            tables,
            enriched_products,
            line_items,
            product_join,
            line_item_join,
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            customers: self.tables.customers.len(),
            sellers: self.tables.sellers.len(),
            orders: self.tables.orders.len(),
            order_items: self.tables.order_items.len(),
            products: self.tables.products.len(),
            category_translations: self.tables.category_translations.len(),
            enriched_line_items: self.line_items.len(),
            uncategorized_products: self
                .enriched_products
                .iter()
                .filter(|p| p.product_category_name_english.is_none())
                .count(),
        }
    }
}

/// Row counts of every table, for report headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub customers: usize,
    pub sellers: usize,
    pub orders: usize,
    pub order_items: usize,
    pub products: usize,
    pub category_translations: usize,
    pub enriched_line_items: usize,
    /// Enriched products without an english category name.
    pub uncategorized_products: usize,
}

// ============================================================================
// Per-table loaders
// ============================================================================

fn load_customers(path: &Path) -> Result<Vec<Customer>> {
    let df = csv::read_csv(path)?;
    let ids = csv::text_column(&df, "customers", "customer_id")?;
    let cities = csv::text_column(&df, "customers", "customer_city")?;

    let rows: Vec<Customer> = ids
        .into_iter()
        .zip(cities)
        .map(|(customer_id, customer_city)| Customer {
            customer_id,
            customer_city,
        })
        .collect();
    debug!("customers: {} rows", rows.len());
    Ok(rows)
}

fn load_sellers(path: &Path) -> Result<Vec<Seller>> {
    let df = csv::read_csv(path)?;
    let ids = csv::text_column(&df, "sellers", "seller_id")?;
    let cities = csv::text_column(&df, "sellers", "seller_city")?;

    let rows: Vec<Seller> = ids
        .into_iter()
        .zip(cities)
        .map(|(seller_id, seller_city)| Seller {
            seller_id,
            seller_city,
        })
        .collect();
    debug!("sellers: {} rows", rows.len());
    Ok(rows)
}

fn load_orders(path: &Path) -> Result<Vec<Order>> {
    let df = csv::read_csv(path)?;
    let ids = csv::text_column(&df, "orders", "order_id")?;
    let customers = csv::text_column(&df, "orders", "customer_id")?;
    let timestamps = csv::text_column(&df, "orders", "order_purchase_timestamp")?;

    let mut rows = Vec::with_capacity(ids.len());
    for ((order_id, customer_id), raw_timestamp) in ids.into_iter().zip(customers).zip(timestamps) {
        let purchase_timestamp = raw_timestamp
            .as_deref()
            .map(csv::parse_timestamp)
            .transpose()?;
        rows.push(Order {
            order_id,
            customer_id,
            purchase_timestamp,
        });
    }
    debug!("orders: {} rows", rows.len());
    Ok(rows)
}

fn load_order_items(path: &Path) -> Result<Vec<OrderItem>> {
    let df = csv::read_csv(path)?;
    let orders = csv::text_column(&df, "order_items", "order_id")?;
    let products = csv::text_column(&df, "order_items", "product_id")?;
    let sellers = csv::text_column(&df, "order_items", "seller_id")?;

    let rows: Vec<OrderItem> = orders
        .into_iter()
        .zip(products)
        .zip(sellers)
        .map(|((order_id, product_id), seller_id)| OrderItem {
            order_id,
            product_id,
            seller_id,
        })
        .collect();
    debug!("order_items: {} rows", rows.len());
    Ok(rows)
}

fn load_products(path: &Path) -> Result<Vec<Product>> {
    let df = csv::read_csv(path)?;
    let ids = csv::text_column(&df, "products", "product_id")?;
    let categories = csv::text_column(&df, "products", "product_category_name")?;

    let rows: Vec<Product> = ids
        .into_iter()
        .zip(categories)
        .map(|(product_id, product_category_name)| Product {
            product_id,
            product_category_name,
        })
        .collect();
    debug!("products: {} rows", rows.len());
    Ok(rows)
}

fn load_translations(path: &Path) -> Result<Vec<CategoryTranslation>> {
    let table = "category_translation";
    let df = csv::read_csv(path)?;
    let names = csv::text_column(&df, table, "product_category_name")?;
    let english = csv::text_column(&df, table, "product_category_name_english")?;

    let rows: Vec<CategoryTranslation> = names
        .into_iter()
        .zip(english)
        .map(
            |(product_category_name, product_category_name_english)| CategoryTranslation {
                product_category_name,
                product_category_name_english,
            },
        )
        .collect();
    debug!("category_translation: {} rows", rows.len());
    Ok(rows)
}
