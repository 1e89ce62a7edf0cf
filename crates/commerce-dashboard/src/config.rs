//! Configuration for the dashboard.
//!
//! This module provides the dashboard configuration using the builder pattern:
//! where the input files live and the initial value of every section control.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::DatasetPaths;

/// Smallest value a top-N slider accepts.
pub const TOP_N_MIN: usize = 5;
/// Largest value a top-N slider accepts.
pub const TOP_N_MAX: usize = 20;
/// Initial value of every top-N slider.
pub const TOP_N_DEFAULT: usize = 10;
/// Number of selectable hours (0..=23).
pub const HOURS_PER_DAY: u8 = 24;

static_assertions::const_assert!(TOP_N_MIN <= TOP_N_DEFAULT && TOP_N_DEFAULT <= TOP_N_MAX);

/// File names of the six input tables, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFiles {
    pub customers: String,
    pub sellers: String,
    pub orders: String,
    pub order_items: String,
    pub products: String,
    pub category_translation: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            customers: "customers_dataset.csv".to_string(),
            sellers: "sellers_dataset.csv".to_string(),
            orders: "orders_dataset.csv".to_string(),
            order_items: "order_items_dataset.csv".to_string(),
            products: "products_dataset.csv".to_string(),
            category_translation: "product_category_name_translation.csv".to_string(),
        }
    }
}

impl DatasetFiles {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("customers", self.customers.as_str()),
            ("sellers", self.sellers.as_str()),
            ("orders", self.orders.as_str()),
            ("order_items", self.order_items.as_str()),
            ("products", self.products.as_str()),
            ("category_translation", self.category_translation.as_str()),
        ]
        .into_iter()
    }
}

/// Configuration for the dashboard.
///
/// Use [`DashboardConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use commerce_dashboard::config::DashboardConfig;
///
/// let config = DashboardConfig::builder()
///     .data_dir("Data")
///     .top_cities(15)
///     .hours(vec![8, 9, 12])
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory holding the input CSV files.
    /// Default: "Data"
    pub data_dir: PathBuf,

    /// Input file names inside `data_dir`.
    pub files: DatasetFiles,

    /// Initial number of customer cities shown.
    /// Default: 10
    pub top_cities: usize,

    /// Initial number of seller cities shown.
    /// Default: 10
    pub top_seller_cities: usize,

    /// Initial number of products shown.
    /// Default: 10
    pub top_products: usize,

    /// Initial number of categories shown.
    /// Default: 10
    pub top_categories: usize,

    /// Initially selected purchase hours.
    /// Default: all 24 hours
    pub hours: Vec<u8>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data"),
            files: DatasetFiles::default(),
            top_cities: TOP_N_DEFAULT,
            top_seller_cities: TOP_N_DEFAULT,
            top_products: TOP_N_DEFAULT,
            top_categories: TOP_N_DEFAULT,
            hours: (0..HOURS_PER_DAY).collect(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Full paths of the six input files.
    pub fn dataset_paths(&self) -> DatasetPaths {
        DatasetPaths::new(&self.data_dir, &self.files)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("top_cities", self.top_cities),
            ("top_seller_cities", self.top_seller_cities),
            ("top_products", self.top_products),
            ("top_categories", self.top_categories),
        ] {
            if !(TOP_N_MIN..=TOP_N_MAX).contains(&value) {
                return Err(ConfigValidationError::TopNOutOfRange {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if let Some(&hour) = self.hours.iter().find(|&&h| h >= HOURS_PER_DAY) {
            return Err(ConfigValidationError::InvalidHour(hour));
        }

        if let Some((table, _)) = self.files.iter().find(|(_, name)| name.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyFileName(table.to_string()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': {value} (must be between 5 and 20)")]
    TopNOutOfRange { field: String, value: usize },

    #[error("Invalid hour: {0} (must be between 0 and 23)")]
    InvalidHour(u8),

    #[error("Empty file name for table '{0}'")]
    EmptyFileName(String),
}

impl From<ConfigValidationError> for crate::error::DashboardError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::DashboardError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`DashboardConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    data_dir: Option<PathBuf>,
    files: Option<DatasetFiles>,
    top_cities: Option<usize>,
    top_seller_cities: Option<usize>,
    top_products: Option<usize>,
    top_categories: Option<usize>,
    hours: Option<Vec<u8>>,
}

impl DashboardConfigBuilder {
    /// Set the directory holding the input CSV files.
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Override the input file names.
    pub fn files(mut self, files: DatasetFiles) -> Self {
        self.files = Some(files);
        self
    }

    /// Set the initial number of customer cities.
    pub fn top_cities(mut self, n: usize) -> Self {
        self.top_cities = Some(n);
        self
    }

    /// Set the initial number of seller cities.
    pub fn top_seller_cities(mut self, n: usize) -> Self {
        self.top_seller_cities = Some(n);
        self
    }

    /// Set the initial number of products.
    pub fn top_products(mut self, n: usize) -> Self {
        self.top_products = Some(n);
        self
    }

    /// Set the initial number of categories.
    pub fn top_categories(mut self, n: usize) -> Self {
        self.top_categories = Some(n);
        self
    }

    /// Set the initially selected purchase hours.
    ///
    /// Duplicates are removed and the hours are kept in ascending order.
    pub fn hours(mut self, mut hours: Vec<u8>) -> Self {
        hours.sort_unstable();
        hours.dedup();
        self.hours = Some(hours);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `DashboardConfig` or an error if validation fails.
    pub fn build(self) -> Result<DashboardConfig, ConfigValidationError> {
        let config = DashboardConfig {
            data_dir: self.data_dir.unwrap_or_else(|| PathBuf::from("Data")),
            files: self.files.unwrap_or_default(),
            top_cities: self.top_cities.unwrap_or(TOP_N_DEFAULT),
            top_seller_cities: self.top_seller_cities.unwrap_or(TOP_N_DEFAULT),
            top_products: self.top_products.unwrap_or(TOP_N_DEFAULT),
            top_categories: self.top_categories.unwrap_or(TOP_N_DEFAULT),
            hours: self
                .hours
                .unwrap_or_else(|| (0..HOURS_PER_DAY).collect()),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("Data"));
        assert_eq!(config.top_cities, 10);
        assert_eq!(config.top_categories, 10);
        assert_eq!(config.hours.len(), 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = DashboardConfig::builder()
            .data_dir("fixtures")
            .top_cities(5)
            .top_products(20)
            .hours(vec![12, 8, 9, 8])
            .build()
            .unwrap();

        assert_eq!(config.top_cities, 5);
        assert_eq!(config.top_seller_cities, 10);
        assert_eq!(config.top_products, 20);
        assert_eq!(config.hours, vec![8, 9, 12]);
        assert_eq!(
            config.dataset_paths().orders,
            PathBuf::from("fixtures").join("orders_dataset.csv")
        );
    }

    #[test]
    fn test_validation_top_n_out_of_range() {
        let result = DashboardConfig::builder().top_categories(21).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::TopNOutOfRange { value: 21, .. }
        ));

        let result = DashboardConfig::builder().top_cities(4).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_invalid_hour() {
        let result = DashboardConfig::builder().hours(vec![3, 24]).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidHour(24)
        ));
    }

    #[test]
    fn test_validation_empty_file_name() {
        let files = DatasetFiles {
            sellers: " ".to_string(),
            ..DatasetFiles::default()
        };
        let result = DashboardConfig::builder().files(files).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyFileName(ref table) if table == "sellers"
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "data_dir": "/srv/olist",
            "files": {
                "customers": "c.csv",
                "sellers": "s.csv",
                "orders": "o.csv",
                "order_items": "oi.csv",
                "products": "p.csv",
                "category_translation": "t.csv"
            },
            "top_cities": 7,
            "top_seller_cities": 8,
            "top_products": 9,
            "top_categories": 11,
            "hours": [0, 23]
        }"#;

        let config: DashboardConfig = serde_json::from_str(json).expect("valid config json");
        assert!(config.validate().is_ok());
        assert_eq!(config.files.orders, "o.csv");
        assert_eq!(config.top_categories, 11);
        assert_eq!(config.hours, vec![0, 23]);
    }
}
