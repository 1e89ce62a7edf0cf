use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Source Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: Option<String>,
    pub customer_city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    pub seller_id: Option<String>,
    pub seller_city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    /// `None` when the source cell is empty.
    pub purchase_timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub seller_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: Option<String>,
    pub product_category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTranslation {
    pub product_category_name: Option<String>,
    pub product_category_name_english: Option<String>,
}

// ============================================================================
// Derived Records
// ============================================================================

/// A product with its english category name attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    pub product_id: Option<String>,
    pub product_category_name: Option<String>,
    pub product_category_name_english: Option<String>,
}

/// An order item with its product's category information attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedLineItem {
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub seller_id: Option<String>,
    pub product_category_name: Option<String>,
    pub product_category_name_english: Option<String>,
}

// ============================================================================
// Query Results
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    pub hour: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCount {
    pub product_id: String,
    pub category: Option<String>,
    pub total_orders: usize,
    /// `"<category> (<total_orders>)"`.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub total_orders: usize,
}

// ============================================================================
// Dashboard Questions
// ============================================================================

/// The five business questions, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    CustomerCities,
    SellerCities,
    HourlyTrend,
    TopProducts,
    TopCategories,
}

impl Question {
    pub const ALL: [Question; 5] = [
        Question::CustomerCities,
        Question::SellerCities,
        Question::HourlyTrend,
        Question::TopProducts,
        Question::TopCategories,
    ];

    /// Position on the page (0-based).
    pub fn index(self) -> usize {
        match self {
            Question::CustomerCities => 0,
            Question::SellerCities => 1,
            Question::HourlyTrend => 2,
            Question::TopProducts => 3,
            Question::TopCategories => 4,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Question::CustomerCities => "Question 1: Customer Demographics",
            Question::SellerCities => "Question 2: Seller Demographics",
            Question::HourlyTrend => "Question 3: Hourly Transaction Trend",
            Question::TopProducts => "Question 4: Most Purchased Products",
            Question::TopCategories => "Question 5: Best Selling Product Categories",
        }
    }

    /// Short name used for tabs.
    pub fn short_name(self) -> &'static str {
        match self {
            Question::CustomerCities => "Customers",
            Question::SellerCities => "Sellers",
            Question::HourlyTrend => "Hourly",
            Question::TopProducts => "Products",
            Question::TopCategories => "Categories",
        }
    }

    /// Label of the section's control.
    pub fn control_label(self) -> &'static str {
        match self {
            Question::CustomerCities => "Number of top cities",
            Question::SellerCities => "Number of top seller cities",
            Question::HourlyTrend => "Transaction hours to display",
            Question::TopProducts => "Number of top products",
            Question::TopCategories => "Number of top categories",
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_order_matches_index() {
        for (position, question) in Question::ALL.iter().enumerate() {
            assert_eq!(question.index(), position);
        }
    }

    #[test]
    fn test_question_serialization() {
        let json = serde_json::to_string(&Question::HourlyTrend).unwrap();
        assert_eq!(json, "\"hourly_trend\"");
    }

    #[test]
    fn test_order_timestamp_is_optional() {
        let placed = chrono::NaiveDate::from_ymd_opt(2018, 3, 8)
            .unwrap()
            .and_hms_opt(12, 30, 0);
        let order = Order {
            order_id: Some("o1".to_string()),
            customer_id: Some("c1".to_string()),
            purchase_timestamp: placed,
        };
        let unplaced = Order {
            purchase_timestamp: None,
            ..order.clone()
        };

        assert_ne!(order, unplaced);
        assert_eq!(
            order.purchase_timestamp.map(|t| t.to_string()),
            Some("2018-03-08 12:30:00".to_string())
        );
    }
}
