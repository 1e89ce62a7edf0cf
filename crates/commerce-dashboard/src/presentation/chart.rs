use serde::Serialize;

use crate::types::{CategoryCount, CityCount, HourlyCount, ProductCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Vertical bars, categories along the x axis.
    Bar,
    /// Horizontal bars, categories along the y axis.
    HorizontalBar,
    /// Line with a marker at every point.
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
    /// Numeric x coordinate, set for line charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
}

/// Renderer-independent description of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartModel {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
    /// Print each point's value next to its bar.
    pub show_values: bool,
    /// Fixed x range for line charts (inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_range: Option<(u64, u64)>,
    pub points: Vec<ChartPoint>,
}

impl ChartModel {
    pub fn customer_cities(rows: &[CityCount]) -> Self {
        Self {
            title: "Top Cities by Customer Count (Sep 2016 - Oct 2018)",
            x_label: "City",
            y_label: "Customers",
            kind: ChartKind::Bar,
            show_values: false,
            x_range: None,
            points: rows.iter().map(|r| point(&r.city, r.count)).collect(),
        }
    }

    pub fn seller_cities(rows: &[CityCount]) -> Self {
        Self {
            title: "Top Cities by Seller Count (Sep 2016 - Oct 2018)",
            x_label: "City",
            y_label: "Sellers",
            kind: ChartKind::Bar,
            show_values: false,
            x_range: None,
            points: rows.iter().map(|r| point(&r.city, r.count)).collect(),
        }
    }

    pub fn hourly_trend(rows: &[HourlyCount]) -> Self {
        Self {
            title: "Hourly Transaction Trend",
            x_label: "Hour",
            y_label: "Transactions",
            kind: ChartKind::Line,
            show_values: false,
            x_range: Some((0, 23)),
            points: rows
                .iter()
                .map(|r| ChartPoint {
                    position: Some(u64::from(r.hour)),
                    ..point(&format!("{:02}", r.hour), r.count)
                })
                .collect(),
        }
    }

    pub fn top_products(rows: &[ProductCount]) -> Self {
        Self {
            title: "Most Purchased Products (Sep 2016 - Oct 2018)",
            x_label: "Transactions",
            y_label: "Product Category",
            kind: ChartKind::HorizontalBar,
            show_values: true,
            x_range: None,
            points: rows.iter().map(|r| point(&r.label, r.total_orders)).collect(),
        }
    }

    pub fn top_categories(rows: &[CategoryCount]) -> Self {
        Self {
            title: "Best Selling Product Categories (Sep 2016 - Oct 2018)",
            x_label: "Transactions",
            y_label: "Product Category",
            kind: ChartKind::HorizontalBar,
            show_values: true,
            x_range: None,
            points: rows
                .iter()
                .map(|r| point(&r.category, r.total_orders))
                .collect(),
        }
    }

    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }

    /// Axis label describing counts: y for vertical charts, x for horizontal.
    pub fn value_axis_label(&self) -> &'static str {
        match self.kind {
            ChartKind::HorizontalBar => self.x_label,
            ChartKind::Bar | ChartKind::Line => self.y_label,
        }
    }

    /// Axis label describing categories.
    pub fn category_axis_label(&self) -> &'static str {
        match self.kind {
            ChartKind::HorizontalBar => self.y_label,
            ChartKind::Bar | ChartKind::Line => self.x_label,
        }
    }
}

fn point(label: &str, value: usize) -> ChartPoint {
    ChartPoint {
        label: label.to_string(),
        value: value as u64,
        position: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_chart_points() {
        let rows = [HourlyCount { hour: 8, count: 2 }, HourlyCount { hour: 12, count: 3 }];
        let chart = ChartModel::hourly_trend(&rows);

        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.x_range, Some((0, 23)));
        assert_eq!(chart.points[0].label, "08");
        assert_eq!(chart.points[1].position, Some(12));
        assert_eq!(chart.max_value(), 3);
        assert_eq!(chart.value_axis_label(), "Transactions");
    }

    #[test]
    fn test_horizontal_axes() {
        let rows = [CategoryCount {
            category: "toys".to_string(),
            total_orders: 4,
        }];
        let chart = ChartModel::top_categories(&rows);

        assert!(chart.show_values);
        assert_eq!(chart.value_axis_label(), "Transactions");
        assert_eq!(chart.category_axis_label(), "Product Category");
    }

    #[test]
    fn test_empty_chart() {
        let chart = ChartModel::customer_cities(&[]);
        assert!(chart.points.is_empty());
        assert_eq!(chart.max_value(), 0);
    }
}
