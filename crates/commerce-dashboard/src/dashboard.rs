//! Section state: the control values of the five questions and the rendered
//! result of each.
//!
//! A section is recomputed from the shared dataset whenever its own control
//! changes. Controls are independent of each other.

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::loader::Dataset;
use crate::presentation::{ChartModel, insight};
use crate::queries::{
    HourSelection, TopN, hourly_transactions, top_categories, top_customer_cities,
    top_products, top_seller_cities,
};
use crate::types::{CategoryCount, CityCount, HourlyCount, ProductCount, Question};

/// Current value of every section control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub top_cities: TopN,
    pub top_seller_cities: TopN,
    pub hours: HourSelection,
    pub top_products: TopN,
    pub top_categories: TopN,
}

impl Controls {
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Ok(Self {
            top_cities: TopN::new(config.top_cities)?,
            top_seller_cities: TopN::new(config.top_seller_cities)?,
            hours: HourSelection::new(config.hours.iter().copied())?,
            top_products: TopN::new(config.top_products)?,
            top_categories: TopN::new(config.top_categories)?,
        })
    }

    pub fn value(&self, question: Question) -> ControlValue {
        match question {
            Question::CustomerCities => ControlValue::TopN(self.top_cities),
            Question::SellerCities => ControlValue::TopN(self.top_seller_cities),
            Question::HourlyTrend => ControlValue::Hours(self.hours),
            Question::TopProducts => ControlValue::TopN(self.top_products),
            Question::TopCategories => ControlValue::TopN(self.top_categories),
        }
    }

    /// The top-N slider of a question, `None` for the hourly trend.
    pub fn top_n_mut(&mut self, question: Question) -> Option<&mut TopN> {
        match question {
            Question::CustomerCities => Some(&mut self.top_cities),
            Question::SellerCities => Some(&mut self.top_seller_cities),
            Question::HourlyTrend => None,
            Question::TopProducts => Some(&mut self.top_products),
            Question::TopCategories => Some(&mut self.top_categories),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum ControlValue {
    TopN(TopN),
    Hours(HourSelection),
}

/// Query output of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum SectionData {
    Cities(Vec<CityCount>),
    Hourly(Vec<HourlyCount>),
    Products(Vec<ProductCount>),
    Categories(Vec<CategoryCount>),
}

impl SectionData {
    pub fn len(&self) -> usize {
        match self {
            SectionData::Cities(rows) => rows.len(),
            SectionData::Hourly(rows) => rows.len(),
            SectionData::Products(rows) => rows.len(),
            SectionData::Categories(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything needed to display one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub question: Question,
    pub heading: &'static str,
    pub control_label: &'static str,
    pub control: ControlValue,
    pub data: SectionData,
    pub chart: ChartModel,
    pub insight: &'static str,
}

/// Run the query of one section and build its chart.
pub fn compute_section(data: &Dataset, question: Question, controls: &Controls) -> SectionView {
    let (section_data, chart) = match question {
        Question::CustomerCities => {
            let rows = top_customer_cities(data, controls.top_cities);
            let chart = ChartModel::customer_cities(&rows);
            (SectionData::Cities(rows), chart)
        }
        Question::SellerCities => {
            let rows = top_seller_cities(data, controls.top_seller_cities);
            let chart = ChartModel::seller_cities(&rows);
            (SectionData::Cities(rows), chart)
        }
        Question::HourlyTrend => {
            let rows = hourly_transactions(data, &controls.hours);
            let chart = ChartModel::hourly_trend(&rows);
            (SectionData::Hourly(rows), chart)
        }
        Question::TopProducts => {
            let rows = top_products(data, controls.top_products);
            let chart = ChartModel::top_products(&rows);
            (SectionData::Products(rows), chart)
        }
        Question::TopCategories => {
            let rows = top_categories(data, controls.top_categories);
            let chart = ChartModel::top_categories(&rows);
            (SectionData::Categories(rows), chart)
        }
    };

    SectionView {
        question,
        heading: question.heading(),
        control_label: question.control_label(),
        control: controls.value(question),
        data: section_data,
        chart,
        insight: insight(question),
    }
}

/// All five sections in page order.
pub fn compute_all(data: &Dataset, controls: &Controls) -> Vec<SectionView> {
    Question::ALL
        .iter()
        .map(|&question| compute_section(data, question, controls))
        .collect()
}
