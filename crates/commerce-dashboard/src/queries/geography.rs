use tracing::debug;

use super::{TopN, count_keys, rank_top_n};
use crate::loader::Dataset;
use crate::types::CityCount;

/// Cities with the most customers.
pub fn top_customer_cities(data: &Dataset, n: TopN) -> Vec<CityCount> {
    let counts = count_keys(data.tables.customers.iter().map(|c| c.customer_city.as_deref()));
    let result = to_city_counts(rank_top_n(counts, n));
    debug!("top_customer_cities(n={}): {} rows", n, result.len());
    result
}

/// Cities with the most sellers.
pub fn top_seller_cities(data: &Dataset, n: TopN) -> Vec<CityCount> {
    let counts = count_keys(data.tables.sellers.iter().map(|s| s.seller_city.as_deref()));
    let result = to_city_counts(rank_top_n(counts, n));
    debug!("top_seller_cities(n={}): {} rows", n, result.len());
    result
}

fn to_city_counts(ranked: Vec<(&str, usize)>) -> Vec<CityCount> {
    ranked
        .into_iter()
        .map(|(city, count)| CityCount {
            city: city.to_string(),
            count,
        })
        .collect()
}
