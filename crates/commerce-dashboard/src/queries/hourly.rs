use chrono::Timelike;
use tracing::debug;

use super::HourSelection;
use crate::config::HOURS_PER_DAY;
use crate::loader::Dataset;
use crate::types::HourlyCount;

/// Orders per purchase hour, ascending by hour, restricted to `selected`.
///
/// Hours without orders are omitted rather than reported as zero. Orders with
/// no purchase timestamp are not counted.
pub fn hourly_transactions(data: &Dataset, selected: &HourSelection) -> Vec<HourlyCount> {
    let mut per_hour = [0usize; HOURS_PER_DAY as usize];
    for timestamp in data.tables.orders.iter().filter_map(|o| o.purchase_timestamp) {
        per_hour[timestamp.hour() as usize] += 1;
    }

    let result: Vec<HourlyCount> = (0..HOURS_PER_DAY)
        .filter(|&hour| selected.contains(hour))
        .filter_map(|hour| {
            let count = per_hour[hour as usize];
            (count > 0).then_some(HourlyCount { hour, count })
        })
        .collect();

    debug!(
        "hourly_transactions({} hours selected): {} rows",
        selected.len(),
        result.len()
    );
    result
}
