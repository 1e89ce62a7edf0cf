//! Plain-text rendering of sections for the non-interactive report.

use polars::prelude::*;
use std::fmt::Write;

use super::chart::{ChartKind, ChartModel};
use crate::dashboard::{ControlValue, SectionData, SectionView};

const BAR_WIDTH: usize = 40;
const LINE_HEIGHT: u64 = 10;

/// The result rows of a section as a DataFrame, for tabular display.
pub fn section_frame(data: &SectionData) -> PolarsResult<DataFrame> {
    match data {
        SectionData::Cities(rows) => df![
            "city" => rows.iter().map(|r| r.city.as_str()).collect::<Vec<_>>(),
            "count" => rows.iter().map(|r| r.count as u64).collect::<Vec<_>>(),
        ],
        SectionData::Hourly(rows) => df![
            "hour" => rows.iter().map(|r| u32::from(r.hour)).collect::<Vec<_>>(),
            "count" => rows.iter().map(|r| r.count as u64).collect::<Vec<_>>(),
        ],
        SectionData::Products(rows) => df![
            "product_id" => rows.iter().map(|r| r.product_id.as_str()).collect::<Vec<_>>(),
            "product_category_name_english" => rows
                .iter()
                .map(|r| r.category.as_deref())
                .collect::<Vec<_>>(),
            "total_orders" => rows.iter().map(|r| r.total_orders as u64).collect::<Vec<_>>(),
            "product_label" => rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
        ],
        SectionData::Categories(rows) => df![
            "product_category_name_english" => rows
                .iter()
                .map(|r| r.category.as_str())
                .collect::<Vec<_>>(),
            "total_orders" => rows.iter().map(|r| r.total_orders as u64).collect::<Vec<_>>(),
        ],
    }
}

/// Header, result table, chart and insight of one section.
pub fn render_section(section: &SectionView) -> PolarsResult<String> {
    let mut out = String::new();
    let rule = "=".repeat(80);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", section.heading);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "{}: {}",
        section.control_label,
        describe_control(&section.control)
    );
    let _ = writeln!(out);

    if section.data.is_empty() {
        let _ = writeln!(out, "  (no data for the current selection)");
    } else {
        let _ = writeln!(out, "{}", section_frame(&section.data)?);
        let _ = writeln!(out);
        out.push_str(&render_chart(&section.chart));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Insight");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "{}", section.insight);
    Ok(out)
}

fn describe_control(control: &ControlValue) -> String {
    match control {
        ControlValue::TopN(n) => n.to_string(),
        ControlValue::Hours(hours) => hours.to_string(),
    }
}

/// ASCII rendering of a chart.
pub fn render_chart(chart: &ChartModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.title);
    let _ = writeln!(
        out,
        "({} by {})",
        chart.value_axis_label(),
        chart.category_axis_label()
    );

    match chart.kind {
        ChartKind::Bar | ChartKind::HorizontalBar => render_bars(chart, &mut out),
        ChartKind::Line => render_line(chart, &mut out),
    }
    out
}

fn scaled(value: u64, max: u64, width: u64) -> u64 {
    if max == 0 || value == 0 {
        return 0;
    }
    // Non-zero values always get at least one cell.
    (value * width).div_ceil(max).max(1)
}

fn render_bars(chart: &ChartModel, out: &mut String) {
    let max = chart.max_value();
    let label_width = chart
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    for point in &chart.points {
        let length = scaled(point.value, max, BAR_WIDTH as u64) as usize;
        let padding = label_width - point.label.chars().count();
        let _ = write!(
            out,
            "{}{} │{}",
            " ".repeat(padding),
            point.label,
            "█".repeat(length)
        );
        if chart.show_values {
            let _ = write!(out, " {}", point.value);
        }
        let _ = writeln!(out);
    }
}

fn render_line(chart: &ChartModel, out: &mut String) {
    let max = chart.max_value();
    let (low, high) = chart.x_range.unwrap_or_else(|| {
        let positions = chart.points.iter().filter_map(|p| p.position);
        (
            positions.clone().min().unwrap_or(0),
            positions.max().unwrap_or(0),
        )
    });

    let levels: Vec<(u64, u64)> = chart
        .points
        .iter()
        .filter_map(|p| p.position.map(|x| (x, scaled(p.value, max, LINE_HEIGHT))))
        .collect();

    let axis_width = max.to_string().len();
    for level in (1..=LINE_HEIGHT).rev() {
        let tick = if level == LINE_HEIGHT {
            max.to_string()
        } else {
            String::new()
        };
        let _ = write!(out, "{:>width$} │", tick, width = axis_width);
        for x in low..=high {
            let cell = match levels.iter().find(|(position, _)| *position == x) {
                Some((_, height)) if *height == level => " ● ",
                Some((_, height)) if *height > level => " │ ",
                _ => "   ",
            };
            out.push_str(cell);
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "{:>width$} └", 0, width = axis_width);
    let _ = writeln!(out, "{}", "───".repeat((high - low + 1) as usize));
    let _ = write!(out, "{:>width$}  ", "", width = axis_width);
    for x in low..=high {
        let _ = write!(out, "{:^3}", x);
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Controls, compute_section};
    use crate::loader::{Dataset, Tables};
    use crate::types::{CityCount, HourlyCount, Question};

    #[test]
    fn test_bar_chart_scaling() {
        let rows = vec![
            CityCount {
                city: "sao paulo".to_string(),
                count: 10,
            },
            CityCount {
                city: "santos".to_string(),
                count: 5,
            },
        ];
        let rendered = render_chart(&ChartModel::customer_cities(&rows));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[2].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[3].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[3].starts_with("   santos │"));
    }

    #[test]
    fn test_line_chart_marks_every_point() {
        let rows = vec![
            HourlyCount { hour: 8, count: 2 },
            HourlyCount { hour: 9, count: 1 },
            HourlyCount { hour: 12, count: 3 },
        ];
        let rendered = render_chart(&ChartModel::hourly_trend(&rows));

        assert_eq!(rendered.matches('●').count(), 3);
        assert!(rendered.contains(" 23 "));
    }

    #[test]
    fn test_section_frame_columns() {
        let data = SectionData::Hourly(vec![HourlyCount { hour: 5, count: 7 }]);
        let frame = section_frame(&data).unwrap();
        assert_eq!(frame.shape(), (1, 2));
        assert_eq!(frame.get_column_names_str(), vec!["hour", "count"]);
    }

    #[test]
    fn test_render_empty_section() {
        let data = Dataset::from_tables(Tables::default());
        let section = compute_section(&data, Question::HourlyTrend, &Controls::default());
        let rendered = render_section(&section).unwrap();

        assert!(rendered.contains("Question 3: Hourly Transaction Trend"));
        assert!(rendered.contains("no data for the current selection"));
        assert!(rendered.contains("all hours"));
        assert!(rendered.contains("Insight"));
    }
}
