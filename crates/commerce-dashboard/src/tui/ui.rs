use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row,
    Table, Tabs, Wrap,
};

use super::app::App;
use crate::config::{HOURS_PER_DAY, TOP_N_MAX, TOP_N_MIN};
use crate::dashboard::{ControlValue, SectionData, SectionView};
use crate::presentation::{ChartKind, ChartModel};
use crate::types::Question;

const HIGHLIGHT: Color = Color::Yellow;

pub fn draw(f: &mut Frame, app: &App) {
    let insight_height = if app.show_insight { 6 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // tabs
            Constraint::Length(3),              // control
            Constraint::Min(10),                // chart + table
            Constraint::Length(insight_height), // insight
            Constraint::Length(1),              // footer
        ])
        .split(f.area());

    let section = app.current();
    draw_tabs(f, app, chunks[0]);
    draw_control(f, app, section, chunks[1]);
    draw_body(f, section, chunks[2]);
    if app.show_insight {
        draw_insight(f, section, chunks[3]);
    }
    draw_footer(f, app, chunks[4]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Question::ALL
        .iter()
        .map(|q| Line::from(format!("{} {}", q.index() + 1, q.short_name())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" E-commerce Analysis Dashboard "),
        )
        .select(app.selected.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    f.render_widget(tabs, area);
}

fn draw_control(f: &mut Frame, app: &App, section: &SectionView, area: Rect) {
    let line = match section.control {
        ControlValue::TopN(n) => {
            let filled = n.get() - TOP_N_MIN;
            let empty = TOP_N_MAX - n.get();
            Line::from(vec![
                Span::raw(format!("{} ", TOP_N_MIN)),
                Span::styled("━".repeat(filled * 2), Style::default().fg(HIGHLIGHT)),
                Span::styled("●", Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)),
                Span::styled("─".repeat(empty * 2), Style::default().fg(Color::DarkGray)),
                Span::raw(format!(" {}   ", TOP_N_MAX)),
                Span::styled(
                    n.to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ])
        }
        ControlValue::Hours(hours) => {
            let spans: Vec<Span> = (0..HOURS_PER_DAY)
                .map(|hour| {
                    let mut style = if hours.contains(hour) {
                        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    if hour == app.hour_cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!("{:02}", hour), style)
                })
                .flat_map(|span| [span, Span::raw(" ")])
                .collect();
            Line::from(spans)
        }
    };

    let control = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", section.control_label)),
    );
    f.render_widget(control, area);
}

fn draw_body(f: &mut Frame, section: &SectionView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", section.chart.title));

    if section.data.is_empty() {
        let empty = Paragraph::new("No data for the current selection.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, chunks[0]);
    } else {
        match section.chart.kind {
            ChartKind::Bar | ChartKind::HorizontalBar => {
                draw_bar_chart(f, &section.chart, block, chunks[0])
            }
            ChartKind::Line => draw_line_chart(f, &section.chart, block, chunks[0]),
        }
    }

    draw_table(f, section, chunks[1]);
}

fn draw_bar_chart(f: &mut Frame, chart: &ChartModel, block: Block, area: Rect) {
    let bars: Vec<Bar> = chart
        .points
        .iter()
        .map(|p| {
            Bar::default()
                .value(p.value)
                .label(Line::from(p.label.clone()))
                .text_value(p.value.to_string())
        })
        .collect();

    let mut widget = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .max(chart.max_value())
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    widget = match chart.kind {
        ChartKind::HorizontalBar => widget
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0),
        _ => {
            let count = chart.points.len().max(1) as u16;
            let width = (area.width.saturating_sub(2) / count).saturating_sub(1).clamp(1, 12);
            widget.bar_width(width).bar_gap(1)
        }
    };

    f.render_widget(widget, area);
}

fn draw_line_chart(f: &mut Frame, chart: &ChartModel, block: Block, area: Rect) {
    let points: Vec<(f64, f64)> = chart
        .points
        .iter()
        .filter_map(|p| p.position.map(|x| (x as f64, p.value as f64)))
        .collect();
    let (low, high) = chart.x_range.unwrap_or((0, u64::from(HOURS_PER_DAY - 1)));
    let max = chart.max_value().max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name(chart.y_label)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(HIGHLIGHT))
            .data(&points),
    ];

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(chart.x_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([low as f64, high as f64])
                .labels(vec![
                    low.to_string(),
                    ((low + high) / 2).to_string(),
                    high.to_string(),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max * 1.1])
                .labels(vec!["0".to_string(), format!("{}", max as u64)]),
        );

    f.render_widget(widget, area);
}

fn draw_table(f: &mut Frame, section: &SectionView, area: Rect) {
    let (header, rows, widths): (Vec<&str>, Vec<Vec<String>>, Vec<Constraint>) =
        match &section.data {
            SectionData::Cities(rows) => (
                vec!["City", "Count"],
                rows.iter()
                    .map(|r| vec![r.city.clone(), r.count.to_string()])
                    .collect(),
                vec![Constraint::Min(10), Constraint::Length(8)],
            ),
            SectionData::Hourly(rows) => (
                vec!["Hour", "Transactions"],
                rows.iter()
                    .map(|r| vec![format!("{:02}", r.hour), r.count.to_string()])
                    .collect(),
                vec![Constraint::Length(6), Constraint::Min(12)],
            ),
            SectionData::Products(rows) => (
                vec!["Product", "Orders"],
                rows.iter()
                    .map(|r| vec![r.label.clone(), r.total_orders.to_string()])
                    .collect(),
                vec![Constraint::Min(10), Constraint::Length(8)],
            ),
            SectionData::Categories(rows) => (
                vec!["Category", "Orders"],
                rows.iter()
                    .map(|r| vec![r.category.clone(), r.total_orders.to_string()])
                    .collect(),
                vec![Constraint::Min(10), Constraint::Length(8)],
            ),
        };

    let table = Table::new(rows.into_iter().map(Row::new), widths)
        .header(
            Row::new(header).style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Results "));

    f.render_widget(table, area);
}

fn draw_insight(f: &mut Frame, section: &SectionView, area: Rect) {
    let insight = Paragraph::new(section.insight)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Insight "));
    f.render_widget(insight, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(k, Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD))
    };

    let mut spans = vec![key(" Tab/1-5"), Span::raw(" section  ")];
    if app.selected == Question::HourlyTrend {
        spans.extend([
            key("←/→"),
            Span::raw(" move  "),
            key("Space"),
            Span::raw(" toggle  "),
            key("a/n"),
            Span::raw(" all/none  "),
        ]);
    } else {
        spans.extend([key("←/→"), Span::raw(" adjust  ")]);
    }
    spans.extend([
        key("i"),
        Span::raw(" insight  "),
        key("q"),
        Span::raw(" quit"),
    ]);

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}
