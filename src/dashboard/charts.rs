//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of the revenue series:
//! - **Revenue by Category**: bar chart, highest revenue first
//! - **Revenue by Month**: line chart over the reporting window
//! - **Revenue by Location**: pie chart
//! - **Revenue by Product Detail**: horizontal bar chart, highest revenue on top
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::dashboard::aggregation::AggregatedSeries;

/// Series colours, assigned by position so that a chart looks the same every
/// time it is rendered.
const PALETTE: [&str; 6] = [
    "#ff6384", "#36a2eb", "#ffce56", "#4bc0c0", "#9966ff", "#ff9f40",
];

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
///
/// # Arguments
/// * `charts` - The charts to render containers for
///
/// # Returns
/// Maud markup containing a grid of chart container divs.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates the inline JavaScript that draws the dashboard charts.
///
/// The script runs every time the dashboard content is swapped in by htmx.
/// Chart instances are kept in a registry keyed by element ID so that an
/// update disposes the previous instance before drawing the new one.
///
/// # Arguments
/// * `charts` - The charts to generate initialization scripts for
///
/// # Returns
/// A script element containing the initialization JavaScript.
pub(super) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (window.dashboardCharts["{}"]) {{
                        window.dashboardCharts["{}"].dispose();
                    }}
                    const chart = echarts.init(chartDom);
                    chart.setOption({});
                    window.dashboardCharts["{}"] = chart;
                }})();"#,
                chart.id,
                chart.id,
                chart.id,
                escape_script_text(&chart.options),
                chart.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        r#"(function() {{
            if (!window.dashboardCharts) {{
                window.dashboardCharts = {{}};

                window.addEventListener('resize', () => {{
                    Object.values(window.dashboardCharts).forEach((chart) => chart.resize());
                }});

                const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                const updateTheme = () => {{
                    const theme = darkModeMediaQuery.matches ? 'dark' : 'default';
                    Object.values(window.dashboardCharts).forEach((chart) => chart.setTheme(theme));
                }};
                darkModeMediaQuery.addEventListener('change', updateTheme);
                window.dashboardUpdateTheme = updateTheme;
            }}
{}
            window.dashboardUpdateTheme();
        }})();"#,
        script_content
    );

    html!(script { (PreEscaped(wrapped_script)) })
}

/// Keep labels from the data file from closing the surrounding `<script>`
/// element. `<\/` is read as `</` inside a JavaScript string.
fn escape_script_text(options: &str) -> String {
    options.replace("</", "<\\/")
}

/// Bar chart of revenue per product category.
pub(super) fn category_chart(series: &AggregatedSeries) -> Chart {
    Chart::new()
        .title(Title::new().text("Revenue by Category"))
        .color(palette())
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(series.labels()))
        .y_axis(currency_value_axis())
        .series(bar::Bar::new().name("Revenue").data(series.values()))
}

/// Line chart of revenue per month of the reporting window.
pub(super) fn month_chart(series: &AggregatedSeries) -> Chart {
    Chart::new()
        .title(Title::new().text("Revenue by Month"))
        .color(palette())
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(series.labels()))
        .y_axis(currency_value_axis())
        .series(Line::new().name("Revenue").data(series.values()))
}

/// Pie chart of revenue per store location.
pub(super) fn location_chart(series: &AggregatedSeries) -> Chart {
    let data: Vec<(f64, &str)> = series
        .points()
        .iter()
        .map(|point| (point.total_revenue, point.label.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Revenue by Location"))
        .color(palette())
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Revenue")
                .radius(vec!["35%", "65%"])
                .data(data),
        )
}

/// Horizontal bar chart of revenue per product detail.
pub(super) fn product_detail_chart(series: &AggregatedSeries) -> Chart {
    // The category axis runs bottom to top, so reverse the series to put the
    // highest revenue at the top.
    let labels: Vec<String> = series.labels().into_iter().rev().collect();
    let values: Vec<f64> = series.values().into_iter().rev().collect();

    Chart::new()
        .title(Title::new().text("Revenue by Product Detail"))
        .color(palette())
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(currency_value_axis())
        .y_axis(Axis::new().type_(AxisType::Category).data(labels))
        .series(bar::Bar::new().name("Revenue").data(values))
}

fn palette() -> Vec<Color> {
    PALETTE.iter().map(|&color| Color::from(color)).collect()
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .contain_label(true)
}

fn currency_value_axis() -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().formatter(currency_formatter()))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
