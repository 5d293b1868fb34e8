//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations of the aggregated expense
//! data:
//! - **Category Chart**: Pie of total spending per category
//! - **Daily Chart**: Bar of total spending per day
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Tooltip, Trigger,
    },
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{CategoryTotal, DailyTotal},
    html::{HeadElement, format_thai_date},
};

/// The slice/bar color palette, assigned by position. The aggregation keeps
/// category order stable so the same data always gets the same colors.
const CHART_COLORS: [&str; 6] = [
    "#3b82f6", "#22c55e", "#f97316", "#e11d48", "#8b5cf6", "#14b8a6",
];

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 md:grid-cols-2 gap-6 mt-8"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] bg-white p-4 rounded-lg shadow"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with responsive
/// resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Total spending per category as a pie chart: "ค่าใช้จ่ายตามหมวดหมู่".
pub(super) fn category_pie_chart(category_totals: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .map(|category_total| (category_total.total, category_total.category.as_str()))
        .collect();

    Chart::new()
        .color(CHART_COLORS.iter().map(|&color| Color::from(color)).collect())
        .title(Title::new().text("ค่าใช้จ่ายตามหมวดหมู่").left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Item).value_formatter(baht_formatter()))
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("หมวดหมู่").radius(100).data(data))
}

/// Total spending per day as a bar chart: "ค่าใช้จ่ายตามวัน".
pub(super) fn daily_bar_chart(daily_totals: &[DailyTotal]) -> Chart {
    let labels: Vec<String> = daily_totals
        .iter()
        .map(|daily_total| format_thai_date(daily_total.day))
        .collect();
    let values: Vec<f64> = daily_totals
        .iter()
        .map(|daily_total| daily_total.total)
        .collect();

    Chart::new()
        .color(CHART_COLORS.iter().map(|&color| Color::from(color)).collect())
        .title(Title::new().text("ค่าใช้จ่ายตามวัน").left("center"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(baht_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(baht_formatter())),
        )
        .series(bar::Bar::new().name("จำนวนเงิน (บาท)").data(values))
}

#[inline]
fn baht_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const bahtFormatter = new Intl.NumberFormat('th-TH', {
              style: 'currency',
              currency: 'THB'
            });
            return (number) ? bahtFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::dashboard::aggregation::{CategoryTotal, DailyTotal};

    use super::{category_pie_chart, daily_bar_chart};

    fn sample_category_totals() -> Vec<CategoryTotal> {
        vec![
            CategoryTotal {
                category: "อาหาร".to_owned(),
                total: 150.0,
            },
            CategoryTotal {
                category: "เดินทาง".to_owned(),
                total: 30.0,
            },
        ]
    }

    #[test]
    fn pie_chart_options_are_valid_json_with_all_categories() {
        let chart = category_pie_chart(&sample_category_totals());

        let options: serde_json::Value =
            serde_json::from_str(&chart.to_string()).expect("chart options should be valid JSON");
        let options_text = options.to_string();

        assert!(options_text.contains("อาหาร"));
        assert!(options_text.contains("เดินทาง"));
        assert!(options_text.contains("150"));
    }

    #[test]
    fn bar_chart_labels_days_with_buddhist_era_dates() {
        let daily_totals = vec![
            DailyTotal {
                day: date!(2024 - 01 - 01),
                total: 130.0,
            },
            DailyTotal {
                day: date!(2024 - 01 - 02),
                total: 50.0,
            },
        ];

        let chart = daily_bar_chart(&daily_totals);

        let options: serde_json::Value =
            serde_json::from_str(&chart.to_string()).expect("chart options should be valid JSON");
        let options_text = options.to_string();

        assert!(options_text.contains("1/1/2567"), "got options {options_text}");
        assert!(options_text.contains("2/1/2567"), "got options {options_text}");
    }
}
