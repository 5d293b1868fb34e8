//! Dashboard HTTP handlers and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    dashboard::{
        aggregation::{aggregate_by_category, aggregate_by_day},
        charts::{DashboardChart, category_pie_chart, charts_script, charts_view, daily_bar_chart},
    },
    expense::get_all_expenses,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with an overview of the user's spending.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;

    if expenses.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let category_totals = aggregate_by_category(&expenses);
    let daily_totals = aggregate_by_day(&expenses);

    let charts = [
        DashboardChart {
            id: "category-chart",
            options: category_pie_chart(&category_totals).to_string(),
        },
        DashboardChart {
            id: "daily-chart",
            options: daily_bar_chart(&daily_totals).to_string(),
        },
    ];

    Ok(dashboard_view(nav_bar, &charts).into_response())
}

/// Renders the dashboard page when no expenses exist yet.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let expenses_link = link(endpoints::EXPENSES_VIEW, "หน้ารายการ");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900"
        {
            h2 class="text-xl font-bold"
            {
                "ยังไม่มีข้อมูล"
            }

            p
            {
                "กราฟจะแสดงที่นี่เมื่อมีรายการค่าใช้จ่ายแล้ว เพิ่มรายการได้ที่" (expenses_link)
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the dashboard page with the category pie chart and the daily bar
/// chart.
fn dashboard_view(nav_bar: NavBar, charts: &[DashboardChart]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{NewExpense, create_expense},
    };

    use super::{DashboardState, get_dashboard_page};

    fn get_test_state() -> DashboardState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn insert_expense(state: &DashboardState, amount: f64, category: &str, spent_at: time::Date) {
        let conn = state.db_connection.lock().unwrap();
        create_expense(
            NewExpense {
                title: "รายการทดสอบ".to_owned(),
                amount,
                category: category.to_owned(),
                spent_at,
            },
            &conn,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn dashboard_page_loads_with_both_charts() {
        let state = get_test_state();
        insert_expense(&state, 100.0, "อาหาร", date!(2024 - 01 - 01));
        insert_expense(&state, 50.0, "อาหาร", date!(2024 - 01 - 02));
        insert_expense(&state, 30.0, "เดินทาง", date!(2024 - 01 - 01));

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);
        assert_chart_exists(&html, "category-chart");
        assert_chart_exists(&html, "daily-chart");
    }

    #[tokio::test]
    async fn chart_script_contains_aggregated_totals() {
        let state = get_test_state();
        insert_expense(&state, 100.0, "อาหาร", date!(2024 - 01 - 01));
        insert_expense(&state, 50.0, "อาหาร", date!(2024 - 01 - 02));
        insert_expense(&state, 30.0, "เดินทาง", date!(2024 - 01 - 01));

        let response = get_dashboard_page(State(state)).await.unwrap();
        let html = parse_html(response).await;

        let script_selector = Selector::parse("head script").unwrap();
        let scripts: String = html
            .select(&script_selector)
            .map(|script| script.text().collect::<String>())
            .collect();

        // Category totals: 100 + 50 for อาหาร; daily totals: 100 + 30 on day one.
        assert!(scripts.contains("150"), "want category total 150 in chart options");
        assert!(scripts.contains("130"), "want daily total 130 in chart options");
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        let heading_selector = Selector::parse("h2").unwrap();
        let heading = html
            .select(&heading_selector)
            .next()
            .expect("No heading found");
        assert_eq!(heading.text().collect::<String>().trim(), "ยังไม่มีข้อมูล");
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }
}
