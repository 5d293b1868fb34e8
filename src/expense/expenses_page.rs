//! Defines the route handler for the page that displays expenses as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    expense::{
        Expense,
        filter::{
            ExpenseFilter, SortKey, SortOrder, categories_in_first_seen_order, filter_and_sort,
        },
        form::expense_form,
        get_all_expenses,
    },
    html::{
        CATEGORY_BADGE_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, base, format_baht, format_thai_date,
    },
    navigation::NavBar,
    timezone::current_local_date,
};

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesViewState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpensesViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters accepted by the expenses page.
///
/// Every parameter is optional; an absent (or empty) parameter means no
/// restriction, and the sort defaults to newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensesQuery {
    /// Keep only this category. Empty means all categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Keep only expenses on or after this day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Date>,
    /// Keep only expenses on or before this day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Date>,
    /// The sort key for the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    /// The sort direction for the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl ExpensesQuery {
    /// Treat an empty category string (the "all" option of the dropdown) the
    /// same as an absent one.
    fn normalized(mut self) -> Self {
        self.category = self.category.filter(|category| !category.is_empty());
        self
    }

    fn sort_key(&self) -> SortKey {
        self.sort.unwrap_or_default()
    }

    fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    /// The URL for sorting by `sort_key` while keeping the active filters.
    ///
    /// Clicking the column that is already sorted descending flips it to
    /// ascending; anything else starts descending, like the default view.
    fn sort_url(&self, sort_key: SortKey) -> String {
        let order = if self.sort_key() == sort_key && self.sort_order() == SortOrder::Descending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        };

        let query = Self {
            sort: Some(sort_key),
            order: Some(order),
            ..self.clone()
        };

        query.to_url()
    }

    fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query_string) if !query_string.is_empty() => {
                format!("{}?{query_string}", endpoints::EXPENSES_VIEW)
            }
            Ok(_) => endpoints::EXPENSES_VIEW.to_owned(),
            Err(error) => {
                tracing::error!("Could not encode expenses query: {error}");
                endpoints::EXPENSES_VIEW.to_owned()
            }
        }
    }
}

/// Render the expenses page: the create form, the filter controls, and the
/// filtered, sorted table.
pub async fn get_expenses_page(
    State(state): State<ExpensesViewState>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Response, Error> {
    let query = query.normalized();
    let today = current_local_date(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;

    let categories = categories_in_first_seen_order(&expenses);
    let filter = ExpenseFilter {
        category: query.category.clone(),
        start_date: query.start,
        end_date: query.end,
    };
    let view = filter_and_sort(&expenses, &filter, query.sort_key(), query.sort_order());

    Ok(expenses_view(today, &categories, &view, &query).into_response())
}

fn expenses_view(
    today: Date,
    categories: &[String],
    expenses: &[Expense],
    query: &ExpensesQuery,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (expense_form(today))

            div class="bg-white drop-shadow-xl rounded-lg p-6 w-full"
            {
                (filter_controls(categories, query))

                div class="overflow-x-auto rounded-md"
                {
                    (expense_table(expenses, query))
                }
            }
        }
    );

    base("รายการค่าใช้จ่าย", &[], &content)
}

fn filter_controls(categories: &[String], query: &ExpensesQuery) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::EXPENSES_VIEW)
            class="flex flex-wrap gap-3 mb-4"
        {
            select name="category" class=(FORM_SELECT_STYLE)
            {
                option value="" selected[query.category.is_none()] { "ทั้งหมด" }

                @for category in categories {
                    option
                        value=(category)
                        selected[query.category.as_deref() == Some(category)]
                    {
                        (category)
                    }
                }
            }

            select name="sort" class=(FORM_SELECT_STYLE)
            {
                option value="date" selected[query.sort_key() == SortKey::Date] { "วันที่" }
                option value="amount" selected[query.sort_key() == SortKey::Amount] { "จำนวนเงิน" }
                option value="title" selected[query.sort_key() == SortKey::Title] { "รายการ" }
            }

            select name="order" class=(FORM_SELECT_STYLE)
            {
                option value="desc" selected[query.sort_order() == SortOrder::Descending]
                {
                    "มากไปน้อย"
                }
                option value="asc" selected[query.sort_order() == SortOrder::Ascending]
                {
                    "น้อยไปมาก"
                }
            }

            input type="date" name="start" value=[query.start] class=(FORM_TEXT_INPUT_STYLE);
            input type="date" name="end" value=[query.end] class=(FORM_TEXT_INPUT_STYLE);

            button
                type="submit"
                class="px-4 py-2 bg-gray-200 hover:bg-gray-300 text-gray-700 rounded-md"
            {
                "กรอง"
            }
        }
    )
}

fn expense_table(expenses: &[Expense], query: &ExpensesQuery) -> Markup {
    html!(
        table class="min-w-full bg-white"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    (sort_header("รายการ", SortKey::Title, query))
                    (sort_header("จำนวนเงิน", SortKey::Amount, query))
                    th scope="col" class="px-4 py-3 text-left" { "หมวดหมู่" }
                    (sort_header("วันที่", SortKey::Date, query))
                }
            }

            tbody class="divide-y divide-gray-200"
            {
                @if expenses.is_empty() {
                    tr
                    {
                        td
                            colspan="4"
                            data-empty-state="true"
                            class="text-center py-6 text-gray-400"
                        {
                            "ไม่พบข้อมูล"
                        }
                    }
                }

                @for expense in expenses {
                    tr data-expense-row="true" class="hover:bg-gray-50 transition-colors"
                    {
                        td class=(TABLE_CELL_STYLE) { (expense.title) }

                        td class="px-4 py-3 text-green-600 font-semibold"
                        {
                            (format_baht(expense.amount))
                        }

                        td class=(TABLE_CELL_STYLE)
                        {
                            span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                        }

                        td class=(TABLE_CELL_STYLE) { (format_thai_date(expense.spent_at)) }
                    }
                }
            }
        }
    )
}

fn sort_header(label: &str, sort_key: SortKey, query: &ExpensesQuery) -> Markup {
    html!(
        th scope="col" class="px-4 py-3 text-left"
        {
            a href=(query.sort_url(sort_key)) { (label) }
        }
    )
}
