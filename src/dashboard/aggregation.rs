//! Expense aggregation for the dashboard charts.
//!
//! Both aggregations are pure functions over a snapshot of the records.
//! Amounts are summed as stored: a negative amount (a refund) reduces the
//! totals, nothing here polices the sign.

use std::collections::{BTreeMap, HashMap};

use time::Date;

use crate::expense::Expense;

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label, exactly as stored.
    pub category: String,
    /// The sum of the amounts in this category.
    pub total: f64,
}

/// The total amount spent on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    /// The day the money was spent.
    pub day: Date,
    /// The sum of the amounts spent on this day.
    pub total: f64,
}

/// Sums expense amounts per category.
///
/// Categories are compared by exact string match, no trimming or case
/// folding. The output keeps the order in which each category first appears
/// in the input: the pie chart assigns slice colors by position, so the
/// order must be reproducible for the same input order.
pub(super) fn aggregate_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        match index_by_category.get(expense.category.as_str()) {
            Some(&index) => totals[index].total += expense.amount,
            None => {
                index_by_category.insert(&expense.category, totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                });
            }
        }
    }

    totals
}

/// Sums expense amounts per calendar day, in chronological order.
///
/// The grouping key is the raw [Date], never a display-formatted string, so
/// records on the same day always group together regardless of how dates
/// are rendered.
pub(super) fn aggregate_by_day(expenses: &[Expense]) -> Vec<DailyTotal> {
    let mut totals_by_day: BTreeMap<Date, f64> = BTreeMap::new();

    for expense in expenses {
        *totals_by_day.entry(expense.spent_at).or_insert(0.0) += expense.amount;
    }

    totals_by_day
        .into_iter()
        .map(|(day, total)| DailyTotal { day, total })
        .collect()
}
