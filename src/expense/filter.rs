//! Filtering and sorting for the expenses table.
//!
//! These are pure functions over a slice of records: the stored collection
//! has no ordering invariant, any ordering is produced here at view time.

use std::sync::OnceLock;

use icu::collator::{
    Collator, CollatorBorrowed,
    options::{CollatorOptions, Strength},
};
use icu::locale::locale;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::expense::Expense;

/// The field the expenses table is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Sort by the day the money was spent.
    #[default]
    Date,
    /// Sort by the amount spent.
    Amount,
    /// Sort by title, in Thai alphabetical order.
    Title,
}

/// The direction the expenses table is sorted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest (or earliest, or alphabetically first) on top.
    #[serde(rename = "asc")]
    Ascending,
    /// Largest (or latest, or alphabetically last) on top.
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

/// The restrictions to apply before sorting. A `None` field means no
/// restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Keep only records whose category equals this string exactly.
    pub category: Option<String>,
    /// Keep only records spent on or after this day.
    pub start_date: Option<Date>,
    /// Keep only records spent on or before this day.
    pub end_date: Option<Date>,
}

impl ExpenseFilter {
    fn matches(&self, expense: &Expense) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| expense.category == category)
            && self
                .start_date
                .is_none_or(|start| expense.spent_at >= start)
            && self.end_date.is_none_or(|end| expense.spent_at <= end)
    }
}

/// Produce the table view of `expenses`: drop the records that do not match
/// `filter`, then order what is left by `sort_key` and `sort_order`.
///
/// The input is never mutated; the result is a new list. The sort is stable,
/// so records with equal keys keep their relative order from the input.
pub fn filter_and_sort(
    expenses: &[Expense],
    filter: &ExpenseFilter,
    sort_key: SortKey,
    sort_order: SortOrder,
) -> Vec<Expense> {
    let mut view: Vec<Expense> = expenses
        .iter()
        .filter(|expense| filter.matches(expense))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = match sort_key {
            SortKey::Date => a.spent_at.cmp(&b.spent_at),
            SortKey::Amount => a.amount.total_cmp(&b.amount),
            SortKey::Title => thai_collator().compare(&a.title, &b.title),
        };

        match sort_order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    view
}

/// The categories observed in `expenses`, in the order each one first
/// appears. Used to populate the category filter dropdown.
pub fn categories_in_first_seen_order(expenses: &[Expense]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();

    for expense in expenses {
        if !categories.contains(&expense.category) {
            categories.push(expense.category.clone());
        }
    }

    categories
}

/// A collator for the `th` locale.
///
/// Thai titles must sort in dictionary order, not code-point order: the
/// preposed vowels (เ, แ, โ, ใ, ไ) have higher code points than every
/// consonant but collate under the consonant that follows them.
fn thai_collator() -> &'static CollatorBorrowed<'static> {
    static COLLATOR: OnceLock<CollatorBorrowed<'static>> = OnceLock::new();

    COLLATOR.get_or_init(|| {
        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Tertiary);

        Collator::try_new(locale!("th").into(), options)
            .expect("the compiled collation data should include th")
    })
}
