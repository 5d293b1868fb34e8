//! Defines the core data model and database queries for expense records.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// The integer ID that the store assigns to each expense record.
pub type ExpenseId = i64;

/// A single expense: money spent on something, on some day.
///
/// Records are immutable once stored. The application never updates or
/// deletes them; a record's lifetime ends only if it is removed directly in
/// the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the store on insert.
    pub id: ExpenseId,
    /// What the money was spent on, e.g. "ค่ากาแฟ".
    pub title: String,
    /// The amount of money spent, in baht.
    pub amount: f64,
    /// A free-text label grouping expenses for reporting, e.g. "อาหาร".
    ///
    /// There is no fixed set of categories; the UI derives the known set
    /// from the records themselves. Case and whitespace variants are
    /// distinct categories.
    pub category: String,
    /// The day the money was spent. No time-of-day semantics.
    pub spent_at: Date,
}

/// The fields of an expense record before the store has assigned it an ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub spent_at: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense record in the database.
///
/// Only presence is enforced, and only for the text fields: the amount is
/// stored as given, including negative values (refunds/corrections).
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyField] if the title or category is empty,
/// - or [Error::SqlError] if there is some SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    if new_expense.title.is_empty() {
        return Err(Error::EmptyField("title"));
    }

    if new_expense.category.is_empty() {
        return Err(Error::EmptyField("category"));
    }

    let expense = connection
        .prepare(
            "INSERT INTO expense (title, amount, category, spent_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, title, amount, category, spent_at",
        )?
        .query_row(
            (
                &new_expense.title,
                new_expense.amount,
                &new_expense.category,
                new_expense.spent_at,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve every expense record in the database.
///
/// Rows are returned in insertion order (`id` ascending) so that downstream
/// aggregation, which assigns chart colors by the order categories are first
/// seen, is reproducible for the same stored data.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, title, amount, category, spent_at FROM expense ORDER BY id ASC")?
        .query_map([], map_expense_row)?
        .collect::<Result<Vec<Expense>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                spent_at TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let spent_at = row.get(4)?;

    Ok(Expense {
        id,
        title,
        amount,
        category,
        spent_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        expense::{NewExpense, create_expense, get_all_expenses},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_expense(title: &str, amount: f64, category: &str, spent_at: time::Date) -> NewExpense {
        NewExpense {
            title: title.to_owned(),
            amount,
            category: category.to_owned(),
            spent_at,
        }
    }

    #[test]
    fn create_succeeds_and_assigns_ids_from_one() {
        let conn = get_test_connection();

        let expense = create_expense(
            new_expense("ค่ากาแฟ", 55.0, "อาหาร", date!(2024 - 01 - 01)),
            &conn,
        )
        .unwrap();

        assert_eq!(expense.id, 1);
        assert_eq!(expense.title, "ค่ากาแฟ");
        assert_eq!(expense.amount, 55.0);
        assert_eq!(expense.category, "อาหาร");
        assert_eq!(expense.spent_at, date!(2024 - 01 - 01));
    }

    #[test]
    fn create_fails_on_empty_title() {
        let conn = get_test_connection();

        let result = create_expense(new_expense("", 55.0, "อาหาร", date!(2024 - 01 - 01)), &conn);

        assert_eq!(result, Err(Error::EmptyField("title")));
    }

    #[test]
    fn create_fails_on_empty_category() {
        let conn = get_test_connection();

        let result = create_expense(new_expense("ค่ากาแฟ", 55.0, "", date!(2024 - 01 - 01)), &conn);

        assert_eq!(result, Err(Error::EmptyField("category")));
    }

    #[test]
    fn create_accepts_negative_amounts() {
        // Refunds are stored as given, the store does not police the sign.
        let conn = get_test_connection();

        let expense = create_expense(
            new_expense("คืนเงินค่าเสื้อ", -250.0, "เสื้อผ้า", date!(2024 - 01 - 05)),
            &conn,
        )
        .unwrap();

        assert_eq!(expense.amount, -250.0);
    }

    #[test]
    fn get_all_returns_records_in_insertion_order() {
        let conn = get_test_connection();
        let inserted = vec![
            create_expense(
                new_expense("ข้าวเที่ยง", 80.0, "อาหาร", date!(2024 - 01 - 02)),
                &conn,
            )
            .unwrap(),
            create_expense(
                new_expense("ค่ารถไฟฟ้า", 42.0, "เดินทาง", date!(2024 - 01 - 01)),
                &conn,
            )
            .unwrap(),
            create_expense(
                new_expense("ค่ากาแฟ", 55.0, "อาหาร", date!(2024 - 01 - 03)),
                &conn,
            )
            .unwrap(),
        ];

        let expenses = get_all_expenses(&conn).unwrap();

        assert_eq!(expenses, inserted);
    }

    #[test]
    fn get_all_returns_empty_vec_for_empty_store() {
        let conn = get_test_connection();

        let expenses = get_all_expenses(&conn).unwrap();

        assert_eq!(expenses, Vec::new());
    }
}
