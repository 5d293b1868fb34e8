//! The API endpoint URIs.

/// The root route, which serves the dashboard page.
pub const DASHBOARD_VIEW: &str = "/";
/// The page for displaying expenses as a filterable, sortable table.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an expense record.
pub const EXPENSES_API: &str = "/api/expenses";
