//! The endpoint URIs served by the dashboard.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page. htmx requests to this route get the content fragment only.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The HTML element ID that htmx swaps when the filters, sorting or page change.
pub const DASHBOARD_CONTENT_ID: &str = "dashboard-content";
