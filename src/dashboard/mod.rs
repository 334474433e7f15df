//! Dashboard module
//!
//! Provides the sales overview page: revenue aggregations over the filtered
//! records, the charts drawn from them and the transaction table.

mod aggregation;
mod charts;
mod handlers;
mod tables;

pub use aggregation::{
    AggregatedSeries, SeriesPoint, revenue_by_category, revenue_by_location, revenue_by_month,
    revenue_by_product_detail,
};
pub use handlers::{DashboardQuery, DashboardState, get_dashboard_page};
pub use tables::{SortOrder, TableColumn, TableOptions, table_rows};
