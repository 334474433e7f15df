//! A sales dashboard for coffee shop transaction data.
//!
//! The transaction records are loaded from a JSON file once at start-up. The
//! dashboard filters them by product category, store location and month,
//! aggregates the revenue of the selected records four ways and shows the
//! results as charts alongside a searchable, sortable transaction table.
//!
//! This library provides a web server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod error;
mod error_pages;
mod filter;
mod html;
mod logging;
mod month;
mod pagination;
mod record;
mod routing;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    AggregatedSeries, DashboardQuery, SeriesPoint, SortOrder, TableColumn, TableOptions,
    revenue_by_category, revenue_by_location, revenue_by_month, revenue_by_product_detail,
    table_rows,
};
pub use error::Error;
pub use filter::{FilterCriteria, FilterOption, FilterOptions, Selection, WILDCARD};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::{MonthWindow, month_name, parse_month_selection};
pub use pagination::{Page, PaginationConfig};
pub use record::{RecordSet, RecordSubset, TransactionRecord};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
