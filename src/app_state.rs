//! Implements a struct that holds the state of the web server.

use crate::{month::MonthWindow, pagination::PaginationConfig, record::RecordSet};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction records loaded at start-up. Never modified afterwards.
    pub records: RecordSet,

    /// The months shown by the monthly revenue chart.
    pub month_window: MonthWindow,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] that serves `records`.
    pub fn new(
        records: RecordSet,
        month_window: MonthWindow,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            records,
            month_window,
            pagination_config,
        }
    }
}
