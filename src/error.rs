//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    error_pages::{BadRequestError, InternalServerError},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A record has a field with the wrong shape, e.g. a transaction date
    /// that cannot be parsed or a negative unit price.
    ///
    /// `index` is the position of the record in the sequence that was being
    /// filtered or aggregated. The whole call fails rather than dropping or
    /// zero-filling the record.
    #[error("record {index} is malformed: {reason}")]
    MalformedRecord {
        /// Position of the offending record in the input sequence.
        index: usize,
        /// Human readable description of what is wrong with the record.
        reason: String,
    },

    /// A record has an empty value in the field used to group it.
    ///
    /// Records are never silently bucketed under a placeholder label.
    #[error("record {index} has an empty {field}")]
    EmptyGroupKey {
        /// Position of the offending record in the input sequence.
        index: usize,
        /// The name of the grouping field, e.g. "product_category".
        field: &'static str,
    },

    /// A filter selection could not be understood, e.g. a month selection
    /// without a month index between 1 and 12.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// The reporting window for the monthly revenue chart is out of range.
    #[error("invalid month window: {0}")]
    InvalidMonthWindow(String),

    /// The transaction data file could not be read.
    #[error("could not load transaction data: {0}")]
    LoadFailed(String),

    /// The transaction data file was read but is not a JSON array of records.
    #[error("transaction data is invalid: {0}")]
    InvalidData(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::MalformedRecord { .. } | Error::EmptyGroupKey { .. } => {
                tracing::error!("Could not build the dashboard: {self}");
                InternalServerError {
                    description: "Invalid Transaction Data",
                    fix: &format!(
                        "The dashboard could not be built because {self}. \
                        Fix the record in the data file and restart the server."
                    ),
                }
                .into_response()
            }
            Error::InvalidFilter(reason) => BadRequestError {
                description: "Invalid Filter",
                fix: &format!("The selected filter is not valid ({reason}). Clear the filters and try again."),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidFilter(reason) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid filter".to_owned(),
                    details: format!("The selected filter is not valid: {reason}."),
                },
            ),
            error @ (Error::MalformedRecord { .. } | Error::EmptyGroupKey { .. }) => {
                tracing::error!("Could not update the dashboard: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert {
                        message: "Invalid transaction data".to_owned(),
                        details: format!(
                            "The charts could not be updated because {error}. \
                            Fix the record in the data file and restart the server."
                        ),
                    },
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn malformed_record_message_names_the_record() {
        let error = Error::MalformedRecord {
            index: 3,
            reason: "could not parse transaction date \"soon\"".to_owned(),
        };

        assert_eq!(
            error.to_string(),
            "record 3 is malformed: could not parse transaction date \"soon\""
        );
    }

    #[test]
    fn invalid_filter_alert_is_bad_request() {
        let response = Error::InvalidFilter("month \"june\"".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_filter_page_is_bad_request() {
        let response = Error::InvalidFilter("month \"june\"".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn data_errors_render_internal_server_error_page() {
        let response = Error::EmptyGroupKey {
            index: 0,
            field: "store_location",
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
