//! Full page views for the 404 and 500 responses.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The page to display for an internal server error.
///
/// `description` is the headline and `fix` tells the user what to do next.
pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        render_error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            self.description,
            self.fix,
        )
    }
}

/// The page to display when the request asks for something the dashboard
/// cannot show, e.g. a filter value it does not understand.
pub struct BadRequestError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl IntoResponse for BadRequestError<'_> {
    fn into_response(self) -> Response {
        render_error_page(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            self.description,
            self.fix,
        )
    }
}

/// The page to display when no route matches the request.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        render_error_page(
            StatusCode::NOT_FOUND,
            "Not Found",
            "Something's missing.",
            "Sorry, we can't find that page. The dashboard is a good place to start.",
        )
    }
}

fn render_error_page(status: StatusCode, title: &str, description: &str, fix: &str) -> Response {
    let page = error_view(title, status.as_str(), description, fix);

    (status, Html(page.into_string())).into_response()
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{assert_valid_html, parse_html_document};

    use super::{BadRequestError, InternalServerError, NotFoundError};

    #[tokio::test]
    async fn not_found_page_shows_status_code() {
        let response = NotFoundError.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let heading = html
            .select(&Selector::parse("h1").unwrap())
            .next()
            .expect("heading missing");
        assert_eq!(heading.text().collect::<String>().trim(), "404");
    }

    #[tokio::test]
    async fn internal_server_error_page_shows_fix() {
        let response = InternalServerError {
            description: "Invalid Transaction Data",
            fix: "Fix record 2",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let html = parse_html_document(response).await;
        assert!(html.html().contains("Fix record 2"));
    }

    #[tokio::test]
    async fn bad_request_page_shows_status_code_and_fix() {
        let response = BadRequestError {
            description: "Invalid Filter",
            fix: "Clear the filters",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let heading = html
            .select(&Selector::parse("h1").unwrap())
            .next()
            .expect("heading missing");
        assert_eq!(heading.text().collect::<String>().trim(), "400");
        assert!(html.html().contains("Clear the filters"));
    }
}
