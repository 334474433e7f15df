//! Error alerts shown to users when a dashboard update fails.
//!
//! Alerts are swapped into the `#alert-container` element of the base page by
//! htmx when a request returns an error status.

use maud::{Markup, html};

const ALERT_STYLE: &str = "flex items-start p-4 mb-4 border rounded-lg \
    text-red-800 border-red-300 bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

/// An error message with a title and some details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// The headline of the alert.
    pub message: String,
    /// What went wrong and how to fix it. May be empty.
    pub details: String,
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let Alert { message, details } = self;

        html!(
            div
                id="alert"
                role="alert"
                class=(ALERT_STYLE)
            {
                span class="shrink-0 me-3 font-bold" { "!" }

                div
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 p-1.5 rounded-lg"
                    onclick="document.getElementById('alert-container').classList.add('hidden')"
                    aria-label="Close"
                {
                    "×"
                }
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let alert = Alert {
            message: "Invalid filter".to_owned(),
            details: "month \"x\" has no month index".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());
        let text: String = html
            .select(&Selector::parse("#alert").unwrap())
            .next()
            .expect("alert element missing")
            .text()
            .collect();

        assert!(text.contains("Invalid filter"));
        assert!(text.contains("has no month index"));
    }
}
