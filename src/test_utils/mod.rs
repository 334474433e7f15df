#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod records;

pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use records::{coffee_and_tea, record};
