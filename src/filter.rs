//! Filter criteria for the dashboard and the options offered for each criterion.
//!
//! Each criterion is either the wildcard "all" or a concrete value. A record
//! passes the filter when it matches every active criterion.

use std::collections::BTreeSet;

use time::Month;

use crate::{
    Error,
    month::{month_name, parse_month_selection},
    record::{RecordSet, TransactionRecord},
};

/// The query value that means "no constraint on this field".
pub const WILDCARD: &str = "all";

/// A selection for a string field, either everything or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// Only records whose field equals this value exactly.
    Only(String),
}

impl Selection {
    /// Interpret a query value, treating a missing or empty value as the wildcard.
    pub fn from_query_value(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(WILDCARD) => Self::All,
            Some(value) => Self::Only(value.to_owned()),
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }

    /// The value to put back into a query string or select box.
    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => WILDCARD,
            Self::Only(value) => value,
        }
    }
}

/// The active category, location and month selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact match against `product_category`.
    pub category: Selection,
    /// Exact match against `store_location`.
    pub location: Selection,
    /// Match against the calendar month of `transaction_date`, ignoring the year.
    pub month: Option<Month>,
}

impl FilterCriteria {
    /// Build criteria from raw query values.
    ///
    /// Missing values, empty values and [WILDCARD] mean no constraint. The
    /// month value must look like `"<anything>-<index>"`, e.g. `"month-2"`.
    ///
    /// # Errors
    /// Returns [Error::InvalidFilter] if the month value has no month index.
    pub fn from_query_values(
        category: Option<&str>,
        location: Option<&str>,
        month: Option<&str>,
    ) -> Result<Self, Error> {
        let month = match month {
            None | Some("") | Some(WILDCARD) => None,
            Some(selection) => Some(parse_month_selection(selection)?),
        };

        Ok(Self {
            category: Selection::from_query_value(category),
            location: Selection::from_query_value(location),
            month,
        })
    }

    /// Whether every criterion is the wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.category == Selection::All && self.location == Selection::All && self.month.is_none()
    }

    /// Whether `record` passes every active criterion.
    ///
    /// Criteria are checked in the order category, location, month and stop at
    /// the first mismatch, so the date is only parsed for records that match
    /// the other two criteria.
    ///
    /// # Errors
    /// Returns [Error::MalformedRecord] if the month criterion is active and
    /// the record's date cannot be parsed.
    pub fn matches(&self, record: &TransactionRecord, index: usize) -> Result<bool, Error> {
        if !self.category.matches(&record.product_category)
            || !self.location.matches(&record.store_location)
        {
            return Ok(false);
        }

        match self.month {
            None => Ok(true),
            Some(month) => Ok(record.month(index)? == month),
        }
    }

    /// The query value for the month selection, e.g. `"month-2"`.
    pub fn month_query_value(&self) -> String {
        match self.month {
            None => WILDCARD.to_owned(),
            Some(month) => month_query_value(month),
        }
    }
}

fn month_query_value(month: Month) -> String {
    format!("month-{}", u8::from(month))
}

/// A choice in one of the filter select boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// The query value sent when this option is selected.
    pub value: String,
    /// The text shown to the user.
    pub label: String,
}

/// The distinct values observed in the full record set for each criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Distinct categories in alphabetical order.
    pub categories: Vec<FilterOption>,
    /// Distinct store locations in alphabetical order.
    pub locations: Vec<FilterOption>,
    /// Distinct months in calendar order.
    pub months: Vec<FilterOption>,
}

impl FilterOptions {
    /// Collect the filter options from every record in `record_set`.
    ///
    /// # Errors
    /// Returns [Error::MalformedRecord] if a transaction date cannot be parsed.
    pub fn from_records(record_set: &RecordSet) -> Result<Self, Error> {
        let mut categories = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut months = BTreeSet::new();

        for (index, record) in record_set.records().iter().enumerate() {
            categories.insert(record.product_category.as_str());
            locations.insert(record.store_location.as_str());
            months.insert(u8::from(record.month(index)?));
        }

        let to_options = |values: BTreeSet<&str>| -> Vec<FilterOption> {
            values
                .into_iter()
                .map(|value| FilterOption {
                    value: value.to_owned(),
                    label: value.to_owned(),
                })
                .collect()
        };

        let months = months
            .into_iter()
            .filter_map(|index| Month::try_from(index).ok())
            .map(|month| FilterOption {
                value: month_query_value(month),
                label: month_name(month),
            })
            .collect();

        Ok(Self {
            categories: to_options(categories),
            locations: to_options(locations),
            months,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::{
        Error,
        record::RecordSet,
        test_utils::{coffee_and_tea, record},
    };

    use super::{FilterCriteria, FilterOption, FilterOptions, Selection};

    fn criteria(category: &str, location: &str, month: &str) -> FilterCriteria {
        FilterCriteria::from_query_values(Some(category), Some(location), Some(month)).unwrap()
    }

    #[test]
    fn all_wildcards_return_every_record() {
        let record_set = coffee_and_tea();

        let subset = record_set.filter(&criteria("all", "all", "all")).unwrap();

        assert!(criteria("all", "all", "all").is_wildcard());
        assert_eq!(subset.len(), record_set.len());
        assert!(subset.iter().eq(record_set.records().iter()));
    }

    #[test]
    fn missing_and_empty_values_are_wildcards() {
        let from_missing = FilterCriteria::from_query_values(None, None, None).unwrap();
        let from_empty = FilterCriteria::from_query_values(Some(""), Some(""), Some("")).unwrap();

        assert_eq!(from_missing, FilterCriteria::default());
        assert_eq!(from_empty, FilterCriteria::default());
    }

    #[test]
    fn filters_by_exact_category() {
        let record_set = coffee_and_tea();

        let subset = record_set.filter(&criteria("Coffee", "all", "all")).unwrap();

        assert_eq!(subset.len(), 1);
        assert_eq!(subset.as_slice()[0], &record_set.records()[0]);
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let record_set = coffee_and_tea();

        let subset = record_set.filter(&criteria("coffee", "all", "all")).unwrap();

        assert!(subset.is_empty());
    }

    #[test]
    fn filters_by_location() {
        let record_set = coffee_and_tea();

        let subset = record_set.filter(&criteria("all", "B", "all")).unwrap();

        assert_eq!(subset.len(), 1);
        assert_eq!(subset.as_slice()[0].product_category, "Tea");
    }

    #[test]
    fn filters_by_month_index() {
        let record_set = coffee_and_tea();

        let subset = record_set.filter(&criteria("all", "all", "x-2")).unwrap();

        assert_eq!(subset.len(), 1);
        assert_eq!(subset.as_slice()[0].product_category, "Tea");
    }

    #[test]
    fn month_filter_ignores_year() {
        let record_set = RecordSet::new(vec![
            record("Coffee", "Latte", 3.0, 1, "2023-02-01", "A"),
            record("Coffee", "Latte", 3.0, 1, "2024-02-28", "A"),
            record("Coffee", "Latte", 3.0, 1, "2024-03-01", "A"),
        ]);

        let subset = record_set.filter(&criteria("all", "all", "2024-2")).unwrap();

        assert_eq!(subset.len(), 2);
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let record_set = RecordSet::new(vec![
            record("Coffee", "Latte", 3.0, 1, "2023-01-01", "A"),
            record("Coffee", "Latte", 3.0, 1, "2023-01-01", "B"),
            record("Tea", "Chai", 2.0, 1, "2023-01-01", "A"),
            record("Coffee", "Latte", 3.0, 1, "2023-02-01", "A"),
        ]);

        let subset = record_set
            .filter(&criteria("Coffee", "A", "month-1"))
            .unwrap();

        assert_eq!(subset.len(), 1);
        assert!(std::ptr::eq(subset.as_slice()[0], &record_set.records()[0]));
    }

    #[test]
    fn filtering_always_starts_from_the_full_set() {
        let record_set = coffee_and_tea();

        let coffee = record_set.filter(&criteria("Coffee", "all", "all")).unwrap();
        let tea = record_set.filter(&criteria("Tea", "all", "all")).unwrap();
        let coffee_again = record_set.filter(&criteria("Coffee", "all", "all")).unwrap();

        assert_eq!(coffee.len(), 1);
        assert_eq!(tea.len(), 1);
        assert_eq!(coffee, coffee_again);
        assert_eq!(record_set.len(), 2);
    }

    #[test]
    fn unparseable_date_fails_month_filter() {
        let record_set = RecordSet::new(vec![
            record("Coffee", "Latte", 3.0, 1, "2023-01-01", "A"),
            record("Coffee", "Latte", 3.0, 1, "not a date", "A"),
        ]);

        let result = record_set.filter(&criteria("all", "all", "x-1"));

        assert!(matches!(result, Err(Error::MalformedRecord { index: 1, .. })));
    }

    #[test]
    fn unparseable_date_is_ignored_without_month_filter() {
        let record_set = RecordSet::new(vec![record(
            "Coffee",
            "Latte",
            3.0,
            1,
            "not a date",
            "A",
        )]);

        let subset = record_set.filter(&criteria("Coffee", "all", "all")).unwrap();

        assert_eq!(subset.len(), 1);
    }

    #[test]
    fn invalid_month_selection_is_rejected() {
        let result = FilterCriteria::from_query_values(None, None, Some("february"));

        assert!(matches!(result, Err(Error::InvalidFilter(_))));
    }

    #[test]
    fn selections_round_trip_to_query_values() {
        let criteria = criteria("Tea", "all", "x-2");

        assert_eq!(criteria.category, Selection::Only("Tea".to_owned()));
        assert_eq!(criteria.category.as_query_value(), "Tea");
        assert_eq!(criteria.location.as_query_value(), "all");
        assert_eq!(criteria.month, Some(Month::February));
        assert_eq!(criteria.month_query_value(), "month-2");
    }

    #[test]
    fn options_list_distinct_values_in_order() {
        let record_set = RecordSet::new(vec![
            record("Tea", "Chai", 2.0, 1, "2023-03-01", "Hell's Kitchen"),
            record("Coffee", "Latte", 3.0, 1, "2023-01-01", "Astoria"),
            record("Tea", "Earl Grey", 2.5, 1, "2024-01-05", "Astoria"),
        ]);

        let options = FilterOptions::from_records(&record_set).unwrap();

        let values = |options: &[FilterOption]| {
            options
                .iter()
                .map(|option| option.value.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(values(&options.categories), vec!["Coffee", "Tea"]);
        assert_eq!(values(&options.locations), vec!["Astoria", "Hell's Kitchen"]);
        assert_eq!(
            options.months,
            vec![
                FilterOption {
                    value: "month-1".to_owned(),
                    label: "January".to_owned()
                },
                FilterOption {
                    value: "month-3".to_owned(),
                    label: "March".to_owned()
                },
            ]
        );
    }
}
