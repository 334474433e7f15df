//! Revenue aggregation for the dashboard charts.
//!
//! Each aggregator groups records by one field, sums the line revenue of each
//! group and orders the groups for display:
//! - by category and by product detail: descending revenue, ties in first-seen order
//! - by location: first-seen order
//! - by month: the fixed months of a [MonthWindow], zero for months without records

use std::collections::HashMap;

use crate::{
    Error,
    month::{MonthWindow, month_name},
    record::TransactionRecord,
};

/// The total revenue for one label of an [AggregatedSeries].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// The group name, e.g. a category or month name.
    pub label: String,
    /// The sum of line revenue over every record in the group.
    pub total_revenue: f64,
}

/// Ordered revenue totals with unique labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSeries {
    points: Vec<SeriesPoint>,
}

impl AggregatedSeries {
    /// The points in display order.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// The labels in display order.
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|point| point.label.clone()).collect()
    }

    /// The revenue totals, parallel to [AggregatedSeries::labels].
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.total_revenue).collect()
    }

    /// The sum of every point's revenue.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|point| point.total_revenue).sum()
    }

    /// The number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn pairs(&self) -> Vec<(&str, f64)> {
        self.points
            .iter()
            .map(|point| (point.label.as_str(), point.total_revenue))
            .collect()
    }
}

impl From<Vec<(String, f64)>> for AggregatedSeries {
    fn from(pairs: Vec<(String, f64)>) -> Self {
        Self {
            points: pairs
                .into_iter()
                .map(|(label, total_revenue)| SeriesPoint {
                    label,
                    total_revenue,
                })
                .collect(),
        }
    }
}

/// Revenue per `product_category`, highest revenue first.
///
/// # Errors
/// Returns [Error::EmptyGroupKey] if a category is empty, or
/// [Error::MalformedRecord] if a unit price is negative.
pub fn revenue_by_category<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Result<AggregatedSeries, Error> {
    let mut totals = group_revenue(records, "product_category", |record| {
        record.product_category.as_str()
    })?;
    sort_by_revenue_descending(&mut totals);

    Ok(totals.into())
}

/// Revenue per `product_detail`, highest revenue first.
///
/// # Errors
/// Returns [Error::EmptyGroupKey] if a product detail is empty, or
/// [Error::MalformedRecord] if a unit price is negative.
pub fn revenue_by_product_detail<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Result<AggregatedSeries, Error> {
    let mut totals = group_revenue(records, "product_detail", |record| {
        record.product_detail.as_str()
    })?;
    sort_by_revenue_descending(&mut totals);

    Ok(totals.into())
}

/// Revenue per `store_location`, in the order each location first appears.
///
/// # Errors
/// Returns [Error::EmptyGroupKey] if a location is empty, or
/// [Error::MalformedRecord] if a unit price is negative.
pub fn revenue_by_location<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Result<AggregatedSeries, Error> {
    group_revenue(records, "store_location", |record| {
        record.store_location.as_str()
    })
    .map(Into::into)
}

/// Revenue per calendar month for each month of `window`, in window order.
///
/// Records from the same month of different years are added together.
/// Months in the window without records have zero revenue, and records from
/// months outside the window are left out.
///
/// # Errors
/// Returns [Error::MalformedRecord] if a transaction date cannot be parsed or
/// a unit price is negative.
pub fn revenue_by_month<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    window: &MonthWindow,
) -> Result<AggregatedSeries, Error> {
    // Indexed by month number - 1.
    let mut totals = [0.0; 12];

    for (index, record) in records.into_iter().enumerate() {
        let revenue = record.checked_line_revenue(index)?;
        let month = record.month(index)?;
        totals[usize::from(u8::from(month)) - 1] += revenue;
    }

    let series = window
        .months()
        .into_iter()
        .map(|month| (month_name(month), totals[usize::from(u8::from(month)) - 1]))
        .collect::<Vec<_>>();

    Ok(series.into())
}

/// Sum line revenue per group key, keeping groups in first-seen order.
///
/// `field` names the grouping field for errors.
fn group_revenue<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    field: &'static str,
    key: impl Fn(&'a TransactionRecord) -> &'a str,
) -> Result<Vec<(String, f64)>, Error> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for (index, record) in records.into_iter().enumerate() {
        let label = key(record);

        if label.trim().is_empty() {
            return Err(Error::EmptyGroupKey { index, field });
        }

        let revenue = record.checked_line_revenue(index)?;
        let position = *positions.entry(label).or_insert_with(|| {
            totals.push((label.to_owned(), 0.0));
            totals.len() - 1
        });
        totals[position].1 += revenue;
    }

    Ok(totals)
}

/// Sort highest revenue first. The sort is stable so ties keep first-seen order.
fn sort_by_revenue_descending(totals: &mut [(String, f64)]) {
    totals.sort_by(|(_, a), (_, b)| b.total_cmp(a));
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        month::MonthWindow,
        record::RecordSet,
        test_utils::{coffee_and_tea, record},
    };

    use super::{
        revenue_by_category, revenue_by_location, revenue_by_month, revenue_by_product_detail,
    };

    fn sample_records() -> RecordSet {
        RecordSet::new(vec![
            record("Coffee", "Latte", 3.0, 2, "2023-01-15", "Astoria"),
            record("Tea", "Chai", 2.5, 4, "2023-02-10", "Lower Manhattan"),
            record("Bakery", "Scone", 3.5, 1, "2023-02-11", "Hell's Kitchen"),
            record("Coffee", "Espresso", 2.0, 3, "2023-03-01", "Astoria"),
            record("Tea", "Earl Grey", 3.0, 1, "2023-07-04", "Lower Manhattan"),
            record("Coffee", "Latte", 3.0, 1, "2024-01-02", "Hell's Kitchen"),
        ])
    }

    #[test]
    fn category_scenario_is_sorted_by_revenue() {
        let record_set = coffee_and_tea();

        let series = revenue_by_category(record_set.records()).unwrap();

        assert_eq!(series.pairs(), vec![("Tea", 10.0), ("Coffee", 6.0)]);
    }

    #[test]
    fn month_scenario_covers_january_to_june() {
        let record_set = coffee_and_tea();

        let series = revenue_by_month(record_set.records(), &MonthWindow::default()).unwrap();

        assert_eq!(
            series.pairs(),
            vec![
                ("January", 6.0),
                ("February", 10.0),
                ("March", 0.0),
                ("April", 0.0),
                ("May", 0.0),
                ("June", 0.0),
            ]
        );
    }

    #[test]
    fn category_totals_add_up_to_total_line_revenue() {
        let record_set = sample_records();
        let expected: f64 = record_set.records().iter().map(|r| r.line_revenue()).sum();

        let series = revenue_by_category(record_set.records()).unwrap();

        assert_eq!(series.total(), expected);
        assert_eq!(series.labels(), vec!["Coffee", "Tea", "Bakery"]);
    }

    #[test]
    fn category_and_product_detail_are_non_increasing() {
        let record_set = sample_records();

        for series in [
            revenue_by_category(record_set.records()).unwrap(),
            revenue_by_product_detail(record_set.records()).unwrap(),
        ] {
            let values = series.values();
            assert!(
                values.windows(2).all(|pair| pair[0] >= pair[1]),
                "not sorted: {values:?}"
            );
        }
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let record_set = RecordSet::new(vec![
            record("Bakery", "Scone", 2.0, 1, "2023-01-01", "A"),
            record("Tea", "Chai", 1.0, 2, "2023-01-01", "A"),
            record("Coffee", "Latte", 5.0, 1, "2023-01-01", "A"),
        ]);

        let series = revenue_by_category(record_set.records()).unwrap();

        assert_eq!(
            series.pairs(),
            vec![("Coffee", 5.0), ("Bakery", 2.0), ("Tea", 2.0)]
        );
    }

    #[test]
    fn product_detail_groups_independently_of_category() {
        let record_set = sample_records();

        let series = revenue_by_product_detail(record_set.records()).unwrap();

        assert_eq!(
            series.pairs(),
            vec![
                ("Chai", 10.0),
                ("Latte", 9.0),
                ("Espresso", 6.0),
                ("Scone", 3.5),
                ("Earl Grey", 3.0),
            ]
        );
    }

    #[test]
    fn location_keeps_first_appearance_order() {
        let record_set = sample_records();

        let series = revenue_by_location(record_set.records()).unwrap();

        assert_eq!(
            series.pairs(),
            vec![
                ("Astoria", 12.0),
                ("Lower Manhattan", 13.0),
                ("Hell's Kitchen", 6.5),
            ]
        );
    }

    #[test]
    fn month_merges_years_and_drops_months_outside_window() {
        let record_set = sample_records();

        let series = revenue_by_month(record_set.records(), &MonthWindow::default()).unwrap();

        assert_eq!(
            series.pairs(),
            vec![
                ("January", 9.0),
                ("February", 13.5),
                ("March", 6.0),
                ("April", 0.0),
                ("May", 0.0),
                ("June", 0.0),
            ]
        );
    }

    #[test]
    fn month_always_has_one_label_per_window_month() {
        let series = revenue_by_month(Vec::new(), &MonthWindow::default()).unwrap();

        assert_eq!(series.len(), 6);
        assert_eq!(series.total(), 0.0);
    }

    #[test]
    fn month_window_is_configurable() {
        let record_set = sample_records();
        let window = MonthWindow::new(6, 3).unwrap();

        let series = revenue_by_month(record_set.records(), &window).unwrap();

        assert_eq!(
            series.pairs(),
            vec![("June", 0.0), ("July", 3.0), ("August", 0.0)]
        );
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let series = revenue_by_category(Vec::new()).unwrap();

        assert!(series.is_empty());
    }

    #[test]
    fn empty_category_is_an_error() {
        let record_set = RecordSet::new(vec![
            record("Coffee", "Latte", 3.0, 1, "2023-01-01", "A"),
            record("  ", "Latte", 3.0, 1, "2023-01-01", "A"),
        ]);

        let result = revenue_by_category(record_set.records());

        assert_eq!(
            result,
            Err(Error::EmptyGroupKey {
                index: 1,
                field: "product_category"
            })
        );
    }

    #[test]
    fn empty_location_is_an_error() {
        let record_set = RecordSet::new(vec![record("Coffee", "Latte", 3.0, 1, "2023-01-01", "")]);

        let result = revenue_by_location(record_set.records());

        assert!(matches!(
            result,
            Err(Error::EmptyGroupKey {
                field: "store_location",
                ..
            })
        ));
    }

    #[test]
    fn empty_product_detail_is_an_error() {
        let record_set = RecordSet::new(vec![
            record("Coffee", "  ", 3.0, 1, "2023-01-01", "A"),
            record("Coffee", "Latte", 3.0, 1, "2023-01-02", "A"),
        ]);

        let result = revenue_by_product_detail(record_set.records());

        assert_eq!(
            result,
            Err(Error::EmptyGroupKey {
                index: 0,
                field: "product_detail",
            })
        );
    }

    #[test]
    fn unparseable_date_fails_month_aggregation() {
        let record_set = RecordSet::new(vec![record("Coffee", "Latte", 3.0, 1, "31st of June", "A")]);

        let result = revenue_by_month(record_set.records(), &MonthWindow::default());

        assert!(matches!(result, Err(Error::MalformedRecord { index: 0, .. })));
    }

    #[test]
    fn negative_price_fails_aggregation() {
        let record_set = RecordSet::new(vec![record("Coffee", "Latte", -3.0, 1, "2023-01-01", "A")]);

        let result = revenue_by_product_detail(record_set.records());

        assert!(matches!(result, Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn aggregates_a_filtered_subset() {
        let record_set = coffee_and_tea();
        let criteria =
            crate::filter::FilterCriteria::from_query_values(Some("Coffee"), None, None).unwrap();
        let subset = record_set.filter(&criteria).unwrap();

        let series = revenue_by_month(&subset, &MonthWindow::default()).unwrap();

        assert_eq!(
            series.pairs(),
            vec![
                ("January", 6.0),
                ("February", 0.0),
                ("March", 0.0),
                ("April", 0.0),
                ("May", 0.0),
                ("June", 0.0),
            ]
        );
    }
}
