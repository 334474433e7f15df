//! The transaction table: search, sorting and the table markup.
//!
//! The table shows the records that passed the dashboard filter. Searching
//! and sorting only change which of those rows are shown and in what order,
//! never what the charts are built from.

use std::cmp::Ordering;

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    record::{RecordSubset, TransactionRecord},
};

/// A sortable column of the transaction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableColumn {
    /// The transaction date.
    Date,
    /// The product category.
    Category,
    /// The product detail.
    Product,
    /// The store location.
    Location,
    /// The unit price.
    UnitPrice,
    /// The quantity sold.
    Quantity,
    /// The line revenue.
    Revenue,
}

impl TableColumn {
    const ALL: [TableColumn; 7] = [
        Self::Date,
        Self::Category,
        Self::Product,
        Self::Location,
        Self::UnitPrice,
        Self::Quantity,
        Self::Revenue,
    ];

    /// The query value for this column, e.g. `"unit_price"`.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Category => "category",
            Self::Product => "product",
            Self::Location => "location",
            Self::UnitPrice => "unit_price",
            Self::Quantity => "quantity",
            Self::Revenue => "revenue",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Category => "Category",
            Self::Product => "Product",
            Self::Location => "Location",
            Self::UnitPrice => "Unit Price",
            Self::Quantity => "Qty",
            Self::Revenue => "Revenue",
        }
    }

    fn compare(self, a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
        match self {
            // Unparseable dates sort before every valid date.
            Self::Date => a.date(0).ok().cmp(&b.date(0).ok()),
            Self::Category => a.product_category.cmp(&b.product_category),
            Self::Product => a.product_detail.cmp(&b.product_detail),
            Self::Location => a.store_location.cmp(&b.store_location),
            Self::UnitPrice => a.unit_price.total_cmp(&b.unit_price),
            Self::Quantity => a.transaction_qty.cmp(&b.transaction_qty),
            Self::Revenue => a.line_revenue().total_cmp(&b.line_revenue()),
        }
    }
}

/// The direction of a table sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// The query value for this order.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// How the filtered records are searched and ordered in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Case-insensitive text that a row's text columns must contain.
    pub search: String,
    /// The column to sort by, or `None` to keep the data file order.
    pub sort: Option<TableColumn>,
    /// The direction of the sort.
    pub order: SortOrder,
}

/// The records of `subset` that match the search text, in table order.
///
/// The search looks at the date, category, product and location columns.
/// Sorting is stable, so rows that compare equal keep their data file order
/// in both directions.
pub fn table_rows<'a>(
    subset: &RecordSubset<'a>,
    options: &TableOptions,
) -> Vec<&'a TransactionRecord> {
    let needle = options.search.trim().to_lowercase();

    let mut rows: Vec<&'a TransactionRecord> = subset
        .iter()
        .filter(|record| needle.is_empty() || matches_search(record, &needle))
        .collect();

    if let Some(column) = options.sort {
        match options.order {
            SortOrder::Ascending => rows.sort_by(|a, b| column.compare(a, b)),
            SortOrder::Descending => rows.sort_by(|a, b| column.compare(b, a)),
        }
    }

    rows
}

fn matches_search(record: &TransactionRecord, needle: &str) -> bool {
    [
        &record.transaction_date,
        &record.product_category,
        &record.product_detail,
        &record.store_location,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Renders the transaction table.
///
/// # Arguments
/// * `rows` - The rows on the current page
/// * `options` - The active search and sort, used to mark the sorted column
/// * `target_id` - The ID of the element that header links swap their response into
/// * `sort_href` - Builds the URL that sorts the table by a column in an order
pub(super) fn transactions_table(
    rows: &[&TransactionRecord],
    options: &TableOptions,
    target_id: &str,
    sort_href: impl Fn(TableColumn, SortOrder) -> String,
) -> Markup {
    let target = format!("#{target_id}");

    html! {
        div class="overflow-x-auto rounded-lg shadow w-full"
        {
            table id="transactions-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for column in TableColumn::ALL {
                            @let is_sorted = options.sort == Some(column);
                            @let next_order = if is_sorted { options.order.reverse() } else { SortOrder::Ascending };
                            @let href = sort_href(column, next_order);

                            th
                                scope="col"
                                class="px-6 py-3"
                                aria-sort=[is_sorted.then(|| aria_sort(options.order))]
                            {
                                a
                                    href=(href)
                                    hx-get=(href)
                                    hx-target=(target)
                                    hx-push-url="true"
                                    class="hover:underline"
                                {
                                    (column.heading())
                                    @if is_sorted {
                                        @match options.order {
                                            SortOrder::Ascending => " ▲",
                                            SortOrder::Descending => " ▼",
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                tbody
                {
                    @for record in rows {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (record.transaction_date) }
                            td class=(TABLE_CELL_STYLE) { (record.product_category) }
                            td class=(TABLE_CELL_STYLE) { (record.product_detail) }
                            td class=(TABLE_CELL_STYLE) { (record.store_location) }
                            td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(record.unit_price)) }
                            td class={(TABLE_CELL_STYLE) " text-right"} { (record.transaction_qty) }
                            td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(record.line_revenue())) }
                        }
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td
                                colspan=(TableColumn::ALL.len())
                                class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No transactions match your search."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn aria_sort(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Ascending => "ascending",
        SortOrder::Descending => "descending",
    }
}

/// Renders the number of filtered transactions and their total revenue.
pub(super) fn summary_view(transaction_count: usize, total_revenue: f64) -> Markup {
    html! {
        div id="summary" class="grid grid-cols-2 gap-4 w-full mb-4"
        {
            div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800"
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Transactions" }
                p class="text-2xl font-semibold" { (transaction_count) }
            }
            div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800"
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Total Revenue" }
                p class="text-2xl font-semibold" { (format_currency(total_revenue)) }
            }
        }
    }
}
