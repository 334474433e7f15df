//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying and updating the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handler
//!
//! Every request runs one update cycle: the filter is evaluated against the
//! full record set, the four aggregations and the table are built from that
//! one subset, and the result is rendered as either the full page or, for
//! htmx requests, just the dashboard content.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            revenue_by_category, revenue_by_location, revenue_by_month, revenue_by_product_detail,
        },
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, location_chart,
            month_chart, product_detail_chart,
        },
        tables::{SortOrder, TableColumn, TableOptions, summary_view, table_rows, transactions_table},
    },
    endpoints,
    filter::{FilterCriteria, FilterOption, FilterOptions, WILDCARD},
    html::{
        BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base, loading_spinner,
    },
    month::MonthWindow,
    pagination::{Page, PaginationConfig, create_pagination_indicators, pagination_view},
    record::{RecordSet, TransactionRecord},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The transaction records loaded at start-up.
    pub records: RecordSet,
    /// The months shown by the monthly revenue chart.
    pub month_window: MonthWindow,
    /// The config that controls how the transaction table is paged.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            records: state.records.clone(),
            month_window: state.month_window,
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters of the dashboard page.
///
/// Every parameter is optional. Missing filter values mean "all".
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The product category to show, or "all".
    pub category: Option<String>,
    /// The store location to show, or "all".
    pub location: Option<String>,
    /// The month to show as `"<anything>-<index>"`, or "all".
    pub month: Option<String>,
    /// Text to search the transaction table for.
    pub q: Option<String>,
    /// The column to sort the transaction table by.
    pub sort: Option<TableColumn>,
    /// The direction to sort the transaction table in.
    pub order: Option<SortOrder>,
    /// The page of the transaction table to show, starting from 1.
    pub page: Option<usize>,
}

/// Holds all the data needed to render the dashboard.
struct DashboardData<'a> {
    filter_options: FilterOptions,
    criteria: FilterCriteria,
    table_options: TableOptions,
    charts: [DashboardChart; 4],
    transaction_count: usize,
    total_revenue: f64,
    rows: Vec<&'a TransactionRecord>,
    page: Page,
    max_pages: usize,
}

/// Display the dashboard, or just its content for htmx requests.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Response {
    if state.records.is_empty() {
        return dashboard_no_data_view().into_response();
    }

    let data = build_dashboard_data(&state, &query)
        .inspect_err(|error| tracing::error!("Could not build the dashboard: {error}"));

    match (data, is_htmx_request) {
        (Ok(data), false) => dashboard_view(&data).into_response(),
        (Ok(data), true) => dashboard_content(&data).into_response(),
        (Err(error), false) => error.into_response(),
        (Err(error), true) => error.into_alert_response(),
    }
}

/// Runs one update cycle over the full record set.
///
/// # Errors
/// Returns an error if the query holds an invalid month selection, or a record
/// that the filter or an aggregation needs is malformed.
fn build_dashboard_data<'a>(
    state: &'a DashboardState,
    query: &DashboardQuery,
) -> Result<DashboardData<'a>, Error> {
    let criteria = FilterCriteria::from_query_values(
        query.category.as_deref(),
        query.location.as_deref(),
        query.month.as_deref(),
    )?;
    let filter_options = FilterOptions::from_records(&state.records)?;

    let subset = state.records.filter(&criteria)?;

    let by_category = revenue_by_category(&subset)?;
    let by_month = revenue_by_month(&subset, &state.month_window)?;
    let by_location = revenue_by_location(&subset)?;
    let by_product_detail = revenue_by_product_detail(&subset)?;

    let charts = [
        DashboardChart {
            id: "revenue-by-category-chart",
            options: category_chart(&by_category).to_string(),
        },
        DashboardChart {
            id: "revenue-by-month-chart",
            options: month_chart(&by_month).to_string(),
        },
        DashboardChart {
            id: "revenue-by-location-chart",
            options: location_chart(&by_location).to_string(),
        },
        DashboardChart {
            id: "revenue-by-product-detail-chart",
            options: product_detail_chart(&by_product_detail).to_string(),
        },
    ];

    let table_options = TableOptions {
        search: query.q.clone().unwrap_or_default(),
        sort: query.sort,
        order: query.order.unwrap_or_default(),
    };
    let rows = table_rows(&subset, &table_options);
    let page = Page::new(
        query.page.unwrap_or(state.pagination_config.default_page),
        rows.len(),
        state.pagination_config.page_size,
    );

    Ok(DashboardData {
        filter_options,
        criteria,
        table_options,
        charts,
        transaction_count: subset.len(),
        total_revenue: by_category.total(),
        rows,
        page,
        max_pages: state.pagination_config.max_pages,
    })
}

/// The dashboard URL that shows `page` of the table sorted by `sort` in
/// `order`, keeping the current filter and search.
fn dashboard_href(
    criteria: &FilterCriteria,
    search: &str,
    sort: Option<TableColumn>,
    order: SortOrder,
    page: usize,
) -> String {
    let month = criteria.month_query_value();
    let page = page.to_string();
    let mut params = vec![
        ("category", criteria.category.as_query_value()),
        ("location", criteria.location.as_query_value()),
        ("month", month.as_str()),
    ];

    if !search.is_empty() {
        params.push(("q", search));
    }

    if let Some(column) = sort {
        params.push(("sort", column.as_query_value()));
        params.push(("order", order.as_query_value()));
    }

    params.push(("page", page.as_str()));

    serde_urlencoded::to_string(&params)
        .map(|query| format!("{}?{query}", endpoints::DASHBOARD_VIEW))
        .unwrap_or_else(|error| {
            tracing::error!("Could not encode dashboard query {params:?}: {error}");
            endpoints::DASHBOARD_VIEW.to_owned()
        })
}

/// Renders the dashboard page when the data file holds no transactions.
fn dashboard_no_data_view() -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once the data file has some transactions.
                Add records to the data file and restart the server."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the full dashboard page.
fn dashboard_view(data: &DashboardData) -> Markup {
    let content = html!(
        div
            id=(endpoints::DASHBOARD_CONTENT_ID)
            class=(PAGE_CONTAINER_STYLE)
        {
            (dashboard_content(data))
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Dashboard", &scripts, &content)
}

/// Renders the dashboard content: the filter form, summary, charts and table.
///
/// This is swapped into the page by htmx whenever a filter, the search, the
/// sort or the page changes.
fn dashboard_content(data: &DashboardData) -> Markup {
    let criteria = &data.criteria;
    let search = data.table_options.search.as_str();
    let sort = data.table_options.sort;
    let order = data.table_options.order;

    let indicators = create_pagination_indicators(data.page.number, data.page.page_count, data.max_pages);
    let rows = data.page.slice(&data.rows);

    html!(
        h1 class="text-2xl font-bold mb-4 self-start" { "Sales Dashboard" }

        (filter_form(&data.filter_options, criteria, &data.table_options))

        (summary_view(data.transaction_count, data.total_revenue))

        (charts_view(&data.charts))

        section id="transactions" class="w-full mb-4"
        {
            h3 class="text-xl font-semibold mb-4" { "Transactions" }

            (transactions_table(
                rows,
                &data.table_options,
                endpoints::DASHBOARD_CONTENT_ID,
                |column, order| dashboard_href(criteria, search, Some(column), order, 1),
            ))

            div class="mt-4"
            {
                (pagination_view(
                    &indicators,
                    endpoints::DASHBOARD_CONTENT_ID,
                    |page| dashboard_href(criteria, search, sort, order, page),
                ))
            }
        }

        (charts_script(&data.charts))
    )
}

/// Renders the filter form.
///
/// Changing a select box or submitting the search reloads the dashboard
/// content on the first page of the table, keeping the current sort.
fn filter_form(
    options: &FilterOptions,
    criteria: &FilterCriteria,
    table_options: &TableOptions,
) -> Markup {
    let target = format!("#{}", endpoints::DASHBOARD_CONTENT_ID);
    let month = criteria.month_query_value();

    html!(
        form
            id="dashboard-filters"
            action=(endpoints::DASHBOARD_VIEW)
            method="get"
            hx-get=(endpoints::DASHBOARD_VIEW)
            hx-target=(target)
            hx-target-error="#alert-container"
            hx-swap="innerHTML"
            hx-trigger="change, submit"
            hx-push-url="true"
            hx-indicator="#indicator"
            class="w-full grid grid-cols-1 md:grid-cols-4 gap-4 items-end mb-4
                bg-gray-50 dark:bg-gray-800 p-4 rounded-lg"
        {
            (filter_select("category", "Category", "All Categories", &options.categories, criteria.category.as_query_value()))
            (filter_select("location", "Location", "All Locations", &options.locations, criteria.location.as_query_value()))
            (filter_select("month", "Month", "All Months", &options.months, &month))

            div
            {
                label for="q" class=(FORM_LABEL_STYLE) { "Search" }

                div class="flex gap-2"
                {
                    input
                        type="search"
                        id="q"
                        name="q"
                        value=(table_options.search)
                        placeholder="Search transactions"
                        class=(FORM_TEXT_INPUT_STYLE);

                    button type="submit" class=(BUTTON_SECONDARY_STYLE)
                    {
                        span id="indicator" class="htmx-indicator" { (loading_spinner()) }
                        "Search"
                    }
                }
            }

            @if let Some(column) = table_options.sort {
                input type="hidden" name="sort" value=(column.as_query_value());
                input type="hidden" name="order" value=(table_options.order.as_query_value());
            }
        }
    )
}

fn filter_select(
    name: &str,
    label: &str,
    all_label: &str,
    options: &[FilterOption],
    selected: &str,
) -> Markup {
    html!(
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select id=(name) name=(name) class=(FORM_TEXT_INPUT_STYLE)
            {
                option value=(WILDCARD) selected[selected == WILDCARD] { (all_label) }

                @for option in options {
                    option value=(option.value) selected[selected == option.value] { (option.label) }
                }
            }
        }
    )
}
