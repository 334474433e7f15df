//! Paging for the transaction table: choosing the rows for a page and the
//! page links shown underneath the table.

use maud::{Markup, html};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: usize,
    /// The number of table rows to display per page.
    pub page_size: usize,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 20,
            max_pages: 5,
        }
    }
}

/// One page of a longer list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The 1-based page number, always within `1..=page_count`.
    pub number: usize,
    /// The total number of pages, at least one even when there are no items.
    pub page_count: usize,
    /// The maximum number of items on a page.
    pub page_size: usize,
}

impl Page {
    /// Select page `requested` of `item_count` items.
    ///
    /// Page numbers past the last page select the last page and page zero
    /// selects the first page.
    pub fn new(requested: usize, item_count: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page_count = item_count.div_ceil(page_size).max(1);

        Self {
            number: requested.clamp(1, page_count),
            page_count,
            page_size,
        }
    }

    /// The items of `items` that fall on this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = ((self.number - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());

        &items[start..end]
    }
}

/// An item in the row of page links.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    /// A link to another page.
    Page(usize),
    /// The page being shown.
    CurrPage(usize),
    /// A gap in the page numbers.
    Ellipsis,
    /// A link to the following page.
    NextButton(usize),
    /// A link to the preceding page.
    BackButton(usize),
}

/// Choose the page links to show for page `curr_page` of `page_count`, showing
/// at most `max_pages` page numbers around the current page.
pub fn create_pagination_indicators(
    curr_page: usize,
    page_count: usize,
    max_pages: usize,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };
    let half = max_pages / 2;

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= half {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > page_count - half {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - half)..=(curr_page + half))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > half + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < page_count - half {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

/// Render the page links for `indicators`.
///
/// `href_for_page` builds the URL that shows a given page. Links request the
/// URL with htmx and swap the result into the element with ID `target_id`.
pub fn pagination_view(
    indicators: &[PaginationIndicator],
    target_id: &str,
    href_for_page: impl Fn(usize) -> String,
) -> Markup {
    let target = format!("#{target_id}");
    let link_style = "block px-3 py-2 rounded-sm text-blue-600 hover:underline";

    html! {
        nav class="pagination flex justify-center"
        {
            ul class="pagination flex items-center gap-x-1 p-0 m-0"
            {
                @for indicator in indicators {
                    li {
                        @match indicator {
                            PaginationIndicator::CurrPage(page) => {
                                span
                                    aria-current="page"
                                    class="block px-3 py-2 rounded-sm font-bold text-black dark:text-white"
                                { (page) }
                            }
                            PaginationIndicator::Page(page) => {
                                a
                                    href=(href_for_page(*page))
                                    hx-get=(href_for_page(*page))
                                    hx-target=(target)
                                    hx-push-url="true"
                                    class=(link_style)
                                { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="block px-3 py-2 text-gray-500" { "..." }
                            }
                            PaginationIndicator::BackButton(page) => {
                                a
                                    href=(href_for_page(*page))
                                    hx-get=(href_for_page(*page))
                                    hx-target=(target)
                                    hx-push-url="true"
                                    role="button"
                                    class=(link_style)
                                { "Back" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a
                                    href=(href_for_page(*page))
                                    hx-get=(href_for_page(*page))
                                    hx-target=(target)
                                    hx-push-url="true"
                                    role="button"
                                    class=(link_style)
                                { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}
