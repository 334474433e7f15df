//! Calendar month helpers: the reporting window of the monthly revenue chart
//! and month indices used by the month filter.

use time::Month;

use crate::Error;

/// A run of consecutive calendar months that the monthly revenue chart reports on.
///
/// The window ignores years, so a window starting in November with three
/// months covers November, December and January.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    first: Month,
    len: u8,
}

impl Default for MonthWindow {
    /// January through June.
    fn default() -> Self {
        Self {
            first: Month::January,
            len: 6,
        }
    }
}

impl MonthWindow {
    /// Create a window of `len` months starting at the month with index `first` (1 = January).
    ///
    /// # Errors
    /// Returns [Error::InvalidMonthWindow] if `first` or `len` is not between 1 and 12.
    pub fn new(first: u8, len: u8) -> Result<Self, Error> {
        let first = Month::try_from(first).map_err(|_| {
            Error::InvalidMonthWindow(format!("the first month must be 1 to 12, got {first}"))
        })?;

        if !(1..=12).contains(&len) {
            return Err(Error::InvalidMonthWindow(format!(
                "the window must cover 1 to 12 months, got {len}"
            )));
        }

        Ok(Self { first, len })
    }

    /// The months in the window, in calendar order starting from the first month.
    pub fn months(&self) -> Vec<Month> {
        std::iter::successors(Some(self.first), |month| Some(month.next()))
            .take(usize::from(self.len))
            .collect()
    }
}

/// The full English name of `month`, e.g. "January".
pub fn month_name(month: Month) -> String {
    month.to_string()
}

/// Parse the month index from a month selection of the form `"<anything>-<index>"`.
///
/// The index is the text after the last `-` and must be between 1 and 12.
///
/// # Errors
/// Returns [Error::InvalidFilter] if there is no `-` or the index is not a month.
pub fn parse_month_selection(selection: &str) -> Result<Month, Error> {
    let invalid = || {
        Error::InvalidFilter(format!(
            "month selection \"{selection}\" does not end with a month number from 1 to 12"
        ))
    };

    let (_, index) = selection.rsplit_once('-').ok_or_else(invalid)?;
    let index: u8 = index.trim().parse().map_err(|_| invalid())?;

    Month::try_from(index).map_err(|_| invalid())
}
