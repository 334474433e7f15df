//! The transaction record model and the read-only record set that owns the loaded data.
//!
//! Records are loaded once at start-up and never mutated afterwards. Filtering
//! borrows from the [RecordSet] to produce a [RecordSubset] that lives for a
//! single dashboard update.

use std::{path::Path, sync::Arc};

use serde::{Deserialize, Serialize};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, filter::FilterCriteria};

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const US_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");
const US_PADDED_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month]/[day]/[year]");

/// One row of sales data.
///
/// The field names match the keys of the JSON data file exactly. Unknown keys
/// in the data file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The broad product category, e.g. "Coffee".
    pub product_category: String,
    /// The specific product, e.g. "Ethiopia Rg".
    pub product_detail: String,
    /// The price of a single unit.
    pub unit_price: f64,
    /// The number of units sold.
    pub transaction_qty: u32,
    /// The date of the transaction as written in the data file, optionally with a time.
    pub transaction_date: String,
    /// The store that made the sale.
    pub store_location: String,
}

impl TransactionRecord {
    /// The revenue of this record: `unit_price * transaction_qty`.
    pub fn line_revenue(&self) -> f64 {
        self.unit_price * f64::from(self.transaction_qty)
    }

    /// The line revenue, or [Error::MalformedRecord] if the unit price is
    /// negative or not a finite number.
    ///
    /// `index` is the position of the record in the sequence being processed
    /// and is only used for the error.
    pub(crate) fn checked_line_revenue(&self, index: usize) -> Result<f64, Error> {
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(Error::MalformedRecord {
                index,
                reason: format!("unit price {} is not a non-negative number", self.unit_price),
            });
        }

        Ok(self.line_revenue())
    }

    /// Parse the calendar date of the transaction.
    ///
    /// Accepts `YYYY-MM-DD` and `M/D/YYYY`, each optionally followed by a
    /// time separated by `T` or a space. The time is ignored.
    ///
    /// # Errors
    /// Returns [Error::MalformedRecord] if the date cannot be parsed.
    pub fn date(&self, index: usize) -> Result<Date, Error> {
        parse_transaction_date(&self.transaction_date).ok_or_else(|| Error::MalformedRecord {
            index,
            reason: format!(
                "could not parse transaction date \"{}\"",
                self.transaction_date
            ),
        })
    }

    /// The calendar month of the transaction, independent of the year.
    ///
    /// # Errors
    /// Returns [Error::MalformedRecord] if the date cannot be parsed.
    pub fn month(&self, index: usize) -> Result<Month, Error> {
        self.date(index).map(|date| date.month())
    }
}

fn parse_transaction_date(raw: &str) -> Option<Date> {
    let date_part = raw.trim().split(['T', ' ']).next()?;

    Date::parse(date_part, ISO_DATE_FORMAT)
        .or_else(|_| Date::parse(date_part, US_DATE_FORMAT))
        .or_else(|_| Date::parse(date_part, US_PADDED_DATE_FORMAT))
        .ok()
}

/// The full set of transaction records loaded at start-up.
///
/// Cloning is cheap and every clone shares the same records. There is no way
/// to mutate the records once the set has been created.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Arc<[TransactionRecord]>,
}

impl RecordSet {
    /// Create a record set that owns `records`.
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Parse a JSON array of records.
    ///
    /// # Errors
    /// Returns [Error::InvalidData] if `json` is not an array of objects with
    /// every record field, or a field has the wrong type.
    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        let records: Vec<TransactionRecord> = serde_json::from_slice(json)
            .map_err(|error| Error::InvalidData(error.to_string()))?;

        Ok(Self::new(records))
    }

    /// Read and parse the JSON data file at `path`.
    ///
    /// # Errors
    /// Returns [Error::LoadFailed] if the file cannot be read, or
    /// [Error::InvalidData] if it does not hold a JSON array of records.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|error| Error::LoadFailed(format!("{}: {error}", path.display())))?;

        let record_set = Self::from_json(&bytes)?;
        tracing::info!(
            "Loaded {} transaction records from {}",
            record_set.len(),
            path.display()
        );

        Ok(record_set)
    }

    /// All of the records, in the order they were loaded.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// The number of records in the set.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Select the records that match every active criterion in `criteria`.
    ///
    /// Filtering always starts from the full record set, so the result only
    /// depends on `criteria` and never on a previous call.
    ///
    /// # Errors
    /// Returns [Error::MalformedRecord] if a month criterion is active and a
    /// record reaching the month check has a transaction date that cannot be parsed.
    pub fn filter(&self, criteria: &FilterCriteria) -> Result<RecordSubset<'_>, Error> {
        let mut selected = Vec::with_capacity(self.records.len());

        for (index, record) in self.records.iter().enumerate() {
            if criteria.matches(record, index)? {
                selected.push(record);
            }
        }

        tracing::debug!(
            "Filter {criteria:?} selected {} of {} records",
            selected.len(),
            self.records.len()
        );

        Ok(RecordSubset { records: selected })
    }
}

/// The records selected by one filter pass, borrowed from a [RecordSet].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSubset<'a> {
    records: Vec<&'a TransactionRecord>,
}

impl<'a> RecordSubset<'a> {
    /// Iterate over the selected records in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &'a TransactionRecord> + '_ {
        self.records.iter().copied()
    }

    /// The selected records.
    pub fn as_slice(&self) -> &[&'a TransactionRecord] {
        &self.records
    }

    /// The number of selected records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were selected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'s, 'a> IntoIterator for &'s RecordSubset<'a> {
    type Item = &'a TransactionRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a TransactionRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}
