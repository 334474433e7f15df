use crate::record::{RecordSet, TransactionRecord};

pub(crate) fn record(
    category: &str,
    detail: &str,
    unit_price: f64,
    transaction_qty: u32,
    transaction_date: &str,
    location: &str,
) -> TransactionRecord {
    TransactionRecord {
        product_category: category.to_owned(),
        product_detail: detail.to_owned(),
        unit_price,
        transaction_qty,
        transaction_date: transaction_date.to_owned(),
        store_location: location.to_owned(),
    }
}

/// One coffee sale in January at store A and one tea sale in February at store B.
pub(crate) fn coffee_and_tea() -> RecordSet {
    RecordSet::new(vec![
        record("Coffee", "Latte", 3.0, 2, "2024-01-15", "A"),
        record("Tea", "Chai", 2.0, 5, "2024-02-10", "B"),
    ])
}
