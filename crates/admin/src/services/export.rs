//! CSV export of sales data.
//!
//! Every stored order is exported regardless of the selected range; the
//! range only appears in the download's file name.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use thiserror::Error;

use reeldeal_core::{DateRange, Order};

/// Errors that can occur while producing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct SalesRow<'a> {
    #[serde(rename = "Order ID")]
    order_id: &'a str,
    #[serde(rename = "Customer")]
    customer: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Total")]
    total: String,
    #[serde(rename = "Status")]
    status: &'static str,
}

/// Render orders as CSV with a header row.
///
/// # Errors
///
/// Returns `ExportError` if encoding fails.
pub fn orders_csv(orders: &[Order]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if orders.is_empty() {
        writer.write_record(["Order ID", "Customer", "Date", "Total", "Status"])?;
    }
    for order in orders {
        writer.serialize(SalesRow {
            order_id: order.id.as_str(),
            customer: &order.customer_name,
            date: short_date(order.created_at),
            total: order.total.fixed2(),
            status: order.status.as_str(),
        })?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Download file name, e.g. `reeldeal-sales-this-month-1700000000000.csv`.
#[must_use]
pub fn export_filename(range: DateRange, now: DateTime<Utc>) -> String {
    format!("reeldeal-sales-{}-{}.csv", range.as_str(), now.timestamp_millis())
}

/// `M/D/YYYY` without zero padding.
fn short_date(at: DateTime<Utc>) -> String {
    format!("{}/{}/{}", at.month(), at.day(), at.year())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::seed;
    use chrono::TimeZone;

    #[test]
    fn test_one_row_per_order_plus_header() {
        let orders = seed::orders();
        let csv = orders_csv(&orders).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), orders.len() + 1);
        assert_eq!(lines[0], "Order ID,Customer,Date,Total,Status");
        assert_eq!(lines[1], "RD-1001,John Angler,10/27/2023,225.97,processing");
        assert_eq!(lines[2], "RD-1002,Sarah Fisher,10/26/2023,34.99,shipped");
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = orders_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "Order ID,Customer,Date,Total,Status");
    }

    #[test]
    fn test_commas_in_names_are_quoted() {
        let mut orders = seed::orders();
        orders[0].customer_name = "Angler, John".to_string();
        let csv = orders_csv(&orders).unwrap();
        assert!(csv.contains("\"Angler, John\""));
    }

    #[test]
    fn test_filename() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(
            export_filename(DateRange::ThisWeek, now),
            "reeldeal-sales-this-week-1700000000000.csv"
        );
    }
}
