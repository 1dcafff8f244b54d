//! Sales reports and exports.

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use reeldeal_admin::db::RecordStore;
use reeldeal_admin::services::{export_filename, orders_csv};
use reeldeal_core::{DateRange, Order, SalesSummary};

use super::CommandError;

/// Write the sales summary for `range` as pretty JSON.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the output cannot be
/// written.
pub async fn summary(
    store: &RecordStore,
    range: DateRange,
    mut out: impl Write,
) -> Result<SalesSummary, CommandError> {
    let orders: Vec<Order> = store.list().await?;
    let summary = SalesSummary::compute(&orders, range, Utc::now());

    serde_json::to_writer_pretty(&mut out, &summary)?;
    writeln!(out)?;

    Ok(summary)
}

/// Export every stored order as CSV, returning the path written.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the file cannot be
/// written.
pub async fn export_orders(
    store: &RecordStore,
    range: DateRange,
    out: Option<PathBuf>,
) -> Result<PathBuf, CommandError> {
    let orders: Vec<Order> = store.list().await?;
    let csv = orders_csv(&orders)?;

    let path = out.unwrap_or_else(|| PathBuf::from(export_filename(range, Utc::now())));
    tokio::fs::write(&path, csv).await?;

    tracing::info!(rows = orders.len(), path = %path.display(), "Exported orders");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_summary_writes_json() {
        let store = RecordStore::memory();
        let mut out = Vec::new();
        let summary = summary(&store, DateRange::ThisQuarter, &mut out)
            .await
            .unwrap();

        let parsed: SalesSummary = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, summary);
        assert_eq!(parsed.range, DateRange::ThisQuarter);
    }

    #[tokio::test]
    async fn test_export_orders_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::memory();
        let target = dir.path().join("sales.csv");

        let path = export_orders(&store, DateRange::ThisMonth, Some(target.clone()))
            .await
            .unwrap();
        assert_eq!(path, target);

        let csv = std::fs::read_to_string(&path).unwrap();
        let orders: Vec<Order> = store.list().await.unwrap();
        assert!(csv.starts_with("Order ID,Customer,Date,Total,Status"));
        assert_eq!(csv.lines().count(), orders.len() + 1);
    }
}
