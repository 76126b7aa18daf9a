//! One-shot migration of all local collections into the remote backend
//!
//! Used when a previously-local instance is connected to a fresh remote
//! project. Collections are copied in dependency order (suppliers before
//! products, since products may reference a supplier id). One batch upsert
//! per collection; the first failing batch aborts the rest and surfaces
//! the cause. Partial migration is possible and is reported, not retried.

use serde::Serialize;

use crate::remote::rows::{OrderRow, ProductRow, SupplierRow};
use crate::remote::{RemoteBackend, TABLE_ORDERS, TABLE_PRODUCTS, TABLE_SUPPLIERS};
use crate::store::LocalStore;
use crate::{Error, Result};

/// Ids at least this long are treated as remote-compatible (generated
/// identifiers) and preserved for idempotent re-runs. Shorter ids are the
/// local seed sequence ("1", "2", "101") and are dropped so the backend
/// assigns fresh ones.
const REMOTE_ID_MIN_LEN: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub suppliers: usize,
    pub products: usize,
    pub orders: usize,
}

pub async fn migrate(local: &LocalStore, remote: &RemoteBackend) -> Result<MigrationReport> {
    let suppliers: Vec<SupplierRow> = local
        .suppliers()
        .await
        .into_iter()
        .map(|s| {
            let mut row = SupplierRow::from(s);
            row.id = portable_id(row.id);
            row
        })
        .collect();
    upload_batch(remote, TABLE_SUPPLIERS, &suppliers).await?;

    let products: Vec<ProductRow> = local
        .products()
        .await
        .into_iter()
        .map(|p| {
            let mut row = ProductRow::from(p);
            row.id = portable_id(row.id);
            row
        })
        .collect();
    upload_batch(remote, TABLE_PRODUCTS, &products).await?;

    let orders: Vec<OrderRow> = local
        .orders()
        .await
        .into_iter()
        .map(|o| {
            let mut row = OrderRow::from(o);
            row.id = portable_id(row.id);
            row
        })
        .collect();
    upload_batch(remote, TABLE_ORDERS, &orders).await?;

    let report = MigrationReport {
        suppliers: suppliers.len(),
        products: products.len(),
        orders: orders.len(),
    };
    tracing::info!(
        suppliers = report.suppliers,
        products = report.products,
        orders = report.orders,
        "migration complete"
    );
    Ok(report)
}

/// Keeps only ids the remote backend can adopt as-is.
fn portable_id(id: Option<String>) -> Option<String> {
    id.filter(|v| v.len() >= REMOTE_ID_MIN_LEN)
}

async fn upload_batch<T: Serialize>(
    remote: &RemoteBackend,
    collection: &'static str,
    rows: &[T],
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    tracing::info!(collection, rows = rows.len(), "migrating collection");
    remote
        .upsert(collection, rows)
        .await
        .map_err(|source| Error::Migration {
            collection,
            source: Box::new(source),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use tempfile::TempDir;

    #[test]
    fn short_local_ids_are_dropped_long_ids_preserved() {
        assert_eq!(portable_id(Some("3".into())), None);
        assert_eq!(
            portable_id(Some("a1b2c3d4-e5f6-7890-abcd-ef1234567890".into())),
            Some("a1b2c3d4-e5f6-7890-abcd-ef1234567890".into())
        );
    }

    #[test]
    fn dropped_id_is_absent_from_the_outbound_row() {
        let mut product = Product::new("Kaffee Bohnen", "kg");
        product.id = "3".into();
        let mut row = ProductRow::from(product);
        row.id = portable_id(row.id);
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.as_object().unwrap().get("id").is_none());
    }

    #[tokio::test]
    async fn first_failing_batch_aborts_and_names_the_collection() {
        let tmp = TempDir::new().unwrap();
        let local = LocalStore::new(tmp.path());
        let remote = RemoteBackend::new("http://127.0.0.1:9", "anon");

        // Suppliers seed empty, so the first non-empty batch is products.
        let err = migrate(&local, &remote).await.unwrap_err();
        match err {
            Error::Migration { collection, .. } => assert_eq!(collection, TABLE_PRODUCTS),
            other => panic!("unexpected error: {other}"),
        }
    }
}
