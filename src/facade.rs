//! Data Access Facade
//!
//! The single CRUD surface for every entity type. The backend is resolved
//! once at construction time from the settings record; call sites never
//! re-read ambient configuration.
//!
//! Failure policy, deliberately asymmetric:
//! - Reads fall back to the local store when the remote call fails. The
//!   failure is logged, never propagated — the UI must not block on a
//!   transient remote outage.
//! - Writes and deletes propagate errors. Silently losing a write is
//!   unacceptable.
//! - Attachment upload is a remote-only capability and reports `None`
//!   rather than an error when no remote backend is configured.

use crate::domain::{Order, Product, Settings, Supplier};
use crate::remote::rows::{OrderRow, ProductRow, SupplierRow};
use crate::remote::{RemoteBackend, TABLE_ORDERS, TABLE_PRODUCTS, TABLE_SUPPLIERS};
use crate::store::LocalStore;
use crate::{Error, Result};

pub struct DataFacade {
    local: LocalStore,
    remote: Option<RemoteBackend>,
}

impl DataFacade {
    pub fn new(local: LocalStore, remote: Option<RemoteBackend>) -> Self {
        Self { local, remote }
    }

    /// Resolves the backend from settings once. Rebuild the facade after
    /// changing remote credentials.
    pub fn from_settings(settings: &Settings, local: LocalStore) -> Self {
        Self::new(local, RemoteBackend::from_settings(settings))
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Lists all products ordered by name.
    pub async fn products(&self) -> Vec<Product> {
        if let Some(remote) = &self.remote {
            match remote.select::<ProductRow>(TABLE_PRODUCTS, "name.asc").await {
                Ok(rows) => return rows.into_iter().map(Product::from).collect(),
                Err(err) => {
                    tracing::warn!(%err, "remote product read failed, falling back to local store");
                }
            }
        }
        let mut products = self.local.products().await;
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Upserts a product by id.
    pub async fn save_product(&self, product: &Product) -> Result<()> {
        product.validate()?;
        if let Some(remote) = &self.remote {
            let row = ProductRow::from(product.clone());
            return remote.upsert(TABLE_PRODUCTS, std::slice::from_ref(&row)).await;
        }
        let mut products = self.local.products().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        self.local.save_products(&products).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<()> {
        if let Some(remote) = &self.remote {
            return remote.delete(TABLE_PRODUCTS, id).await;
        }
        let mut products = self.local.products().await;
        products.retain(|p| p.id != id);
        self.local.save_products(&products).await
    }

    // -------------------------------------------------------------------------
    // Suppliers
    // -------------------------------------------------------------------------

    /// Lists all suppliers ordered by name.
    pub async fn suppliers(&self) -> Vec<Supplier> {
        if let Some(remote) = &self.remote {
            match remote.select::<SupplierRow>(TABLE_SUPPLIERS, "name.asc").await {
                Ok(rows) => return rows.into_iter().map(Supplier::from).collect(),
                Err(err) => {
                    tracing::warn!(%err, "remote supplier read failed, falling back to local store");
                }
            }
        }
        let mut suppliers = self.local.suppliers().await;
        suppliers.sort_by(|a, b| a.name.cmp(&b.name));
        suppliers
    }

    pub async fn save_supplier(&self, supplier: &Supplier) -> Result<()> {
        supplier.validate()?;
        if let Some(remote) = &self.remote {
            let row = SupplierRow::from(supplier.clone());
            return remote.upsert(TABLE_SUPPLIERS, std::slice::from_ref(&row)).await;
        }
        let mut suppliers = self.local.suppliers().await;
        match suppliers.iter_mut().find(|s| s.id == supplier.id) {
            Some(existing) => *existing = supplier.clone(),
            None => suppliers.push(supplier.clone()),
        }
        self.local.save_suppliers(&suppliers).await
    }

    pub async fn delete_supplier(&self, id: &str) -> Result<()> {
        if let Some(remote) = &self.remote {
            return remote.delete(TABLE_SUPPLIERS, id).await;
        }
        let mut suppliers = self.local.suppliers().await;
        suppliers.retain(|s| s.id != id);
        self.local.save_suppliers(&suppliers).await
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Lists all orders, newest first.
    pub async fn orders(&self) -> Vec<Order> {
        if let Some(remote) = &self.remote {
            match remote.select::<OrderRow>(TABLE_ORDERS, "date.desc").await {
                Ok(rows) => return rows.into_iter().map(Order::from).collect(),
                Err(err) => {
                    tracing::warn!(%err, "remote order read failed, falling back to local store");
                }
            }
        }
        let mut orders = self.local.orders().await;
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        orders
    }

    /// Inserts a freshly placed order. Order ids are generated by the
    /// caller and never reused, so the remote path is a pure insert.
    pub async fn create_order(&self, order: &Order) -> Result<()> {
        if order.quantity < 1 {
            return Err(Error::Validation("order quantity must be at least 1".into()));
        }
        if let Some(remote) = &self.remote {
            return remote.insert(TABLE_ORDERS, &OrderRow::from(order.clone())).await;
        }
        let mut orders = self.local.orders().await;
        orders.push(order.clone());
        self.local.save_orders(&orders).await
    }

    /// Upserts an existing order (status toggles, defect reports,
    /// delivery annotations).
    pub async fn update_order(&self, order: &Order) -> Result<()> {
        if let Some(remote) = &self.remote {
            let row = OrderRow::from(order.clone());
            return remote.upsert(TABLE_ORDERS, std::slice::from_ref(&row)).await;
        }
        let mut orders = self.local.orders().await;
        match orders.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order.clone(),
            None => orders.push(order.clone()),
        }
        self.local.save_orders(&orders).await
    }

    pub async fn delete_order(&self, id: &str) -> Result<()> {
        if let Some(remote) = &self.remote {
            return remote.delete(TABLE_ORDERS, id).await;
        }
        let mut orders = self.local.orders().await;
        orders.retain(|o| o.id != id);
        self.local.save_orders(&orders).await
    }

    // -------------------------------------------------------------------------
    // Attachments
    // -------------------------------------------------------------------------

    /// Uploads an attachment and returns its public URL, or `None` when no
    /// remote backend is configured — a capability gap, not a failure.
    pub async fn upload_attachment(&self, name: &str, bytes: Vec<u8>) -> Result<Option<String>> {
        match &self.remote {
            Some(remote) => Ok(Some(remote.upload(name, bytes).await?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;
    use crate::OrderStatus;
    use tempfile::TempDir;

    fn local_facade(tmp: &TempDir) -> DataFacade {
        DataFacade::new(LocalStore::new(tmp.path()), None)
    }

    /// Port 9 (discard) on loopback: connection refused, fast and offline.
    fn broken_remote_facade(tmp: &TempDir) -> DataFacade {
        DataFacade::new(
            LocalStore::new(tmp.path()),
            Some(RemoteBackend::new("http://127.0.0.1:9", "anon")),
        )
    }

    #[tokio::test]
    async fn failed_remote_read_falls_back_to_local() {
        let tmp = TempDir::new().unwrap();
        let facade = broken_remote_facade(&tmp);

        let products = facade.products().await;
        assert_eq!(products.len(), 2, "seeded local data served despite remote failure");
    }

    #[tokio::test]
    async fn failed_remote_write_propagates() {
        let tmp = TempDir::new().unwrap();
        let facade = broken_remote_facade(&tmp);

        let product = Product::new("Spülmittel", "Flasche");
        assert!(facade.save_product(&product).await.is_err());
        assert!(facade.delete_product(&product.id).await.is_err());

        let order = Order::place(&product, None, 3).unwrap();
        assert!(facade.create_order(&order).await.is_err());
    }

    #[tokio::test]
    async fn upload_without_remote_is_a_soft_gap() {
        let tmp = TempDir::new().unwrap();
        let facade = local_facade(&tmp);

        let url = facade.upload_attachment("defect.jpg", vec![1, 2, 3]).await.unwrap();
        assert_eq!(url, None);
    }

    #[tokio::test]
    async fn local_save_is_replace_or_append() {
        let tmp = TempDir::new().unwrap();
        let facade = local_facade(&tmp);

        let mut product = Product::new("Spülmittel", "Flasche");
        facade.save_product(&product).await.unwrap();
        assert_eq!(facade.products().await.len(), 3);

        product.stock = 7;
        facade.save_product(&product).await.unwrap();
        let products = facade.products().await;
        assert_eq!(products.len(), 3, "second save replaced, did not append");
        let saved = products.iter().find(|p| p.id == product.id).unwrap();
        assert_eq!(saved.stock, 7);
    }

    #[tokio::test]
    async fn products_come_back_ordered_by_name() {
        let tmp = TempDir::new().unwrap();
        let facade = local_facade(&tmp);

        facade.save_product(&Product::new("Zitronen", "kg")).await.unwrap();
        facade.save_product(&Product::new("Apfelsaft", "Kasten")).await.unwrap();

        let names: Vec<_> = facade.products().await.into_iter().map(|p| p.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let facade = local_facade(&tmp);

        facade.delete_product("does-not-exist").await.unwrap();
        facade.delete_order("also-missing").await.unwrap();
    }

    #[tokio::test]
    async fn invalid_supplier_is_rejected_before_persistence() {
        let tmp = TempDir::new().unwrap();
        let facade = local_facade(&tmp);

        let supplier = Supplier::new("Getränke Müller", "");
        assert!(facade.save_supplier(&supplier).await.is_err());
        assert!(facade.suppliers().await.is_empty());
    }

    #[tokio::test]
    async fn fresh_order_flows_through_lifecycle() {
        let tmp = TempDir::new().unwrap();
        let facade = local_facade(&tmp);

        let product = Product::new("Kaffee Bohnen", "kg");
        let order = Order::place(&product, None, 10).unwrap();
        assert_eq!(order.status, OrderStatus::Open);
        assert!(order.received_at.is_none());

        facade.create_order(&order).await.unwrap();
        let orders = facade.orders().await;
        let mut created = orders.iter().find(|o| o.id == order.id).unwrap().clone();

        // Zero days old, no delivery date: default tier.
        let now = chrono::Utc::now();
        assert_eq!(engine::priority_tier(&created, now), 3);

        created.mark_received();
        facade.update_order(&created).await.unwrap();

        let received = engine::received_orders(&facade.orders().await, 1);
        assert_eq!(received.first().map(|o| o.id.as_str()), Some(order.id.as_str()));
        assert!(received[0].received_at.unwrap() <= chrono::Utc::now());
    }
}
