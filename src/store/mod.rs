//! Local Store
//!
//! Durable key-value persistence on the client device: each fixed key
//! holds one JSON-serialized collection (or the settings record) as a
//! whole. There is no partial-update primitive — callers read, modify and
//! rewrite the entire collection.
//!
//! Reads never fail: a missing products/orders key seeds a fixed demo
//! dataset, a missing suppliers key seeds an empty list and corrupt data
//! is treated the same as missing data.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use crate::domain::{Order, Product, Settings, Supplier};
use crate::Result;

const KEY_PRODUCTS: &str = "bestand_products";
const KEY_ORDERS: &str = "bestand_orders";
const KEY_SUPPLIERS: &str = "bestand_suppliers";
const KEY_SETTINGS: &str = "bestand_settings";

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "Mineralwasser Still".into(),
            category: Some("Getränke".into()),
            stock: 45,
            min_stock: Some(20),
            unit: "Kasten".into(),
            order_url: Some("https://example.com/water".into()),
            ..Product::default()
        },
        Product {
            id: "2".into(),
            name: "Toilettenpapier".into(),
            category: Some("Reinigung".into()),
            stock: 120,
            min_stock: Some(50),
            unit: "Rollen".into(),
            order_url: Some("https://example.com/paper".into()),
            ..Product::default()
        },
    ]
}

fn seed_orders() -> Vec<Order> {
    let received = Utc::now() - Duration::days(2);
    vec![
        Order {
            id: "101".into(),
            date: received,
            product_name: "Mineralwasser Still".into(),
            quantity: 10,
            status: crate::OrderStatus::Received,
            received_at: Some(received),
            ..Order::default()
        },
        Order {
            id: "102".into(),
            date: Utc::now(),
            product_name: "Toilettenpapier".into(),
            quantity: 5,
            ..Order::default()
        },
    ]
}

/// File-backed key-value store: one `<key>.json` file per fixed key under
/// a data directory.
#[derive(Clone, Debug)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Returns `None` for a missing or undecodable file.
    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = fs::read(self.path(key)).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, %err, "discarding corrupt local data");
                None
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(self.path(key), bytes).await?;
        Ok(())
    }

    /// Seeds and returns the fallback when the key is absent; the getter
    /// itself never fails even if the seed cannot be written back.
    async fn read_or_seed<T>(&self, key: &str, seed: impl FnOnce() -> Vec<T>) -> Vec<T>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(stored) = self.read(key).await {
            return stored;
        }
        let seeded = seed();
        if let Err(err) = self.write(key, &seeded).await {
            tracing::warn!(key, %err, "failed to persist seed data");
        }
        seeded
    }

    pub async fn products(&self) -> Vec<Product> {
        self.read_or_seed(KEY_PRODUCTS, seed_products).await
    }

    pub async fn save_products(&self, products: &[Product]) -> Result<()> {
        self.write(KEY_PRODUCTS, products).await
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.read_or_seed(KEY_ORDERS, seed_orders).await
    }

    pub async fn save_orders(&self, orders: &[Order]) -> Result<()> {
        self.write(KEY_ORDERS, orders).await
    }

    pub async fn suppliers(&self) -> Vec<Supplier> {
        self.read_or_seed(KEY_SUPPLIERS, Vec::new).await
    }

    pub async fn save_suppliers(&self, suppliers: &[Supplier]) -> Result<()> {
        self.write(KEY_SUPPLIERS, suppliers).await
    }

    /// Missing settings come back with empty credential fields, never as
    /// an absent record.
    pub async fn settings(&self) -> Settings {
        self.read(KEY_SETTINGS).await.unwrap_or_default()
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write(KEY_SETTINGS, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn first_access_seeds_demo_data() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let products = store.products().await;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Mineralwasser Still");

        // Seed was persisted, not just returned.
        let again = store.products().await;
        assert_eq!(again, products);

        let orders = store.orders().await;
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().any(|o| o.status == crate::OrderStatus::Received));

        assert!(store.suppliers().await.is_empty());
    }

    #[tokio::test]
    async fn save_replaces_whole_collection() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let mut products = store.products().await;
        products.truncate(1);
        store.save_products(&products).await.unwrap();

        assert_eq!(store.products().await.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_file_is_reseeded() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        fs::create_dir_all(tmp.path()).await.unwrap();
        fs::write(store.path(KEY_PRODUCTS), b"{ not json")
            .await
            .unwrap();

        let products = store.products().await;
        assert_eq!(products.len(), 2);
    }

    #[tokio::test]
    async fn missing_settings_are_empty_not_absent() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let settings = store.settings().await;
        assert_eq!(settings.service_id, "");
        assert!(settings.enable_stock_management);

        let mut updated = settings;
        updated.supabase_url = "https://project.supabase.co".into();
        store.save_settings(&updated).await.unwrap();
        assert_eq!(store.settings().await, updated);
    }
}
