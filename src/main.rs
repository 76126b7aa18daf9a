//! Bestand CLI - inventory and reordering from the terminal

use anyhow::{anyhow, Result};
use bestand::{engine, migrate, DataFacade, LocalStore, RemoteBackend};
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = std::env::var("BESTAND_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let local = LocalStore::new(&data_dir);
    let settings = local.settings().await;
    let facade = DataFacade::from_settings(&settings, local.clone());

    match std::env::args().nth(1).as_deref() {
        Some("products") => {
            for product in facade.products().await {
                let marker = if product.is_low_stock() { " !! nachbestellen" } else { "" };
                println!(
                    "{:<30} {:>6} {:<10} (min {}){}",
                    product.name,
                    product.stock,
                    product.unit,
                    product.min_stock.unwrap_or(0),
                    marker
                );
            }
        }
        Some("orders") => {
            let orders = facade.orders().await;
            let now = Utc::now();

            println!("Offene Bestellungen:");
            for order in engine::ranked_open_orders(&orders, now) {
                println!(
                    "  [T{}] {:<30} x{:<4} bestellt {}",
                    engine::priority_tier(&order, now),
                    order.product_name,
                    order.quantity,
                    order.date.format("%Y-%m-%d")
                );
            }

            println!("Erledigte Bestellungen:");
            for order in engine::received_orders(&orders, 1) {
                let received = order.received_at.unwrap_or(order.date);
                println!(
                    "  {:<30} x{:<4} erhalten {}",
                    order.product_name,
                    order.quantity,
                    received.format("%Y-%m-%d")
                );
            }
        }
        Some("migrate") => {
            let remote = RemoteBackend::from_settings(&settings)
                .ok_or_else(|| anyhow!("remote backend is not configured, set it in settings first"))?;
            let report = migrate::migrate(&local, &remote).await?;
            println!(
                "Migrated {} suppliers, {} products, {} orders to {}",
                report.suppliers,
                report.products,
                report.orders,
                remote.base_url()
            );
        }
        _ => {
            eprintln!("usage: bestand <products|orders|migrate>");
            eprintln!("  data directory: BESTAND_DATA_DIR (default ./data)");
        }
    }

    Ok(())
}
