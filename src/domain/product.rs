//! Product record

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// How an order for this product is preferably placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMethod {
    Email,
    Link,
}

/// A stock item. The `email_order_*` and `supplier_phone` fields are
/// legacy per-product contacts, kept for products created before suppliers
/// existed as their own records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<u32>,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_order_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_order_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_order_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_order_method: Option<OrderMethod>,
    pub auto_order: bool,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            category: None,
            stock: 0,
            min_stock: None,
            unit: String::new(),
            price: None,
            supplier_id: None,
            email_order_address: None,
            email_order_subject: None,
            email_order_body: None,
            supplier_phone: None,
            order_url: None,
            image: None,
            notes: None,
            preferred_order_method: None,
            auto_order: false,
        }
    }
}

impl Product {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            unit: unit.into(),
            ..Self::default()
        }
    }

    /// A product is low on stock once it has dropped to its reorder
    /// threshold. A missing threshold counts as zero.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock.unwrap_or(0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("product name must not be empty".into()));
        }
        Ok(())
    }
}
