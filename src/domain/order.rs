//! Order record and lifecycle
//!
//! Two small state machines live on an order and are deliberately
//! orthogonal: the open/received status and the defect sub-state. Status
//! transitions never touch the defect flags.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Product, Supplier};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Open,
    Received,
}

/// A placed order. Product and supplier details are snapshotted at
/// creation time so the order survives deletion of either record.
///
/// Invariant: `received_at` is set exactly while `status == Received`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub id: String,
    pub date: DateTime<Utc>,
    pub product_name: String,
    pub quantity: u32,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    pub has_defect: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_reported_at: Option<DateTime<Utc>>,
    pub defect_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            id: String::new(),
            date: Utc::now(),
            product_name: String::new(),
            quantity: 1,
            status: OrderStatus::Open,
            product_image: None,
            has_defect: false,
            defect_notes: None,
            defect_reported_at: None,
            defect_resolved: false,
            expected_delivery_date: None,
            supplier_name: None,
            supplier_email: None,
            supplier_phone: None,
            order_number: None,
            price: None,
            received_at: None,
            notes: None,
        }
    }
}

impl Order {
    /// Places a new open order for a product, snapshotting everything the
    /// order needs from the product and (if linked) the supplier.
    pub fn place(product: &Product, supplier: Option<&Supplier>, quantity: u32) -> Result<Self> {
        if quantity < 1 {
            return Err(Error::Validation("order quantity must be at least 1".into()));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            product_name: product.name.clone(),
            quantity,
            product_image: product.image.clone(),
            supplier_name: supplier.map(|s| s.name.clone()),
            supplier_email: supplier
                .map(|s| s.email.clone())
                .or_else(|| product.email_order_address.clone()),
            supplier_phone: supplier
                .and_then(|s| s.phone.clone())
                .or_else(|| product.supplier_phone.clone()),
            ..Self::default()
        })
    }

    pub fn mark_received(&mut self) {
        self.status = OrderStatus::Received;
        self.received_at = Some(Utc::now());
    }

    /// Reverts a received order back to open, clearing the receipt
    /// timestamp. The defect sub-state is left untouched.
    pub fn reopen(&mut self) {
        self.status = OrderStatus::Open;
        self.received_at = None;
    }

    /// Reports a defect on this order. Notes are mandatory.
    pub fn report_defect(&mut self, notes: impl Into<String>) -> Result<()> {
        let notes = notes.into();
        if notes.trim().is_empty() {
            return Err(Error::Validation("defect notes must not be empty".into()));
        }
        self.has_defect = true;
        self.defect_notes = Some(notes);
        self.defect_reported_at = Some(Utc::now());
        self.defect_resolved = false;
        Ok(())
    }

    /// Acknowledges a reported defect as resolved. Resolving when no
    /// defect was ever reported is a harmless no-op, so the flag stays
    /// meaningful only under `has_defect`.
    pub fn resolve_defect(&mut self) {
        if self.has_defect {
            self.defect_resolved = true;
        }
    }

    /// Expected delivery is a free annotation; pass `None` to clear it.
    pub fn set_expected_delivery(&mut self, date: Option<DateTime<Utc>>) {
        self.expected_delivery_date = date;
    }

    pub fn has_unresolved_defect(&self) -> bool {
        self.has_defect && !self.defect_resolved
    }
}
