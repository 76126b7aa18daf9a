//! Remote row shapes
//!
//! Stateless, bidirectional translation between the domain model and the
//! normalized snake_case rows of the remote backend. Absent optional
//! fields are omitted from outbound rows entirely instead of being written
//! as null, so server-side defaults are never overwritten.
//!
//! `id` is optional on the wire: the migration drops non-portable local
//! ids so the backend can assign fresh ones.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Order, OrderMethod, OrderStatus, Product, Supplier};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
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

impl From<Product> for ProductRow {
    fn from(p: Product) -> Self {
        Self {
            id: Some(p.id),
            name: p.name,
            category: p.category,
            stock: p.stock,
            min_stock: p.min_stock,
            unit: p.unit,
            price: p.price,
            supplier_id: p.supplier_id,
            email_order_address: p.email_order_address,
            email_order_subject: p.email_order_subject,
            email_order_body: p.email_order_body,
            supplier_phone: p.supplier_phone,
            order_url: p.order_url,
            image: p.image,
            notes: p.notes,
            preferred_order_method: p.preferred_order_method,
            auto_order: p.auto_order,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            id: r.id.unwrap_or_default(),
            name: r.name,
            category: r.category,
            stock: r.stock,
            min_stock: r.min_stock,
            unit: r.unit,
            price: r.price,
            supplier_id: r.supplier_id,
            email_order_address: r.email_order_address,
            email_order_subject: r.email_order_subject,
            email_order_body: r.email_order_body,
            supplier_phone: r.supplier_phone,
            order_url: r.order_url,
            image: r.image,
            notes: r.notes,
            preferred_order_method: r.preferred_order_method,
            auto_order: r.auto_order,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
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

impl Default for OrderRow {
    fn default() -> Self {
        Order::default().into()
    }
}

impl From<Order> for OrderRow {
    fn from(o: Order) -> Self {
        Self {
            id: Some(o.id),
            date: o.date,
            product_name: o.product_name,
            quantity: o.quantity,
            status: o.status,
            product_image: o.product_image,
            has_defect: o.has_defect,
            defect_notes: o.defect_notes,
            defect_reported_at: o.defect_reported_at,
            defect_resolved: o.defect_resolved,
            expected_delivery_date: o.expected_delivery_date,
            supplier_name: o.supplier_name,
            supplier_email: o.supplier_email,
            supplier_phone: o.supplier_phone,
            order_number: o.order_number,
            price: o.price,
            received_at: o.received_at,
            notes: o.notes,
        }
    }
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        Self {
            id: r.id.unwrap_or_default(),
            date: r.date,
            product_name: r.product_name,
            quantity: r.quantity,
            status: r.status,
            product_image: r.product_image,
            has_defect: r.has_defect,
            defect_notes: r.defect_notes,
            defect_reported_at: r.defect_reported_at,
            defect_resolved: r.defect_resolved,
            expected_delivery_date: r.expected_delivery_date,
            supplier_name: r.supplier_name,
            supplier_email: r.supplier_email,
            supplier_phone: r.supplier_phone,
            order_number: r.order_number,
            price: r.price,
            received_at: r.received_at,
            notes: r.notes,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_body_template: Option<String>,
}

impl From<Supplier> for SupplierRow {
    fn from(s: Supplier) -> Self {
        Self {
            id: Some(s.id),
            name: s.name,
            contact_name: s.contact_name,
            email: s.email,
            phone: s.phone,
            url: s.url,
            notes: s.notes,
            email_subject_template: s.email_subject_template,
            email_body_template: s.email_body_template,
        }
    }
}

impl From<SupplierRow> for Supplier {
    fn from(r: SupplierRow) -> Self {
        Self {
            id: r.id.unwrap_or_default(),
            name: r.name,
            contact_name: r.contact_name,
            email: r.email,
            phone: r.phone,
            url: r.url,
            notes: r.notes,
            email_subject_template: r.email_subject_template,
            email_body_template: r.email_body_template,
        }
    }
}
