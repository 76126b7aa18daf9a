//! Order prioritization
//!
//! Ranks the open-orders view by urgency. The ranking is a view computed
//! from wall-clock time on every read, never persisted, so it reflects the
//! passage of time without any background job.
//!
//! Tiers, most urgent first:
//! 1. unresolved defect, or more than 14 days old
//! 2. more than 7 days old
//! 3. everything else
//! 4. delivery expected more than 5 days out
//!
//! Within tier 4 orders sort by expected delivery (earliest first); within
//! all other tiers by order date (oldest first). The order id is the final
//! tie-break, making the ranking a total order.

use chrono::{DateTime, Utc};

use crate::domain::{Order, OrderStatus};

/// "Load more" increment for the received-orders list.
pub const RECEIVED_PAGE_SIZE: usize = 10;

pub fn days_since_order(order: &Order, now: DateTime<Utc>) -> i64 {
    (now - order.date).num_days()
}

pub fn days_until_delivery(order: &Order, now: DateTime<Utc>) -> Option<i64> {
    order.expected_delivery_date.map(|d| (d - now).num_days())
}

/// Priority bucket 1–4 for an open order at the given instant.
pub fn priority_tier(order: &Order, now: DateTime<Utc>) -> u8 {
    let age = days_since_order(order, now);
    if order.has_unresolved_defect() || age > 14 {
        1
    } else if age > 7 {
        2
    } else if days_until_delivery(order, now).is_some_and(|d| d > 5) {
        4
    } else {
        3
    }
}

/// The open-orders view: filtered to open orders and sorted by urgency.
pub fn ranked_open_orders(orders: &[Order], now: DateTime<Utc>) -> Vec<Order> {
    let mut open: Vec<Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Open)
        .cloned()
        .collect();
    open.sort_by(|a, b| {
        let (tier_a, tier_b) = (priority_tier(a, now), priority_tier(b, now));
        tier_a
            .cmp(&tier_b)
            .then_with(|| within_tier_key(a, tier_a).cmp(&within_tier_key(b, tier_b)))
            .then_with(|| a.id.cmp(&b.id))
    });
    open
}

fn within_tier_key(order: &Order, tier: u8) -> DateTime<Utc> {
    if tier == 4 {
        // Tier 4 implies a delivery date; the fallback keeps the key total.
        order.expected_delivery_date.unwrap_or(order.date)
    } else {
        order.date
    }
}

/// The received-orders view: reverse-chronological by receipt time
/// (falling back to the order date), truncated to `pages` load-more
/// increments of [`RECEIVED_PAGE_SIZE`].
pub fn received_orders(orders: &[Order], pages: usize) -> Vec<Order> {
    let mut received: Vec<Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Received)
        .cloned()
        .collect();
    received.sort_by(|a, b| {
        let key = |o: &Order| o.received_at.unwrap_or(o.date);
        key(b).cmp(&key(a))
    });
    received.truncate(pages.max(1) * RECEIVED_PAGE_SIZE);
    received
}
