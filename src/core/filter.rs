use crate::domain::model::{Order, OrderStore};
use chrono::{Duration, NaiveDateTime};

pub const DEFAULT_WINDOW_MINUTES: u32 = 30;

/// Delivery window; both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DeliveryWindow {
    pub fn starting_at(start: NaiveDateTime, minutes: u32) -> Self {
        let end = start
            .checked_add_signed(Duration::minutes(i64::from(minutes)))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        *at >= self.start && *at <= self.end
    }
}

pub fn district_matches(district: &str, target: &str) -> bool {
    district
        .chars()
        .flat_map(char::to_lowercase)
        .eq(target.chars().flat_map(char::to_lowercase))
}

/// Orders of `district` inside `window`, in store order.
pub fn filter_orders(store: &OrderStore, district: &str, window: &DeliveryWindow) -> Vec<Order> {
    store
        .iter()
        .filter(|order| {
            district_matches(&order.district, district) && window.contains(&order.delivered_at)
        })
        .cloned()
        .collect()
}
