use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One delivery request.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub weight: f64,
    pub district: String,
    pub delivered_at: NaiveDateTime,
}

/// Append-only, insertion-ordered collection of loaded orders.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }
}

impl FromIterator<Order> for OrderStore {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        Self {
            orders: iter.into_iter().collect(),
        }
    }
}

/// District and window start chosen for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub district: String,
    pub start: NaiveDateTime,
}

/// strftime pattern shared by the parser, the writer, the prompts and the
/// activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampFormat(String);

impl TimestampFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// The pattern has only valid items and can read back a value it wrote,
    /// so date-only or offset patterns are refused.
    pub fn is_well_formed(&self) -> bool {
        if self.0.is_empty() || StrftimeItems::new(&self.0).any(|item| matches!(item, Item::Error))
        {
            return false;
        }
        let sample = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|date| date.and_hms_opt(3, 4, 5))
            .unwrap_or(NaiveDateTime::MIN);
        self.parse_exact(&self.format(&sample)).is_some()
    }

    pub fn format(&self, value: &NaiveDateTime) -> String {
        let mut out = String::new();
        // A malformed pattern makes chrono's Display fail instead of panicking here.
        if write!(out, "{}", value.format(&self.0)).is_err() {
            return value.format(DEFAULT_TIMESTAMP_FORMAT).to_string();
        }
        out
    }

    /// Parses `text` only when it is exactly what `format` would produce for
    /// the parsed value; single-digit months and similar shortcuts fail.
    pub fn parse_exact(&self, text: &str) -> Option<NaiveDateTime> {
        let parsed = NaiveDateTime::parse_from_str(text, &self.0).ok()?;
        // chrono reads second 60 as a leap second.
        if parsed.nanosecond() >= 1_000_000_000 {
            return None;
        }
        (self.format(&parsed) == text).then_some(parsed)
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FORMAT)
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub rejected: usize,
    pub matched: usize,
    /// `None` when the output file could not be written.
    pub written: Option<usize>,
}
