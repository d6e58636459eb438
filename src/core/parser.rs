use crate::domain::model::{Order, OrderStore, TimestampFormat};
use std::fmt;
use thiserror::Error;

pub const FIELD_COUNT: usize = 4;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("invalid line format: expected 4 fields, found {found}")]
    FieldCount { found: usize },

    #[error("weight has invalid format: '{value}'")]
    Weight { value: String },

    #[error("date and time have invalid format: '{value}'")]
    Timestamp { value: String },
}

/// A skipped input line.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub line_number: usize,
    pub line: String,
    pub error: LineError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in line {}: {}", self.error, self.line_number, self.line)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedOrders {
    pub store: OrderStore,
    pub rejections: Vec<Rejection>,
}

/// Splits one line on commas. Double-quoted fields may contain commas; an
/// unquoted embedded comma simply produces an extra field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        // Blank line, or bytes csv refuses: fall back to a plain split so the
        // caller still sees a field count.
        Ok(false) => vec![String::new()],
        Err(_) => line.split(',').map(str::to_string).collect(),
    }
}

pub fn parse_line(line: &str, format: &TimestampFormat) -> Result<Order, LineError> {
    let fields = split_fields(line);
    if fields.len() != FIELD_COUNT {
        return Err(LineError::FieldCount {
            found: fields.len(),
        });
    }

    let weight = match fields[1].trim().parse::<f64>() {
        Ok(weight) if weight.is_finite() => weight,
        _ => {
            return Err(LineError::Weight {
                value: fields[1].clone(),
            })
        }
    };

    let delivered_at = format
        .parse_exact(fields[3].trim())
        .ok_or_else(|| LineError::Timestamp {
            value: fields[3].clone(),
        })?;

    Ok(Order {
        id: fields[0].trim().to_string(),
        weight,
        district: fields[2].trim().to_string(),
        delivered_at,
    })
}

/// Runs every line of `content` through [`parse_line`], keeping accepted
/// orders in file order.
pub fn parse_orders(content: &str, format: &TimestampFormat) -> ParsedOrders {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut parsed = ParsedOrders::default();

    for (index, line) in content.lines().enumerate() {
        match parse_line(line, format) {
            Ok(order) => parsed.store.push(order),
            Err(error) => parsed.rejections.push(Rejection {
                line_number: index + 1,
                line: line.to_string(),
                error,
            }),
        }
    }

    parsed
}
