use crate::domain::model::{Order, TimestampFormat};
use crate::domain::ports::Storage;
use crate::utils::error::{DeliveryError, Result};
use crate::utils::logger::ActivityLog;

/// `id,weight,district,timestamp`, without the line terminator. Fields are
/// quoted only when they contain a comma, a quote or a line break.
pub fn format_order(order: &Order, format: &TimestampFormat) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let weight = order.weight.to_string();
    let delivered_at = format.format(&order.delivered_at);
    wtr.write_record([
        order.id.as_str(),
        weight.as_str(),
        order.district.as_str(),
        delivered_at.as_str(),
    ])?;

    let bytes = wtr.into_inner().map_err(|e| DeliveryError::ProcessingError {
        message: format!("Could not flush record {}: {}", order.id, e),
    })?;
    let mut line = String::from_utf8(bytes).map_err(|e| DeliveryError::ProcessingError {
        message: format!("Record {} is not valid UTF-8: {}", order.id, e),
    })?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Replaces the output file with `orders`, one per line, and journals each
/// written line. Returns how many records were written.
pub fn write_orders<S: Storage, L: Storage>(
    storage: &S,
    path: &str,
    orders: &[Order],
    format: &TimestampFormat,
    journal: &ActivityLog<L>,
) -> Result<usize> {
    let lines = orders
        .iter()
        .map(|order| format_order(order, format))
        .collect::<Result<Vec<_>>>()?;

    let mut content = String::new();
    for line in &lines {
        content.push_str(line);
        content.push('\n');
    }

    tracing::debug!("Writing {} records ({} bytes) to {}", lines.len(), content.len(), path);
    storage.write_file(path, content.as_bytes())?;

    for line in &lines {
        journal.log(format!("written to output: {}", line));
    }

    Ok(lines.len())
}
