use crate::domain::model::{Order, OrderStore, TimestampFormat};
use crate::utils::error::Result;

/// Byte-level access to the input, output and log files.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Creates or truncates `path`.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Creates `path` if needed and appends to its end.
    fn append_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn log_path(&self) -> &str;
    fn window_minutes(&self) -> u32;
    fn timestamp_format(&self) -> &TimestampFormat;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Extracted>;
    fn transform(&self, orders: &OrderStore) -> Vec<Order>;
    fn load(&self, orders: &[Order]) -> Result<usize>;
}

/// What `Pipeline::extract` produced: the accepted orders and how many lines
/// were skipped.
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    pub store: OrderStore,
    pub rejected: usize,
}
