pub mod etl;
pub mod filter;
pub mod parser;
pub mod writer;

pub use crate::domain::model::{FilterCriteria, Order, OrderStore, RunSummary, TimestampFormat};
pub use crate::domain::ports::{ConfigProvider, Extracted, Pipeline, Storage};
pub use crate::utils::error::Result;
