pub mod delivery_pipeline;

pub use delivery_pipeline::DeliveryPipeline;
