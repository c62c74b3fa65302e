pub mod builder;
pub mod rest_client;

pub use builder::ExporterClientBuilder;
pub use rest_client::{ExporterClient, RestExporterClient};
