pub mod adapters;
pub mod config;

pub use adapters::{EmbeddedPageConfig, HttpDonationServer};
pub use config::FlowConfig;
