pub mod flow_config;

pub use flow_config::FlowConfig;
