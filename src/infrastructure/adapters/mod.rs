pub mod embedded_page_config;
pub mod http_donation_server;

pub use embedded_page_config::EmbeddedPageConfig;
pub use http_donation_server::HttpDonationServer;
