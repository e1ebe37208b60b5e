pub mod donation_server_port;
pub mod page_port;
pub mod payment_provider_port;

pub use donation_server_port::DonationServerPort;
pub use page_port::{PageConfigSource, PagePort, PopupHandle};
pub use payment_provider_port::PaymentProviderPort;
