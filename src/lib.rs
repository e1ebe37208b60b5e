//! Client-side orchestration of PayPal-style donations: one-time captures and
//! recurring subscriptions, confirmed against the origin server.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::PaymentFlow;
pub use domain::{CompletionOutcome, DomainError, DomainResult, DonationIntent, DonationKind};
