pub mod entities;
pub mod errors;
pub mod validation;
pub mod value_objects;

pub use entities::{CaptureResult, CompletionOutcome, DonationIntent, Payer, SubscriptionResult};
pub use errors::{DomainError, DomainResult};
pub use validation::{FieldErrors, InlineErrors};
pub use value_objects::{DonationKind, FlowState, Money, ProviderOrderId};
