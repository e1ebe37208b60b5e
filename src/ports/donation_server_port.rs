use crate::domain::errors::DomainResult;
use crate::domain::validation::FieldErrors;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// `POST /donation/once/initiate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiateOnceForm {
    pub fund_id: String,
    pub amount_cents: i64,
}

/// Initiate response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiateResponse {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// `POST /donation/once/complete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteOnceForm {
    pub order_id: String,
    /// Capture amount as the provider wrote it
    pub amount: String,
    pub payer_email: String,
    pub payer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub fund_id: String,
    /// Provider capture id
    pub payment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bco_name: Option<String>,
}

/// `POST /donation/plan/complete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletePlanForm {
    pub order_id: String,
    pub provider_plan_id: String,
    pub provider_donation_id: String,
    pub subscription_id: String,
    pub plan_id: String,
    /// Last billed amount as the provider wrote it
    pub amount: String,
    pub email: String,
    pub payer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub fund_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bco_name: Option<String>,
}

/// `POST /error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReportForm {
    pub error: String,
}

/// Raw reply of a completion endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    pub status: u16,
    pub body: String,
}

impl ServerReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Field errors carried by a 422 reply
    pub fn field_errors(&self) -> Option<FieldErrors> {
        if self.status != 422 {
            return None;
        }
        FieldErrors::parse(&self.body)
    }
}

/// Origin server port
#[async_trait]
pub trait DonationServerPort: Send + Sync {
    /// Ask the origin to create a provider order; non-2xx is an error
    async fn initiate_once(&self, form: &InitiateOnceForm) -> DomainResult<InitiateResponse>;

    /// Confirm a captured one-time donation
    async fn complete_once(&self, form: &CompleteOnceForm) -> DomainResult<ServerReply>;

    /// Confirm an approved subscription
    async fn complete_plan(&self, form: &CompletePlanForm) -> DomainResult<ServerReply>;

    /// Send an error to the origin and get back the fragment to display
    async fn report_error(&self, error: &str) -> DomainResult<String>;
}
