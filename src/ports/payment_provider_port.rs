use crate::domain::entities::{CaptureResult, Payer, SubscriptionResult};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::ProviderOrderId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Data the provider hands to the approval callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    #[serde(rename = "orderID")]
    pub order_id: ProviderOrderId,

    #[serde(rename = "subscriptionID", default)]
    pub subscription_id: Option<String>,
}

impl Approval {
    pub fn order(order_id: ProviderOrderId) -> Self {
        Self {
            order_id,
            subscription_id: None,
        }
    }

    pub fn subscription(order_id: ProviderOrderId, subscription_id: impl Into<String>) -> Self {
        Self {
            order_id,
            subscription_id: Some(subscription_id.into()),
        }
    }
}

/// Subscription creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub plan_id: String,
    pub application_context: ApplicationContext,
}

impl SubscriptionRequest {
    /// Request for `plan_id` with the fixed donation application context
    pub fn for_plan(plan_id: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            application_context: ApplicationContext::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationContext {
    pub locale: String,
    pub shipping_preference: ShippingPreference,
    pub user_action: UserAction,
    pub payment_method: PaymentMethodPreference,
}

impl Default for ApplicationContext {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            shipping_preference: ShippingPreference::NoShipping,
            user_action: UserAction::SubscribeNow,
            payment_method: PaymentMethodPreference {
                payer_selected: "PAYPAL".to_string(),
                payee_preferred: PayeePreference::ImmediatePaymentRequired,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingPreference {
    NoShipping,
    GetFromFile,
    SetProvidedAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    SubscribeNow,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodPreference {
    pub payer_selected: String,
    pub payee_preferred: PayeePreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayeePreference {
    Unrestricted,
    ImmediatePaymentRequired,
}

/// Provider amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    #[serde(default)]
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub surname: String,
}

/// Payer block of an order capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayer {
    pub payer_id: String,
    #[serde(default)]
    pub email_address: String,
    pub name: Name,
}

impl From<OrderPayer> for Payer {
    fn from(p: OrderPayer) -> Self {
        Payer {
            payer_id: p.payer_id,
            email: p.email_address,
            given_name: p.name.given_name,
            surname: p.name.surname,
        }
    }
}

/// Order capture response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCapture {
    pub id: String,
    #[serde(default)]
    pub status: String,
    pub payer: OrderPayer,
    #[serde(default)]
    pub purchase_units: Vec<CapturePurchaseUnit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturePurchaseUnit {
    pub amount: Amount,
    #[serde(default)]
    pub payments: Option<CapturePayments>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturePayments {
    #[serde(default)]
    pub captures: Vec<Capture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub id: String,
    #[serde(default)]
    pub status: String,
}

impl OrderCapture {
    /// Normalize into a capture result for `order_id`
    pub fn into_result(self, order_id: ProviderOrderId) -> DomainResult<CaptureResult> {
        let unit = self.purchase_units.into_iter().next().ok_or_else(|| {
            DomainError::Provider(format!("capture {} has no purchase units", self.id))
        })?;

        let capture_id = unit
            .payments
            .and_then(|p| p.captures.into_iter().next())
            .map(|c| c.id)
            .unwrap_or(self.id);

        Ok(CaptureResult {
            order_id,
            capture_id,
            amount: unit.amount.value,
            payer: self.payer.into(),
        })
    }
}

/// Subscription details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    pub id: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub status: String,
    pub subscriber: Subscriber,
    pub billing_info: BillingInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub payer_id: String,
    #[serde(default)]
    pub email_address: String,
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingInfo {
    pub last_payment: Option<LastPayment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPayment {
    pub amount: Amount,
}

impl TryFrom<SubscriptionSnapshot> for SubscriptionResult {
    type Error = DomainError;

    fn try_from(s: SubscriptionSnapshot) -> DomainResult<Self> {
        let amount = s
            .billing_info
            .last_payment
            .map(|p| p.amount.value)
            .ok_or_else(|| {
                DomainError::Provider(format!("subscription {} has no last payment", s.id))
            })?;

        Ok(SubscriptionResult {
            subscription_id: s.id,
            amount,
            subscriber: Payer {
                payer_id: s.subscriber.payer_id,
                email: s.subscriber.email_address,
                given_name: s.subscriber.name.given_name,
                surname: s.subscriber.name.surname,
            },
        })
    }
}

/// Payment provider port
#[async_trait]
pub trait PaymentProviderPort: Send + Sync {
    /// Create a subscription for the payer
    async fn create_subscription(&self, request: SubscriptionRequest)
        -> DomainResult<ProviderOrderId>;

    /// Capture an approved order
    async fn capture_order(&self, order_id: &ProviderOrderId) -> DomainResult<OrderCapture>;

    /// Read the subscription named by the approval's `subscriptionID`
    async fn get_subscription(&self, approval: &Approval) -> DomainResult<SubscriptionSnapshot>;
}
