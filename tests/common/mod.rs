#![allow(dead_code)]

use async_trait::async_trait;
use donation_flow::domain::{DomainError, DomainResult, ProviderOrderId};
use donation_flow::infrastructure::FlowConfig;
use donation_flow::ports::donation_server_port::*;
use donation_flow::ports::payment_provider_port::*;
use donation_flow::ports::{DonationServerPort, PagePort, PaymentProviderPort};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Calls received by the fake origin
#[derive(Debug, Clone, PartialEq)]
pub enum ServerCall {
    Initiate(InitiateOnceForm),
    CompleteOnce(CompleteOnceForm),
    CompletePlan(CompletePlanForm),
    ReportError(String),
}

pub struct FakeServer {
    /// `None` makes initiate answer 500
    pub order_id: Option<String>,
    pub completion: ServerReply,
    /// Completion requests fail before any status arrives
    pub completion_unreachable: bool,
    /// `None` makes the error report itself fail
    pub error_fragment: Option<String>,
    pub calls: Mutex<Vec<ServerCall>>,
}

impl FakeServer {
    pub fn issuing(order_id: &str) -> Self {
        Self {
            order_id: Some(order_id.to_string()),
            completion: ServerReply::new(200, ""),
            completion_unreachable: false,
            error_fragment: Some("<div class=\"error\">failed</div>".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn completing_with(mut self, reply: ServerReply) -> Self {
        self.completion = reply;
        self
    }

    pub fn unreachable_on_completion(mut self) -> Self {
        self.completion_unreachable = true;
        self
    }

    pub fn failing_error_reports(mut self) -> Self {
        self.error_fragment = None;
        self
    }

    pub fn rejecting_initiate() -> Self {
        Self {
            order_id: None,
            ..Self::issuing("unused")
        }
    }

    pub fn calls(&self) -> Vec<ServerCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ServerCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn completion_reply(&self) -> DomainResult<ServerReply> {
        if self.completion_unreachable {
            return Err(transport_error());
        }
        Ok(self.completion.clone())
    }
}

/// A transport-level failure with no HTTP status
pub fn transport_error() -> DomainError {
    let err = reqwest::Client::new()
        .post("http://[::1")
        .build()
        .unwrap_err();
    DomainError::Http(err)
}

#[async_trait]
impl DonationServerPort for FakeServer {
    async fn initiate_once(&self, form: &InitiateOnceForm) -> DomainResult<InitiateResponse> {
        self.record(ServerCall::Initiate(form.clone()));
        match &self.order_id {
            Some(id) => Ok(InitiateResponse {
                order_id: id.clone(),
            }),
            None => Err(DomainError::ServerRejection {
                status: 500,
                body: "initiate failed".to_string(),
            }),
        }
    }

    async fn complete_once(&self, form: &CompleteOnceForm) -> DomainResult<ServerReply> {
        self.record(ServerCall::CompleteOnce(form.clone()));
        self.completion_reply()
    }

    async fn complete_plan(&self, form: &CompletePlanForm) -> DomainResult<ServerReply> {
        self.record(ServerCall::CompletePlan(form.clone()));
        self.completion_reply()
    }

    async fn report_error(&self, error: &str) -> DomainResult<String> {
        self.record(ServerCall::ReportError(error.to_string()));
        self.error_fragment
            .clone()
            .ok_or_else(|| DomainError::ServerRejection {
                status: 503,
                body: "error service unavailable".to_string(),
            })
    }
}

pub struct FakeProvider {
    pub subscription_id: String,
    /// `None` makes capture fail
    pub capture: Option<OrderCapture>,
    pub subscription: Option<SubscriptionSnapshot>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn capturing(capture: OrderCapture) -> Self {
        Self {
            subscription_id: "I-SUB1".to_string(),
            capture: Some(capture),
            subscription: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribing(snapshot: SubscriptionSnapshot) -> Self {
        Self {
            subscription_id: snapshot.id.clone(),
            capture: None,
            subscription: Some(snapshot),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            subscription_id: "I-SUB1".to_string(),
            capture: None,
            subscription: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProviderPort for FakeProvider {
    async fn create_subscription(
        &self,
        request: SubscriptionRequest,
    ) -> DomainResult<ProviderOrderId> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create_subscription:{}", request.plan_id));
        ProviderOrderId::new(self.subscription_id.clone())
    }

    async fn capture_order(&self, order_id: &ProviderOrderId) -> DomainResult<OrderCapture> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("capture:{}", order_id));
        self.capture
            .clone()
            .ok_or_else(|| DomainError::Provider("INSTRUMENT_DECLINED".to_string()))
    }

    async fn get_subscription(&self, approval: &Approval) -> DomainResult<SubscriptionSnapshot> {
        self.calls
            .lock()
            .unwrap()
            .push(format!(
                "get_subscription:{}",
                approval.subscription_id.as_deref().unwrap_or_default()
            ));
        self.subscription
            .clone()
            .ok_or_else(|| DomainError::Provider("RESOURCE_NOT_FOUND".to_string()))
    }
}

#[derive(Default)]
pub struct FakePage {
    pub navigations: Mutex<Vec<String>>,
    pub fragments: Mutex<Vec<(String, String)>>,
}

impl FakePage {
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn fragments(&self) -> Vec<(String, String)> {
        self.fragments.lock().unwrap().clone()
    }
}

impl PagePort for FakePage {
    fn navigate(&self, target: &str) {
        self.navigations.lock().unwrap().push(target.to_string());
    }

    fn render_fragment(&self, target: &str, html: &str) {
        self.fragments
            .lock()
            .unwrap()
            .push((target.to_string(), html.to_string()));
    }
}

pub fn config() -> Arc<FlowConfig> {
    Arc::new(FlowConfig::new("http://origin.test"))
}

pub fn capture(order_id: &str, amount: &str, given_name: &str) -> OrderCapture {
    serde_json::from_value(json!({
        "id": order_id,
        "status": "COMPLETED",
        "payer": {
            "payer_id": "PAYER1",
            "email_address": "a@b.com",
            "name": { "given_name": given_name, "surname": "Lovelace" }
        },
        "purchase_units": [{
            "amount": { "currency_code": "USD", "value": amount },
            "payments": { "captures": [{ "id": "CAP1", "status": "COMPLETED" }] }
        }]
    }))
    .unwrap()
}

pub fn subscription(id: &str, amount: &str, given_name: &str) -> SubscriptionSnapshot {
    serde_json::from_value(json!({
        "id": id,
        "plan_id": "P-123",
        "status": "ACTIVE",
        "subscriber": {
            "payer_id": "PAYER2",
            "email_address": "sub@b.com",
            "name": { "given_name": given_name, "surname": "Hopper" }
        },
        "billing_info": {
            "last_payment": { "amount": { "currency_code": "USD", "value": amount } }
        }
    }))
    .unwrap()
}
