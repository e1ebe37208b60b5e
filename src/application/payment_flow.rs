use crate::domain::entities::SubscriptionResult;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{
    CompletionOutcome, DonationIntent, DonationKind, FieldErrors, FlowState, ProviderOrderId,
};
use crate::infrastructure::config::FlowConfig;
use crate::ports::donation_server_port::{
    CompleteOnceForm, CompletePlanForm, InitiateOnceForm, ServerReply,
};
use crate::ports::payment_provider_port::{Approval, SubscriptionRequest};
use crate::ports::{DonationServerPort, PageConfigSource, PagePort, PaymentProviderPort};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Characters left as-is in a query component (RFC 3986 unreserved)
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Completion request built from an approval
enum Completion {
    Once(CompleteOnceForm),
    Plan(CompletePlanForm),
}

/// Drives one donation widget from button render to redirect or error.
///
/// One instance per rendered widget. Operations take `&mut self` and are
/// awaited in sequence; a second `initiate` or `on_approved` is rejected
/// with [`DomainError::InvalidState`].
pub struct PaymentFlow<P: PaymentProviderPort, S: DonationServerPort, G: PagePort> {
    widget_id: Uuid,
    intent: DonationIntent,
    config: Arc<FlowConfig>,
    provider: Arc<P>,
    server: Arc<S>,
    page: Arc<G>,
    state: FlowState,
    order_id: Option<ProviderOrderId>,
}

impl<P: PaymentProviderPort, S: DonationServerPort, G: PagePort> PaymentFlow<P, S, G> {
    pub fn new(
        intent: DonationIntent,
        config: Arc<FlowConfig>,
        provider: Arc<P>,
        server: Arc<S>,
        page: Arc<G>,
    ) -> Self {
        Self {
            widget_id: Uuid::new_v4(),
            intent,
            config,
            provider,
            server,
            page,
            state: FlowState::Idle,
            order_id: None,
        }
    }

    /// Load the intent from page configuration, then build the flow.
    ///
    /// Fails before any network call when the page configuration is bad.
    pub fn from_page<C: PageConfigSource + ?Sized>(
        kind: DonationKind,
        source: &C,
        config: Arc<FlowConfig>,
        provider: Arc<P>,
        server: Arc<S>,
        page: Arc<G>,
    ) -> DomainResult<Self> {
        let intent = DonationIntent::load(kind, source)?;
        Ok(Self::new(intent, config, provider, server, page))
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn intent(&self) -> &DonationIntent {
        &self.intent
    }

    pub fn order_id(&self) -> Option<&ProviderOrderId> {
        self.order_id.as_ref()
    }

    pub fn widget_id(&self) -> Uuid {
        self.widget_id
    }

    /// Create the provider order or subscription
    pub async fn initiate(&mut self) -> DomainResult<ProviderOrderId> {
        self.expect_state(FlowState::Idle)?;
        info!(
            widget = %self.widget_id,
            kind = %self.intent.kind,
            fund = %self.intent.fund_id,
            "Creating provider order"
        );

        let created = match self.intent.kind {
            DonationKind::OneTime => self.initiate_once().await,
            DonationKind::Recurring => self.initiate_subscription().await,
        };

        match created {
            Ok(order_id) => {
                info!(widget = %self.widget_id, order = %order_id, "Provider order created");
                self.order_id = Some(order_id.clone());
                self.transition(FlowState::OrderCreated);
                Ok(order_id)
            }
            Err(e) => {
                error!(widget = %self.widget_id, "Order creation failed: {}", e);
                self.transition(FlowState::Failed);
                Err(e)
            }
        }
    }

    /// Handle the payer's approval: capture or snapshot, then confirm with the origin.
    ///
    /// Provider failures are returned as `Err` for the provider to display.
    /// Origin failures go through the shared error path and come back as
    /// [`CompletionOutcome::Failure`]; nothing is retried since funds may
    /// already have moved.
    pub async fn on_approved(&mut self, approval: Approval) -> DomainResult<CompletionOutcome> {
        self.expect_state(FlowState::OrderCreated)?;

        // Subscription approvals carry a fresh order token beside the subscription id
        let approved_id = match self.intent.kind {
            DonationKind::OneTime => Some(approval.order_id.as_str()),
            DonationKind::Recurring => approval.subscription_id.as_deref(),
        };
        if self.order_id.as_ref().map(ProviderOrderId::as_str) != approved_id {
            return Err(DomainError::Provider(format!(
                "approval for unknown order {}",
                approved_id.unwrap_or(approval.order_id.as_str())
            )));
        }

        self.transition(FlowState::Capturing);
        let prepared = match self.intent.kind {
            DonationKind::OneTime => self.capture_once(&approval).await,
            DonationKind::Recurring => self.snapshot_plan(&approval).await,
        };
        let (completion, given_name) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                error!(widget = %self.widget_id, "Provider approval handling failed: {}", e);
                self.transition(FlowState::Failed);
                return Err(e);
            }
        };

        self.transition(FlowState::Completing);
        let reply = match &completion {
            Completion::Once(form) => self.server.complete_once(form).await,
            Completion::Plan(form) => self.server.complete_plan(form).await,
        };

        match reply {
            Ok(reply) if reply.is_success() => {
                let redirect = self.success_target(&given_name);
                info!(widget = %self.widget_id, "Donation confirmed");
                self.page.navigate(&redirect);
                self.transition(FlowState::Succeeded);
                Ok(CompletionOutcome::Success { redirect })
            }
            Ok(reply) => Ok(self.fail_completion(reply).await),
            Err(e) => {
                error!(widget = %self.widget_id, "Completion request failed: {}", e);
                Ok(self.report_failure(e.report_text(), None).await)
            }
        }
    }

    /// Payer closed the provider window. No calls, no cleanup.
    pub fn on_abandoned(&mut self) {
        if self.state.is_terminal() {
            debug!(widget = %self.widget_id, state = %self.state, "Abandon after terminal state ignored");
            return;
        }
        info!(widget = %self.widget_id, state = %self.state, "Donation abandoned");
        self.transition(FlowState::Abandoned);
    }

    async fn initiate_once(&self) -> DomainResult<ProviderOrderId> {
        let amount = self.intent.amount.ok_or_else(|| {
            DomainError::Configuration("one-time donation requires an amount".to_string())
        })?;

        let form = InitiateOnceForm {
            fund_id: self.intent.fund_id.clone(),
            amount_cents: amount.to_cents(),
        };

        let response = self.server.initiate_once(&form).await?;
        ProviderOrderId::new(response.order_id)
    }

    async fn initiate_subscription(&self) -> DomainResult<ProviderOrderId> {
        let plan_id = self.required(&self.intent.provider_plan_id, "provider plan id")?;
        self.provider
            .create_subscription(SubscriptionRequest::for_plan(plan_id))
            .await
    }

    async fn capture_once(&self, approval: &Approval) -> DomainResult<(Completion, String)> {
        let capture = self
            .provider
            .capture_order(&approval.order_id)
            .await?
            .into_result(approval.order_id.clone())?;

        debug!(
            widget = %self.widget_id,
            payer = %capture.payer.payer_id,
            email = %capture.payer.email,
            amount = %capture.amount,
            "Order captured"
        );

        let given_name = capture.payer.given_name.clone();
        let form = CompleteOnceForm {
            order_id: capture.order_id.to_string(),
            amount: capture.amount,
            payer_email: capture.payer.email,
            payer_id: capture.payer.payer_id,
            first_name: capture.payer.given_name,
            last_name: capture.payer.surname,
            fund_id: self.intent.fund_id.clone(),
            payment_id: capture.capture_id,
            bco_name: self.intent.bco_name.clone(),
        };

        Ok((Completion::Once(form), given_name))
    }

    async fn snapshot_plan(&self, approval: &Approval) -> DomainResult<(Completion, String)> {
        let provider_plan_id = self.required(&self.intent.provider_plan_id, "provider plan id")?;
        let plan_id = self.required(&self.intent.plan_id, "plan id")?;

        let snapshot = self.provider.get_subscription(approval).await?;
        let subscription = SubscriptionResult::try_from(snapshot)?;

        debug!(
            widget = %self.widget_id,
            subscription = %subscription.subscription_id,
            email = %subscription.subscriber.email,
            amount = %subscription.amount,
            "Subscription approved"
        );

        let given_name = subscription.subscriber.given_name.clone();
        let form = CompletePlanForm {
            order_id: approval.order_id.to_string(),
            provider_plan_id,
            provider_donation_id: subscription.subscription_id.clone(),
            subscription_id: subscription.subscription_id,
            plan_id,
            amount: subscription.amount,
            email: subscription.subscriber.email,
            payer_id: subscription.subscriber.payer_id,
            first_name: subscription.subscriber.given_name,
            last_name: subscription.subscriber.surname,
            fund_id: self.intent.fund_id.clone(),
            bco_name: self.intent.bco_name.clone(),
        };

        Ok((Completion::Plan(form), given_name))
    }

    async fn fail_completion(&mut self, reply: ServerReply) -> CompletionOutcome {
        warn!(
            widget = %self.widget_id,
            status = reply.status,
            "Origin did not confirm donation; provider-side payment left for reconciliation"
        );
        let field_errors = reply.field_errors();
        self.report_failure(reply.body, field_errors).await
    }

    async fn report_failure(
        &mut self,
        detail: String,
        field_errors: Option<FieldErrors>,
    ) -> CompletionOutcome {
        match self.server.report_error(&detail).await {
            Ok(fragment) => self.page.render_fragment(&self.config.error_target, &fragment),
            Err(e) => error!(widget = %self.widget_id, "Error report failed: {}", e),
        }

        self.transition(FlowState::Failed);
        CompletionOutcome::Failure {
            detail,
            field_errors,
        }
    }

    fn success_target(&self, given_name: &str) -> String {
        format!(
            "{}?name={}",
            self.config.success_path,
            utf8_percent_encode(given_name, QUERY_COMPONENT)
        )
    }

    fn required(&self, value: &Option<String>, what: &str) -> DomainResult<String> {
        value
            .clone()
            .ok_or_else(|| DomainError::Configuration(format!("{} missing", what)))
    }

    fn expect_state(&self, expected: FlowState) -> DomainResult<()> {
        if self.state != expected {
            return Err(DomainError::InvalidState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    fn transition(&mut self, next: FlowState) {
        debug!(widget = %self.widget_id, from = %self.state, to = %next, "Flow transition");
        self.state = next;
    }
}
