use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::validation::FieldErrors;
use crate::domain::value_objects::{DonationKind, Money, ProviderOrderId};
use crate::ports::PageConfigSource;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Ids of the JSON script tags the page embeds for a donation widget
pub mod tags {
    pub const FUND_ID: &str = "fund-id";
    pub const AMOUNT: &str = "amount";
    pub const PLAN_ID: &str = "plan-id";
    pub const PROVIDER_PLAN_ID: &str = "provider-plan-id";
    pub const BCO_NAME: &str = "bco-name";
    pub const MONTHLY: &str = "monthly";
}

/// What a widget is collecting. Read once, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationIntent {
    pub kind: DonationKind,

    /// Fund receiving the donation
    pub fund_id: String,

    /// Internal plan id (recurring only)
    pub plan_id: Option<String>,

    /// Amount (one-time only)
    pub amount: Option<Money>,

    /// Provider-side billing plan (recurring only)
    pub provider_plan_id: Option<String>,

    /// Beneficiary display name, forwarded to the origin when present
    pub bco_name: Option<String>,
}

impl DonationIntent {
    /// Build a one-time intent
    pub fn one_time(fund_id: impl Into<String>, amount: Money) -> DomainResult<Self> {
        let intent = Self {
            kind: DonationKind::OneTime,
            fund_id: fund_id.into(),
            plan_id: None,
            amount: Some(amount),
            provider_plan_id: None,
            bco_name: None,
        };
        intent.validate()?;
        Ok(intent)
    }

    /// Build a recurring intent
    pub fn recurring(
        fund_id: impl Into<String>,
        plan_id: impl Into<String>,
        provider_plan_id: impl Into<String>,
    ) -> DomainResult<Self> {
        let intent = Self {
            kind: DonationKind::Recurring,
            fund_id: fund_id.into(),
            plan_id: Some(plan_id.into()),
            amount: None,
            provider_plan_id: Some(provider_plan_id.into()),
            bco_name: None,
        };
        intent.validate()?;
        Ok(intent)
    }

    pub fn with_bco_name(mut self, name: impl Into<String>) -> Self {
        self.bco_name = Some(name.into());
        self
    }

    /// Read the intent from page-embedded JSON.
    ///
    /// Every required tag must be present and parse; nothing is defaulted.
    pub fn load<C>(kind: DonationKind, source: &C) -> DomainResult<Self>
    where
        C: PageConfigSource + ?Sized,
    {
        let fund_id: String = read_tag(source, tags::FUND_ID)?;

        let intent = match kind {
            DonationKind::OneTime => {
                let cents: i64 = read_tag(source, tags::AMOUNT)?;
                Self::one_time(fund_id, Money::from_cents(cents))?
            }
            DonationKind::Recurring => {
                let plan_id: String = read_tag(source, tags::PLAN_ID)?;
                let provider_plan_id: String = read_tag(source, tags::PROVIDER_PLAN_ID)?;
                Self::recurring(fund_id, plan_id, provider_plan_id)?
            }
        };

        match source.text_content(tags::BCO_NAME) {
            Some(_) => {
                let name: String = read_tag(source, tags::BCO_NAME)?;
                Ok(intent.with_bco_name(name))
            }
            None => Ok(intent),
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if self.fund_id.trim().is_empty() {
            return Err(DomainError::Configuration("fund id is empty".to_string()));
        }

        match self.kind {
            DonationKind::OneTime => match self.amount {
                Some(amount) if amount.to_cents() > 0 => Ok(()),
                Some(amount) => Err(DomainError::Configuration(format!(
                    "amount must be positive, got {} cents",
                    amount.to_cents()
                ))),
                None => Err(DomainError::Configuration(
                    "one-time donation requires an amount".to_string(),
                )),
            },
            DonationKind::Recurring => {
                let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
                if !present(&self.plan_id) {
                    return Err(DomainError::Configuration("plan id is empty".to_string()));
                }
                if !present(&self.provider_plan_id) {
                    return Err(DomainError::Configuration(
                        "provider plan id is empty".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Parse the JSON text of an embedded script tag
pub fn read_tag<T, C>(source: &C, id: &str) -> DomainResult<T>
where
    T: DeserializeOwned,
    C: PageConfigSource + ?Sized,
{
    let text = source
        .text_content(id)
        .ok_or_else(|| DomainError::Configuration(format!("missing page config `{}`", id)))?;

    serde_json::from_str(&text)
        .map_err(|e| DomainError::Configuration(format!("malformed page config `{}`: {}", id, e)))
}

/// Identity of the payer or subscriber as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    pub payer_id: String,
    pub email: String,
    pub given_name: String,
    pub surname: String,
}

/// Provider confirmation that a one-time payment moved funds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    pub order_id: ProviderOrderId,

    /// Capture id, posted to the origin as `payment_id`
    pub capture_id: String,

    /// Amount exactly as the provider wrote it
    pub amount: String,

    pub payer: Payer,
}

/// Provider state of a subscription at approval time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionResult {
    pub subscription_id: String,

    /// Last billed amount exactly as the provider wrote it
    pub amount: String,

    pub subscriber: Payer,
}

/// Terminal result of one approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Server confirmed; page navigated to the target
    Success { redirect: String },
    /// Server did not confirm; detail was sent to the error path
    Failure {
        detail: String,
        /// Present when the origin answered 422 with field errors
        field_errors: Option<FieldErrors>,
    },
}

impl CompletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    impl PageConfigSource for HashMap<&'static str, &'static str> {
        fn text_content(&self, id: &str) -> Option<String> {
            self.get(id).map(|s| s.to_string())
        }
    }

    #[test]
    fn test_load_one_time_intent() {
        let page = HashMap::from([("fund-id", r#""F1""#), ("amount", "2500")]);
        let intent = DonationIntent::load(DonationKind::OneTime, &page).unwrap();

        assert_eq!(intent.fund_id, "F1");
        assert_eq!(intent.amount, Some(Money::from_cents(2500)));
        assert!(intent.bco_name.is_none());
    }

    #[test]
    fn test_load_recurring_intent_with_bco_name() {
        let page = HashMap::from([
            ("fund-id", r#""F1""#),
            ("plan-id", r#""P7""#),
            ("provider-plan-id", r#""P-123""#),
            ("bco-name", r#""Youth Club""#),
        ]);
        let intent = DonationIntent::load(DonationKind::Recurring, &page).unwrap();

        assert_eq!(intent.plan_id.as_deref(), Some("P7"));
        assert_eq!(intent.provider_plan_id.as_deref(), Some("P-123"));
        assert_eq!(intent.bco_name.as_deref(), Some("Youth Club"));
        assert!(intent.amount.is_none());
    }

    #[test]
    fn test_malformed_amount_is_configuration_error() {
        let page = HashMap::from([("fund-id", r#""F1""#), ("amount", "{25")]);
        let err = DonationIntent::load(DonationKind::OneTime, &page).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn test_formatted_amount_is_rejected() {
        let page = HashMap::from([("fund-id", r#""F1""#), ("amount", r#""$25.00""#)]);
        assert!(DonationIntent::load(DonationKind::OneTime, &page).is_err());
    }

    #[test]
    fn test_missing_tag_is_configuration_error() {
        let page = HashMap::from([("fund-id", r#""F1""#), ("plan-id", r#""P7""#)]);
        let err = DonationIntent::load(DonationKind::Recurring, &page).unwrap_err();
        assert!(err.to_string().contains("provider-plan-id"));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(DonationIntent::one_time("F1", Money::from_cents(0)).is_err());
        assert!(DonationIntent::one_time("", Money::from_cents(100)).is_err());
    }
}
