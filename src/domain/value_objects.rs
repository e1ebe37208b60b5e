use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Donation flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Button rendered, nothing requested yet
    Idle,
    /// Provider order or subscription exists
    OrderCreated,
    /// Payer approved; fetching capture or subscription snapshot
    Capturing,
    /// Posting the result to the origin server
    Completing,
    /// Server confirmed, page navigated
    Succeeded,
    /// Terminal failure for this attempt
    Failed,
    /// Payer closed the provider window
    Abandoned,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlowState::Succeeded | FlowState::Failed | FlowState::Abandoned
        )
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::Idle => write!(f, "idle"),
            FlowState::OrderCreated => write!(f, "order_created"),
            FlowState::Capturing => write!(f, "capturing"),
            FlowState::Completing => write!(f, "completing"),
            FlowState::Succeeded => write!(f, "succeeded"),
            FlowState::Failed => write!(f, "failed"),
            FlowState::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Donation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationKind {
    /// Single captured payment
    OneTime,
    /// Provider-managed subscription
    Recurring,
}

impl fmt::Display for DonationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DonationKind::OneTime => write!(f, "one_time"),
            DonationKind::Recurring => write!(f, "recurring"),
        }
    }
}

/// Order or subscription id issued by the provider (or by the origin on its behalf)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOrderId(String);

impl ProviderOrderId {
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::Provider("empty order id".to_string()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Currency amount in minor units (cents), avoiding floating point
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents
    pub amount_cents: i64,
}

impl Money {
    /// Create from cents
    pub fn from_cents(cents: i64) -> Self {
        Self { amount_cents: cents }
    }

    pub fn to_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Plain decimal form, as the provider writes amounts (`"25.00"`)
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Parse either the plain decimal form or the display form (`"$1,234.56"`).
    ///
    /// Whole numbers and a single fraction digit are accepted; a third
    /// fraction digit is rejected rather than truncated. Commas are only
    /// accepted as thousands separators.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidAmount(text.to_string());

        let trimmed = text.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (grouped, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };
        let digits = ungroup_thousands(grouped).ok_or_else(invalid)?;
        let whole = digits.as_str();

        if whole.is_empty() || fraction.len() > 2 {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self::from_cents(if negative { -cents } else { cents }))
    }
}

/// Strip `,` separators, requiring groups of three after the first
fn ungroup_thousands(whole: &str) -> Option<String> {
    let mut groups = whole.split(',');
    let first = groups.next()?;
    if whole.contains(',') && !(1..=3).contains(&first.len()) {
        return None;
    }
    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

impl fmt::Display for Money {
    /// en-US USD currency formatting
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.amount_cents.unsigned_abs();
        let dollars = (abs / 100).to_string();

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if self.amount_cents < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, grouped, abs % 100)
    }
}
