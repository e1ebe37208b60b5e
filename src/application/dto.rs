use serde::{Deserialize, Serialize};

/// Reply of the redirect-style one-time donation (`POST /donation/once`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRedirect {
    /// Provider page the approval popup is opened on
    #[serde(rename = "approvalUrl")]
    pub approval_url: String,
}

/// Line chart data point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// `YYYY-MM`
    pub x: String,
    /// Cents
    pub y: i64,
}
