use crate::infrastructure::config::FlowConfig;
use crate::ports::PopupHandle;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Polls an approval popup until the payer closes it.
///
/// Only drives page cleanup; the donation flow state is left alone and no
/// in-flight request is cancelled.
#[derive(Debug, Clone, Copy)]
pub struct PopupWatcher {
    period: Duration,
}

impl PopupWatcher {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new(config.popup_poll_interval())
    }

    /// Resolve once the popup reports closed. Returns the number of polls.
    pub async fn wait_closed<H: PopupHandle + ?Sized>(&self, popup: &H) -> u32 {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut polls = 0;
        loop {
            ticker.tick().await;
            polls += 1;

            if popup.is_closed() {
                info!(polls, "Approval popup closed");
                return polls;
            }
            debug!(polls, "Approval popup still open");
        }
    }
}
