//! Service readiness reporting.
//!
//! Readiness is derived purely from how bootstrap went: whether the
//! predictor and the completion client were constructed. No network probe
//! is performed, so a health query can never fail or block.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Represents the operational status of the service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Every collaborator is available.
    #[default]
    Healthy,
    /// At least one collaborator is missing; some features run in a
    /// reduced mode.
    Degraded,
}

/// Readiness information for the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    /// Whether the toxicity predictor was constructed.
    pub predictor_ready: bool,
    /// Whether the completion client was constructed.
    pub ai_ready: bool,
    /// When this report was produced.
    pub checked_at: Timestamp,
}

impl ServiceHealth {
    /// Creates a report stamped with the current time.
    pub fn new(predictor_ready: bool, ai_ready: bool) -> Self {
        Self {
            predictor_ready,
            ai_ready,
            checked_at: Timestamp::now(),
        }
    }

    /// Returns the aggregate status.
    pub fn status(&self) -> ServiceStatus {
        if self.predictor_ready && self.ai_ready {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_ready_is_healthy() {
        let health = ServiceHealth::new(true, true);
        assert_eq!(health.status(), ServiceStatus::Healthy);
    }

    #[test]
    fn missing_collaborator_is_degraded() {
        assert_eq!(
            ServiceHealth::new(true, false).status(),
            ServiceStatus::Degraded
        );
        assert_eq!(
            ServiceHealth::new(false, false).status(),
            ServiceStatus::Degraded
        );
    }
}
