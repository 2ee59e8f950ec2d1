//! Usage recorders
//!
//! One usage unit is recorded per accepted pulse, attributed to the API key
//! the caller presented. Recording is best-effort: the gateway spawns it off
//! the response path and drops failures.

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use hive_common::Result;

/// A single recorded usage unit
#[derive(Debug, Clone)]
pub struct UsageEvent {
    /// Unique event ID
    pub event_id: Uuid,
    /// Credential the usage is attributed to
    pub principal: String,
    /// Event timestamp (Unix millis)
    pub timestamp: i64,
}

impl UsageEvent {
    pub fn new(principal: &str) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            principal: principal.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Trait for billing collaborators
#[async_trait]
pub trait UsageRecorder: Send + Sync {
    /// Record one usage unit attributable to `principal`
    async fn record(&self, principal: &str) -> Result<UsageEvent>;
}

/// Mask a credential for log output, keeping only a short suffix
fn mask(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", suffix)
    }
}

/// Stripe-backed usage recorder
///
/// Holds the provider credential and emits one trace line per usage unit.
/// The provider call itself is not wired up: the external contract (meter
/// identifiers, customer mapping) is unspecified, and inventing it here
/// would lock in a shape the billing side has not agreed to.
pub struct StripeUsageRecorder {
    api_key: String,
}

impl StripeUsageRecorder {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        debug!(credential = %mask(&api_key), "Stripe usage recorder initialized");
        Self { api_key }
    }
}

#[async_trait]
impl UsageRecorder for StripeUsageRecorder {
    async fn record(&self, principal: &str) -> Result<UsageEvent> {
        let event = UsageEvent::new(principal);

        // TODO: submit a meter event to Stripe once the meter name and the
        // key-to-customer mapping are settled; self.api_key authenticates
        // that call.
        let _ = &self.api_key;
        info!(
            event_id = %event.event_id,
            principal = %mask(principal),
            "Billing event recorded"
        );
        Ok(event)
    }
}

/// In-memory usage recorder for tests
#[derive(Default)]
pub struct MemoryUsageRecorder {
    events: parking_lot::Mutex<Vec<UsageEvent>>,
}

impl MemoryUsageRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    pub fn recorded(&self) -> Vec<UsageEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }
}

#[async_trait]
impl UsageRecorder for MemoryUsageRecorder {
    async fn record(&self, principal: &str) -> Result<UsageEvent> {
        let event = UsageEvent::new(principal);
        self.events.lock().push(event.clone());
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_suffix_only() {
        assert_eq!(mask("sk_test_abcd1234"), "****1234");
        assert_eq!(mask("key"), "****");
    }

    #[tokio::test]
    async fn test_stripe_recorder_never_fails() {
        let recorder = StripeUsageRecorder::new("sk_test_abcd1234");
        let event = recorder.record("agent-key-1").await.unwrap();
        assert_eq!(event.principal, "agent-key-1");
    }

    #[tokio::test]
    async fn test_memory_recorder_captures_events() {
        let recorder = MemoryUsageRecorder::new();
        recorder.record("k1").await.unwrap();
        recorder.record("k2").await.unwrap();

        let events = recorder.recorded();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].principal, "k1");
        assert_eq!(events[1].principal, "k2");
    }
}
