//! Mock Email Service Implementation
//!
//! Logs verification emails instead of sending them. The last code sent to
//! each of the most recent recipients is kept so a developer or a test can
//! complete registration; older recipients are evicted first.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use pr_core::services::verification::EmailServiceTrait;
use pr_shared::utils::email::mask_email;

/// Recipients whose last code is remembered by default
pub const DEFAULT_RECORDED_RECIPIENTS: usize = 1024;

/// Mock email service for development and testing
#[derive(Clone)]
pub struct MockEmailService {
    /// Number of messages accepted
    message_count: Arc<AtomicU64>,
    /// Whether to simulate transport failures
    simulate_failure: Arc<AtomicBool>,
    /// Last code per recipient, least recently sent first
    last_codes: Arc<RwLock<VecDeque<(String, u32)>>>,
    /// Upper bound on `last_codes` entries
    max_recipients: usize,
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::with_recipient_limit(DEFAULT_RECORDED_RECIPIENTS)
    }
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember codes for at most `max_recipients` addresses
    pub fn with_recipient_limit(max_recipients: usize) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
            last_codes: Arc::new(RwLock::new(VecDeque::new())),
            max_recipients: max_recipients.max(1),
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Code carried by the most recent message to `to`
    pub async fn last_code_for(&self, to: &str) -> Option<u32> {
        self.last_codes
            .read()
            .await
            .iter()
            .find(|(recipient, _)| recipient == to)
            .map(|(_, code)| *code)
    }

    /// Number of recipients whose code is currently remembered
    pub async fn recorded_recipients(&self) -> usize {
        self.last_codes.read().await.len()
    }

    async fn record(&self, to: &str, code: u32) {
        let mut codes = self.last_codes.write().await;
        codes.retain(|(recipient, _)| recipient != to);
        codes.push_back((to.to_string(), code));
        while codes.len() > self.max_recipients {
            codes.pop_front();
        }
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_email(&self, to: &str, subject: &str, code: u32) -> bool {
        let masked = mask_email(to);

        if self.simulate_failure.load(Ordering::SeqCst) {
            tracing::warn!(
                target: "email_service",
                provider = "mock",
                to = %masked,
                event = "email_send_failed",
                "Mock email service simulating failure"
            );
            return false;
        }

        self.record(to, code).await;
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        // The code is logged at debug so development setups can read it
        tracing::debug!(target: "email_service", to = %masked, code, "Mock verification code");
        tracing::info!(
            target: "email_service",
            provider = "mock",
            to = %masked,
            subject,
            message_number = count,
            event = "email_sent",
            "Mock verification email recorded"
        );

        true
    }
}
