//! Payment gateway seam and its recording double.
//!
//! The gateway is modeled after hosted payment SDKs: it must be loaded with
//! a publishable key before use, mints `pm_`-prefixed ids for payment
//! methods and `pi_`-prefixed ids for confirmations, and can be scripted to
//! decline. The SDK's UI-widget surface has no headless counterpart and is
//! not modeled.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final state of a confirmation as the gateway reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Succeeded,
    Processing,
    RequiresAction,
}

/// A tokenized payment instrument minted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Gateway id, `pm_`-prefixed.
    pub id: String,
    /// Instrument kind, e.g. `"card"`.
    pub kind: String,
}

/// The outcome of a confirmed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Gateway id, `pi_`-prefixed.
    pub id: String,
    /// The instrument that was charged.
    pub method_id: String,
    /// Amount in minor units.
    pub amount: u64,
    pub status: PaymentStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The gateway was used before `load` handed out a client.
    #[error("payment gateway not loaded")]
    NotLoaded,

    /// A scripted decline.
    #[error("payment declined: {0}")]
    Declined(String),
}

/// Payment SDK seam. Methods are `async` to match the real SDK's calling
/// convention; the double resolves immediately.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initializes the gateway with a publishable key. Nothing else works
    /// until this has been called.
    async fn load(&self, publishable_key: &str) -> Result<(), PaymentError>;

    /// Tokenizes an instrument of the given kind.
    async fn create_payment_method(&self, kind: &str) -> Result<PaymentMethod, PaymentError>;

    /// Confirms a payment of `amount` minor units against a method.
    async fn confirm_payment(
        &self,
        method_id: &str,
        amount: u64,
    ) -> Result<PaymentConfirmation, PaymentError>;
}

#[derive(Default)]
struct PaymentsState {
    publishable_key: Option<String>,
    methods: Vec<PaymentMethod>,
    confirmations: Vec<PaymentConfirmation>,
    decline_next: Option<String>,
}

/// Recording payments double: unloaded until [`PaymentGateway::load`],
/// records the key and every minted method and confirmation.
#[derive(Default)]
pub struct StubPayments {
    state: Mutex<PaymentsState>,
}

impl StubPayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next confirmation to fail with the given reason.
    pub fn decline_next(&self, reason: &str) {
        self.state.lock().unwrap().decline_next = Some(reason.to_string());
    }

    /// The key captured by `load`, if any.
    pub fn publishable_key(&self) -> Option<String> {
        self.state.lock().unwrap().publishable_key.clone()
    }

    /// Returns whether `load` has been called.
    pub fn is_loaded(&self) -> bool {
        self.state.lock().unwrap().publishable_key.is_some()
    }

    /// Every minted payment method, in creation order.
    pub fn methods(&self) -> Vec<PaymentMethod> {
        self.state.lock().unwrap().methods.clone()
    }

    /// Every successful confirmation, in creation order.
    pub fn confirmations(&self) -> Vec<PaymentConfirmation> {
        self.state.lock().unwrap().confirmations.clone()
    }
}

#[async_trait]
impl PaymentGateway for StubPayments {
    async fn load(&self, publishable_key: &str) -> Result<(), PaymentError> {
        self.state.lock().unwrap().publishable_key = Some(publishable_key.to_string());
        Ok(())
    }

    async fn create_payment_method(&self, kind: &str) -> Result<PaymentMethod, PaymentError> {
        let mut state = self.state.lock().unwrap();
        if state.publishable_key.is_none() {
            return Err(PaymentError::NotLoaded);
        }

        let method = PaymentMethod {
            id: format!("pm_{}", Uuid::new_v4().simple()),
            kind: kind.to_string(),
        };
        state.methods.push(method.clone());
        Ok(method)
    }

    async fn confirm_payment(
        &self,
        method_id: &str,
        amount: u64,
    ) -> Result<PaymentConfirmation, PaymentError> {
        let mut state = self.state.lock().unwrap();
        if state.publishable_key.is_none() {
            return Err(PaymentError::NotLoaded);
        }
        if let Some(reason) = state.decline_next.take() {
            return Err(PaymentError::Declined(reason));
        }

        let confirmation = PaymentConfirmation {
            id: format!("pi_{}", Uuid::new_v4().simple()),
            method_id: method_id.to_string(),
            amount,
            status: PaymentStatus::Succeeded,
        };
        state.confirmations.push(confirmation.clone());
        Ok(confirmation)
    }
}
