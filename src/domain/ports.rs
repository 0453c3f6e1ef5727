use super::enums::Environment;
use super::request::{IsReadyToPayRequest, PaymentDataRequest, PaymentOptions};
use super::response::{IsReadyToPayResponse, PaymentData, PaymentsError};
use crate::error::Result;
use async_trait::async_trait;

/// The capability surface application code talks to.
///
/// By convention `initialize` is called once before the other two operations.
#[async_trait]
pub trait GooglePayPlugin: Send + Sync {
    async fn initialize(&self, options: PaymentOptions) -> Result<()>;
    async fn is_ready_to_pay(&self, request: IsReadyToPayRequest) -> Result<IsReadyToPayResponse>;
    async fn load_payment_data(&self, request: PaymentDataRequest) -> Result<PaymentData>;
}

/// What the platform payments client reports for a readiness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessReport {
    pub result: bool,
    pub payment_method_present: Option<bool>,
}

/// How a payment sheet was dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSheetOutcome {
    Completed(PaymentData),
    Cancelled,
    Failed(PaymentsError),
    Unknown,
}

/// The native payments client a [`GooglePayPlugin`] forwards to.
#[async_trait]
pub trait PaymentsClient: Send + Sync {
    async fn is_ready_to_pay(&self, request: &IsReadyToPayRequest) -> Result<ReadinessReport>;
    async fn load_payment_data(&self, request: &PaymentDataRequest) -> Result<PaymentSheetOutcome>;
}

pub type GooglePayPluginBox = Box<dyn GooglePayPlugin>;
pub type PaymentsClientBox = Box<dyn PaymentsClient>;
/// Builds a payments client bound to one environment.
pub type PaymentsClientFactory = Box<dyn Fn(Environment) -> PaymentsClientBox + Send + Sync>;
