use crate::domain::ports::GooglePayPlugin;
use crate::domain::request::{IsReadyToPayRequest, PaymentDataRequest, PaymentOptions};
use crate::domain::response::{IsReadyToPayResponse, PaymentData};
use crate::error::{GooglePayError, Result};
use async_trait::async_trait;
use tracing::warn;

/// Fallback used where no native payments client exists.
///
/// Every operation fails with [`GooglePayError::NotImplemented`] and touches no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct GooglePayWeb;

impl GooglePayWeb {
    pub fn new() -> Self {
        Self
    }

    fn not_implemented<T>(operation: &'static str) -> Result<T> {
        warn!(operation, "Google Pay is not available on the web platform");
        Err(GooglePayError::NotImplemented { operation })
    }
}

#[async_trait]
impl GooglePayPlugin for GooglePayWeb {
    async fn initialize(&self, _options: PaymentOptions) -> Result<()> {
        Self::not_implemented("initialize")
    }

    async fn is_ready_to_pay(&self, _request: IsReadyToPayRequest) -> Result<IsReadyToPayResponse> {
        Self::not_implemented("isReadyToPay")
    }

    async fn load_payment_data(&self, _request: PaymentDataRequest) -> Result<PaymentData> {
        Self::not_implemented("loadPaymentData")
    }
}
