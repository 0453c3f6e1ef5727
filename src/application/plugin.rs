use crate::domain::echo::{conform_ready_response, verify_payment_data};
use crate::domain::enums::Environment;
use crate::domain::ports::{GooglePayPlugin, PaymentSheetOutcome, PaymentsClientBox, PaymentsClientFactory};
use crate::domain::request::{IsReadyToPayRequest, PaymentDataRequest, PaymentOptions};
use crate::domain::response::{IsReadyToPayResponse, PaymentData};
use crate::domain::validation::{validate_is_ready_to_pay, validate_payment_data_request};
use crate::error::{GooglePayError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

struct Session {
    environment: Environment,
    client: PaymentsClientBox,
}

/// Native-backed implementation of [`GooglePayPlugin`].
///
/// `GooglePay` validates every request before it reaches the payments client
/// and checks completed payments against the request they answer. It holds
/// one session, created by `initialize`, and presents at most one payment
/// sheet at a time.
pub struct GooglePay {
    factory: PaymentsClientFactory,
    session: RwLock<Option<Arc<Session>>>,
    sheet: Mutex<()>,
}

impl GooglePay {
    /// Creates an uninitialized plugin.
    ///
    /// # Arguments
    ///
    /// * `factory` - Builds the payments client for the environment chosen in `initialize`.
    pub fn new(factory: PaymentsClientFactory) -> Self {
        Self {
            factory,
            session: RwLock::new(None),
            sheet: Mutex::new(()),
        }
    }

    /// The environment configured by the last `initialize`, if any.
    pub async fn environment(&self) -> Option<Environment> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.environment)
    }

    async fn session(&self) -> Result<Arc<Session>> {
        self.session
            .read()
            .await
            .clone()
            .ok_or(GooglePayError::NotInitialized)
    }
}

#[async_trait]
impl GooglePayPlugin for GooglePay {
    async fn initialize(&self, options: PaymentOptions) -> Result<()> {
        let environment = options.effective_environment();
        let client = (self.factory)(environment);

        let mut session = self.session.write().await;
        if let Some(previous) = session.as_ref() {
            warn!(
                previous = %previous.environment,
                next = %environment,
                "initialize called again, replacing payments client"
            );
        }
        *session = Some(Arc::new(Session {
            environment,
            client,
        }));
        info!(%environment, "payments client initialized");
        Ok(())
    }

    async fn is_ready_to_pay(&self, request: IsReadyToPayRequest) -> Result<IsReadyToPayResponse> {
        let session = self.session().await?;
        validate_is_ready_to_pay(&request)?;

        let report = session.client.is_ready_to_pay(&request).await?;
        debug!(result = report.result, "readiness probe answered");
        Ok(conform_ready_response(
            &request,
            report.result,
            report.payment_method_present,
        ))
    }

    async fn load_payment_data(&self, request: PaymentDataRequest) -> Result<PaymentData> {
        let session = self.session().await?;
        validate_payment_data_request(&request)?;

        let _sheet = self.sheet.try_lock().map_err(|_| {
            warn!("payment sheet already active, rejecting request");
            GooglePayError::Busy
        })?;

        match session.client.load_payment_data(&request).await? {
            PaymentSheetOutcome::Completed(data) => {
                verify_payment_data(&request, &data)?;
                info!(
                    tokenization = %data.payment_method_data.tokenization_data.r#type,
                    "payment data loaded"
                );
                Ok(data)
            }
            PaymentSheetOutcome::Cancelled => {
                info!("payment sheet cancelled by user");
                Err(GooglePayError::Cancelled)
            }
            PaymentSheetOutcome::Failed(error) => {
                warn!(status = %error.status_code, reason = %error.status_message, "payment failed");
                Err(GooglePayError::PaymentsClient {
                    status_code: Some(error.status_code),
                    message: error.status_message,
                })
            }
            PaymentSheetOutcome::Unknown => Err(GooglePayError::PaymentsClient {
                status_code: None,
                message: "Unknown result error".to_string(),
            }),
        }
    }
}
