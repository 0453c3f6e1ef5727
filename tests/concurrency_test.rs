mod common;

use async_trait::async_trait;
use googlepay_plugin::application::plugin::GooglePay;
use googlepay_plugin::domain::ports::{
    GooglePayPlugin, PaymentSheetOutcome, PaymentsClient, PaymentsClientBox, ReadinessReport,
};
use googlepay_plugin::domain::request::{IsReadyToPayRequest, PaymentDataRequest, PaymentOptions};
use googlepay_plugin::error::{GooglePayError, Result};
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};

/// Keeps the sheet open until the test releases it.
struct HeldSheet {
    opened: Arc<Notify>,
    release: Arc<Semaphore>,
}

#[async_trait]
impl PaymentsClient for HeldSheet {
    async fn is_ready_to_pay(&self, _request: &IsReadyToPayRequest) -> Result<ReadinessReport> {
        Ok(ReadinessReport {
            result: true,
            payment_method_present: None,
        })
    }

    async fn load_payment_data(&self, _request: &PaymentDataRequest) -> Result<PaymentSheetOutcome> {
        self.opened.notify_one();
        let _permit = self.release.acquire().await;
        Ok(PaymentSheetOutcome::Cancelled)
    }
}

#[tokio::test]
async fn test_second_sheet_is_rejected_while_first_is_open() {
    let opened = Arc::new(Notify::new());
    let release = Arc::new(Semaphore::new(0));

    let (o, r) = (Arc::clone(&opened), Arc::clone(&release));
    let plugin = Arc::new(GooglePay::new(Box::new(move |_| {
        Box::new(HeldSheet {
            opened: Arc::clone(&o),
            release: Arc::clone(&r),
        }) as PaymentsClientBox
    })));
    plugin.initialize(PaymentOptions::default()).await.unwrap();

    let first = {
        let plugin = Arc::clone(&plugin);
        tokio::spawn(async move { plugin.load_payment_data(common::payment_request()).await })
    };
    opened.notified().await;

    let second = plugin.load_payment_data(common::payment_request()).await;
    assert!(matches!(second, Err(GooglePayError::Busy)));

    // Readiness probes are not serialized with the sheet.
    assert!(plugin
        .is_ready_to_pay(common::ready_request(None))
        .await
        .is_ok());

    release.add_permits(1);
    assert!(matches!(first.await.unwrap(), Err(GooglePayError::Cancelled)));

    // The sheet is free again once the first call resolved.
    release.add_permits(1);
    assert!(matches!(
        plugin.load_payment_data(common::payment_request()).await,
        Err(GooglePayError::Cancelled)
    ));
}

#[tokio::test]
async fn test_invalid_request_does_not_occupy_sheet() {
    let opened = Arc::new(Notify::new());
    let release = Arc::new(Semaphore::new(1));

    let (o, r) = (Arc::clone(&opened), Arc::clone(&release));
    let plugin = GooglePay::new(Box::new(move |_| {
        Box::new(HeldSheet {
            opened: Arc::clone(&o),
            release: Arc::clone(&r),
        }) as PaymentsClientBox
    }));
    plugin.initialize(PaymentOptions::default()).await.unwrap();

    let mut invalid = common::payment_request();
    invalid.transaction_info.total_price = "1.5".to_string();
    assert!(matches!(
        plugin.load_payment_data(invalid).await,
        Err(GooglePayError::Validation(_))
    ));

    assert!(matches!(
        plugin.load_payment_data(common::payment_request()).await,
        Err(GooglePayError::Cancelled)
    ));
}
