#![allow(dead_code)]

use googlepay_plugin::domain::enums::{
    CardAuthMethod, CardNetwork, PaymentMethodType, TotalPriceStatus,
};
use googlepay_plugin::domain::request::{
    CardParameters, IsReadyToPayPaymentMethodSpecification, IsReadyToPayRequest, MerchantInfo,
    PaymentDataRequest, PaymentMethodSpecification, TokenizationSpecification, TransactionInfo,
};

pub fn card_parameters() -> CardParameters {
    CardParameters::new(vec![CardAuthMethod::PanOnly], vec![CardNetwork::Visa])
}

pub fn gateway_method() -> PaymentMethodSpecification {
    PaymentMethodSpecification {
        r#type: PaymentMethodType::Card,
        parameters: card_parameters(),
        tokenization_specification: TokenizationSpecification::gateway([
            ("gateway", "example"),
            ("gatewayMerchantId", "exampleId"),
        ]),
    }
}

/// The canonical Acme request: one VISA card method, FINAL price of 10.45 USD.
pub fn payment_request() -> PaymentDataRequest {
    PaymentDataRequest {
        api_version: 2,
        api_version_minor: 0,
        merchant_info: MerchantInfo {
            merchant_name: Some("Acme".to_string()),
        },
        transaction_info: TransactionInfo {
            transaction_id: None,
            currency_code: "USD".to_string(),
            country_code: None,
            total_price: "10.45".to_string(),
            total_price_label: None,
            total_price_status: TotalPriceStatus::Final,
            checkout_option: None,
        },
        allowed_payment_methods: vec![gateway_method()],
        email_required: None,
        shipping_address_required: None,
        shipping_address_parameters: None,
    }
}

pub fn ready_request(existing_payment_method_required: Option<bool>) -> IsReadyToPayRequest {
    IsReadyToPayRequest {
        api_version: 2,
        api_version_minor: 0,
        allowed_payment_methods: vec![IsReadyToPayPaymentMethodSpecification {
            r#type: PaymentMethodType::Card,
            parameters: card_parameters(),
            tokenization_specification: None,
        }],
        existing_payment_method_required,
    }
}

pub fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
