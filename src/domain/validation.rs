//! Request validation, run before anything is forwarded to the payments client.
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. supported API version
//! 2. non-empty payment methods, auth methods and card networks
//! 3. tokenization specification of CARD methods
//! 4. card network parameters consistent with the allowed networks
//! 5. transaction info (full requests only)

use super::enums::{CheckoutOption, PaymentMethodType, TotalPriceStatus};
use super::request::{
    CardParameters, IsReadyToPayRequest, PaymentDataRequest, TokenizationSpecification,
    TransactionInfo,
};
use crate::error::{GooglePayError, Result};
use regex::Regex;
use std::sync::LazyLock;

pub const SUPPORTED_API_VERSION: u32 = 2;
pub const SUPPORTED_API_VERSION_MINOR: u32 = 0;

static TOTAL_PRICE_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    match Regex::new(r"^[0-9]+(\.[0-9][0-9])?$") {
        Ok(regex) => Some(regex),
        Err(error) => {
            tracing::error!(%error, "total price pattern failed to compile");
            None
        }
    }
});

/// A payment method as seen by the validator, regardless of request variant.
struct MethodView<'a> {
    r#type: PaymentMethodType,
    parameters: &'a CardParameters,
    tokenization: Option<&'a TokenizationSpecification>,
}

pub fn validate_is_ready_to_pay(request: &IsReadyToPayRequest) -> Result<()> {
    validate_api_version(request.api_version, request.api_version_minor)?;

    let methods: Vec<MethodView<'_>> = request
        .allowed_payment_methods
        .iter()
        .map(|method| MethodView {
            r#type: method.r#type,
            parameters: &method.parameters,
            tokenization: method.tokenization_specification.as_ref(),
        })
        .collect();

    validate_methods(&methods, false)
}

pub fn validate_payment_data_request(request: &PaymentDataRequest) -> Result<()> {
    validate_api_version(request.api_version, request.api_version_minor)?;

    let methods: Vec<MethodView<'_>> = request
        .allowed_payment_methods
        .iter()
        .map(|method| MethodView {
            r#type: method.r#type,
            parameters: &method.parameters,
            tokenization: Some(&method.tokenization_specification),
        })
        .collect();

    validate_methods(&methods, true)?;
    validate_transaction_info(&request.transaction_info)
}

/// The readiness probe and the payment request of one checkout must negotiate
/// the same protocol version.
pub fn validate_paired_api_version(
    ready: &IsReadyToPayRequest,
    payment: &PaymentDataRequest,
) -> Result<()> {
    if (ready.api_version, ready.api_version_minor)
        != (payment.api_version, payment.api_version_minor)
    {
        return Err(GooglePayError::validation(
            "apiVersion",
            format!(
                "payment request uses {}.{} but readiness was checked with {}.{}",
                payment.api_version,
                payment.api_version_minor,
                ready.api_version,
                ready.api_version_minor
            ),
        ));
    }
    Ok(())
}

fn validate_api_version(major: u32, minor: u32) -> Result<()> {
    if major != SUPPORTED_API_VERSION || minor != SUPPORTED_API_VERSION_MINOR {
        return Err(GooglePayError::UnsupportedApiVersion { major, minor });
    }
    Ok(())
}

fn validate_methods(methods: &[MethodView<'_>], tokenization_required: bool) -> Result<()> {
    if methods.is_empty() {
        return Err(GooglePayError::validation(
            "allowedPaymentMethods",
            "must contain at least one payment method",
        ));
    }

    for (i, method) in methods.iter().enumerate() {
        if method.parameters.allowed_auth_methods.is_empty() {
            return Err(GooglePayError::validation(
                format!("allowedPaymentMethods[{i}].parameters.allowedAuthMethods"),
                "must not be empty",
            ));
        }
        if method.parameters.allowed_card_networks.is_empty() {
            return Err(GooglePayError::validation(
                format!("allowedPaymentMethods[{i}].parameters.allowedCardNetworks"),
                "must not be empty",
            ));
        }
    }

    for (i, method) in methods.iter().enumerate() {
        if method.r#type != PaymentMethodType::Card {
            continue;
        }
        let field = format!("allowedPaymentMethods[{i}].tokenizationSpecification");
        match method.tokenization {
            Some(spec) => validate_tokenization(&field, spec)?,
            None if tokenization_required && method.parameters.requires_sensitive_data() => {
                return Err(GooglePayError::validation(
                    field,
                    "required for CARD payment methods",
                ));
            }
            None => {}
        }
    }

    for (i, method) in methods.iter().enumerate() {
        let Some(network_parameters) = &method.parameters.card_network_parameters else {
            continue;
        };
        for (j, entry) in network_parameters.iter().enumerate() {
            if !method
                .parameters
                .allowed_card_networks
                .contains(&entry.card_network)
            {
                return Err(GooglePayError::validation(
                    format!("allowedPaymentMethods[{i}].parameters.cardNetworkParameters[{j}]"),
                    format!(
                        "{} is not listed in allowedCardNetworks",
                        entry.card_network
                    ),
                ));
            }
        }
    }

    Ok(())
}

fn validate_tokenization(field: &str, spec: &TokenizationSpecification) -> Result<()> {
    match spec {
        TokenizationSpecification::PaymentGateway { parameters } => {
            match parameters.get("gateway") {
                Some(gateway) if !gateway.is_empty() => Ok(()),
                _ => Err(GooglePayError::validation(
                    format!("{field}.parameters.gateway"),
                    "PAYMENT_GATEWAY tokenization requires a gateway",
                )),
            }
        }
        TokenizationSpecification::Direct { parameters } => {
            if parameters.protocol_version.is_empty() {
                return Err(GooglePayError::validation(
                    format!("{field}.parameters.protocolVersion"),
                    "must not be empty",
                ));
            }
            if parameters.public_key.is_empty() {
                return Err(GooglePayError::validation(
                    format!("{field}.parameters.publicKey"),
                    "must not be empty",
                ));
            }
            Ok(())
        }
    }
}

fn validate_transaction_info(info: &TransactionInfo) -> Result<()> {
    let price_expected = matches!(
        info.total_price_status,
        TotalPriceStatus::Estimated | TotalPriceStatus::Final
    );
    if price_expected && info.total_price.is_empty() {
        return Err(GooglePayError::validation(
            "transactionInfo.totalPrice",
            format!("required when totalPriceStatus is {}", info.total_price_status),
        ));
    }
    let price_regex = TOTAL_PRICE_REGEX
        .as_ref()
        .ok_or_else(|| GooglePayError::Internal("total price pattern is unavailable".to_string()))?;
    if !info.total_price.is_empty() && !price_regex.is_match(&info.total_price) {
        return Err(GooglePayError::validation(
            "transactionInfo.totalPrice",
            format!(
                "`{}` must be digits with an optional two-digit fraction",
                info.total_price
            ),
        ));
    }
    if info.checkout_option() == CheckoutOption::CompleteImmediatePurchase
        && info.total_price_status != TotalPriceStatus::Final
    {
        return Err(GooglePayError::validation(
            "transactionInfo.checkoutOption",
            "COMPLETE_IMMEDIATE_PURCHASE requires totalPriceStatus FINAL",
        ));
    }

    if !is_upper_alpha(&info.currency_code, 3) {
        return Err(GooglePayError::validation(
            "transactionInfo.currencyCode",
            "must be an ISO 4217 code",
        ));
    }
    if let Some(country_code) = &info.country_code
        && !is_upper_alpha(country_code, 2)
    {
        return Err(GooglePayError::validation(
            "transactionInfo.countryCode",
            "must be an ISO 3166-1 alpha-2 code",
        ));
    }

    Ok(())
}

fn is_upper_alpha(code: &str, len: usize) -> bool {
    code.len() == len && code.bytes().all(|b| b.is_ascii_uppercase())
}
