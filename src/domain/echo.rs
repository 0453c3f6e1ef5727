//! The "required implies present, not required implies absent" rule.
//!
//! Every optional response field is governed by a `*Required` flag on the
//! request. Builders go through [`echo`] and verifiers through [`check_echo`]
//! so the rule lives in one place.

use super::enums::PaymentMethodType;
use super::request::{IsReadyToPayRequest, PaymentDataRequest, PaymentMethodSpecification};
use super::response::{CardInfo, IsReadyToPayResponse, PaymentData};
use crate::error::{GooglePayError, Result};

/// Keeps `value` only when the field was requested.
///
/// A requested field with no value stays `None`; [`check_echo`] reports it.
pub fn echo<T>(required: bool, value: Option<T>) -> Option<T> {
    if required { value } else { None }
}

pub fn check_echo<T>(field: &str, required: bool, value: Option<&T>) -> Result<()> {
    match (required, value.is_some()) {
        (true, false) => Err(GooglePayError::ContractViolation(format!(
            "{field} was required but is missing"
        ))),
        (false, true) => Err(GooglePayError::ContractViolation(format!(
            "{field} was not requested but is present"
        ))),
        _ => Ok(()),
    }
}

pub fn conform_ready_response(
    request: &IsReadyToPayRequest,
    result: bool,
    payment_method_present: Option<bool>,
) -> IsReadyToPayResponse {
    let required = request.existing_payment_method_required();
    IsReadyToPayResponse {
        result,
        // The probe always answers this question when asked, even on a negative result.
        payment_method_present: echo(required, Some(payment_method_present.unwrap_or(false))),
    }
}

/// Checks a completed payment against the request it answers.
pub fn verify_payment_data(request: &PaymentDataRequest, data: &PaymentData) -> Result<()> {
    if (data.api_version, data.api_version_minor)
        != (request.api_version, request.api_version_minor)
    {
        return Err(GooglePayError::ContractViolation(format!(
            "response api version {}.{} does not echo request {}.{}",
            data.api_version, data.api_version_minor, request.api_version, request.api_version_minor
        )));
    }

    check_echo("email", request.email_required(), data.email.as_ref())?;
    if data.email.as_deref() == Some("") {
        return Err(GooglePayError::ContractViolation(
            "email is present but empty".to_string(),
        ));
    }
    check_echo(
        "shippingAddress",
        request.shipping_address_required(),
        data.shipping_address.as_ref(),
    )?;

    let method_data = &data.payment_method_data;
    let info = match method_data.r#type {
        PaymentMethodType::Card => Some(method_data.info.as_ref().ok_or_else(|| {
            GooglePayError::ContractViolation("CARD payment is missing card info".to_string())
        })?),
        PaymentMethodType::Paypal => None,
    };

    let tokenization = method_data.tokenization_data.r#type;
    let network = info.map(|info| info.card_network);
    let candidates: Vec<&PaymentMethodSpecification> = request
        .matching_methods(method_data.r#type, tokenization, network)
        .collect();
    if candidates.is_empty() {
        return Err(GooglePayError::ContractViolation(format!(
            "no allowed {} method accepts {} tokenization{}",
            method_data.r#type,
            tokenization,
            network.map(|n| format!(" for {n}")).unwrap_or_default()
        )));
    }

    let Some(info) = info else {
        return Ok(());
    };
    // Any matching method whose echo flags the card info satisfies will do.
    let mut outcome = Ok(());
    for method in candidates {
        outcome = check_card_info(method, info);
        if outcome.is_ok() {
            break;
        }
    }
    outcome
}

fn check_card_info(method: &PaymentMethodSpecification, info: &CardInfo) -> Result<()> {
    check_echo(
        "info.assuranceDetails",
        method.parameters.assurance_details_required(),
        info.assurance_details.as_ref(),
    )?;
    check_echo(
        "info.billingAddress",
        method.parameters.billing_address_required(),
        info.billing_address.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{CardAuthMethod, CardNetwork, TokenizationType, TotalPriceStatus};
    use crate::domain::request::{
        CardParameters, MerchantInfo, TokenizationSpecification, TransactionInfo,
    };
    use crate::domain::response::{
        AssuranceDetails, PaymentMethodData, PaymentMethodTokenizationData,
    };

    fn card_method(
        networks: Vec<CardNetwork>,
        tokenization: TokenizationSpecification,
    ) -> PaymentMethodSpecification {
        PaymentMethodSpecification {
            r#type: PaymentMethodType::Card,
            parameters: CardParameters::new(vec![CardAuthMethod::PanOnly], networks),
            tokenization_specification: tokenization,
        }
    }

    /// JCB through a gateway first, VISA with direct tokenization second.
    fn two_card_request() -> PaymentDataRequest {
        PaymentDataRequest {
            api_version: 2,
            api_version_minor: 0,
            merchant_info: MerchantInfo::default(),
            transaction_info: TransactionInfo {
                transaction_id: None,
                currency_code: "USD".to_string(),
                country_code: None,
                total_price: "10.45".to_string(),
                total_price_label: None,
                total_price_status: TotalPriceStatus::Final,
                checkout_option: None,
            },
            allowed_payment_methods: vec![
                card_method(
                    vec![CardNetwork::Jcb],
                    TokenizationSpecification::gateway([("gateway", "example")]),
                ),
                card_method(
                    vec![CardNetwork::Visa],
                    TokenizationSpecification::direct("ECv2", "key"),
                ),
            ],
            email_required: None,
            shipping_address_required: None,
            shipping_address_parameters: None,
        }
    }

    fn card_payment(network: CardNetwork, tokenization: TokenizationType) -> PaymentData {
        PaymentData {
            api_version: 2,
            api_version_minor: 0,
            email: None,
            shipping_address: None,
            payment_method_data: PaymentMethodData {
                r#type: PaymentMethodType::Card,
                info: Some(CardInfo {
                    assurance_details: None,
                    card_network: network,
                    card_details: "1111".to_string(),
                    billing_address: None,
                }),
                description: None,
                tokenization_data: PaymentMethodTokenizationData {
                    r#type: tokenization,
                    token: "tok".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_payment_matches_any_allowed_card_method() {
        let request = two_card_request();
        assert!(
            verify_payment_data(
                &request,
                &card_payment(CardNetwork::Visa, TokenizationType::Direct)
            )
            .is_ok()
        );
        assert!(
            verify_payment_data(
                &request,
                &card_payment(CardNetwork::Jcb, TokenizationType::PaymentGateway)
            )
            .is_ok()
        );
    }

    #[test]
    fn test_payment_without_matching_method_is_rejected() {
        let request = two_card_request();
        for (network, tokenization) in [
            (CardNetwork::Visa, TokenizationType::PaymentGateway),
            (CardNetwork::Jcb, TokenizationType::Direct),
            (CardNetwork::Mastercard, TokenizationType::Direct),
        ] {
            assert!(
                matches!(
                    verify_payment_data(&request, &card_payment(network, tokenization)),
                    Err(GooglePayError::ContractViolation(_))
                ),
                "{network} with {tokenization}"
            );
        }
    }

    #[test]
    fn test_card_echo_flags_come_from_the_matched_method() {
        let mut request = two_card_request();
        request.allowed_payment_methods[1]
            .parameters
            .assurance_details_required = Some(true);

        let mut payment = card_payment(CardNetwork::Visa, TokenizationType::Direct);
        assert!(matches!(
            verify_payment_data(&request, &payment),
            Err(GooglePayError::ContractViolation(_))
        ));

        if let Some(info) = payment.payment_method_data.info.as_mut() {
            info.assurance_details = Some(AssuranceDetails {
                account_verified: Some(true),
                card_holder_authenticated: Some(false),
            });
        }
        assert!(verify_payment_data(&request, &payment).is_ok());

        // The JCB method did not ask for assurance details.
        let mut jcb = card_payment(CardNetwork::Jcb, TokenizationType::PaymentGateway);
        jcb.payment_method_data.info = payment.payment_method_data.info.clone().map(|info| {
            CardInfo {
                card_network: CardNetwork::Jcb,
                ..info
            }
        });
        assert!(matches!(
            verify_payment_data(&request, &jcb),
            Err(GooglePayError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_paypal_payment_needs_no_card_info() {
        let mut request = two_card_request();
        request.allowed_payment_methods.push(PaymentMethodSpecification {
            r#type: PaymentMethodType::Paypal,
            parameters: CardParameters::new(vec![CardAuthMethod::PanOnly], vec![CardNetwork::Visa]),
            tokenization_specification: TokenizationSpecification::gateway([("gateway", "paypal")]),
        });

        let mut payment = card_payment(CardNetwork::Visa, TokenizationType::PaymentGateway);
        payment.payment_method_data.r#type = PaymentMethodType::Paypal;
        payment.payment_method_data.info = None;
        assert!(verify_payment_data(&request, &payment).is_ok());

        request.allowed_payment_methods.pop();
        assert!(matches!(
            verify_payment_data(&request, &payment),
            Err(GooglePayError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_echo_keeps_requested_values_only() {
        assert_eq!(echo(true, Some(1)), Some(1));
        assert_eq!(echo(false, Some(1)), None);
        assert_eq!(echo::<i32>(true, None), None);
    }

    #[test]
    fn test_check_echo() {
        assert!(check_echo("email", true, Some(&"a@b.c")).is_ok());
        assert!(check_echo::<&str>("email", false, None).is_ok());
        assert!(matches!(
            check_echo::<&str>("email", true, None),
            Err(GooglePayError::ContractViolation(_))
        ));
        assert!(matches!(
            check_echo("email", false, Some(&"a@b.c")),
            Err(GooglePayError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_ready_response_presence_follows_flag() {
        let mut request = IsReadyToPayRequest {
            api_version: 2,
            api_version_minor: 0,
            allowed_payment_methods: vec![],
            existing_payment_method_required: None,
        };
        let response = conform_ready_response(&request, true, Some(true));
        assert_eq!(response.payment_method_present, None);

        request.existing_payment_method_required = Some(true);
        let response = conform_ready_response(&request, false, None);
        assert!(!response.result);
        assert_eq!(response.payment_method_present, Some(false));
    }
}
