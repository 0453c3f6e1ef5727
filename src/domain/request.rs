use super::enums::{
    BillingAddressFormat, CardAuthMethod, CardNetwork, CheckoutOption, Environment,
    PaymentMethodType, TokenizationType, TotalPriceStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Options consumed once by `initialize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

impl PaymentOptions {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment: Some(environment),
        }
    }

    /// The environment to target; TEST unless stated otherwise.
    pub fn effective_environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsReadyToPayRequest {
    pub api_version: u32,
    pub api_version_minor: u32,
    pub allowed_payment_methods: Vec<IsReadyToPayPaymentMethodSpecification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_payment_method_required: Option<bool>,
}

impl IsReadyToPayRequest {
    pub fn existing_payment_method_required(&self) -> bool {
        self.existing_payment_method_required.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDataRequest {
    pub api_version: u32,
    pub api_version_minor: u32,
    pub merchant_info: MerchantInfo,
    pub transaction_info: TransactionInfo,
    pub allowed_payment_methods: Vec<PaymentMethodSpecification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address_parameters: Option<ShippingAddressParameters>,
}

impl PaymentDataRequest {
    pub fn email_required(&self) -> bool {
        self.email_required.unwrap_or(false)
    }

    pub fn shipping_address_required(&self) -> bool {
        self.shipping_address_required.unwrap_or(false)
    }

    /// The method specifications a response of the given shape could answer.
    ///
    /// A request may list several methods of one type, so a method matches
    /// only when its tokenization type agrees and, for cards, its allowed
    /// networks include `network`.
    pub fn matching_methods(
        &self,
        r#type: PaymentMethodType,
        tokenization: TokenizationType,
        network: Option<CardNetwork>,
    ) -> impl Iterator<Item = &PaymentMethodSpecification> {
        self.allowed_payment_methods.iter().filter(move |method| {
            method.r#type == r#type
                && method.tokenization_specification.tokenization_type() == tokenization
                && network.is_none_or(|network| {
                    method.parameters.allowed_card_networks.contains(&network)
                })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodSpecification {
    pub r#type: PaymentMethodType,
    pub parameters: CardParameters,
    pub tokenization_specification: TokenizationSpecification,
}

/// Readiness-check variant of [`PaymentMethodSpecification`]; tokenization is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsReadyToPayPaymentMethodSpecification {
    pub r#type: PaymentMethodType,
    pub parameters: CardParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenization_specification: Option<TokenizationSpecification>,
}

impl From<PaymentMethodSpecification> for IsReadyToPayPaymentMethodSpecification {
    fn from(spec: PaymentMethodSpecification) -> Self {
        Self {
            r#type: spec.r#type,
            parameters: spec.parameters,
            tokenization_specification: Some(spec.tokenization_specification),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParameters {
    pub allowed_auth_methods: Vec<CardAuthMethod>,
    pub allowed_card_networks: Vec<CardNetwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_prepaid_cards: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_credit_cards: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assurance_details_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address_parameters: Option<BillingAddressParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_network_parameters: Option<Vec<CardNetworkParameters>>,
}

impl CardParameters {
    pub fn new(
        allowed_auth_methods: Vec<CardAuthMethod>,
        allowed_card_networks: Vec<CardNetwork>,
    ) -> Self {
        Self {
            allowed_auth_methods,
            allowed_card_networks,
            allow_prepaid_cards: None,
            allow_credit_cards: None,
            assurance_details_required: None,
            billing_address_required: None,
            billing_address_parameters: None,
            card_network_parameters: None,
        }
    }

    pub fn allow_prepaid_cards(&self) -> bool {
        self.allow_prepaid_cards.unwrap_or(true)
    }

    pub fn allow_credit_cards(&self) -> bool {
        self.allow_credit_cards.unwrap_or(true)
    }

    pub fn assurance_details_required(&self) -> bool {
        self.assurance_details_required.unwrap_or(false)
    }

    pub fn billing_address_required(&self) -> bool {
        self.billing_address_required.unwrap_or(false)
    }

    pub fn requires_sensitive_data(&self) -> bool {
        self.allowed_auth_methods
            .iter()
            .any(CardAuthMethod::requires_sensitive_data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardNetworkParameters {
    pub card_network: CardNetwork,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquirer_bin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquirer_merchant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddressParameters {
    pub format: BillingAddressFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number_required: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressParameters {
    pub allowed_country_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number_required: Option<bool>,
}

/// How the selected credential is tokenized before it is handed back.
///
/// Tagged by `type` on the wire:
///
/// ```json
/// { "type": "PAYMENT_GATEWAY", "parameters": { "gateway": "example", "gatewayMerchantId": "id" } }
/// { "type": "DIRECT", "parameters": { "protocolVersion": "ECv2", "publicKey": "BOdo..." } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenizationSpecification {
    PaymentGateway {
        /// Gateway-defined keys; `gateway` is always expected.
        parameters: BTreeMap<String, String>,
    },
    Direct {
        parameters: DirectTokenizationParameters,
    },
}

impl TokenizationSpecification {
    pub fn gateway<I, K, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::PaymentGateway {
            parameters: parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn direct(protocol_version: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self::Direct {
            parameters: DirectTokenizationParameters {
                protocol_version: protocol_version.into(),
                public_key: public_key.into(),
            },
        }
    }

    pub fn tokenization_type(&self) -> TokenizationType {
        match self {
            Self::PaymentGateway { .. } => TokenizationType::PaymentGateway,
            Self::Direct { .. } => TokenizationType::Direct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectTokenizationParameters {
    pub protocol_version: String,
    pub public_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub currency_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Decimal string, e.g. `"10.45"`. May be empty while the price is not yet known.
    #[serde(default)]
    pub total_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price_label: Option<String>,
    pub total_price_status: TotalPriceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_option: Option<CheckoutOption>,
}

impl TransactionInfo {
    pub fn checkout_option(&self) -> CheckoutOption {
        self.checkout_option.unwrap_or_default()
    }

    /// The total as a decimal, if one was given.
    pub fn total_price_amount(&self) -> Option<Decimal> {
        if self.total_price.is_empty() {
            return None;
        }
        Decimal::from_str(&self.total_price).ok()
    }
}
