use super::enums::{
    CallbackIntent, CardNetwork, ErrorReason, PaymentMethodType, PaymentsErrorStatusCode,
    TokenizationType, TransactionState,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsReadyToPayResponse {
    pub result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_present: Option<bool>,
}

/// Result of a completed payment sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub api_version: u32,
    pub api_version_minor: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    pub payment_method_data: PaymentMethodData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodData {
    pub r#type: PaymentMethodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<CardInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tokenization_data: PaymentMethodTokenizationData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assurance_details: Option<AssuranceDetails>,
    pub card_network: CardNetwork,
    /// Usually the last four digits. Not guaranteed to be parseable.
    pub card_details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssuranceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_holder_authenticated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodTokenizationData {
    pub r#type: TokenizationType,
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    pub locality: String,
    pub administrative_area: String,
    pub country_code: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Reduced address handed to developer callbacks before the user confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateAddress {
    pub administrative_area: String,
    pub country_code: String,
    pub postal_code: String,
    pub locality: String,
}

impl From<&Address> for IntermediateAddress {
    fn from(address: &Address) -> Self {
        Self {
            administrative_area: address.administrative_area.clone(),
            country_code: address.country_code.clone(),
            postal_code: address.postal_code.clone(),
            locality: address.locality.clone(),
        }
    }
}

/// Error raised from an interactive callback. `message` is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDataError {
    pub reason: ErrorReason,
    pub intent: CallbackIntent,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuthorizationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<PaymentDataError>,
    pub transaction_state: TransactionState,
}

impl PaymentAuthorizationResult {
    pub fn success() -> Self {
        Self {
            error: None,
            transaction_state: TransactionState::Success,
        }
    }

    pub fn failure(error: PaymentDataError) -> Self {
        Self {
            error: Some(error),
            transaction_state: TransactionState::Error,
        }
    }
}

/// Failure status reported by the native payments client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsError {
    pub status_code: PaymentsErrorStatusCode,
    pub status_message: String,
}
