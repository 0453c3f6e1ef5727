use crate::domain::echo::echo;
use crate::domain::enums::{
    BillingAddressFormat, CardNetwork, Environment, PaymentMethodType, PaymentsErrorStatusCode,
};
use crate::domain::ports::{
    PaymentSheetOutcome, PaymentsClient, PaymentsClientBox, PaymentsClientFactory, ReadinessReport,
};
use crate::domain::request::{
    BillingAddressParameters, CardParameters, IsReadyToPayRequest, PaymentDataRequest,
    PaymentMethodSpecification, TokenizationSpecification,
};
use crate::domain::response::{
    Address, AssuranceDetails, CardInfo, PaymentData, PaymentMethodData,
    PaymentMethodTokenizationData, PaymentsError,
};
use crate::error::{GooglePayError, Result};
use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// What the simulated user does when the payment sheet opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetDecision {
    #[default]
    Approve,
    Cancel,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxCard {
    pub network: CardNetwork,
    pub last_four: String,
    pub prepaid: bool,
    pub credit: bool,
}

impl SandboxCard {
    pub fn new(network: CardNetwork, last_four: impl Into<String>) -> Self {
        Self {
            network,
            last_four: last_four.into(),
            prepaid: false,
            credit: true,
        }
    }

    fn accepted_by(&self, parameters: &CardParameters) -> bool {
        parameters.allowed_card_networks.contains(&self.network)
            && (!self.prepaid || parameters.allow_prepaid_cards())
            && (!self.credit || parameters.allow_credit_cards())
    }
}

/// The state of the simulated Google account the sandbox pays from.
#[derive(Debug, Clone)]
pub struct SandboxWallet {
    pub device_supported: bool,
    pub cards: Vec<SandboxCard>,
    pub email: String,
    pub address: Address,
    pub decision: SheetDecision,
}

impl Default for SandboxWallet {
    fn default() -> Self {
        Self {
            device_supported: true,
            cards: vec![
                SandboxCard::new(CardNetwork::Visa, "1111"),
                SandboxCard::new(CardNetwork::Mastercard, "4444"),
            ],
            email: "buyer@example.com".to_string(),
            address: Address {
                name: Some("Test Buyer".to_string()),
                address1: Some("1600 Amphitheatre Parkway".to_string()),
                address2: None,
                address3: None,
                locality: "Mountain View".to_string(),
                administrative_area: "CA".to_string(),
                country_code: "US".to_string(),
                postal_code: "94043".to_string(),
                sorting_code: None,
                phone_number: Some("+1 650-253-0000".to_string()),
            },
            decision: SheetDecision::Approve,
        }
    }
}

/// An in-memory payments client that behaves like the TEST environment.
///
/// Uses `Arc<RwLock<SandboxWallet>>` so clones, and every client built by
/// [`SandboxPaymentsClient::factory`], observe the same wallet. It refuses to
/// serve PRODUCTION.
#[derive(Clone, Default)]
pub struct SandboxPaymentsClient {
    environment: Environment,
    wallet: Arc<RwLock<SandboxWallet>>,
}

impl SandboxPaymentsClient {
    /// Creates a TEST client with the default wallet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallet(wallet: SandboxWallet) -> Self {
        Self {
            environment: Environment::Test,
            wallet: Arc::new(RwLock::new(wallet)),
        }
    }

    /// A factory producing clients for any environment that share this wallet.
    pub fn factory(&self) -> PaymentsClientFactory {
        let wallet = Arc::clone(&self.wallet);
        Box::new(move |environment| {
            Box::new(SandboxPaymentsClient {
                environment,
                wallet: Arc::clone(&wallet),
            }) as PaymentsClientBox
        })
    }

    pub async fn set_decision(&self, decision: SheetDecision) {
        self.wallet.write().await.decision = decision;
    }

    pub async fn set_cards(&self, cards: Vec<SandboxCard>) {
        self.wallet.write().await.cards = cards;
    }

    fn production_error() -> PaymentsError {
        PaymentsError {
            status_code: PaymentsErrorStatusCode::DeveloperError,
            status_message: "The sandbox payments client only serves the TEST environment"
                .to_string(),
        }
    }
}

#[async_trait]
impl PaymentsClient for SandboxPaymentsClient {
    async fn is_ready_to_pay(&self, request: &IsReadyToPayRequest) -> Result<ReadinessReport> {
        if self.environment == Environment::Production {
            let error = Self::production_error();
            return Err(GooglePayError::PaymentsClient {
                status_code: Some(error.status_code),
                message: error.status_message,
            });
        }

        let wallet = self.wallet.read().await;
        let present = request
            .allowed_payment_methods
            .iter()
            .filter(|method| method.r#type == PaymentMethodType::Card)
            .any(|method| {
                wallet
                    .cards
                    .iter()
                    .any(|card| card.accepted_by(&method.parameters))
            });
        let result =
            wallet.device_supported && (present || !request.existing_payment_method_required());

        Ok(ReadinessReport {
            result,
            payment_method_present: Some(wallet.device_supported && present),
        })
    }

    async fn load_payment_data(&self, request: &PaymentDataRequest) -> Result<PaymentSheetOutcome> {
        if self.environment == Environment::Production {
            return Ok(PaymentSheetOutcome::Failed(Self::production_error()));
        }

        let wallet = self.wallet.read().await;
        match wallet.decision {
            SheetDecision::Approve => {}
            SheetDecision::Cancel => return Ok(PaymentSheetOutcome::Cancelled),
            SheetDecision::Fail => {
                return Ok(PaymentSheetOutcome::Failed(PaymentsError {
                    status_code: PaymentsErrorStatusCode::BuyerAccountError,
                    status_message: "Payment declined".to_string(),
                }));
            }
        }

        let selected = request
            .allowed_payment_methods
            .iter()
            .filter(|method| method.r#type == PaymentMethodType::Card)
            .find_map(|method| {
                wallet
                    .cards
                    .iter()
                    .find(|card| card.accepted_by(&method.parameters))
                    .map(|card| (method, card))
            });
        let Some((method, card)) = selected else {
            return Ok(PaymentSheetOutcome::Failed(PaymentsError {
                status_code: PaymentsErrorStatusCode::BuyerAccountError,
                status_message: "No eligible payment method".to_string(),
            }));
        };

        if let Some(parameters) = &request.shipping_address_parameters
            && request.shipping_address_required()
            && !parameters.allowed_country_codes.is_empty()
            && !parameters
                .allowed_country_codes
                .contains(&wallet.address.country_code)
        {
            return Ok(PaymentSheetOutcome::Failed(PaymentsError {
                status_code: PaymentsErrorStatusCode::BuyerAccountError,
                status_message: "No shipping address in an allowed country".to_string(),
            }));
        }

        debug!(network = %card.network, "sandbox approving payment");
        Ok(PaymentSheetOutcome::Completed(build_payment_data(
            request, method, card, &wallet,
        )?))
    }
}

fn build_payment_data(
    request: &PaymentDataRequest,
    method: &PaymentMethodSpecification,
    card: &SandboxCard,
    wallet: &SandboxWallet,
) -> Result<PaymentData> {
    let parameters = &method.parameters;
    let shipping_phone = request
        .shipping_address_parameters
        .as_ref()
        .and_then(|p| p.phone_number_required)
        .unwrap_or(false);

    let info = CardInfo {
        assurance_details: echo(
            parameters.assurance_details_required(),
            Some(AssuranceDetails {
                account_verified: Some(true),
                card_holder_authenticated: Some(false),
            }),
        ),
        card_network: card.network,
        card_details: card.last_four.clone(),
        billing_address: echo(
            parameters.billing_address_required(),
            Some(billing_address(
                &wallet.address,
                parameters.billing_address_parameters.as_ref(),
            )),
        ),
    };

    Ok(PaymentData {
        api_version: request.api_version,
        api_version_minor: request.api_version_minor,
        email: echo(request.email_required(), Some(wallet.email.clone())),
        shipping_address: echo(
            request.shipping_address_required(),
            Some(with_phone(wallet.address.clone(), shipping_phone)),
        ),
        payment_method_data: PaymentMethodData {
            r#type: method.r#type,
            info: Some(info),
            description: Some(format!("{} ending in {}", card.network, card.last_four)),
            tokenization_data: PaymentMethodTokenizationData {
                r#type: method.tokenization_specification.tokenization_type(),
                token: token_for(&method.tokenization_specification)?,
            },
        },
    })
}

fn billing_address(address: &Address, parameters: Option<&BillingAddressParameters>) -> Address {
    let format = parameters
        .map(|p| p.format)
        .unwrap_or(BillingAddressFormat::Min);
    let phone = parameters
        .and_then(|p| p.phone_number_required)
        .unwrap_or(false);

    let address = match format {
        BillingAddressFormat::Full => address.clone(),
        // MIN carries name, country and postal code only.
        BillingAddressFormat::Min => Address {
            name: address.name.clone(),
            country_code: address.country_code.clone(),
            postal_code: address.postal_code.clone(),
            phone_number: address.phone_number.clone(),
            ..Default::default()
        },
    };
    with_phone(address, phone)
}

fn with_phone(mut address: Address, phone_required: bool) -> Address {
    if !phone_required {
        address.phone_number = None;
    }
    address
}

fn token_for(spec: &TokenizationSpecification) -> Result<String> {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();

    match spec {
        TokenizationSpecification::PaymentGateway { parameters } => {
            let gateway = parameters.get("gateway").map(String::as_str).unwrap_or("gateway");
            Ok(format!("{gateway}-{nonce}"))
        }
        TokenizationSpecification::Direct { parameters } => {
            let token = serde_json::json!({
                "protocolVersion": parameters.protocol_version,
                "signature": format!("sandbox-signature-{nonce}"),
                "signedMessage": serde_json::json!({ "encryptedMessage": nonce }).to_string(),
            });
            Ok(serde_json::to_string(&token)?)
        }
    }
}
