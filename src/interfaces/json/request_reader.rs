use crate::error::{GooglePayError, Result};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads protocol requests from a JSON source.
///
/// This is the payload the platform bridge forwards verbatim, e.g. the body of
/// an `isReadyToPay` or `loadPaymentData` call.
pub struct RequestReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Deserializes one request.
    ///
    /// Malformed JSON, unknown enum values and missing required fields are
    /// problems with the request and surface as [`GooglePayError::Validation`].
    /// Only failures of the underlying source stay I/O errors.
    pub fn read<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_reader(self.reader).map_err(|error| match error.classify() {
            Category::Io => GooglePayError::Io(error.into()),
            Category::Syntax | Category::Data | Category::Eof => {
                GooglePayError::validation("request", error.to_string())
            }
        })
    }
}

pub fn read_request_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)?;
    RequestReader::new(file).read()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{CardAuthMethod, TokenizationType};
    use crate::domain::request::{IsReadyToPayRequest, PaymentDataRequest};
    use crate::error::ErrorKind;

    #[test]
    fn test_reads_payment_data_request() {
        let data = r#"{
            "apiVersion": 2,
            "apiVersionMinor": 0,
            "merchantInfo": { "merchantName": "Example Merchant" },
            "allowedPaymentMethods": [{
                "type": "CARD",
                "parameters": {
                    "allowedAuthMethods": ["PAN_ONLY", "CRYPTOGRAM_3DS"],
                    "allowedCardNetworks": ["AMEX", "DISCOVER", "INTERAC", "JCB", "MASTERCARD", "MIR", "VISA"]
                },
                "tokenizationSpecification": {
                    "type": "PAYMENT_GATEWAY",
                    "parameters": { "gateway": "example", "gatewayMerchantId": "exampleGatewayMerchantId" }
                }
            }],
            "transactionInfo": { "totalPriceStatus": "FINAL", "totalPrice": "12.34", "currencyCode": "USD" }
        }"#;

        let request: PaymentDataRequest = RequestReader::new(data.as_bytes()).read().unwrap();
        let method = &request.allowed_payment_methods[0];
        assert_eq!(
            method.parameters.allowed_auth_methods,
            vec![CardAuthMethod::PanOnly, CardAuthMethod::Cryptogram3ds]
        );
        assert_eq!(
            method.tokenization_specification.tokenization_type(),
            TokenizationType::PaymentGateway
        );
        assert_eq!(request.transaction_info.total_price, "12.34");
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        let data = r#"{
            "apiVersion": 2,
            "apiVersionMinor": 0,
            "allowedPaymentMethods": [{
                "type": "CARD",
                "parameters": { "allowedAuthMethods": ["PAN_ONLY"], "allowedCardNetworks": ["DINERS"] }
            }]
        }"#;

        let err = RequestReader::new(data.as_bytes())
            .read::<IsReadyToPayRequest>()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("DINERS"));
    }

    #[test]
    fn test_incomplete_request_is_a_validation_error() {
        let err = RequestReader::new(r#"{"apiVersion":2,"apiVersionMinor":0}"#.as_bytes())
            .read::<IsReadyToPayRequest>()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            err,
            GooglePayError::Validation(ref e) if e.reason.contains("allowedPaymentMethods")
        ));

        let negative = r#"{"apiVersion":-1,"apiVersionMinor":0,"allowedPaymentMethods":[]}"#;
        let err = RequestReader::new(negative.as_bytes())
            .read::<IsReadyToPayRequest>()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let truncated = r#"{"apiVersion":2,"#;
        let err = RequestReader::new(truncated.as_bytes())
            .read::<IsReadyToPayRequest>()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_missing_file() {
        let result: Result<IsReadyToPayRequest> = read_request_file("does/not/exist.json");
        assert!(matches!(result, Err(GooglePayError::Io(_))));
    }
}
