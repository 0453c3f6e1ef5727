//! Closed string-valued domains of the Google Pay protocol.
//!
//! Each enum serializes to its wire spelling and rejects unknown values, so a
//! successful deserialization doubles as the membership check.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(ValidationError::new(
                        stringify!($name),
                        format!("unknown value `{other}`"),
                    )),
                }
            }
        }
    };
}

wire_enum! {
    PaymentMethodType {
        Card => "CARD",
        Paypal => "PAYPAL",
    }
}

wire_enum! {
    CardNetwork {
        Amex => "AMEX",
        Discover => "DISCOVER",
        Electron => "ELECTRON",
        Elo => "ELO",
        EloDebit => "ELO_DEBIT",
        Interac => "INTERAC",
        Jcb => "JCB",
        Maestro => "MAESTRO",
        Mastercard => "MASTERCARD",
        Mir => "MIR",
        Visa => "VISA",
    }
}

wire_enum! {
    CardAuthMethod {
        PanOnly => "PAN_ONLY",
        Cryptogram3ds => "CRYPTOGRAM_3DS",
    }
}

impl CardAuthMethod {
    /// Whether credentials returned for this method must go through tokenization.
    pub fn requires_sensitive_data(&self) -> bool {
        match self {
            CardAuthMethod::PanOnly | CardAuthMethod::Cryptogram3ds => true,
        }
    }
}

wire_enum! {
    TokenizationType {
        PaymentGateway => "PAYMENT_GATEWAY",
        Direct => "DIRECT",
    }
}

wire_enum! {
    #[derive(Default)]
    Environment {
        Production => "PRODUCTION",
        #[default]
        Test => "TEST",
    }
}

wire_enum! {
    ErrorReason {
        ShippingAddressInvalid => "SHIPPING_ADDRESS_INVALID",
        ShippingAddressUnserviceable => "SHIPPING_ADDRESS_UNSERVICEABLE",
        ShippingOptionInvalid => "SHIPPING_OPTION_INVALID",
        OfferInvalid => "OFFER_INVALID",
        PaymentDataInvalid => "PAYMENT_DATA_INVALID",
        OtherError => "OTHER_ERROR",
    }
}

wire_enum! {
    CallbackIntent {
        Offer => "OFFER",
        ShippingAddress => "SHIPPING_ADDRESS",
        ShippingOption => "SHIPPING_OPTION",
        PaymentAuthorization => "PAYMENT_AUTHORIZATION",
        PaymentMethod => "PAYMENT_METHOD",
    }
}

wire_enum! {
    CallbackTrigger {
        Offer => "OFFER",
        ShippingAddress => "SHIPPING_ADDRESS",
        ShippingOption => "SHIPPING_OPTION",
        Initialize => "INITIALIZE",
    }
}

wire_enum! {
    TransactionState {
        Success => "SUCCESS",
        Error => "ERROR",
    }
}

wire_enum! {
    #[derive(Default)]
    CheckoutOption {
        #[default]
        Default => "DEFAULT",
        CompleteImmediatePurchase => "COMPLETE_IMMEDIATE_PURCHASE",
    }
}

wire_enum! {
    BillingAddressFormat {
        Min => "MIN",
        Full => "FULL",
    }
}

wire_enum! {
    TotalPriceStatus {
        NotCurrentlyKnown => "NOT_CURRENTLY_KNOWN",
        Estimated => "ESTIMATED",
        Final => "FINAL",
    }
}

wire_enum! {
    DisplayItemType {
        LineItem => "LINE_ITEM",
        Subtotal => "SUBTOTAL",
        Tax => "TAX",
        Discount => "DISCOUNT",
        ShippingOption => "SHIPPING_OPTION",
    }
}

wire_enum! {
    DisplayItemStatus {
        Final => "FINAL",
        Pending => "PENDING",
    }
}

wire_enum! {
    PaymentsErrorStatusCode {
        BuyerAccountError => "BUYER_ACCOUNT_ERROR",
        DeveloperError => "DEVELOPER_ERROR",
        MerchantAccountError => "MERCHANT_ACCOUNT_ERROR",
        InternalError => "INTERNAL_ERROR",
    }
}
