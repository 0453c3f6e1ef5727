use super::plugin::GooglePay;
use crate::domain::ports::{GooglePayPluginBox, PaymentsClientFactory};
use crate::infrastructure::web::GooglePayWeb;
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Web,
}

impl Platform {
    pub fn is_native(&self) -> bool {
        matches!(self, Platform::Android | Platform::Ios)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
        })
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "web" => Ok(Platform::Web),
            other => Err(format!("unknown platform `{other}`")),
        }
    }
}

/// Chooses the plugin implementation once, at startup.
///
/// Native platforms get a [`GooglePay`] backed by the registered payments
/// client factory. The web, or a native platform with nothing registered,
/// gets the [`GooglePayWeb`] stub.
#[derive(Default)]
pub struct PluginRegistry {
    native: Option<PaymentsClientFactory>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_native(mut self, factory: PaymentsClientFactory) -> Self {
        self.native = Some(factory);
        self
    }

    pub fn register(self, platform: Platform) -> GooglePayPluginBox {
        match self.native {
            Some(factory) if platform.is_native() => {
                info!(%platform, "registering native Google Pay implementation");
                Box::new(GooglePay::new(factory))
            }
            _ => {
                info!(%platform, "registering web Google Pay implementation");
                Box::new(GooglePayWeb::new())
            }
        }
    }
}
