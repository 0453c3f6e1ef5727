//! Application layer: the delegating plugin and the registration shim.
//!
//! `GooglePay` validates requests and forwards them to a `PaymentsClient`
//! chosen per environment. `PluginRegistry` decides, once per process, which
//! `GooglePayPlugin` implementation the application talks to.

pub mod plugin;
pub mod registry;
