//! Protocol data model, validation rules and the ports implementations plug into.

pub mod echo;
pub mod enums;
pub mod ports;
pub mod request;
pub mod response;
pub mod validation;
