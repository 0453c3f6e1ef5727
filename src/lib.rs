//! Typed contract for requesting Google Pay payment data.
//!
//! Requests are validated here and handed to a platform payments client; the
//! web platform gets a stub that reports every operation as not implemented.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
