//! Adapters implementing the domain ports.

pub mod sandbox;
pub mod web;
