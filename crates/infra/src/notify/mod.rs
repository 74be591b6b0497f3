//! Outbound booking notifications

pub mod webhook;

pub use webhook::WebhookNotifier;
