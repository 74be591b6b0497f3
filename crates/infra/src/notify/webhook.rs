//! Webhook implementation of the booking notification sink.
//!
//! Delivery is a single bounded attempt. Callers treat failures as
//! best-effort and never retry, so the client here is built with one attempt
//! and the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use slotwise_core::NotificationSink;
use slotwise_domain::{BookingNotification, NotificationConfig, Result, SlotwiseError};
use tracing::{debug, instrument};
use url::Url;

use crate::http::HttpClient;

#[derive(Debug)]
pub struct WebhookNotifier {
    client: HttpClient,
    endpoint: Option<Url>,
}

impl WebhookNotifier {
    /// Build a notifier from configuration. A missing webhook URL produces a
    /// disabled notifier whose deliveries are silent no-ops.
    pub fn new(config: &NotificationConfig) -> Result<Self> {
        let endpoint = match &config.webhook_url {
            Some(raw) => Some(Url::parse(raw).map_err(|e| {
                SlotwiseError::Config(format!("invalid webhook url {raw:?}: {e}"))
            })?),
            None => None,
        };

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(1)
            .build()?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    #[instrument(skip(self, notification), fields(guest = %notification.guest_email))]
    async fn notify_booked(&self, notification: BookingNotification) -> Result<()> {
        let Some(endpoint) = &self.endpoint else {
            debug!("webhook endpoint not configured, dropping notification");
            return Ok(());
        };

        let request = self.client.request(Method::POST, endpoint.clone()).json(&notification);
        let response = self.client.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlotwiseError::Network(format!(
                "webhook returned status {status}"
            )));
        }

        Ok(())
    }
}
